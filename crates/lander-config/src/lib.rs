//! Configuration system for the lander game.
//!
//! Flight-model tuning, landing rules, level generation and session settings
//! persist to disk as a RON file. Supports CLI overrides via clap, hot-reload
//! detection, and forward/backward compatible serialization.

mod cli;
mod config;
mod error;
pub mod tuning;

pub use cli::CliArgs;
pub use config::{
    AsteroidConfig, Config, DebugConfig, LevelConfig, PlanetConfig, SessionConfig, ShipConfig,
    default_config_dir,
};
pub use error::ConfigError;
