//! Game error types.

use std::path::PathBuf;

use lander_config::ConfigError;
use lander_physics::PhysicsError;

/// Errors from building or regenerating a level.
///
/// Crashes, bad landings and losing are not errors; they are session
/// events.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The configuration produced an invalid planet, ship, or asteroid.
    #[error("failed to build level: {0}")]
    Physics(#[from] PhysicsError),
}

/// Errors loading a flight script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("failed to read flight script {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse flight script: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Anything that stops the headless runner.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Script(#[from] ScriptError),
}
