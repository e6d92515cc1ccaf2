//! Command-line argument parsing for the lander runner.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Lander command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "lander", about = "Arcade planet lander (headless simulation)")]
pub struct CliArgs {
    /// Seed for level generation.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Level to start on.
    #[arg(long)]
    pub level: Option<u32>,

    /// Number of ticks to simulate.
    #[arg(long)]
    pub ticks: Option<u64>,

    /// RON flight script of timed control events.
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.session.seed = Some(seed);
        }
        if let Some(level) = args.level {
            self.session.start_level = level.max(1);
        }
        if let Some(ticks) = args.ticks {
            self.session.max_ticks = ticks;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_args() -> CliArgs {
        CliArgs {
            seed: None,
            level: None,
            ticks: None,
            script: None,
            log_level: None,
            config: None,
        }
    }

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            seed: Some(99),
            ticks: Some(600),
            log_level: Some("debug".to_string()),
            ..no_args()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.session.seed, Some(99));
        assert_eq!(config.session.max_ticks, 600);
        assert_eq!(config.debug.log_level, "debug");
        // Non-overridden fields retain defaults
        assert_eq!(config.session.start_level, 1);
    }

    #[test]
    fn test_cli_level_zero_clamps_to_first_level() {
        let mut config = Config::default();
        let args = CliArgs {
            level: Some(0),
            ..no_args()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.session.start_level, 1);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&no_args());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from(["lander", "--seed", "5", "--ticks", "10"]);
        assert_eq!(args.seed, Some(5));
        assert_eq!(args.ticks, Some(10));
        assert!(args.script.is_none());
    }
}
