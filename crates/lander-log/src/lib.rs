//! Structured logging and tracing for the lander game.
//!
//! Console output with uptime timestamps and module paths, plus JSON file
//! logging in debug builds for replaying what happened in a session. The log
//! level comes from `RUST_LOG` when set, otherwise from the configuration.

use lander_config::Config;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config provide one.
pub const DEFAULT_FILTER: &str = "info";

/// File name of the JSON log written in debug builds.
pub const LOG_FILE_NAME: &str = "lander.log";

/// Initialize the tracing subscriber.
///
/// Sets up:
/// - console output with uptime, module path and level
/// - JSON file logging when `debug_build` is set and a log directory is given
///   (falls back to `config.debug.log_dir` when `log_dir` is `None`)
/// - filtering from `RUST_LOG`, else `config.debug.log_level`
///
/// # Examples
///
/// ```no_run
/// use lander_log::init_logging;
/// use lander_config::Config;
///
/// let config = Config::default();
/// init_logging(None, cfg!(debug_assertions), Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let filter_str = resolve_filter(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    let log_dir = log_dir
        .map(Path::to_path_buf)
        .or_else(|| config.and_then(|c| c.debug.log_dir.clone()));

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(&log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_file_path(&log_dir))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// Filter string taken from the config, or [`DEFAULT_FILTER`].
pub fn resolve_filter(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => {
            config.debug.log_level.clone()
        }
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Path of the JSON log file inside `log_dir`.
pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(LOG_FILE_NAME)
}

/// `EnvFilter` built from [`DEFAULT_FILTER`].
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader};
    use std::sync::Mutex;

    #[test]
    fn test_default_log_level() {
        let filter = default_env_filter();
        assert!(format!("{filter}").contains("info"));
    }

    #[test]
    fn test_filter_from_config() {
        let mut config = Config::default();
        config.debug.log_level = "debug,lander_physics=trace".to_string();
        assert_eq!(resolve_filter(Some(&config)), "debug,lander_physics=trace");
    }

    #[test]
    fn test_blank_config_level_falls_back() {
        let mut config = Config::default();
        config.debug.log_level = "  ".to_string();
        assert_eq!(resolve_filter(Some(&config)), DEFAULT_FILTER);
        assert_eq!(resolve_filter(None), DEFAULT_FILTER);
    }

    #[test]
    fn test_env_filter_parsing() {
        let valid_filters = [
            "info",
            "debug,lander_game=trace",
            "warn,lander_physics=debug,lander_input=trace",
            "error",
        ];

        for filter_str in &valid_filters {
            let result = EnvFilter::try_from(*filter_str);
            assert!(result.is_ok(), "Failed to parse filter: {filter_str}");
        }
    }

    #[test]
    fn test_log_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = log_file_path(dir.path());
        assert_eq!(path.file_name().unwrap(), LOG_FILE_NAME);
        assert_eq!(path.parent().unwrap(), dir.path());
    }

    #[test]
    fn test_json_layer_writes_parseable_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = log_file_path(dir.path());
        let file = std::fs::File::create(&path).unwrap();

        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .json(),
        );
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(index = 3, "level started");
        });

        let reader = BufReader::new(std::fs::File::open(&path).unwrap());
        let lines: Vec<String> = reader.lines().map(Result::unwrap).collect();
        assert_eq!(lines.len(), 1);
        let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(value["fields"]["message"], "level started");
        assert_eq!(value["fields"]["index"], 3);
    }
}
