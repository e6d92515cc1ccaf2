//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::tuning;

/// Top-level game configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Ship flight model.
    pub ship: ShipConfig,
    /// Planet size and landing rules.
    pub planet: PlanetConfig,
    /// Per-level difficulty scaling.
    pub level: LevelConfig,
    /// Asteroid field generation.
    pub asteroids: AsteroidConfig,
    /// Session / runner settings.
    pub session: SessionConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Ship flight-model tuning. All rates are per simulation tick.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShipConfig {
    /// Angular acceleration while a rotate intent is active.
    pub rotation_accel: f64,
    /// Angular rate clamp on every axis.
    pub rotation_max: f64,
    /// Thrust acceleration magnitude.
    pub thrust_accel: f64,
    /// Speed at or below which braking stops the ship outright.
    pub brake_tolerance: f64,
    /// Fuel burned per tick of forward/backward thrust.
    pub thrust_fuel_loss: f64,
    /// Fuel burned per tick of braking.
    pub brake_fuel_loss: f64,
    /// Hit points at spawn.
    pub max_health: u32,
    /// Fuel at spawn and after a refill.
    pub max_fuel: f64,
    /// Bounding-sphere radius of the ship mesh, supplied by the asset loader.
    pub mesh_radius: f64,
}

/// Planet size and landing judgment thresholds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetConfig {
    /// Planet radius.
    pub radius: f64,
    /// Fastest acceptable touchdown speed (inclusive).
    pub max_landing_speed: f64,
    /// Largest acceptable approach angle in radians (inclusive).
    pub landing_angle_tolerance: f64,
    /// Distance above the surface where a ship is placed after a bad landing.
    pub eject_margin: f64,
}

/// Difficulty scaling as a function of the level index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LevelConfig {
    /// Minimum distance from spawn to planet center.
    pub base_distance: f64,
    /// Added to the maximum planet distance per level.
    pub distance_step: f64,
    /// Lower bound of the landing-plane point's relative radius on level 1.
    pub landing_radius_min: f64,
    /// Upper bound of the landing-plane point's relative radius on level 1.
    pub landing_radius_max: f64,
    /// Outward shift of the landing plane per level after the first.
    pub landing_shift_per_level: f64,
    /// Cap on the cumulative landing-plane shift.
    pub landing_shift_cap: f64,
    /// Minimum asteroid count.
    pub base_asteroids: u32,
    /// Added to the maximum asteroid count per level.
    pub asteroids_per_level: u32,
}

/// Asteroid placement along the spawn→planet line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AsteroidConfig {
    /// Bounding-sphere radius of the asteroid mesh.
    pub mesh_radius: f64,
    /// Nearest point on the spawn→planet line, as a fraction of its length.
    pub min_fraction: f64,
    /// Farthest point on the spawn→planet line, as a fraction of its length.
    pub max_fraction: f64,
    /// Maximum per-axis positional noise.
    pub max_noise: f64,
    /// Maximum cosmetic spin in radians per tick.
    pub max_spin: f64,
}

/// Session runner settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// RNG seed for level generation. `None` picks a random seed.
    pub seed: Option<u64>,
    /// Level to start on.
    pub start_level: u32,
    /// Number of ticks the headless runner simulates.
    pub max_ticks: u64,
    /// Acknowledge win/lose screens automatically (headless runs).
    pub auto_acknowledge: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Directory for JSON log files in debug builds.
    pub log_dir: Option<PathBuf>,
}

// --- Default implementations ---

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            rotation_accel: tuning::RACC,
            rotation_max: tuning::RMAX,
            thrust_accel: tuning::PACC,
            brake_tolerance: tuning::TOL,
            thrust_fuel_loss: tuning::THRUST_LOSS,
            brake_fuel_loss: tuning::THRUST_OPP_LOSS,
            max_health: tuning::HEALTH,
            max_fuel: tuning::FUEL,
            mesh_radius: 3.0,
        }
    }
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            radius: 20.0,
            max_landing_speed: tuning::MAX_ACCEPTABLE_LANDING_VELOCITY,
            landing_angle_tolerance: tuning::LANDING_ANGLE_TOLERANCE,
            eject_margin: tuning::EJECT_MARGIN,
        }
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            base_distance: 200.0,
            distance_step: 100.0,
            landing_radius_min: 0.45,
            landing_radius_max: 0.65,
            landing_shift_per_level: 1.0 / 50.0,
            landing_shift_cap: 0.3,
            base_asteroids: 4,
            asteroids_per_level: 2,
        }
    }
}

impl Default for AsteroidConfig {
    fn default() -> Self {
        Self {
            mesh_radius: 3.0,
            min_fraction: 0.15,
            max_fraction: 0.85,
            max_noise: 10.0,
            max_spin: 0.02,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            start_level: 1,
            max_ticks: 36_000,
            auto_acknowledge: true,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

/// Platform config directory for the game (`<config_dir>/lander`).
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lander"))
}

// --- Load / Save / Reload ---

const CONFIG_FILE_NAME: &str = "config.ron";

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl Config {
    /// Reads `config.ron` from `config_dir`, writing the defaults there first
    /// if the file does not exist yet.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Wrote default config to {}", path.display());
            return Ok(config);
        }

        let config = read_config(&path)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Writes `config.ron` into `config_dir`, creating the directory.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let path = config_dir.join(CONFIG_FILE_NAME);
        let write_error = |source| ConfigError::Write {
            path: path.clone(),
            source,
        };

        std::fs::create_dir_all(config_dir).map_err(write_error)?;
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .struct_names(false);
        let text = ron::ser::to_string_pretty(self, pretty)?;
        std::fs::write(&path, text).map_err(write_error)
    }

    /// Re-reads `config.ron`. Returns `None` when it matches `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let fresh = read_config(&config_dir.join(CONFIG_FILE_NAME))?;
        if fresh == *self {
            return Ok(None);
        }
        log::info!("Config changed on disk");
        Ok(Some(fresh))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_flight_constants() {
        let ship = ShipConfig::default();
        assert_eq!(ship.rotation_accel, 0.001);
        assert_eq!(ship.rotation_max, 0.1);
        assert_eq!(ship.thrust_accel, 0.01);
        assert_eq!(ship.brake_tolerance, 0.01);
        assert_eq!(ship.thrust_fuel_loss, 0.5);
        assert_eq!(ship.brake_fuel_loss, 0.8);
        assert_eq!(ship.max_health, 3);
        assert_eq!(ship.max_fuel, 100.0);

        let planet = PlanetConfig::default();
        assert_eq!(planet.max_landing_speed, 0.1);
        assert!((planet.landing_angle_tolerance.to_degrees() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(!ron_str.is_empty());
        assert!(ron_str.contains("rotation_max: 0.1"));
        assert!(ron_str.contains("base_asteroids: 4"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.session.seed = Some(42);
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_field_uses_default() {
        // Config missing the `asteroids` section entirely
        let ron_str = "(ship: (), planet: (), level: (), session: (), debug: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.asteroids, AsteroidConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let ron_str = "(ship: (max_health: 5))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.ship.max_health, 5);
        assert_eq!(config.ship.rotation_max, tuning::RMAX);
    }

    #[test]
    fn test_extra_field_ignored() {
        let ron_str = "(future_setting: true)";
        let result: Result<Config, _> = ron::from_str(ron_str);
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.planet.radius = 35.0;
        config.session.seed = Some(7);
        config.level.base_asteroids = 6;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.ship.thrust_accel = 0.02;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert!(result.is_some());
        assert_eq!(result.unwrap().ship.thrust_accel, 0.02);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.ron"), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_ron_comments_preserved() {
        let ron_str = "// This is a comment\n(\n  // Another comment\n)";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config, Config::default());
    }
}
