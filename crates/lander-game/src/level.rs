//! Procedural level layout: planet placement, landing area, asteroid field.
//!
//! Deterministic for a given RNG state. Difficulty grows with the level
//! index: the planet may sit farther away, the landing-plane point moves
//! outward (shrinking the margin for error) and more asteroids are spawned.

use std::f64::consts::TAU;
use std::ops::RangeInclusive;

use glam::DVec3;
use lander_config::{AsteroidConfig, Config, LevelConfig};
use lander_math::{axis_angle_to_quat, spherical_to_cartesian};
use lander_physics::{Asteroid, Axis, PhysicsError, Planet};
use rand::Rng;
use tracing::debug;

use crate::SessionError;

/// Where the ship starts every level.
pub const SPAWN_POINT: DVec3 = DVec3::ZERO;

/// Everything needed to start a level.
#[derive(Debug, Clone)]
pub struct LevelLayout {
    pub index: u32,
    pub spawn: DVec3,
    pub planet: Planet,
    pub asteroids: Vec<Asteroid>,
}

/// Distance from the spawn point to the planet center.
pub fn planet_distance_range(config: &LevelConfig, level: u32) -> RangeInclusive<f64> {
    let level = level.max(1) as f64;
    config.base_distance..=config.base_distance + config.distance_step * level
}

/// Landing-plane point distance from the planet center, as a fraction of the
/// planet radius.
pub fn landing_radius_range(config: &LevelConfig, level: u32) -> RangeInclusive<f64> {
    let shift = ((level.max(1) - 1) as f64 * config.landing_shift_per_level)
        .min(config.landing_shift_cap);
    config.landing_radius_min + shift..=config.landing_radius_max + shift
}

pub fn asteroid_count_range(config: &LevelConfig, level: u32) -> RangeInclusive<u32> {
    let level = level.max(1);
    let extra = config.asteroids_per_level.saturating_mul(level);
    config.base_asteroids..=config.base_asteroids.saturating_add(extra)
}

/// Rejects ranges `random_range` would panic on: inverted, NaN or infinite.
fn sample_range(
    what: &str,
    range: RangeInclusive<f64>,
) -> Result<RangeInclusive<f64>, PhysicsError> {
    let (lo, hi) = (*range.start(), *range.end());
    if lo.is_finite() && hi.is_finite() && lo <= hi {
        Ok(range)
    } else {
        Err(PhysicsError::PreconditionViolation(format!(
            "{what} range {lo}..={hi} is empty or not finite"
        )))
    }
}

/// Uniformly distributed unit vector.
fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> DVec3 {
    let theta = rng.random::<f64>() * TAU;
    let phi = (1.0 - 2.0 * rng.random::<f64>()).acos();
    spherical_to_cartesian(1.0, theta, phi)
}

/// Generates level `level` (1-based) with the ship at [`SPAWN_POINT`].
///
/// # Errors
/// Returns [`SessionError::Physics`] when the configuration produces an
/// invalid body (e.g. a landing radius fraction of 1 or more) or an empty
/// sampling range (e.g. a negative `distance_step` or `max_noise`).
pub fn generate_level<R: Rng + ?Sized>(
    level: u32,
    config: &Config,
    rng: &mut R,
) -> Result<LevelLayout, SessionError> {
    let level = level.max(1);
    let spawn = SPAWN_POINT;

    let distance_range = sample_range("planet distance", planet_distance_range(&config.level, level))?;
    let landing_range = sample_range("landing radius", landing_radius_range(&config.level, level))?;
    let asteroid_ranges = AsteroidRanges::new(&config.asteroids)?;

    let distance = rng.random_range(distance_range);
    let planet_position = spawn + random_direction(rng) * distance;

    let landing_fraction = rng.random_range(landing_range);
    let landing_point = random_direction(rng) * config.planet.radius * landing_fraction;
    let planet = Planet::new(planet_position, landing_point, &config.planet)?;

    let count = rng.random_range(asteroid_count_range(&config.level, level));
    let asteroids = (0..count)
        .map(|_| spawn_asteroid(spawn, planet_position, &asteroid_ranges, rng))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        level,
        distance,
        landing_fraction,
        asteroids = asteroids.len(),
        "Generated level"
    );

    Ok(LevelLayout {
        index: level,
        spawn,
        planet,
        asteroids,
    })
}

/// Checked sampling ranges for asteroid placement.
struct AsteroidRanges {
    fraction: RangeInclusive<f64>,
    noise: RangeInclusive<f64>,
    spin: RangeInclusive<f64>,
    mesh_radius: f64,
}

impl AsteroidRanges {
    fn new(config: &AsteroidConfig) -> Result<Self, PhysicsError> {
        Ok(Self {
            fraction: sample_range("asteroid fraction", config.min_fraction..=config.max_fraction)?,
            noise: sample_range("asteroid noise", -config.max_noise..=config.max_noise)?,
            spin: sample_range("asteroid spin", -config.max_spin..=config.max_spin)?,
            mesh_radius: config.mesh_radius,
        })
    }
}

/// Places one asteroid on the spawn → planet line, jittered on every axis.
fn spawn_asteroid<R: Rng + ?Sized>(
    spawn: DVec3,
    planet_position: DVec3,
    ranges: &AsteroidRanges,
    rng: &mut R,
) -> Result<Asteroid, SessionError> {
    let fraction = rng.random_range(ranges.fraction.clone());
    let noise = DVec3::new(
        rng.random_range(ranges.noise.clone()),
        rng.random_range(ranges.noise.clone()),
        rng.random_range(ranges.noise.clone()),
    );
    let position = spawn + (planet_position - spawn) * fraction + noise;

    let orientation = axis_angle_to_quat(random_direction(rng), rng.random::<f64>() * TAU);
    let spin_axis = Axis::ALL[rng.random_range(0..Axis::ALL.len())];
    let spin_rate = rng.random_range(ranges.spin.clone());

    Ok(Asteroid::new(position, orientation, ranges.mesh_radius)?.with_spin(spin_axis, spin_rate))
}
