//! Ship rigid body: per-axis angular rates driven by control intents, thrust,
//! braking, fuel, and health.
//!
//! One simulation tick runs, in order:
//! [`integrate_angular_rates`](Ship::integrate_angular_rates),
//! [`apply_orientation_delta`](Ship::apply_orientation_delta),
//! [`compute_thrust_force`](Ship::compute_thrust_force),
//! [`integrate_velocity`](Ship::integrate_velocity),
//! [`integrate_position`](Ship::integrate_position),
//! [`consume_fuel`](Ship::consume_fuel).
//! [`step`](Ship::step) runs all six.
//!
//! Rates, forces and velocities are per tick; there is no `dt`.

use std::fmt;

use glam::{DQuat, DVec3};
use lander_config::ShipConfig;
use lander_config::tuning::SHIP_COLLISION_SCALE;
use lander_math::{axis_angle_to_quat, compose, rotate_vector, try_normalize};
use tracing::{debug, info};

use crate::collision::{Collidable, validate_radius};
use crate::{LandingFailure, PhysicsError};

/// Orientation at spawn: a half turn about X (`w = 0, x = 1`).
pub const SPAWN_ORIENTATION: DQuat = DQuat::from_xyzw(1.0, 0.0, 0.0, 0.0);

/// Rotation axis of the ship, in the body frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// About local +X (the heading).
    Roll,
    /// About local +Z.
    Pitch,
    /// About local +Y.
    Yaw,
}

impl Axis {
    /// Axes in the order their deltas are composed each tick.
    pub const ALL: [Axis; 3] = [Axis::Roll, Axis::Pitch, Axis::Yaw];

    /// Slot in the per-axis rate and intent arrays.
    pub fn index(self) -> usize {
        match self {
            Axis::Roll => 0,
            Axis::Pitch => 1,
            Axis::Yaw => 2,
        }
    }

    /// Body-frame rotation axis.
    pub fn local_axis(self) -> DVec3 {
        match self {
            Axis::Roll => DVec3::X,
            Axis::Pitch => DVec3::Z,
            Axis::Yaw => DVec3::Y,
        }
    }
}

/// Direction of a commanded rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// What the pilot is asking one rotation axis to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Intent {
    /// Hold the current angular rate.
    #[default]
    Steady,
    /// Accelerate toward `±rotation_max`.
    SetRotate { axis: Axis, direction: Direction },
    /// Decay toward zero and stop there.
    ResetRotate { axis: Axis },
}

impl Intent {
    /// The axis this intent names, if any.
    pub fn axis(self) -> Option<Axis> {
        match self {
            Intent::Steady => None,
            Intent::SetRotate { axis, .. } | Intent::ResetRotate { axis } => Some(axis),
        }
    }
}

/// Propulsion mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThrustMode {
    #[default]
    None,
    Forward,
    Backward,
    /// Thrust against the current velocity until the ship stops.
    Brake,
}

impl ThrustMode {
    /// `+1` forward, `-1` backward, `0` otherwise.
    pub fn sign(self) -> f64 {
        match self {
            ThrustMode::Forward => 1.0,
            ThrustMode::Backward => -1.0,
            ThrustMode::None | ThrustMode::Brake => 0.0,
        }
    }
}

impl fmt::Display for ThrustMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ThrustMode::None => "idle",
            ThrustMode::Forward => "forward",
            ThrustMode::Backward => "reverse",
            ThrustMode::Brake => "brake",
        };
        f.write_str(label)
    }
}

/// Why the ship lost a hit point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageCause {
    Asteroid,
    FuelDepleted,
    Landing(LandingFailure),
}

impl fmt::Display for DamageCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DamageCause::Asteroid => f.write_str("Hit an asteroid"),
            DamageCause::FuelDepleted => f.write_str("Ran out of fuel"),
            DamageCause::Landing(failure) => write!(f, "{failure}"),
        }
    }
}

/// Result of one [`Ship::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// The tank ran dry this tick and the ship took damage for it.
    pub fuel_depleted: bool,
    /// The ship still has health after this tick.
    pub alive: bool,
}

/// The player's ship.
#[derive(Debug, Clone)]
pub struct Ship {
    /// World-space position.
    pub position: DVec3,
    /// Velocity in units per tick.
    pub velocity: DVec3,
    /// Unit orientation quaternion.
    pub orientation: DQuat,
    angular_rate: [f64; 3],
    intents: [Intent; 3],
    thrust_mode: ThrustMode,
    force: DVec3,
    collision_radius: f64,
    health: u32,
    fuel: f64,
    config: ShipConfig,
}

impl Ship {
    /// Spawns a ship at rest at `position` with full health and fuel.
    ///
    /// The collision radius is two thirds of `config.mesh_radius`.
    ///
    /// # Errors
    /// [`PhysicsError::PreconditionViolation`] for a non-positive mesh radius
    /// or a negative or non-finite rotation rate limit.
    pub fn new(position: DVec3, config: &ShipConfig) -> Result<Self, PhysicsError> {
        let mesh_radius = validate_radius("ship mesh radius", config.mesh_radius)?;
        validate_rate("rotation_accel", config.rotation_accel)?;
        validate_rate("rotation_max", config.rotation_max)?;
        Ok(Self {
            position,
            velocity: DVec3::ZERO,
            orientation: SPAWN_ORIENTATION,
            angular_rate: [0.0; 3],
            intents: [Intent::Steady; 3],
            thrust_mode: ThrustMode::None,
            force: DVec3::ZERO,
            collision_radius: mesh_radius * SHIP_COLLISION_SCALE,
            health: config.max_health,
            fuel: config.max_fuel,
            config: config.clone(),
        })
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn fuel(&self) -> f64 {
        self.fuel
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn thrust_mode(&self) -> ThrustMode {
        self.thrust_mode
    }

    /// Force applied on the last tick.
    pub fn force(&self) -> DVec3 {
        self.force
    }

    pub fn angular_rate(&self, axis: Axis) -> f64 {
        self.angular_rate[axis.index()]
    }

    pub fn intent(&self, axis: Axis) -> Intent {
        self.intents[axis.index()]
    }

    pub fn config(&self) -> &ShipConfig {
        &self.config
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// Local +X in world space.
    pub fn heading(&self) -> DVec3 {
        rotate_vector(self.orientation, DVec3::X)
    }

    /// Local +Y in world space. Must point at the planet for a clean landing.
    pub fn up(&self) -> DVec3 {
        rotate_vector(self.orientation, DVec3::Y)
    }

    // --- Control intents ---

    /// Records the intent for `axis`. Takes effect on the next tick.
    ///
    /// # Panics
    /// If `intent` names a different axis than `axis`.
    pub fn set_control_intent(&mut self, axis: Axis, intent: Intent) {
        if let Some(named) = intent.axis() {
            assert_eq!(named, axis, "intent {intent:?} stored on axis {axis:?}");
        }
        self.intents[axis.index()] = intent;
    }

    /// Start rotating `axis` toward `direction`.
    pub fn set_rotate(&mut self, axis: Axis, direction: Direction) {
        self.set_control_intent(axis, Intent::SetRotate { axis, direction });
    }

    /// Start bringing `axis` back to zero rate.
    pub fn reset_rotate(&mut self, axis: Axis) {
        self.set_control_intent(axis, Intent::ResetRotate { axis });
    }

    /// Return `axis` to [`Intent::Steady`]; its rate is held.
    pub fn clear_control_intent(&mut self, axis: Axis) {
        self.set_control_intent(axis, Intent::Steady);
    }

    pub fn set_thrust_mode(&mut self, mode: ThrustMode) {
        self.thrust_mode = mode;
    }

    /// Stop thrusting and drop any accumulated force.
    pub fn clear_thrust(&mut self) {
        self.thrust_mode = ThrustMode::None;
        self.force = DVec3::ZERO;
    }

    // --- Integration ---

    /// Advances every axis rate according to its intent.
    ///
    /// `SetRotate` saturates at `±rotation_max`. `ResetRotate` decays by
    /// `rotation_accel` and snaps to exactly zero once within one step of it.
    /// `Steady` leaves the rate alone.
    pub fn integrate_angular_rates(&mut self) {
        let accel = self.config.rotation_accel;
        let max = self.config.rotation_max;

        for axis in Axis::ALL {
            let rate = &mut self.angular_rate[axis.index()];
            match self.intents[axis.index()] {
                Intent::Steady => {}
                Intent::SetRotate { direction, .. } => {
                    *rate = (*rate + direction.sign() * accel).clamp(-max, max);
                }
                Intent::ResetRotate { .. } => {
                    if *rate > 0.0 {
                        *rate -= accel;
                    } else if *rate < 0.0 {
                        *rate += accel;
                    }
                    if rate.abs() <= accel {
                        *rate = 0.0;
                    }
                }
            }
        }
    }

    /// Composes one body-frame delta per spinning axis onto the orientation,
    /// roll then pitch then yaw. Axes at exactly zero rate are skipped.
    pub fn apply_orientation_delta(&mut self) {
        for axis in Axis::ALL {
            let rate = self.angular_rate[axis.index()];
            if rate == 0.0 {
                continue;
            }
            let delta = axis_angle_to_quat(axis.local_axis(), rate);
            self.orientation = compose(self.orientation, delta).normalize();
        }
    }

    /// Sets the force for this tick from the thrust mode.
    ///
    /// Braking pushes against the velocity; once the speed is at or below
    /// `brake_tolerance` the ship is stopped outright.
    pub fn compute_thrust_force(&mut self) {
        let accel = self.config.thrust_accel;
        self.force = match self.thrust_mode {
            ThrustMode::Brake => {
                if self.velocity.length() <= self.config.brake_tolerance {
                    self.velocity = DVec3::ZERO;
                    DVec3::ZERO
                } else {
                    try_normalize(-self.velocity).map_or(DVec3::ZERO, |dir| dir * accel)
                }
            }
            mode => self.heading() * (accel * mode.sign()),
        };
    }

    pub fn integrate_velocity(&mut self) {
        self.velocity += self.force;
    }

    pub fn integrate_position(&mut self) {
        self.position += self.velocity;
    }

    /// Burns fuel for the current thrust mode.
    ///
    /// Forward/backward thrust burns `thrust_fuel_loss` per tick; braking burns
    /// `brake_fuel_loss` per tick, even once the ship is at rest. An empty tank costs
    /// one hit point and is refilled. Returns `Some(alive)` when that happened.
    pub fn consume_fuel(&mut self, on_lose: &mut dyn FnMut(&str)) -> Option<bool> {
        let burn = match self.thrust_mode {
            ThrustMode::Forward | ThrustMode::Backward => self.config.thrust_fuel_loss,
            ThrustMode::Brake => self.config.brake_fuel_loss,
            _ => return None,
        };

        self.fuel -= burn;
        if self.fuel > 0.0 {
            return None;
        }

        self.fuel = self.config.max_fuel;
        debug!("Fuel depleted, tank refilled");
        Some(self.damage(DamageCause::FuelDepleted, on_lose))
    }

    /// Runs one full tick of ship dynamics.
    pub fn step(&mut self, on_lose: &mut dyn FnMut(&str)) -> StepReport {
        self.integrate_angular_rates();
        self.apply_orientation_delta();
        self.compute_thrust_force();
        self.integrate_velocity();
        self.integrate_position();
        match self.consume_fuel(on_lose) {
            Some(alive) => StepReport {
                fuel_depleted: true,
                alive,
            },
            None => StepReport {
                fuel_depleted: false,
                alive: self.is_alive(),
            },
        }
    }

    // --- Health ---

    /// Removes one hit point.
    ///
    /// When health reaches zero `on_lose` is called once with the cause text
    /// and `false` is returned. Damaging a ship that is already destroyed does
    /// nothing and returns `false`.
    pub fn damage(&mut self, cause: DamageCause, on_lose: &mut dyn FnMut(&str)) -> bool {
        if self.health == 0 {
            return false;
        }
        self.health -= 1;
        debug!(%cause, health = self.health, "Ship damaged");

        if self.health == 0 {
            info!(%cause, "Ship destroyed");
            on_lose(&cause.to_string());
            return false;
        }
        true
    }

    /// Moves the ship to `position` and kills all motion: velocity, force and
    /// angular rates. Intents and thrust mode are kept.
    pub fn soft_reset(&mut self, position: DVec3) {
        self.position = position;
        self.velocity = DVec3::ZERO;
        self.force = DVec3::ZERO;
        self.angular_rate = [0.0; 3];
    }
}

/// Rotation limits feed `f64::clamp`, which panics on an inverted range.
fn validate_rate(what: &str, rate: f64) -> Result<f64, PhysicsError> {
    if rate.is_finite() && rate >= 0.0 {
        Ok(rate)
    } else {
        Err(PhysicsError::PreconditionViolation(format!(
            "{what} must be non-negative and finite, got {rate}"
        )))
    }
}

impl Collidable for Ship {
    fn position(&self) -> DVec3 {
        self.position
    }

    fn collision_radius(&self) -> f64 {
        self.collision_radius
    }
}
