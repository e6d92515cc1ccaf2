//! Static asteroid hazards with a cosmetic spin.

use glam::{DQuat, DVec3};
use lander_config::tuning::SHIP_COLLISION_SCALE;
use lander_math::{axis_angle_to_quat, compose};

use crate::PhysicsError;
use crate::collision::{Collidable, validate_radius};
use crate::ship::Axis;

/// A stationary asteroid. Touching one costs the ship a hit point and removes
/// the asteroid from the level.
#[derive(Debug, Clone)]
pub struct Asteroid {
    pub position: DVec3,
    pub orientation: DQuat,
    collision_radius: f64,
    spin_axis: Axis,
    spin_rate: f64,
}

impl Asteroid {
    /// Collision radius is two thirds of `mesh_radius`, like the ship.
    pub fn new(position: DVec3, orientation: DQuat, mesh_radius: f64) -> Result<Self, PhysicsError> {
        let mesh_radius = validate_radius("asteroid mesh radius", mesh_radius)?;
        Ok(Self {
            position,
            orientation: orientation.normalize(),
            collision_radius: mesh_radius * SHIP_COLLISION_SCALE,
            spin_axis: Axis::Yaw,
            spin_rate: 0.0,
        })
    }

    /// Sets the per-tick tumble applied by [`advance_spin`](Self::advance_spin).
    pub fn with_spin(mut self, axis: Axis, rate: f64) -> Self {
        self.spin_axis = axis;
        self.spin_rate = rate;
        self
    }

    pub fn spin(&self) -> (Axis, f64) {
        (self.spin_axis, self.spin_rate)
    }

    /// Rotates about the asteroid's own local X.
    pub fn roll(&mut self, angle: f64) {
        self.rotate_local(Axis::Roll, angle);
    }

    /// Rotates about the asteroid's own local Y.
    pub fn pitch(&mut self, angle: f64) {
        self.rotate_local(Axis::Pitch, angle);
    }

    /// Rotates about the asteroid's own local Z.
    pub fn yaw(&mut self, angle: f64) {
        self.rotate_local(Axis::Yaw, angle);
    }

    /// One tick of tumbling. Position never changes.
    pub fn advance_spin(&mut self) {
        if self.spin_rate != 0.0 {
            self.rotate_local(self.spin_axis, self.spin_rate);
        }
    }

    fn rotate_local(&mut self, axis: Axis, angle: f64) {
        let delta = axis_angle_to_quat(local_axis(axis), angle);
        self.orientation = compose(self.orientation, delta).normalize();
    }
}

/// Asteroids pitch about Y and yaw about Z, unlike the ship.
fn local_axis(axis: Axis) -> DVec3 {
    match axis {
        Axis::Roll => DVec3::X,
        Axis::Pitch => DVec3::Y,
        Axis::Yaw => DVec3::Z,
    }
}

impl Collidable for Asteroid {
    fn position(&self) -> DVec3 {
        self.position
    }

    fn collision_radius(&self) -> f64 {
        self.collision_radius
    }
}
