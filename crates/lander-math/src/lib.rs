//! Vector and quaternion primitives for the lander flight model.
//!
//! All math is done in `f64` on top of [`glam::DVec3`] and [`glam::DQuat`].
//! Quaternions are stored `(x, y, z, w)` as glam does; composition is the
//! Hamilton product and rotations compose in the body (local) frame by
//! right multiplication.

mod error;
mod quat;
mod vector;

pub use error::MathError;
pub use quat::{axis_angle_to_quat, compose, conjugate, quat_to_axis_angle, rotate_vector};
pub use vector::{angle_between, spherical_to_cartesian, try_normalize};

pub use glam::{DQuat, DVec3};
