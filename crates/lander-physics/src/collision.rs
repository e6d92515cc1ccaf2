//! Bounding-sphere collision.
//!
//! Every body is approximated by one sphere. The game checks the ship against
//! the planet and each asteroid once per tick; with tens of bodies a pairwise
//! test is all that is needed.

use glam::DVec3;

use crate::PhysicsError;

/// A body with a position and a bounding-sphere collision radius.
pub trait Collidable {
    /// World-space center of the bounding sphere.
    fn position(&self) -> DVec3;
    /// Bounding-sphere radius.
    fn collision_radius(&self) -> f64;
}

/// A bare bounding sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: DVec3,
    pub radius: f64,
}

impl Sphere {
    pub fn new(center: DVec3, radius: f64) -> Self {
        Self { center, radius }
    }
}

impl Collidable for Sphere {
    fn position(&self) -> DVec3 {
        self.center
    }

    fn collision_radius(&self) -> f64 {
        self.radius
    }
}

/// True iff the distance between centers is strictly less than the sum of radii.
#[inline]
pub fn spheres_collide(pos_a: DVec3, radius_a: f64, pos_b: DVec3, radius_b: f64) -> bool {
    pos_a.distance(pos_b) < radius_a + radius_b
}

/// Sphere-sphere test between two collidables. Symmetric in its arguments.
pub fn is_colliding<A, B>(a: &A, b: &B) -> bool
where
    A: Collidable + ?Sized,
    B: Collidable + ?Sized,
{
    spheres_collide(
        a.position(),
        a.collision_radius(),
        b.position(),
        b.collision_radius(),
    )
}

/// Rejects zero, negative, and non-finite radii.
pub(crate) fn validate_radius(what: &str, radius: f64) -> Result<f64, PhysicsError> {
    if radius.is_finite() && radius > 0.0 {
        Ok(radius)
    } else {
        Err(PhysicsError::PreconditionViolation(format!(
            "{what} must be positive and finite, got {radius}"
        )))
    }
}
