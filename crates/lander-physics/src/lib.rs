//! Flight physics: the ship rigid body, bounding-sphere collision, the
//! target planet with its landing judgment, and asteroid hazards.
//!
//! Everything here is stepped in discrete ticks with no `dt`. Bodies are
//! plain structs owned by the game session; there is no physics world.

mod asteroid;
mod collision;
mod error;
mod planet;
mod ship;

pub use asteroid::Asteroid;
pub use collision::{Collidable, Sphere, is_colliding, spheres_collide};
pub use error::PhysicsError;
pub use planet::{LandingAssessment, LandingFailure, LandingVerdict, Planet};
pub use ship::{
    Axis, DamageCause, Direction, Intent, SPAWN_ORIENTATION, Ship, StepReport, ThrustMode,
};
