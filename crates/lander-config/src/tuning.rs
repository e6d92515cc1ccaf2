//! Flight-model and landing constants.
//!
//! These are the defaults behind [`ShipConfig`](crate::ShipConfig) and
//! [`PlanetConfig`](crate::PlanetConfig). Gameplay feel depends on the exact
//! values; change them through `config.ron`, not here.

/// Angular acceleration per tick while a rotate key is held (rad/tick²).
pub const RACC: f64 = 0.001;
/// Maximum angular rate on any axis (rad/tick).
pub const RMAX: f64 = 0.1;
/// Thrust acceleration per tick (units/tick²).
pub const PACC: f64 = 0.01;
/// Speed at or below which braking snaps the ship to rest.
pub const TOL: f64 = 0.01;
/// Fuel burned per tick of forward or backward thrust.
pub const THRUST_LOSS: f64 = 0.5;
/// Fuel burned per tick of braking.
pub const THRUST_OPP_LOSS: f64 = 0.8;
/// Hit points at spawn.
pub const HEALTH: u32 = 3;
/// Fuel at spawn and after a refill.
pub const FUEL: f64 = 100.0;

/// Fastest touchdown that still counts as a landing.
pub const MAX_ACCEPTABLE_LANDING_VELOCITY: f64 = 0.1;
/// Largest angle between the ship's up axis and the planet direction (30°).
pub const LANDING_ANGLE_TOLERANCE: f64 = std::f64::consts::FRAC_PI_6;
/// Extra distance beyond the surface where a ship is ejected after a bad landing.
pub const EJECT_MARGIN: f64 = 20.0;

/// Collision radius as a fraction of the ship mesh's bounding radius.
pub const SHIP_COLLISION_SCALE: f64 = 2.0 / 3.0;
