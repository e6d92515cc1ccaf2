//! Ship-following camera views.
//!
//! The renderer asks [`CameraController::pose`] once per frame for the eye,
//! look-at target and up vector. Offsets are in the ship's local frame and
//! rotated by its orientation, so the chase views turn with the ship.

use std::f64::consts::{PI, TAU};

use glam::{DQuat, DVec3};
use lander_input::View;
use lander_math::rotate_vector;
use tracing::debug;

/// Orbit view radius around the ship.
pub const ORBIT_RADIUS: f64 = 30.0;
/// Orbit view height above the ship, along its local Y.
pub const ORBIT_HEIGHT: f64 = 20.0;
/// Orbit advance per frame.
pub const ORBIT_STEP: f64 = PI / 60.0;

/// Where the camera is and what it looks at, in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub eye: DVec3,
    pub target: DVec3,
    pub up: DVec3,
}

/// A view fixed to the ship's local frame.
#[derive(Debug, Clone, Copy)]
struct ShipRelative {
    offset: DVec3,
    look_at: DVec3,
    up: DVec3,
}

impl ShipRelative {
    const BACK_RIGHT: Self = Self {
        offset: DVec3::new(-20.0, 8.0, 5.0),
        look_at: DVec3::new(7.0, 0.0, 0.0),
        up: DVec3::Y,
    };

    const FRONT_LEFT: Self = Self {
        offset: DVec3::new(20.0, 8.0, -5.0),
        look_at: DVec3::new(-7.0, 0.0, 0.0),
        up: DVec3::Y,
    };

    const TOP: Self = Self {
        offset: DVec3::new(0.0, 20.0, 0.0),
        look_at: DVec3::ZERO,
        up: DVec3::X,
    };
}

/// Current camera view plus the state the static and orbit views keep.
#[derive(Debug, Clone)]
pub struct CameraController {
    view: View,
    static_eye: DVec3,
    static_up: DVec3,
    orbit_angle: f64,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraController {
    /// Starts in the back-right chase view.
    pub fn new() -> Self {
        Self {
            view: View::BackRight,
            static_eye: DVec3::ZERO,
            static_up: DVec3::Y,
            orbit_angle: 0.0,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Switches view. Selecting [`View::Static`] freezes the eye where the
    /// current view has it for a ship at `ship_position`/`ship_orientation`.
    pub fn select(&mut self, view: View, ship_position: DVec3, ship_orientation: DQuat) {
        if view == View::Static && self.view != View::Static {
            let (offset, up) = self.local_eye();
            self.static_eye = ship_position + rotate_vector(ship_orientation, offset);
            self.static_up = rotate_vector(ship_orientation, up);
        }
        debug!(?view, "Camera view selected");
        self.view = view;
    }

    /// Pose for this frame. The orbit view advances by [`ORBIT_STEP`] per call.
    pub fn pose(&mut self, ship_position: DVec3, ship_orientation: DQuat) -> CameraPose {
        let world = |v: DVec3| rotate_vector(ship_orientation, v);
        match self.view {
            View::BackRight | View::FrontLeft | View::Top => {
                let relative = self.ship_relative();
                CameraPose {
                    eye: ship_position + world(relative.offset),
                    target: ship_position + world(relative.look_at),
                    up: world(relative.up),
                }
            }
            View::Static => CameraPose {
                eye: self.static_eye,
                target: ship_position,
                up: self.static_up,
            },
            View::Orbit => {
                let (offset, up) = self.local_eye();
                self.orbit_angle = (self.orbit_angle + ORBIT_STEP) % TAU;
                CameraPose {
                    eye: ship_position + world(offset),
                    target: ship_position,
                    up: world(up),
                }
            }
        }
    }

    fn ship_relative(&self) -> ShipRelative {
        match self.view {
            View::FrontLeft => ShipRelative::FRONT_LEFT,
            View::Top => ShipRelative::TOP,
            _ => ShipRelative::BACK_RIGHT,
        }
    }

    /// Eye offset and up vector of the current view in the ship's frame.
    fn local_eye(&self) -> (DVec3, DVec3) {
        match self.view {
            View::Orbit => (
                DVec3::new(
                    ORBIT_RADIUS * self.orbit_angle.cos(),
                    ORBIT_HEIGHT,
                    ORBIT_RADIUS * self.orbit_angle.sin(),
                ),
                DVec3::Y,
            ),
            View::Static => (DVec3::ZERO, DVec3::Y),
            _ => {
                let relative = self.ship_relative();
                (relative.offset, relative.up)
            }
        }
    }
}
