//! Control → intent dispatch.
//!
//! Key-down on a rotation control sets that axis' intent; key-up returns the
//! axis to [`Intent::Steady`](lander_physics::Intent::Steady), so the rate is
//! held. Key-down on a thrust control sets the thrust mode; key-up clears it.
//! View controls never touch the ship.

use lander_physics::{Axis, Direction, Ship, ThrustMode};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::control_map::{ControlCode, View};

/// Key transition.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum KeyEdge {
    Down,
    Up,
}

/// One logical control transition.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct ControlEvent {
    pub control: ControlCode,
    pub edge: KeyEdge,
}

impl ControlEvent {
    pub fn down(control: ControlCode) -> Self {
        Self {
            control,
            edge: KeyEdge::Down,
        }
    }

    pub fn up(control: ControlCode) -> Self {
        Self {
            control,
            edge: KeyEdge::Up,
        }
    }
}

/// What a control event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlOutcome {
    /// The ship's intents or thrust mode were updated.
    Ship,
    /// The camera should switch to this view.
    View(View),
    /// Nothing to do (view key released).
    Ignored,
}

/// What a non-view control drives on the ship.
enum Target {
    Rotate(Axis, Option<Direction>),
    Thrust(ThrustMode),
}

fn target(control: ControlCode) -> Option<Target> {
    let target = match control {
        ControlCode::RollLeft => Target::Rotate(Axis::Roll, Some(Direction::Left)),
        ControlCode::RollRight => Target::Rotate(Axis::Roll, Some(Direction::Right)),
        ControlCode::RollCenter => Target::Rotate(Axis::Roll, None),
        ControlCode::PitchLeft => Target::Rotate(Axis::Pitch, Some(Direction::Left)),
        ControlCode::PitchRight => Target::Rotate(Axis::Pitch, Some(Direction::Right)),
        ControlCode::PitchCenter => Target::Rotate(Axis::Pitch, None),
        ControlCode::YawLeft => Target::Rotate(Axis::Yaw, Some(Direction::Left)),
        ControlCode::YawRight => Target::Rotate(Axis::Yaw, Some(Direction::Right)),
        ControlCode::YawCenter => Target::Rotate(Axis::Yaw, None),
        ControlCode::ThrustUp => Target::Thrust(ThrustMode::Forward),
        ControlCode::ThrustDown => Target::Thrust(ThrustMode::Backward),
        ControlCode::ThrustCenter => Target::Thrust(ThrustMode::Brake),
        ControlCode::ViewFrontLeft
        | ControlCode::ViewBackRight
        | ControlCode::ViewTop
        | ControlCode::ViewStatic
        | ControlCode::ViewOrbit => return None,
    };
    Some(target)
}

/// Applies one control event to the ship.
pub fn apply_control(ship: &mut Ship, event: ControlEvent) -> ControlOutcome {
    trace!(control = ?event.control, edge = ?event.edge, "Control event");

    let Some(target) = target(event.control) else {
        return match (event.control.view(), event.edge) {
            (Some(view), KeyEdge::Down) => ControlOutcome::View(view),
            _ => ControlOutcome::Ignored,
        };
    };

    match (target, event.edge) {
        (Target::Rotate(axis, Some(direction)), KeyEdge::Down) => {
            ship.set_rotate(axis, direction);
        }
        (Target::Rotate(axis, None), KeyEdge::Down) => ship.reset_rotate(axis),
        (Target::Rotate(axis, _), KeyEdge::Up) => ship.clear_control_intent(axis),
        (Target::Thrust(mode), KeyEdge::Down) => ship.set_thrust_mode(mode),
        (Target::Thrust(_), KeyEdge::Up) => ship.clear_thrust(),
    }
    ControlOutcome::Ship
}
