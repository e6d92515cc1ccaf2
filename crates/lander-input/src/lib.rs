//! Keyboard input for the lander: physical keys mapped through a configurable
//! [`ControlMap`] to [`ControlEvent`]s, then dispatched to ship intents.

pub mod control_map;
pub mod dispatch;
pub mod keybindings;
pub mod keyboard;

pub use control_map::{ControlCode, ControlMap, KeyBinding, View};
pub use dispatch::{ControlEvent, ControlOutcome, KeyEdge, apply_control};
pub use keybindings::{Conflict, INPUT_FILE_NAME};
pub use keyboard::{KeyboardState, RawKeyEvent};
