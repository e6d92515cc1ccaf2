//! Keyboard edge tracker.
//!
//! [`KeyboardState`] turns winit key events into [`ControlEvent`]s: one
//! `Down` when a bound key goes down and one `Up` when it is released.
//! Auto-repeat and duplicate presses are dropped so intents are set once.
//!
//! Physical key codes are used throughout so the layout works identically
//! regardless of the user's keyboard language.

use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

use crate::control_map::ControlMap;
use crate::dispatch::{ControlEvent, KeyEdge};

/// Minimal description of a key event for processing.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    /// The physical key involved.
    pub key: PhysicalKey,
    /// Whether the key was pressed or released.
    pub state: ElementState,
    /// Whether this is a repeat event.
    pub repeat: bool,
}

/// Tracks which physical keys are held.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: HashSet<PhysicalKey>,
}

impl KeyboardState {
    /// Creates a new `KeyboardState` with no keys pressed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes a winit [`KeyEvent`], returning the control edge it produces.
    pub fn process_event(&mut self, event: &KeyEvent, map: &ControlMap) -> Option<ControlEvent> {
        self.process_raw(
            RawKeyEvent {
                key: event.physical_key,
                state: event.state,
                repeat: event.repeat,
            },
            map,
        )
    }

    /// Processes a [`RawKeyEvent`] (platform-independent, test-friendly).
    ///
    /// - **Pressed** (non-repeat, not already held): `Down` edge.
    /// - **Released** (was held): `Up` edge.
    /// - Unbound keys still update the held set but produce nothing.
    pub fn process_raw(&mut self, event: RawKeyEvent, map: &ControlMap) -> Option<ControlEvent> {
        if event.repeat {
            return None;
        }
        let edge = match event.state {
            ElementState::Pressed => {
                if !self.pressed.insert(event.key) {
                    return None;
                }
                KeyEdge::Down
            }
            ElementState::Released => {
                if !self.pressed.remove(&event.key) {
                    return None;
                }
                KeyEdge::Up
            }
        };

        let PhysicalKey::Code(code) = event.key else {
            return None;
        };
        map.control_for_key(code)
            .map(|control| ControlEvent { control, edge })
    }

    /// Returns `true` while the key is held down.
    #[must_use]
    pub fn is_pressed(&self, key: PhysicalKey) -> bool {
        self.pressed.contains(&key)
    }

    /// Forget every held key, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control_map::ControlCode;
    use winit::keyboard::KeyCode;

    /// Helper to create a [`RawKeyEvent`] for testing.
    fn raw(code: KeyCode, state: ElementState, repeat: bool) -> RawKeyEvent {
        RawKeyEvent {
            key: PhysicalKey::Code(code),
            state,
            repeat,
        }
    }

    #[test]
    fn test_press_emits_down() {
        let map = ControlMap::default();
        let mut kb = KeyboardState::new();
        let event = kb.process_raw(raw(KeyCode::KeyA, ElementState::Pressed, false), &map);
        assert_eq!(
            event,
            Some(ControlEvent {
                control: ControlCode::RollLeft,
                edge: KeyEdge::Down
            })
        );
        assert!(kb.is_pressed(PhysicalKey::Code(KeyCode::KeyA)));
    }

    #[test]
    fn test_release_emits_up() {
        let map = ControlMap::default();
        let mut kb = KeyboardState::new();
        kb.process_raw(raw(KeyCode::Space, ElementState::Pressed, false), &map);
        let event = kb.process_raw(raw(KeyCode::Space, ElementState::Released, false), &map);
        assert_eq!(
            event,
            Some(ControlEvent {
                control: ControlCode::ThrustCenter,
                edge: KeyEdge::Up
            })
        );
        assert!(!kb.is_pressed(PhysicalKey::Code(KeyCode::Space)));
    }

    #[test]
    fn test_repeat_events_ignored() {
        let map = ControlMap::default();
        let mut kb = KeyboardState::new();
        assert!(
            kb.process_raw(raw(KeyCode::KeyW, ElementState::Pressed, false), &map)
                .is_some()
        );
        assert!(
            kb.process_raw(raw(KeyCode::KeyW, ElementState::Pressed, true), &map)
                .is_none()
        );
        assert!(
            kb.process_raw(raw(KeyCode::KeyW, ElementState::Pressed, false), &map)
                .is_none()
        );
    }

    #[test]
    fn test_release_without_press_ignored() {
        let map = ControlMap::default();
        let mut kb = KeyboardState::new();
        assert!(
            kb.process_raw(raw(KeyCode::KeyD, ElementState::Released, false), &map)
                .is_none()
        );
    }

    #[test]
    fn test_unbound_key_tracked_but_silent() {
        let map = ControlMap::default();
        let mut kb = KeyboardState::new();
        assert!(
            kb.process_raw(raw(KeyCode::KeyZ, ElementState::Pressed, false), &map)
                .is_none()
        );
        assert!(kb.is_pressed(PhysicalKey::Code(KeyCode::KeyZ)));
    }

    #[test]
    fn test_release_all() {
        let map = ControlMap::default();
        let mut kb = KeyboardState::new();
        kb.process_raw(raw(KeyCode::KeyA, ElementState::Pressed, false), &map);
        kb.process_raw(raw(KeyCode::ArrowUp, ElementState::Pressed, false), &map);
        kb.release_all();
        assert!(!kb.is_pressed(PhysicalKey::Code(KeyCode::KeyA)));
        assert!(!kb.is_pressed(PhysicalKey::Code(KeyCode::ArrowUp)));
    }
}
