//! Control mapping: which physical keys trigger which [`ControlCode`]s.
//!
//! [`ControlMap`] is serializable to RON so players can edit `input.ron`.
//! Lookup goes key → control through [`ControlMap::control_for_key`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// `KeyCode` has no serde support of its own, so bindings are stored by name.
mod keycode_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser};
    use winit::keyboard::KeyCode;

    /// Keys that may appear in `input.ron`.
    #[rustfmt::skip]
    const NAMED_KEYS: &[(&str, KeyCode)] = &[
        ("KeyA", KeyCode::KeyA), ("KeyB", KeyCode::KeyB), ("KeyC", KeyCode::KeyC),
        ("KeyD", KeyCode::KeyD), ("KeyE", KeyCode::KeyE), ("KeyF", KeyCode::KeyF),
        ("KeyG", KeyCode::KeyG), ("KeyH", KeyCode::KeyH), ("KeyI", KeyCode::KeyI),
        ("KeyJ", KeyCode::KeyJ), ("KeyK", KeyCode::KeyK), ("KeyL", KeyCode::KeyL),
        ("KeyM", KeyCode::KeyM), ("KeyN", KeyCode::KeyN), ("KeyO", KeyCode::KeyO),
        ("KeyP", KeyCode::KeyP), ("KeyQ", KeyCode::KeyQ), ("KeyR", KeyCode::KeyR),
        ("KeyS", KeyCode::KeyS), ("KeyT", KeyCode::KeyT), ("KeyU", KeyCode::KeyU),
        ("KeyV", KeyCode::KeyV), ("KeyW", KeyCode::KeyW), ("KeyX", KeyCode::KeyX),
        ("KeyY", KeyCode::KeyY), ("KeyZ", KeyCode::KeyZ), ("Digit0", KeyCode::Digit0),
        ("Digit1", KeyCode::Digit1), ("Digit2", KeyCode::Digit2), ("Digit3", KeyCode::Digit3),
        ("Digit4", KeyCode::Digit4), ("Digit5", KeyCode::Digit5), ("Digit6", KeyCode::Digit6),
        ("Digit7", KeyCode::Digit7), ("Digit8", KeyCode::Digit8), ("Digit9", KeyCode::Digit9),
        ("Space", KeyCode::Space), ("Enter", KeyCode::Enter), ("Escape", KeyCode::Escape),
        ("Tab", KeyCode::Tab), ("ShiftLeft", KeyCode::ShiftLeft),
        ("ShiftRight", KeyCode::ShiftRight), ("ControlLeft", KeyCode::ControlLeft),
        ("ControlRight", KeyCode::ControlRight), ("ArrowUp", KeyCode::ArrowUp),
        ("ArrowDown", KeyCode::ArrowDown), ("ArrowLeft", KeyCode::ArrowLeft),
        ("ArrowRight", KeyCode::ArrowRight),
    ];

    pub fn serialize<S: Serializer>(code: &KeyCode, s: S) -> Result<S::Ok, S::Error> {
        NAMED_KEYS
            .iter()
            .find(|(_, key)| key == code)
            .ok_or_else(|| ser::Error::custom(format!("key {code:?} cannot be bound")))?
            .0
            .serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<KeyCode, D::Error> {
        let name = String::deserialize(d)?;
        NAMED_KEYS
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, key)| *key)
            .ok_or_else(|| de::Error::custom(format!("unknown key: {name}")))
    }
}

/// Camera view a view key selects.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum View {
    /// Chase camera behind and to the right of the ship.
    BackRight,
    /// Camera ahead of and to the left of the ship, looking back.
    FrontLeft,
    /// Straight down on the ship.
    Top,
    /// Eye frozen where it was, tracking the ship.
    Static,
    /// Circles the ship.
    Orbit,
}

/// Logical controls produced by the keyboard.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum ControlCode {
    RollLeft,
    RollRight,
    RollCenter,
    PitchLeft,
    PitchRight,
    PitchCenter,
    YawLeft,
    YawRight,
    YawCenter,
    /// Forward thrust.
    ThrustUp,
    /// Reverse thrust.
    ThrustDown,
    /// Brake against the current velocity.
    ThrustCenter,
    ViewFrontLeft,
    ViewBackRight,
    ViewTop,
    ViewStatic,
    ViewOrbit,
}

impl ControlCode {
    /// Every control, in display order.
    pub const ALL: [ControlCode; 17] = [
        ControlCode::RollLeft,
        ControlCode::RollRight,
        ControlCode::RollCenter,
        ControlCode::PitchLeft,
        ControlCode::PitchRight,
        ControlCode::PitchCenter,
        ControlCode::YawLeft,
        ControlCode::YawRight,
        ControlCode::YawCenter,
        ControlCode::ThrustUp,
        ControlCode::ThrustDown,
        ControlCode::ThrustCenter,
        ControlCode::ViewFrontLeft,
        ControlCode::ViewBackRight,
        ControlCode::ViewTop,
        ControlCode::ViewStatic,
        ControlCode::ViewOrbit,
    ];

    /// The camera view this control selects, if it is a view control.
    #[must_use]
    pub fn view(self) -> Option<View> {
        match self {
            ControlCode::ViewFrontLeft => Some(View::FrontLeft),
            ControlCode::ViewBackRight => Some(View::BackRight),
            ControlCode::ViewTop => Some(View::Top),
            ControlCode::ViewStatic => Some(View::Static),
            ControlCode::ViewOrbit => Some(View::Orbit),
            _ => None,
        }
    }
}

/// A keyboard key (physical scan code) bound to a control.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct KeyBinding(#[serde(with = "keycode_serde")] pub KeyCode);

/// Maps [`ControlCode`]s to lists of [`KeyBinding`]s.
///
/// Multiple keys per control are supported. Serializable to RON for
/// user-editable config files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlMap {
    /// The binding table.
    pub bindings: HashMap<ControlCode, Vec<KeyBinding>>,
}

impl Default for ControlMap {
    fn default() -> Self {
        Self::default_flight()
    }
}

impl ControlMap {
    /// Create an empty map with no bindings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Default flight layout: A/D/F roll, W/S/2 pitch, E/Q/R yaw, arrows and
    /// space for thrust, U/L/I/K/O for camera views.
    #[must_use]
    pub fn default_flight() -> Self {
        let defaults = [
            (ControlCode::RollLeft, KeyCode::KeyA),
            (ControlCode::RollRight, KeyCode::KeyD),
            (ControlCode::RollCenter, KeyCode::KeyF),
            (ControlCode::PitchLeft, KeyCode::KeyW),
            (ControlCode::PitchRight, KeyCode::KeyS),
            (ControlCode::PitchCenter, KeyCode::Digit2),
            (ControlCode::YawLeft, KeyCode::KeyE),
            (ControlCode::YawRight, KeyCode::KeyQ),
            (ControlCode::YawCenter, KeyCode::KeyR),
            (ControlCode::ThrustUp, KeyCode::ArrowUp),
            (ControlCode::ThrustDown, KeyCode::ArrowDown),
            (ControlCode::ThrustCenter, KeyCode::Space),
            (ControlCode::ViewFrontLeft, KeyCode::KeyU),
            (ControlCode::ViewBackRight, KeyCode::KeyL),
            (ControlCode::ViewTop, KeyCode::KeyI),
            (ControlCode::ViewStatic, KeyCode::KeyK),
            (ControlCode::ViewOrbit, KeyCode::KeyO),
        ];

        let bindings = defaults
            .into_iter()
            .map(|(control, key)| (control, vec![KeyBinding(key)]))
            .collect();
        Self { bindings }
    }

    /// Set the bindings for a control, replacing any existing ones.
    pub fn set_bindings(&mut self, control: ControlCode, bindings: Vec<KeyBinding>) {
        self.bindings.insert(control, bindings);
    }

    /// Get the bindings for a control.
    #[must_use]
    pub fn get_bindings(&self, control: &ControlCode) -> &[KeyBinding] {
        self.bindings.get(control).map_or(&[], |v| v.as_slice())
    }

    /// The control bound to `key`, if any.
    ///
    /// When a key is bound to several controls the one earliest in
    /// [`ControlCode::ALL`] wins; [`detect_conflicts`](Self::detect_conflicts)
    /// reports such maps.
    #[must_use]
    pub fn control_for_key(&self, key: KeyCode) -> Option<ControlCode> {
        ControlCode::ALL
            .into_iter()
            .find(|control| self.get_bindings(control).contains(&KeyBinding(key)))
    }

    /// Serialize to RON string.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Deserialize from RON string.
    ///
    /// # Errors
    /// Returns an error if the RON string is malformed.
    pub fn from_ron(s: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }
}
