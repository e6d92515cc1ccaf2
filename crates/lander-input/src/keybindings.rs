//! Keybinding persistence and conflict detection.
//!
//! RON-based save/load for [`ControlMap`] with fallback to defaults on error.

use crate::control_map::{ControlCode, ControlMap, KeyBinding};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;

/// File name of the persisted control map.
pub const INPUT_FILE_NAME: &str = "input.ron";

/// A binding conflict: the same key is used by multiple controls.
#[derive(Debug, Clone)]
pub struct Conflict {
    /// The duplicated key.
    pub binding: KeyBinding,
    /// Controls that share this key.
    pub controls: Vec<ControlCode>,
}

impl ControlMap {
    /// Detect all binding conflicts (same key in multiple controls, or
    /// duplicates within a single control).
    #[must_use]
    pub fn detect_conflicts(&self) -> Vec<Conflict> {
        let mut seen: HashMap<KeyBinding, Vec<ControlCode>> = HashMap::new();

        for (control, bindings) in &self.bindings {
            for binding in bindings {
                seen.entry(*binding).or_default().push(*control);
            }
        }

        seen.into_iter()
            .filter(|(_, controls)| controls.len() > 1)
            .map(|(binding, controls)| Conflict { binding, controls })
            .collect()
    }

    /// Save the control map to a RON file at `path`.
    ///
    /// # Errors
    /// Fails if the map cannot be serialized or the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let ron_str = self.to_ron()?;
        std::fs::write(path, ron_str)?;
        Ok(())
    }

    /// Load a control map from a RON file at `path`.
    ///
    /// Falls back to [`ControlMap::default`] if the file is missing or
    /// malformed, logging a warning in either case.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_ron(&contents) {
                Ok(map) => map,
                Err(e) => {
                    warn!(
                        "Ignoring invalid bindings in {}: {e}",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(e) => {
                warn!(
                    "Cannot read {}: {e}; falling back to the default layout",
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// `<config_dir>/lander/input.ron`, if the platform has a config directory.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("lander").join(INPUT_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_default_bindings_have_no_conflicts() {
        assert!(ControlMap::default().detect_conflicts().is_empty());
    }

    #[test]
    fn test_conflict_detection_flags_duplicates() {
        let mut map = ControlMap::new();
        map.set_bindings(ControlCode::ThrustUp, vec![KeyBinding(KeyCode::Space)]);
        map.set_bindings(ControlCode::ThrustCenter, vec![KeyBinding(KeyCode::Space)]);
        let conflicts = map.detect_conflicts();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].binding, KeyBinding(KeyCode::Space));
        assert!(conflicts[0].controls.contains(&ControlCode::ThrustUp));
        assert!(conflicts[0].controls.contains(&ControlCode::ThrustCenter));
    }

    #[test]
    fn test_duplicate_within_one_control_is_a_conflict() {
        let mut map = ControlMap::new();
        map.set_bindings(
            ControlCode::RollLeft,
            vec![KeyBinding(KeyCode::KeyA), KeyBinding(KeyCode::KeyA)],
        );
        assert_eq!(map.detect_conflicts().len(), 1);
    }

    #[test]
    fn test_rebinding_persists_across_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(INPUT_FILE_NAME);

        let mut map = ControlMap::default();
        map.set_bindings(ControlCode::YawCenter, vec![KeyBinding(KeyCode::KeyT)]);
        map.save(&path).expect("save");

        let loaded = ControlMap::load(&path);
        assert_eq!(
            loaded.get_bindings(&ControlCode::YawCenter),
            &[KeyBinding(KeyCode::KeyT)]
        );
        assert_eq!(loaded.control_for_key(KeyCode::KeyT), Some(ControlCode::YawCenter));
        assert_eq!(loaded.control_for_key(KeyCode::KeyR), None);
    }

    #[test]
    fn test_malformed_ron_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(INPUT_FILE_NAME);
        std::fs::write(&path, "not valid ron {{{").unwrap();

        let loaded = ControlMap::load(&path);
        assert_eq!(loaded.bindings.len(), ControlCode::ALL.len());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = ControlMap::load(&dir.path().join("absent").join(INPUT_FILE_NAME));
        assert_eq!(loaded.control_for_key(KeyCode::KeyA), Some(ControlCode::RollLeft));
    }

    #[test]
    fn test_default_config_path_file_name() {
        if let Some(path) = ControlMap::default_config_path() {
            assert!(path.ends_with("lander/input.ron"));
        }
    }
}
