//! Timed control scripts for headless runs.
//!
//! A script is a RON file listing control edges and the tick they fire on:
//!
//! ```ron
//! (
//!     entries: [
//!         (tick: 0, control: ThrustUp, edge: Down),
//!         (tick: 40, control: ThrustUp, edge: Up),
//!         (tick: 40, control: RollRight, edge: Down),
//!     ],
//! )
//! ```

use std::path::Path;

use lander_input::{ControlCode, ControlEvent, KeyEdge};
use serde::{Deserialize, Serialize};

use crate::ScriptError;

/// One scripted control edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptEntry {
    pub tick: u64,
    pub control: ControlCode,
    pub edge: KeyEdge,
}

impl ScriptEntry {
    pub fn event(&self) -> ControlEvent {
        ControlEvent {
            control: self.control,
            edge: self.edge,
        }
    }
}

/// Control edges ordered by tick. Entries sharing a tick keep file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightScript {
    entries: Vec<ScriptEntry>,
}

impl FlightScript {
    pub fn new(mut entries: Vec<ScriptEntry>) -> Self {
        entries.sort_by_key(|entry| entry.tick);
        Self { entries }
    }

    /// Read and parse a script file.
    ///
    /// # Errors
    /// [`ScriptError::Read`] if the file can't be read, [`ScriptError::Parse`]
    /// if it isn't a valid script.
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&contents)
    }

    pub fn from_ron(s: &str) -> Result<Self, ScriptError> {
        let script: FlightScript = ron::from_str(s)?;
        Ok(Self::new(script.entries))
    }

    pub fn entries(&self) -> &[ScriptEntry] {
        &self.entries
    }

    /// Events scheduled for `tick`, in order.
    pub fn events_at(&self, tick: u64) -> impl Iterator<Item = ControlEvent> + '_ {
        let start = self.entries.partition_point(|entry| entry.tick < tick);
        self.entries[start..]
            .iter()
            .take_while(move |entry| entry.tick == tick)
            .map(ScriptEntry::event)
    }

    /// Tick of the last scheduled event.
    pub fn last_tick(&self) -> Option<u64> {
        self.entries.last().map(|entry| entry.tick)
    }
}
