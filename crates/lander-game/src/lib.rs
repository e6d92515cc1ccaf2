//! Game layer for the lander: level generation, the level session state
//! machine, camera views, HUD telemetry and scripted headless play.

pub mod camera;
mod error;
pub mod hud;
pub mod level;
pub mod script;
pub mod session;

pub use camera::{CameraController, CameraPose};
pub use error::{RunError, ScriptError, SessionError};
pub use hud::{HudState, update_hud};
pub use level::{LevelLayout, generate_level};
pub use script::{FlightScript, ScriptEntry};
pub use session::{
    BodyPose, FrameSnapshot, LevelSession, LogHooks, Outcome, PlanetView, SessionEvent,
    SessionHooks, SessionState,
};
