//! Platform abstraction layer
//!
//! Collaborators for running the game without a window:
//! - `RapierWorld`: rigid-body physics on `rapier2d`
//! - `RecordingRenderer`: captures scene and camera commands
//! - `ScriptedInput`: keys held by the caller

pub mod rapier;
pub mod recording;

pub use rapier::RapierWorld;
pub use recording::{RecordingRenderer, RenderCommand, ScriptedInput};
