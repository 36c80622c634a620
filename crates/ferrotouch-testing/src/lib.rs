//! Deterministic testing harness for ferrotouch.
//!
//! Drives a [`TouchMotion`] with scripted gestures over a manually pumped
//! [`FramePump`], so gesture timing and animation frames run on one
//! synthetic timeline with no real timers involved.

pub mod recording;
pub mod robot;

pub use recording::{HookEvent, RecordingHandler};
pub use robot::GestureRobot;
