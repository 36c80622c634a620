//! Single-channel touch kinetics controller.
//!
//! `ferrotouch` animates one numeric channel in response to single-axis
//! touch-drag gestures: drag-follow motion while the finger is down,
//! inertial coasting after release, elastic rebound past configured bounds,
//! and optional snapping to discrete pages.
//!
//! The controller implements none of its own event delivery or frame pacing;
//! both are injected. The host feeds touch phases into [`TouchMotion`] with
//! explicit timestamps and drives a [`FramePacer`] (typically a
//! [`FramePump`] drained once per display refresh). The animated value lives
//! behind a [`MotionChannel`], and gesture/animation lifecycle events arrive
//! through a [`MotionHandler`].

pub mod channel;
pub mod constants;
pub mod controller;
pub mod handler;
pub mod pacer;
mod session;

pub use channel::{MotionChannel, SharedValue};
pub use controller::{MoveResponse, TouchMotion};
pub use handler::{MotionHandler, PressDelta};
pub use pacer::{FrameCallback, FrameCallbackId, FramePacer, FramePump, FrameRegistration};

pub use ferrotouch_core::{ConfigError, Easing, MotionConfig, Point};
