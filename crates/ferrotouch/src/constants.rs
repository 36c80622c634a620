//! Shared gesture and settle constants.
//!
//! Values are in logical units and milliseconds. None of them are exposed
//! through [`MotionConfig`](crate::MotionConfig); the tap and lock
//! heuristics in particular are tuned as a pair.

/// Tap slop in logical units.
///
/// A gesture whose total displacement stays under this on both axes between
/// first contact and release is a tap, not a drag.
pub const TAP_SLOP: f64 = 30.0;

/// Velocity sampling window in ms.
///
/// The anchor for the release-velocity sample is rebased whenever the
/// gesture outlives this window, so an inertial throw only ever sees the
/// most recent stretch of motion. A release whose sample is older than this
/// skips inertia entirely.
pub const VELOCITY_WINDOW_MS: f64 = 300.0;

/// Duration of the elastic rebound to a violated bound after release.
pub const REBOUND_DURATION_MS: f64 = 200.0;

/// Duration of the page-snap correction.
pub const CORRECTION_DURATION_MS: f64 = 400.0;

/// Duration of the return run when an inertial coast lands past a bound.
pub const OVERSHOOT_RETURN_DURATION_MS: f64 = 600.0;

/// Default duration of a programmatic [`TouchMotion::animate_to`] run.
///
/// [`TouchMotion::animate_to`]: crate::TouchMotion::animate_to
pub const DEFAULT_ANIMATE_DURATION_MS: f64 = 600.0;
