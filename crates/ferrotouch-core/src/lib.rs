//! Pure math and configuration for the ferrotouch motion controller.
//!
//! Nothing in this crate talks to an event source or a frame pacer; it is
//! the collaborator-free half of the system: friction-scaled drag deltas,
//! inertial-throw destinations, boundary-overshoot resolution, easing
//! curves, and page snapping.

pub mod config;
pub mod easing;
pub mod geometry;
pub mod kinematics;
pub mod paging;

pub use config::{ConfigError, MotionConfig};
pub use easing::{reverse_circle_out, Easing};
pub use geometry::Point;
pub use kinematics::{drag_friction, inertial_throw, resolve_overshoot, BoundaryAdjust, Throw, ThrowTuning};
pub use paging::{page_index, snap_target};
