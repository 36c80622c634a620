//! Per-gesture tracking state.

use ferrotouch_core::Point;

use crate::constants::{TAP_SLOP, VELOCITY_WINDOW_MS};

/// State for one gesture, created on touch-start and destroyed on
/// touch-end/cancel. Owned exclusively by the controller; at most one
/// session exists at a time.
#[derive(Debug, Clone)]
pub(crate) struct GestureSession {
    /// First contact point.
    pub first: Point,
    /// Previous drag sample; advances only while the session is unblocked.
    pub previous: Point,
    /// Last point seen by any move, blocked or not.
    pub last: Option<Point>,
    /// Axis coordinate at the velocity-window anchor.
    pub window_start: f64,
    /// Time of the velocity-window anchor.
    pub window_start_time: f64,
    /// True until the first move has been classified for direction lock.
    pub first_move: bool,
    /// Set when the first move's dominant axis is the orthogonal one; the
    /// channel stops following this gesture.
    pub direction_blocked: bool,
}

impl GestureSession {
    pub fn open(point: Point, t: f64, vertical: bool) -> Self {
        Self {
            first: point,
            previous: point,
            last: None,
            window_start: axis(vertical, point),
            window_start_time: t,
            first_move: true,
            direction_blocked: false,
        }
    }

    /// Classify the first move for direction lock: if the displacement since
    /// first contact is dominated by the orthogonal axis, block the session.
    pub fn classify_first_move(&mut self, point: Point, vertical: bool) {
        let dominance = (point.x - self.first.x).abs() - (point.y - self.first.y).abs();
        if (dominance > 0.0 && vertical) || (dominance < 0.0 && !vertical) {
            self.direction_blocked = true;
        }
        self.first_move = false;
    }

    /// Re-anchor the velocity window once it goes stale, so a later release
    /// only samples the most recent stretch of motion.
    pub fn rebase_window(&mut self, point: Point, t: f64, vertical: bool) {
        if t - self.window_start_time > VELOCITY_WINDOW_MS {
            self.window_start_time = t;
            self.window_start = axis(vertical, point);
        }
    }

    /// Tap test: under the slop on both axes between first contact and
    /// release.
    pub fn is_tap(&self, point: Point) -> bool {
        (point.x - self.first.x).abs() < TAP_SLOP && (point.y - self.first.y).abs() < TAP_SLOP
    }
}

/// Project a point onto the configured axis.
pub(crate) fn axis(vertical: bool, point: Point) -> f64 {
    if vertical {
        point.y
    } else {
        point.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tap_requires_both_axes_under_slop() {
        let session = GestureSession::open(Point::new(100.0, 100.0), 0.0, true);
        assert!(session.is_tap(Point::new(129.0, 71.0)));
        assert!(!session.is_tap(Point::new(130.0, 100.0)));
        assert!(!session.is_tap(Point::new(100.0, 130.0)));
    }

    #[test]
    fn cross_axis_first_move_blocks_vertical_session() {
        let mut session = GestureSession::open(Point::ZERO, 0.0, true);
        session.classify_first_move(Point::new(40.0, 10.0), true);
        assert!(session.direction_blocked);
        assert!(!session.first_move);
    }

    #[test]
    fn on_axis_first_move_keeps_session_live() {
        let mut session = GestureSession::open(Point::ZERO, 0.0, true);
        session.classify_first_move(Point::new(10.0, 40.0), true);
        assert!(!session.direction_blocked);
    }

    #[test]
    fn horizontal_session_blocks_on_vertical_dominance() {
        let mut session = GestureSession::open(Point::ZERO, 0.0, false);
        session.classify_first_move(Point::new(10.0, 40.0), false);
        assert!(session.direction_blocked);
    }

    #[test]
    fn window_rebases_only_after_it_goes_stale() {
        let mut session = GestureSession::open(Point::ZERO, 0.0, true);
        session.rebase_window(Point::new(0.0, 50.0), 200.0, true);
        assert_eq!(session.window_start_time, 0.0);
        assert_eq!(session.window_start, 0.0);
        session.rebase_window(Point::new(0.0, 80.0), 350.0, true);
        assert_eq!(session.window_start_time, 350.0);
        assert_eq!(session.window_start, 80.0);
    }
}
