//! Gesture and animation lifecycle hooks.

/// Frame-to-frame displacement of the contact point, reported to
/// [`MotionHandler::on_press_move`] while exactly one contact is active.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PressDelta {
    pub dx: f64,
    pub dy: f64,
}

/// Lifecycle hooks for one motion controller.
///
/// Every method has a no-op default, so an implementation only overrides the
/// hooks it cares about. All hooks run on the host's event/frame context;
/// there is no parallelism to worry about.
pub trait MotionHandler {
    /// A gesture session opened. `value` is the channel value at contact.
    fn on_touch_start(&mut self, value: f64) {
        let _ = value;
    }

    /// The channel followed a drag move. Not invoked while the session is
    /// direction-blocked.
    fn on_touch_move(&mut self, value: f64) {
        let _ = value;
    }

    /// The gesture ended. Return `false` to suppress the default settle
    /// behavior (rebound / inertial coast / correction).
    fn on_touch_end(&mut self, value: f64, page: i64) -> bool {
        let _ = (value, page);
        true
    }

    /// The host cancelled the gesture (incoming call, focus loss, ...).
    fn on_touch_cancel(&mut self, value: f64) {
        let _ = value;
    }

    /// The channel value changed, from a drag move or an animation tick.
    fn on_change(&mut self, value: f64) {
        let _ = value;
    }

    /// A rebound or programmatic run reached its target.
    fn on_rebound_end(&mut self, value: f64) {
        let _ = value;
    }

    /// Any settle run finished and no further run was started.
    fn on_animation_end(&mut self, value: f64) {
        let _ = value;
    }

    /// A page-snap correction reached its target.
    fn on_correction_end(&mut self, value: f64) {
        let _ = value;
    }

    /// The gesture stayed within the tap slop on both axes.
    fn on_tap(&mut self, value: f64) {
        let _ = value;
    }

    /// Per-move contact displacement while a single contact is active,
    /// reported even when the session is direction-blocked. Zeroed on the
    /// first move of a session.
    fn on_press_move(&mut self, delta: PressDelta, value: f64) {
        let _ = (delta, value);
    }
}

/// Handler that ignores every hook.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHandler;

impl MotionHandler for NoopHandler {}
