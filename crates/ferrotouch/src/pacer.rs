//! Frame pacing seam: schedule-next-tick, cancel, and a monotonic clock.

use std::cell::RefCell;
use std::rc::Rc;

use smallvec::SmallVec;
use web_time::Instant;

pub type FrameCallbackId = u64;
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Frame-pacing collaborator: schedules a callback for roughly the next
/// display refresh and exposes the monotonic millisecond clock the
/// controller's animations run on.
///
/// `schedule_frame` returns `None` when the pacer cannot deliver frames
/// (shutting down); the controller treats that as an inactive registration.
pub trait FramePacer {
    fn schedule_frame(&self, callback: FrameCallback) -> Option<FrameCallbackId>;
    fn cancel_frame(&self, id: FrameCallbackId);
    fn now_ms(&self) -> f64;
}

/// Cancellable handle for one scheduled frame callback.
///
/// Dropping the registration cancels the callback, so the single active
/// animation handle can never leak a ticking loop.
pub struct FrameRegistration {
    pacer: Rc<dyn FramePacer>,
    id: Option<FrameCallbackId>,
}

impl FrameRegistration {
    pub fn new(pacer: Rc<dyn FramePacer>, id: FrameCallbackId) -> Self {
        Self {
            pacer,
            id: Some(id),
        }
    }

    pub fn inactive(pacer: Rc<dyn FramePacer>) -> Self {
        Self { pacer, id: None }
    }

    pub fn cancel(mut self) {
        if let Some(id) = self.id.take() {
            self.pacer.cancel_frame(id);
        }
    }
}

impl Drop for FrameRegistration {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.pacer.cancel_frame(id);
        }
    }
}

struct PumpState {
    pending: SmallVec<[(FrameCallbackId, FrameCallback); 4]>,
    next_id: FrameCallbackId,
    now_ms: f64,
}

/// Host-driven frame pacer.
///
/// The host calls [`FramePump::drain`] once per display refresh with the
/// current frame time (or [`FramePump::drain_now`] to read the pump's own
/// monotonic origin); every callback scheduled before that drain runs with
/// the frame time. Callbacks scheduled during a drain land in the next one.
///
/// `now_ms` reports the most recent frame time, which keeps a whole frame's
/// worth of work on one consistent clock.
pub struct FramePump {
    state: RefCell<PumpState>,
    origin: Instant,
}

impl FramePump {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            state: RefCell::new(PumpState {
                pending: SmallVec::new(),
                next_id: 1,
                now_ms: 0.0,
            }),
            origin: Instant::now(),
        })
    }

    /// Run every pending callback with the given frame time.
    pub fn drain(&self, now_ms: f64) -> usize {
        let drained = {
            let mut state = self.state.borrow_mut();
            state.now_ms = now_ms;
            std::mem::take(&mut state.pending)
        };
        let count = drained.len();
        for (_, callback) in drained {
            callback(now_ms);
        }
        count
    }

    /// Drain using the pump's own monotonic clock.
    pub fn drain_now(&self) -> usize {
        self.drain(self.origin.elapsed().as_secs_f64() * 1000.0)
    }

    /// Advance the reported clock without delivering frames. Lets hosts (and
    /// tests) keep event timestamps and the animation clock on one timeline
    /// between drains.
    pub fn set_now(&self, now_ms: f64) {
        self.state.borrow_mut().now_ms = now_ms;
    }

    pub fn has_pending(&self) -> bool {
        !self.state.borrow().pending.is_empty()
    }
}

impl FramePacer for FramePump {
    fn schedule_frame(&self, callback: FrameCallback) -> Option<FrameCallbackId> {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        state.pending.push((id, callback));
        Some(id)
    }

    fn cancel_frame(&self, id: FrameCallbackId) {
        self.state
            .borrow_mut()
            .pending
            .retain(|(pending_id, _)| *pending_id != id);
    }

    fn now_ms(&self) -> f64 {
        self.state.borrow().now_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn drain_runs_scheduled_callback_once() {
        let pump = FramePump::new();
        let hits = Rc::new(Cell::new(0));
        let hits_in = Rc::clone(&hits);
        pump.schedule_frame(Box::new(move |_| hits_in.set(hits_in.get() + 1)));
        assert!(pump.has_pending());
        assert_eq!(pump.drain(16.0), 1);
        assert_eq!(hits.get(), 1);
        assert_eq!(pump.drain(32.0), 0);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn cancel_prevents_delivery() {
        let pump = FramePump::new();
        let hits = Rc::new(Cell::new(0));
        let hits_in = Rc::clone(&hits);
        let id = pump
            .schedule_frame(Box::new(move |_| hits_in.set(hits_in.get() + 1)))
            .unwrap();
        pump.cancel_frame(id);
        assert_eq!(pump.drain(16.0), 0);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn dropping_registration_cancels() {
        let pump = FramePump::new();
        let pacer: Rc<dyn FramePacer> = pump.clone();
        let id = pacer.schedule_frame(Box::new(|_| {})).unwrap();
        let registration = FrameRegistration::new(pacer, id);
        drop(registration);
        assert!(!pump.has_pending());
    }

    #[test]
    fn callbacks_scheduled_during_drain_wait_for_next_drain() {
        let pump = FramePump::new();
        let pump_in = Rc::clone(&pump);
        pump.schedule_frame(Box::new(move |_| {
            pump_in.schedule_frame(Box::new(|_| {}));
        }));
        assert_eq!(pump.drain(16.0), 1);
        assert!(pump.has_pending());
        assert_eq!(pump.drain(32.0), 1);
    }

    #[test]
    fn drain_and_set_now_update_clock() {
        let pump = FramePump::new();
        assert_eq!(pump.now_ms(), 0.0);
        pump.drain(16.0);
        assert_eq!(pump.now_ms(), 16.0);
        pump.set_now(20.0);
        assert_eq!(pump.now_ms(), 20.0);
    }

    #[test]
    fn callback_receives_frame_time() {
        let pump = FramePump::new();
        let seen = Rc::new(Cell::new(0.0));
        let seen_in = Rc::clone(&seen);
        pump.schedule_frame(Box::new(move |t| seen_in.set(t)));
        pump.drain(48.0);
        assert_eq!(seen.get(), 48.0);
    }
}
