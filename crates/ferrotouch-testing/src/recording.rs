//! Handler that records every hook invocation.

use ferrotouch::{MotionHandler, PressDelta};

/// One recorded hook invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HookEvent {
    TouchStart(f64),
    TouchMove(f64),
    TouchEnd { value: f64, page: i64 },
    TouchCancel(f64),
    Change(f64),
    ReboundEnd(f64),
    AnimationEnd(f64),
    CorrectionEnd(f64),
    Tap(f64),
    PressMove { dx: f64, dy: f64, value: f64 },
}

/// Records hooks in order; optionally vetoes the default settle.
#[derive(Debug, Default)]
pub struct RecordingHandler {
    pub events: Vec<HookEvent>,
    /// When set, `on_touch_end` returns `false` and the controller skips
    /// its default settle behavior.
    pub suppress_settle: bool,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, matches: impl Fn(&HookEvent) -> bool) -> usize {
        self.events.iter().filter(|event| matches(event)).count()
    }

    pub fn animation_ends(&self) -> usize {
        self.count(|e| matches!(e, HookEvent::AnimationEnd(_)))
    }

    pub fn rebound_ends(&self) -> usize {
        self.count(|e| matches!(e, HookEvent::ReboundEnd(_)))
    }

    pub fn correction_ends(&self) -> usize {
        self.count(|e| matches!(e, HookEvent::CorrectionEnd(_)))
    }

    pub fn taps(&self) -> usize {
        self.count(|e| matches!(e, HookEvent::Tap(_)))
    }

    pub fn changes(&self) -> usize {
        self.count(|e| matches!(e, HookEvent::Change(_)))
    }

    pub fn press_moves(&self) -> usize {
        self.count(|e| matches!(e, HookEvent::PressMove { .. }))
    }

    pub fn last_change(&self) -> Option<f64> {
        self.events.iter().rev().find_map(|event| match event {
            HookEvent::Change(value) => Some(*value),
            _ => None,
        })
    }
}

impl MotionHandler for RecordingHandler {
    fn on_touch_start(&mut self, value: f64) {
        self.events.push(HookEvent::TouchStart(value));
    }

    fn on_touch_move(&mut self, value: f64) {
        self.events.push(HookEvent::TouchMove(value));
    }

    fn on_touch_end(&mut self, value: f64, page: i64) -> bool {
        self.events.push(HookEvent::TouchEnd { value, page });
        !self.suppress_settle
    }

    fn on_touch_cancel(&mut self, value: f64) {
        self.events.push(HookEvent::TouchCancel(value));
    }

    fn on_change(&mut self, value: f64) {
        self.events.push(HookEvent::Change(value));
    }

    fn on_rebound_end(&mut self, value: f64) {
        self.events.push(HookEvent::ReboundEnd(value));
    }

    fn on_animation_end(&mut self, value: f64) {
        self.events.push(HookEvent::AnimationEnd(value));
    }

    fn on_correction_end(&mut self, value: f64) {
        self.events.push(HookEvent::CorrectionEnd(value));
    }

    fn on_tap(&mut self, value: f64) {
        self.events.push(HookEvent::Tap(value));
    }

    fn on_press_move(&mut self, delta: PressDelta, value: f64) {
        self.events.push(HookEvent::PressMove {
            dx: delta.dx,
            dy: delta.dy,
            value,
        });
    }
}
