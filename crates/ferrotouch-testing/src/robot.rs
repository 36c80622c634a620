//! Scripted gesture driver.

use std::rc::Rc;

use ferrotouch::{FramePump, MoveResponse, Point, TouchMotion};

/// Frames a run may take before [`GestureRobot::pump_until_idle`] gives up.
const IDLE_FRAME_BUDGET: usize = 10_000;

/// Drives a controller through scripted touch phases and paced frames on a
/// single synthetic timeline. Time only moves when the robot advances it.
pub struct GestureRobot {
    motion: TouchMotion,
    pump: Rc<FramePump>,
    now_ms: f64,
}

impl GestureRobot {
    pub fn new(motion: TouchMotion, pump: Rc<FramePump>) -> Self {
        Self {
            motion,
            pump,
            now_ms: 0.0,
        }
    }

    pub fn motion(&self) -> &TouchMotion {
        &self.motion
    }

    pub fn pump(&self) -> &Rc<FramePump> {
        &self.pump
    }

    pub fn now(&self) -> f64 {
        self.now_ms
    }

    /// Move the timeline forward without delivering touch events or frames.
    pub fn advance(&mut self, dt_ms: f64) {
        self.now_ms += dt_ms;
        self.pump.set_now(self.now_ms);
    }

    pub fn press(&mut self, x: f64, y: f64) {
        self.motion.touch_start(Point::new(x, y), self.now_ms);
    }

    /// Advance `dt_ms`, then deliver a single-contact move to `(x, y)`.
    pub fn drag_to(&mut self, x: f64, y: f64, dt_ms: f64) -> MoveResponse {
        self.advance(dt_ms);
        self.motion
            .touch_move(Point::new(x, y), self.now_ms, 1, false)
    }

    /// Advance `dt_ms`, then release at `(x, y)`.
    pub fn release(&mut self, x: f64, y: f64, dt_ms: f64) {
        self.advance(dt_ms);
        self.motion.touch_end(Point::new(x, y), self.now_ms);
    }

    /// Advance `dt_ms`, then cancel at `(x, y)`.
    pub fn cancel(&mut self, x: f64, y: f64, dt_ms: f64) {
        self.advance(dt_ms);
        self.motion.touch_cancel(Point::new(x, y), self.now_ms);
    }

    /// Deliver one paced frame `dt_ms` later.
    pub fn pump_frame(&mut self, dt_ms: f64) -> usize {
        self.advance(dt_ms);
        self.pump.drain(self.now_ms)
    }

    /// Pump fixed-interval frames until no tick is pending. Returns the
    /// number of frames delivered.
    pub fn pump_until_idle(&mut self, frame_ms: f64) -> usize {
        let mut frames = 0;
        while self.pump.has_pending() {
            assert!(
                frames < IDLE_FRAME_BUDGET,
                "animation did not settle within {IDLE_FRAME_BUDGET} frames"
            );
            self.pump_frame(frame_ms);
            frames += 1;
        }
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use ferrotouch::{FramePacer, MotionChannel, MotionConfig, MotionHandler, SharedValue};

    use crate::RecordingHandler;

    struct Fixture {
        robot: GestureRobot,
        handler: Rc<RefCell<RecordingHandler>>,
        channel: Rc<SharedValue>,
    }

    fn fixture(config: MotionConfig) -> Fixture {
        let channel = SharedValue::new(config.initial_value.unwrap_or(0.0));
        let handler = Rc::new(RefCell::new(RecordingHandler::new()));
        let pump = FramePump::new();
        let motion = TouchMotion::new(
            config,
            channel.clone(),
            handler.clone() as Rc<RefCell<dyn MotionHandler>>,
            pump.clone(),
        )
        .expect("valid config");
        Fixture {
            robot: GestureRobot::new(motion, pump),
            handler,
            channel,
        }
    }

    #[test]
    fn robot_timeline_is_shared_with_pump() {
        let mut fx = fixture(MotionConfig::new());
        fx.robot.advance(100.0);
        assert_eq!(fx.robot.now(), 100.0);
        assert_eq!(fx.robot.pump().now_ms(), 100.0);
    }

    #[test]
    fn drag_follows_the_finger() {
        let mut fx = fixture(MotionConfig::new());
        fx.robot.press(0.0, 0.0);
        fx.robot.drag_to(0.0, 50.0, 16.0);
        fx.robot.drag_to(0.0, 120.0, 16.0);
        assert_eq!(fx.channel.get(), 120.0);
        assert_eq!(fx.handler.borrow().changes(), 2);
    }

    #[test]
    fn pump_until_idle_settles_a_programmatic_run() {
        let mut fx = fixture(MotionConfig::new());
        fx.robot.motion().animate_to(300.0);
        let frames = fx.robot.pump_until_idle(16.0);
        assert!(frames > 0);
        assert_eq!(fx.channel.get(), 300.0);
        assert!(!fx.robot.motion().is_animating());
    }
}
