//! The gesture state machine and animation driver.
//!
//! `TouchMotion` sequences drag-follow motion, inertial coasting, elastic
//! rebound, and page correction over one channel. A gesture session and an
//! animation run are mutually exclusive over time: touch-start cancels any
//! pending tick, and every settle transition cancels the previous run
//! before starting the next.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, trace};

use ferrotouch_core::{
    drag_friction, inertial_throw, page_index, resolve_overshoot, snap_target, ConfigError,
    Easing, MotionConfig, Point, ThrowTuning,
};

use crate::channel::MotionChannel;
use crate::constants::{
    CORRECTION_DURATION_MS, DEFAULT_ANIMATE_DURATION_MS, OVERSHOOT_RETURN_DURATION_MS,
    REBOUND_DURATION_MS, VELOCITY_WINDOW_MS,
};
use crate::handler::{MotionHandler, PressDelta};
use crate::pacer::{FramePacer, FrameRegistration};
use crate::session::{axis, GestureSession};

/// What a finished run does next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunKind {
    /// `animate_to`: recompute the page, fire rebound-end and animation-end.
    Programmatic,
    /// 200 ms settle to a violated bound after release.
    Rebound,
    /// Inertial coast; its completion decides the next transition.
    Coast,
    /// 600 ms return run after a coast landed past a bound.
    BoundReturn,
    /// 400 ms page-snap correction.
    Correction,
}

/// One time-parameterized interpolation toward a target. At most one run is
/// active per controller; the registration handle is the only suspension
/// point and dropping it cancels the pending tick.
struct AnimationRun {
    from: f64,
    to: f64,
    duration_ms: f64,
    begin_ms: f64,
    easing: Easing,
    kind: RunKind,
    registration: Option<FrameRegistration>,
}

/// Outcome of feeding a move event to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveResponse {
    /// The host should suppress the event's default handling.
    pub prevent_default: bool,
}

struct MotionInner {
    config: MotionConfig,
    channel: Rc<dyn MotionChannel>,
    handler: Rc<RefCell<dyn MotionHandler>>,
    pacer: Rc<dyn FramePacer>,
    session: Option<GestureSession>,
    run: Option<AnimationRun>,
    current_page: i64,
}

impl MotionInner {
    fn recompute_page(&mut self) {
        if let (Some(_), Some(max), Some(step)) = (self.config.min, self.config.max, self.config.step)
        {
            self.current_page = page_index(self.channel.get(), max, step);
        }
    }
}

/// Single-channel touch motion controller.
///
/// Feed it touch phases with host timestamps (ms, on the same monotonic
/// timebase as the injected [`FramePacer`]) and it drives the channel
/// through drag, coast, rebound, and correction. Cloning yields another
/// handle to the same controller.
pub struct TouchMotion {
    inner: Rc<RefCell<MotionInner>>,
}

impl TouchMotion {
    pub fn new(
        config: MotionConfig,
        channel: Rc<dyn MotionChannel>,
        handler: Rc<RefCell<dyn MotionHandler>>,
        pacer: Rc<dyn FramePacer>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if let Some(seed) = config.initial_value {
            channel.set(seed);
        }
        let inner = Rc::new(RefCell::new(MotionInner {
            config,
            channel,
            handler,
            pacer,
            session: None,
            run: None,
            current_page: 0,
        }));
        inner.borrow_mut().recompute_page();
        Ok(Self { inner })
    }

    /// Current channel value.
    pub fn value(&self) -> f64 {
        self.inner.borrow().channel.get()
    }

    /// Page index as of the last recomputation (touch-start, programmatic
    /// completion, correction completion). Only meaningful when `min`,
    /// `max`, and `step` are all configured.
    pub fn current_page(&self) -> i64 {
        self.inner.borrow().current_page
    }

    /// Whether an animation run is in flight.
    pub fn is_animating(&self) -> bool {
        self.inner.borrow().run.is_some()
    }

    /// Snapshot of the configuration, for host integration concerns such as
    /// listener placement (`bind_self`).
    pub fn config(&self) -> MotionConfig {
        self.inner.borrow().config.clone()
    }

    /// Programmatic settle to `value` over the default 600 ms with the
    /// default ease.
    pub fn animate_to(&self, value: f64) {
        self.animate_to_with(value, DEFAULT_ANIMATE_DURATION_MS, Easing::CircleOut);
    }

    /// Programmatic settle with an explicit duration and easing. Completion
    /// recomputes the page index and fires rebound-end then animation-end.
    pub fn animate_to_with(&self, value: f64, duration_ms: f64, easing: Easing) {
        Self::start_run(&self.inner, value, duration_ms, easing, RunKind::Programmatic);
    }

    /// Open a gesture session. Cancels any in-flight run.
    pub fn touch_start(&self, point: Point, t: f64) {
        let (handler, value) = {
            let mut guard = self.inner.borrow_mut();
            if guard.run.take().is_some() {
                trace!("touch start cancels active run");
            }
            guard.recompute_page();
            let vertical = guard.config.vertical;
            guard.session = Some(GestureSession::open(point, t, vertical));
            (guard.handler.clone(), guard.channel.get())
        };
        debug!("gesture session opened at value {value}");
        handler.borrow_mut().on_touch_start(value);
    }

    /// Feed a move sample. `touches` is the number of active contact points;
    /// `interactive_target` flags a touch that started on an interactive
    /// form control (which exempts it from default-suppression).
    pub fn touch_move(
        &self,
        point: Point,
        t: f64,
        touches: usize,
        interactive_target: bool,
    ) -> MoveResponse {
        let handler;
        let moved;
        let press;
        let prevent_default;
        {
            let mut guard = self.inner.borrow_mut();
            handler = guard.handler.clone();
            let MotionInner {
                config,
                channel,
                session,
                ..
            } = &mut *guard;
            let Some(session) = session.as_mut() else {
                return MoveResponse::default();
            };

            if session.first_move && config.lock_direction {
                session.classify_first_move(point, config.vertical);
                if session.direction_blocked {
                    debug!("direction lock engaged; channel frozen for this gesture");
                }
            }

            moved = if session.direction_blocked {
                None
            } else {
                let raw = (axis(config.vertical, point) - axis(config.vertical, session.previous))
                    * config.sensitivity;
                let friction = drag_friction(
                    channel.get(),
                    raw,
                    config.min,
                    config.max,
                    config.move_factor,
                    config.out_factor,
                );
                session.previous = point;
                if !config.fixed {
                    channel.set(channel.get() + raw * friction);
                }
                session.rebase_window(point, t, config.vertical);
                Some(channel.get())
            };

            prevent_default = config.prevent_default && !interactive_target;

            press = if touches == 1 {
                let delta = match session.last {
                    Some(last) => PressDelta {
                        dx: point.x - last.x,
                        dy: point.y - last.y,
                    },
                    None => PressDelta::default(),
                };
                Some((delta, channel.get()))
            } else {
                None
            };
            session.last = Some(point);
        }

        if let Some(value) = moved {
            handler.borrow_mut().on_change(value);
            handler.borrow_mut().on_touch_move(value);
        }
        if let Some((delta, value)) = press {
            handler.borrow_mut().on_press_move(delta, value);
        }
        MoveResponse { prevent_default }
    }

    /// Close the session and settle: rebound past a bound, inertial coast
    /// from a fresh velocity sample, or page correction.
    pub fn touch_end(&self, point: Point, t: f64) {
        let (handler, session, value, page) = {
            let mut guard = self.inner.borrow_mut();
            let Some(session) = guard.session.take() else {
                return;
            };
            (
                guard.handler.clone(),
                session,
                guard.channel.get(),
                guard.current_page,
            )
        };

        let is_tap = session.is_tap(point);
        if is_tap {
            handler.borrow_mut().on_tap(value);
        }
        if !handler.borrow_mut().on_touch_end(value, page) {
            debug!("touch end: default settle suppressed by handler");
            return;
        }

        let config = self.inner.borrow().config.clone();
        if let Some(max) = config.max.filter(|max| value > *max) {
            debug!("settle: rebound to max {max}");
            Self::start_run(
                &self.inner,
                max,
                REBOUND_DURATION_MS,
                Easing::CircleOut,
                RunKind::Rebound,
            );
            return;
        }
        if let Some(min) = config.min.filter(|min| value < *min) {
            debug!("settle: rebound to min {min}");
            Self::start_run(
                &self.inner,
                min,
                REBOUND_DURATION_MS,
                Easing::CircleOut,
                RunKind::Rebound,
            );
            return;
        }
        if config.inertia && !is_tap && !session.direction_blocked {
            let dt = t - session.window_start_time;
            if dt > 0.0 && dt < VELOCITY_WINDOW_MS {
                let distance =
                    (axis(config.vertical, point) - session.window_start) * config.sensitivity;
                let throw = inertial_throw(
                    value,
                    distance,
                    dt,
                    &ThrowTuning {
                        factor: config.factor,
                        max_speed: config.max_speed,
                        deceleration: config.deceleration,
                    },
                );
                let adjust = resolve_overshoot(
                    value,
                    throw.destination,
                    config.min,
                    config.max,
                    config.max_region,
                    config.spring_max_region,
                );
                let duration_ms = throw.duration_ms * adjust.time_ratio;
                debug!(
                    "settle: inertial coast to {} over {duration_ms}ms",
                    adjust.destination.round()
                );
                Self::start_run(
                    &self.inner,
                    adjust.destination.round(),
                    duration_ms,
                    Easing::CircleOut,
                    RunKind::Coast,
                );
                return;
            }
        }
        Self::correct(&self.inner);
    }

    /// Cancelled gestures fire the cancel hook and then settle exactly like
    /// a touch-end.
    pub fn touch_cancel(&self, point: Point, t: f64) {
        let (handler, value) = {
            let guard = self.inner.borrow();
            (guard.handler.clone(), guard.channel.get())
        };
        handler.borrow_mut().on_touch_cancel(value);
        self.touch_end(point, t);
    }

    /// Snap to the nearest page, or settle immediately when no step is
    /// configured.
    fn correct(inner: &Rc<RefCell<MotionInner>>) {
        let (step, value) = {
            let guard = inner.borrow();
            (guard.config.step, guard.channel.get())
        };
        let Some(step) = step else {
            return;
        };
        let target = snap_target(value, step);
        debug!("settle: correction from {value} to {target}");
        Self::start_run(
            inner,
            target,
            CORRECTION_DURATION_MS,
            Easing::CircleOut,
            RunKind::Correction,
        );
    }

    fn start_run(
        inner: &Rc<RefCell<MotionInner>>,
        to: f64,
        duration_ms: f64,
        easing: Easing,
        kind: RunKind,
    ) {
        let mut guard = inner.borrow_mut();
        if guard.config.fixed {
            return;
        }
        // Dropping a previous run cancels its pending tick; two runs must
        // never race on the same channel.
        guard.run = None;
        let from = guard.channel.get();
        let begin_ms = guard.pacer.now_ms();
        trace!("run start: {kind:?} {from} -> {to} over {duration_ms}ms");
        let weak = Rc::downgrade(inner);
        let id = guard.pacer.schedule_frame(Box::new(move |frame_ms| {
            if let Some(strong) = weak.upgrade() {
                TouchMotion::tick(&strong, frame_ms);
            }
        }));
        let registration = match id {
            Some(id) => FrameRegistration::new(guard.pacer.clone(), id),
            None => FrameRegistration::inactive(guard.pacer.clone()),
        };
        guard.run = Some(AnimationRun {
            from,
            to,
            duration_ms,
            begin_ms,
            easing,
            kind,
            registration: Some(registration),
        });
    }

    fn tick(inner: &Rc<RefCell<MotionInner>>, now_ms: f64) {
        let handler;
        let value;
        let finished;
        {
            let mut guard = inner.borrow_mut();
            handler = guard.handler.clone();
            let state = &mut *guard;
            let MotionInner {
                run,
                channel,
                pacer,
                ..
            } = state;
            let Some(active) = run.as_mut() else {
                return;
            };
            let elapsed = now_ms - active.begin_ms;
            if elapsed >= active.duration_ms {
                value = active.to;
                finished = Some(active.kind);
                channel.set(value);
            } else {
                value = active.from
                    + (active.to - active.from)
                        * active.easing.transform(elapsed / active.duration_ms);
                finished = None;
                channel.set(value);
                let weak = Rc::downgrade(inner);
                let id = pacer.schedule_frame(Box::new(move |frame_ms| {
                    if let Some(strong) = weak.upgrade() {
                        TouchMotion::tick(&strong, frame_ms);
                    }
                }));
                active.registration = Some(match id {
                    Some(id) => FrameRegistration::new(Rc::clone(pacer), id),
                    None => FrameRegistration::inactive(Rc::clone(pacer)),
                });
            }
            if finished.is_some() {
                guard.run = None;
            }
        }
        handler.borrow_mut().on_change(value);
        if let Some(kind) = finished {
            Self::complete(inner, kind, value);
        }
    }

    fn complete(inner: &Rc<RefCell<MotionInner>>, kind: RunKind, value: f64) {
        let handler = inner.borrow().handler.clone();
        match kind {
            RunKind::Programmatic => {
                inner.borrow_mut().recompute_page();
                handler.borrow_mut().on_rebound_end(value);
                handler.borrow_mut().on_animation_end(value);
            }
            RunKind::Rebound => {
                handler.borrow_mut().on_rebound_end(value);
                handler.borrow_mut().on_animation_end(value);
            }
            RunKind::BoundReturn => {
                handler.borrow_mut().on_animation_end(value);
            }
            RunKind::Correction => {
                inner.borrow_mut().recompute_page();
                handler.borrow_mut().on_correction_end(value);
                handler.borrow_mut().on_animation_end(value);
            }
            RunKind::Coast => {
                let (min, max, has_step, landed) = {
                    let guard = inner.borrow();
                    (
                        guard.config.min,
                        guard.config.max,
                        guard.config.step.is_some(),
                        guard.channel.get(),
                    )
                };
                if let Some(max) = max.filter(|max| landed > *max) {
                    debug!("coast landed past max; returning to {max}");
                    Self::start_run(
                        inner,
                        max,
                        OVERSHOOT_RETURN_DURATION_MS,
                        Easing::CircleOut,
                        RunKind::BoundReturn,
                    );
                } else if let Some(min) = min.filter(|min| landed < *min) {
                    debug!("coast landed past min; returning to {min}");
                    Self::start_run(
                        inner,
                        min,
                        OVERSHOOT_RETURN_DURATION_MS,
                        Easing::CircleOut,
                        RunKind::BoundReturn,
                    );
                } else if has_step {
                    Self::correct(inner);
                } else {
                    handler.borrow_mut().on_animation_end(value);
                }
            }
        }
    }
}

impl Clone for TouchMotion {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}
