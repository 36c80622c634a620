//! Controller configuration.
//!
//! `MotionConfig` is immutable after construction; the only validated
//! invariant is `min <= max` when both bounds are set. Other odd inputs,
//! such as negative steps or non-finite seeds, propagate as ordinary
//! numeric misbehavior.

use thiserror::Error;

/// Default overshoot distance beyond which the spring saturates.
pub const DEFAULT_MAX_REGION: f64 = 600.0;
/// Default maximum visual penetration past a bound.
pub const DEFAULT_SPRING_MAX_REGION: f64 = 60.0;
/// Default inertial deceleration, in channel units per ms^2.
pub const DEFAULT_DECELERATION: f64 = 0.0006;

/// Fatal configuration error raised at controller construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("min bound {min} is greater than max bound {max}")]
    InvalidRange { min: f64, max: f64 },
}

/// Configuration for one motion controller.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionConfig {
    /// Axis of interest: vertical when true, horizontal otherwise.
    pub vertical: bool,
    /// Optional seed written to the channel at construction.
    pub initial_value: Option<f64>,
    /// Suppress all channel writes (drag and animation) when set.
    pub fixed: bool,
    /// Drag-to-motion multiplier.
    pub sensitivity: f64,
    /// In-bounds drag friction.
    pub move_factor: f64,
    /// Out-of-bounds drag friction.
    pub out_factor: f64,
    /// Inertial-throw velocity multiplier.
    pub factor: f64,
    /// Elastic lower bound.
    pub min: Option<f64>,
    /// Elastic upper bound.
    pub max: Option<f64>,
    /// Overshoot distance beyond which the spring saturates.
    pub max_region: f64,
    /// Maximum visual penetration past a bound.
    pub spring_max_region: f64,
    /// Clamp on the scaled throw speed.
    pub max_speed: Option<f64>,
    /// Suppress motion for gestures whose dominant axis is the other one.
    pub lock_direction: bool,
    /// Page-snap granularity.
    pub step: Option<f64>,
    /// Inertial deceleration, in channel units per ms^2.
    pub deceleration: f64,
    /// Enable the inertial-coast branch after release.
    pub inertia: bool,
    /// Ask the host to suppress default touch handling, except on
    /// interactive form controls.
    pub prevent_default: bool,
    /// Hint to the host integration: bind move/end/cancel listeners to the
    /// touch surface itself rather than the global window.
    pub bind_self: bool,
}

impl MotionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the `min <= max` invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(ConfigError::InvalidRange { min, max });
            }
        }
        Ok(())
    }

    pub fn horizontal(mut self) -> Self {
        self.vertical = false;
        self
    }

    pub fn with_initial_value(mut self, value: f64) -> Self {
        self.initial_value = Some(value);
        self
    }

    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    pub fn with_sensitivity(mut self, sensitivity: f64) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn with_max_speed(mut self, max_speed: f64) -> Self {
        self.max_speed = Some(max_speed);
        self
    }

    pub fn without_inertia(mut self) -> Self {
        self.inertia = false;
        self
    }

    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    /// True when `min`, `max`, and `step` are all set, i.e. when a page
    /// index is meaningful.
    pub fn is_paged(&self) -> bool {
        self.min.is_some() && self.max.is_some() && self.step.is_some()
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            vertical: true,
            initial_value: None,
            fixed: false,
            sensitivity: 1.0,
            move_factor: 1.0,
            out_factor: 0.3,
            factor: 1.0,
            min: None,
            max: None,
            max_region: DEFAULT_MAX_REGION,
            spring_max_region: DEFAULT_SPRING_MAX_REGION,
            max_speed: None,
            lock_direction: true,
            step: None,
            deceleration: DEFAULT_DECELERATION,
            inertia: true,
            prevent_default: true,
            bind_self: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = MotionConfig::default();
        assert!(config.vertical);
        assert_eq!(config.sensitivity, 1.0);
        assert_eq!(config.move_factor, 1.0);
        assert_eq!(config.out_factor, 0.3);
        assert_eq!(config.factor, 1.0);
        assert_eq!(config.max_region, 600.0);
        assert_eq!(config.spring_max_region, 60.0);
        assert_eq!(config.deceleration, 0.0006);
        assert!(config.lock_direction);
        assert!(config.inertia);
        assert!(config.prevent_default);
        assert!(!config.bind_self);
        assert!(!config.fixed);
        assert!(config.min.is_none() && config.max.is_none() && config.step.is_none());
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let err = MotionConfig::new().with_bounds(10.0, 5.0).validate();
        assert_eq!(
            err,
            Err(ConfigError::InvalidRange {
                min: 10.0,
                max: 5.0
            })
        );
    }

    #[test]
    fn single_bound_is_accepted() {
        assert!(MotionConfig::new().with_min(100.0).validate().is_ok());
        assert!(MotionConfig::new().with_max(-100.0).validate().is_ok());
    }

    #[test]
    fn equal_bounds_are_accepted() {
        assert!(MotionConfig::new().with_bounds(5.0, 5.0).validate().is_ok());
    }

    #[test]
    fn paged_requires_all_three() {
        let config = MotionConfig::new().with_bounds(0.0, 1000.0);
        assert!(!config.is_paged());
        assert!(config.with_step(100.0).is_paged());
    }
}
