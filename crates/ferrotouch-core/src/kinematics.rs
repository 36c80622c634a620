//! Inertial-throw and drag-friction math.
//!
//! Everything here is pure: the controller feeds in a velocity sample (signed
//! displacement over elapsed ms) and bounds, and gets back a destination and
//! duration for the animation driver. Durations are in ms, distances in
//! channel units.

use crate::easing::reverse_circle_out;

/// Tuning knobs for the inertial throw, lifted from the controller config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrowTuning {
    /// Velocity multiplier applied before the distance integration.
    pub factor: f64,
    /// Clamp on the scaled speed.
    pub max_speed: Option<f64>,
    /// Deceleration in channel units per ms^2.
    pub deceleration: f64,
}

/// Raw throw result, before any boundary resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Throw {
    /// Coasting destination.
    pub destination: f64,
    /// Full coasting duration in ms.
    pub duration_ms: f64,
}

/// Boundary-resolved destination plus the fraction of the full duration the
/// truncated motion actually needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryAdjust {
    pub destination: f64,
    pub time_ratio: f64,
}

/// Select the drag friction for one move delta.
///
/// Out-of-bounds drags pulling further out use the (smaller) `out_factor`,
/// which is what makes the boundary feel elastic under the finger.
pub fn drag_friction(
    value: f64,
    delta: f64,
    min: Option<f64>,
    max: Option<f64>,
    move_factor: f64,
    out_factor: f64,
) -> f64 {
    if let Some(max) = max {
        if value > max && delta > 0.0 {
            return out_factor;
        }
    }
    if let Some(min) = min {
        if value < min && delta < 0.0 {
            return out_factor;
        }
    }
    move_factor
}

/// Compute the coasting destination and duration from a velocity sample.
///
/// `distance` is the signed displacement along the configured axis between
/// the velocity-window anchor and the release point, already scaled by the
/// sensitivity; `dt_ms` is the elapsed time since the anchor.
///
/// The duration deliberately uses the unscaled speed: `factor` and
/// `max_speed` shape how far the throw goes, not how long it takes.
pub fn inertial_throw(current: f64, distance: f64, dt_ms: f64, tuning: &ThrowTuning) -> Throw {
    let speed = distance.abs() / dt_ms;
    let mut scaled_speed = tuning.factor * speed;
    if let Some(max_speed) = tuning.max_speed {
        if scaled_speed > max_speed {
            scaled_speed = max_speed;
        }
    }
    let direction = if distance < 0.0 { -1.0 } else { 1.0 };
    Throw {
        destination: current + direction * scaled_speed * scaled_speed / (2.0 * tuning.deceleration),
        duration_ms: (speed / tuning.deceleration).round(),
    }
}

/// Resolve a throw destination against the elastic bounds.
///
/// A destination inside the bounds passes through untouched with a time
/// ratio of 1. Past a bound, the destination is clamped into the spring
/// region (penetration proportional to the overshoot, saturating at
/// `spring_max_region` once the overshoot exceeds `max_region`) and the
/// time ratio estimates, via the inverse ease, what fraction of the full
/// duration covers the reachable part of the motion.
pub fn resolve_overshoot(
    current: f64,
    destination: f64,
    min: Option<f64>,
    max: Option<f64>,
    max_region: f64,
    spring_max_region: f64,
) -> BoundaryAdjust {
    if let Some(min) = min {
        if destination < min {
            let penetration = if min - destination > max_region {
                spring_max_region
            } else {
                spring_max_region * (min - destination) / max_region
            };
            let time_ratio =
                reverse_circle_out((current - min + penetration) / (current - destination));
            return BoundaryAdjust {
                destination: min - penetration,
                time_ratio,
            };
        }
    }
    if let Some(max) = max {
        if destination > max {
            let penetration = if destination - max > max_region {
                spring_max_region
            } else {
                spring_max_region * (destination - max) / max_region
            };
            let time_ratio =
                reverse_circle_out((max + penetration - current) / (destination - current));
            return BoundaryAdjust {
                destination: max + penetration,
                time_ratio,
            };
        }
    }
    BoundaryAdjust {
        destination,
        time_ratio: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TUNING: ThrowTuning = ThrowTuning {
        factor: 1.0,
        max_speed: None,
        deceleration: 0.0006,
    };

    #[test]
    fn flick_destination_and_duration() {
        // distance 150 over 100ms: speed 1.5, destination current + 1875,
        // duration 2500, all before boundary resolution.
        let throw = inertial_throw(200.0, 150.0, 100.0, &TUNING);
        assert!((throw.destination - (200.0 + 1875.0)).abs() < 1e-9);
        assert_eq!(throw.duration_ms, 2500.0);
    }

    #[test]
    fn flick_direction_follows_distance_sign() {
        let throw = inertial_throw(200.0, -150.0, 100.0, &TUNING);
        assert!((throw.destination - (200.0 - 1875.0)).abs() < 1e-9);
        assert_eq!(throw.duration_ms, 2500.0);
    }

    #[test]
    fn max_speed_caps_distance_but_not_duration() {
        let capped = ThrowTuning {
            max_speed: Some(0.5),
            ..TUNING
        };
        let throw = inertial_throw(0.0, 150.0, 100.0, &capped);
        assert!((throw.destination - 0.5 * 0.5 / (2.0 * 0.0006)).abs() < 1e-9);
        // Duration still derives from the raw speed sample.
        assert_eq!(throw.duration_ms, 2500.0);
    }

    #[test]
    fn friction_is_move_factor_in_bounds() {
        let f = drag_friction(500.0, 10.0, Some(0.0), Some(1000.0), 1.0, 0.3);
        assert_eq!(f, 1.0);
    }

    #[test]
    fn friction_is_out_factor_past_max_pulling_out() {
        let f = drag_friction(1100.0, 10.0, Some(0.0), Some(1000.0), 1.0, 0.3);
        assert_eq!(f, 0.3);
        // Pulling back toward the range uses normal friction.
        let back = drag_friction(1100.0, -10.0, Some(0.0), Some(1000.0), 1.0, 0.3);
        assert_eq!(back, 1.0);
    }

    #[test]
    fn friction_is_out_factor_below_min_pulling_out() {
        let f = drag_friction(-50.0, -10.0, Some(0.0), Some(1000.0), 1.0, 0.3);
        assert_eq!(f, 0.3);
    }

    #[test]
    fn friction_unbounded_is_move_factor() {
        assert_eq!(drag_friction(1e9, 10.0, None, None, 1.0, 0.3), 1.0);
    }

    #[test]
    fn in_bounds_destination_passes_through() {
        let adjust = resolve_overshoot(500.0, 800.0, Some(0.0), Some(1000.0), 600.0, 60.0);
        assert_eq!(adjust.destination, 800.0);
        assert_eq!(adjust.time_ratio, 1.0);
    }

    #[test]
    fn shallow_overshoot_scales_penetration() {
        // 500 past max with max_region 600: penetration 60 * 500/600 = 50.
        let adjust = resolve_overshoot(990.0, 1500.0, Some(0.0), Some(1000.0), 600.0, 60.0);
        assert!((adjust.destination - 1050.0).abs() < 1e-9);
        assert!(adjust.time_ratio > 0.0 && adjust.time_ratio < 1.0);
    }

    #[test]
    fn deep_overshoot_saturates_at_spring_max() {
        let adjust = resolve_overshoot(990.0, 5000.0, Some(0.0), Some(1000.0), 600.0, 60.0);
        assert!((adjust.destination - 1060.0).abs() < 1e-9);
        assert!(adjust.time_ratio > 0.0 && adjust.time_ratio < 1.0);
    }

    #[test]
    fn min_side_is_symmetric() {
        let below = resolve_overshoot(10.0, -490.0, Some(0.0), Some(1000.0), 600.0, 60.0);
        assert!((below.destination - (-49.0)).abs() < 1e-9);
        let deep = resolve_overshoot(10.0, -4000.0, Some(0.0), Some(1000.0), 600.0, 60.0);
        assert!((deep.destination - (-60.0)).abs() < 1e-9);
    }

    #[test]
    fn deeper_overshoot_uses_smaller_share_of_its_duration() {
        // The raw throw behind a deeper overshoot is longer, so the reachable
        // part of the motion is a smaller fraction of it.
        let shallow = resolve_overshoot(990.0, 1200.0, Some(0.0), Some(1000.0), 600.0, 60.0);
        let deep = resolve_overshoot(990.0, 1500.0, Some(0.0), Some(1000.0), 600.0, 60.0);
        assert!(deep.time_ratio < shallow.time_ratio);
    }
}
