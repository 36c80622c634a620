//! Easing curves for settle, rebound, and correction animations.

/// Easing function applied to the linear progress of an animation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Quarter-circle curve `sqrt(1 - (x - 1)^2)`: fast initial motion and a
    /// soft stop. The default for every run this controller starts.
    CircleOut,
    /// Linear interpolation (no easing).
    Linear,
    /// Caller-supplied curve for the programmatic API.
    Custom(fn(f64) -> f64),
}

impl Easing {
    /// Apply the easing function to a linear fraction in `[0, 1]`.
    pub fn transform(&self, fraction: f64) -> f64 {
        match self {
            Easing::CircleOut => (1.0 - (fraction - 1.0).powi(2)).sqrt(),
            Easing::Linear => fraction,
            Easing::Custom(f) => f(fraction),
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::CircleOut
    }
}

/// Inverse of [`Easing::CircleOut`]: given an output fraction `y`, return the
/// input fraction that produces it.
///
/// Used to estimate how much of a full animation duration is actually needed
/// when a spring boundary truncates the motion before its natural end.
pub fn reverse_circle_out(y: f64) -> f64 {
    1.0 - (1.0 - y * y).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_out_endpoints() {
        let ease = Easing::CircleOut;
        assert_eq!(ease.transform(0.0), 0.0);
        assert_eq!(ease.transform(1.0), 1.0);
    }

    #[test]
    fn circle_out_is_fast_then_soft() {
        let ease = Easing::CircleOut;
        let early = ease.transform(0.25);
        let late = ease.transform(0.75) - ease.transform(0.5);
        assert!(early > 0.25, "early progress should outrun linear");
        assert!(late < 0.25, "late progress should lag linear");
    }

    #[test]
    fn reverse_inverts_circle_out() {
        let ease = Easing::CircleOut;
        for i in 0..=10 {
            let x = i as f64 / 10.0;
            let back = reverse_circle_out(ease.transform(x));
            assert!((back - x).abs() < 1e-9, "x={x} round-tripped to {back}");
        }
    }

    #[test]
    fn custom_curve_is_used() {
        let ease = Easing::Custom(|x| x * x);
        assert_eq!(ease.transform(0.5), 0.25);
    }
}
