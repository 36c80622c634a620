//! Page snapping for stepped channels.

/// Snap a settled value to the nearest multiple of `step`.
///
/// A remainder strictly past half a step rounds away from zero (advance a
/// page); anything else, ties at exactly `step / 2` included, rounds toward
/// zero (stay on the current page).
pub fn snap_target(value: f64, step: f64) -> f64 {
    let whole = (value / step).abs().floor();
    let remainder = (value % step).abs();
    let direction = if value < 0.0 { -1.0 } else { 1.0 };
    if remainder > step / 2.0 {
        direction * (whole + 1.0) * step
    } else {
        direction * whole * step
    }
}

/// Page index for a bounded, stepped channel: distance from `max` in whole
/// steps, rounded to nearest.
pub fn page_index(value: f64, max: f64, step: f64) -> i64 {
    ((max - value) / step).round() as i64
}
