//! Numeric conversion helpers centralizing the casts behind displayed ratios.

use num_traits::cast::cast;

/// Convert a count to f64, saturating on the (theoretical) overflow.
#[must_use]
pub fn count_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(f64::MAX)
}

/// Clamp a f64 to the f32 range and downcast, returning 0.0 for non-finite values.
#[must_use]
pub fn clamp_f64_to_f32(value: f64) -> f32 {
    if !value.is_finite() {
        return 0.0;
    }
    let min = cast::<f32, f64>(f32::MIN).unwrap_or(f64::MIN);
    let max = cast::<f32, f64>(f32::MAX).unwrap_or(f64::MAX);
    cast::<f64, f32>(value.clamp(min, max)).unwrap_or(0.0)
}

/// `part / whole * 100`, or 0 when `whole` is zero.
#[must_use]
pub fn percent(part: usize, whole: usize) -> f32 {
    if whole == 0 {
        return 0.0;
    }
    clamp_f64_to_f32(count_to_f64(part) / count_to_f64(whole) * 100.0)
}
