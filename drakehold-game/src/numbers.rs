//! Numeric conversion helpers centralizing the simulation's truncating casts.

use num_traits::cast::cast;

/// Truncate a f64 toward zero and clamp it to the i32 range, returning 0 for
/// non-finite values.
#[must_use]
pub fn trunc_f64_to_i32(value: f64) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    let min = cast::<i32, f64>(i32::MIN).unwrap_or(f64::MIN);
    let max = cast::<i32, f64>(i32::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).trunc();
    cast::<f64, i32>(clamped).unwrap_or(0)
}

/// Truncate a f32 toward zero and clamp it to the i32 range, returning 0 for
/// non-finite values.
#[must_use]
pub fn trunc_f32_to_i32(value: f32) -> i32 {
    trunc_f64_to_i32(f64::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_goes_toward_zero() {
        assert_eq!(trunc_f64_to_i32(2.9), 2);
        assert_eq!(trunc_f64_to_i32(-2.9), -2);
        assert_eq!(trunc_f32_to_i32(0.999), 0);
    }

    #[test]
    fn non_finite_and_range_are_handled() {
        assert_eq!(trunc_f64_to_i32(f64::NAN), 0);
        assert_eq!(trunc_f64_to_i32(f64::INFINITY), 0);
        assert_eq!(trunc_f64_to_i32(f64::from(i32::MAX) * 2.0), i32::MAX);
        assert_eq!(trunc_f64_to_i32(f64::from(i32::MIN) * 2.0), i32::MIN);
    }
}
