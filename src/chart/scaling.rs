//! src/chart/scaling.rs
//!
//! Maps a raw byte rate onto a `[0, 1]` height fraction.

use super::config::ScalingMode;

/// Floor applied to values and maxima before scaling (1 KiB/s).
pub const MIN_SCALE_VALUE: u64 = 1024;

/// Upper bound for the render scale (100 MiB/s).
pub const MAX_SCALE_LIMIT: u64 = 100 * 1024 * 1024;

/// Normalize `value` against `max_value` under `mode`.
///
/// Zero always maps to `0.0`. A zero `max_value` is treated as
/// [`MIN_SCALE_VALUE`], so the result is always finite and within `[0, 1]`.
pub fn scale(value: u64, max_value: u64, mode: ScalingMode) -> f64 {
    if value == 0 {
        return 0.0;
    }
    let max_value = if max_value == 0 { MIN_SCALE_VALUE } else { max_value };

    let fraction = match mode {
        ScalingMode::Linear => value as f64 / max_value as f64,
        ScalingMode::Logarithmic => {
            let floor = MIN_SCALE_VALUE as f64;
            let val = (value as f64).max(floor);
            let max = (max_value as f64).max(floor);
            let span = max.log10() - floor.log10();
            if span <= f64::EPSILON {
                // Everything sits at or below the floor: degrade to linear.
                value.min(MIN_SCALE_VALUE) as f64 / floor
            } else {
                (val.log10() - floor.log10()) / span
            }
        }
        ScalingMode::SquareRoot => (value as f64).sqrt() / (max_value as f64).sqrt(),
    };

    fraction.clamp(0.0, 1.0)
}

/// Clamp a raw visible maximum into the range used for rendering.
pub fn render_scale(visible_max: u64) -> u64 {
    visible_max.clamp(MIN_SCALE_VALUE, MAX_SCALE_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODES: [ScalingMode; 3] = [
        ScalingMode::Linear,
        ScalingMode::Logarithmic,
        ScalingMode::SquareRoot,
    ];

    #[test]
    fn zero_is_always_zero() {
        for mode in MODES {
            assert_eq!(scale(0, 0, mode), 0.0);
            assert_eq!(scale(0, 1 << 30, mode), 0.0);
        }
    }

    #[test]
    fn max_maps_to_one_in_every_mode() {
        for mode in MODES {
            let v = scale(50_000, 50_000, mode);
            assert!((v - 1.0).abs() < 1e-12, "{mode:?} gave {v}");
        }
    }

    #[test]
    fn linear_is_proportional() {
        assert!((scale(25, 100, ScalingMode::Linear) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn sqrt_sits_between_linear_and_log() {
        let max = 10 * 1024 * 1024;
        let v = 100 * 1024;
        let lin = scale(v, max, ScalingMode::Linear);
        let sqrt = scale(v, max, ScalingMode::SquareRoot);
        let log = scale(v, max, ScalingMode::Logarithmic);
        assert!(lin < sqrt && sqrt < log, "{lin} {sqrt} {log}");
    }

    #[test]
    fn log_floors_small_values() {
        // Anything at or below 1 KiB lands on the floor.
        assert_eq!(scale(1, 1 << 20, ScalingMode::Logarithmic), 0.0);
        assert_eq!(scale(1024, 1 << 20, ScalingMode::Logarithmic), 0.0);
        let ten_k = scale(10 * 1024, 1 << 20, ScalingMode::Logarithmic);
        assert!(ten_k > 0.0 && ten_k < 1.0);
    }

    #[test]
    fn zero_max_does_not_divide_by_zero() {
        for mode in MODES {
            let v = scale(512, 0, mode);
            assert!(v.is_finite());
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn log_with_max_at_floor_stays_finite() {
        let v = scale(512, 1024, ScalingMode::Logarithmic);
        assert!((v - 0.5).abs() < 1e-12);
        assert_eq!(scale(4096, 1024, ScalingMode::Logarithmic), 1.0);
    }

    #[test]
    fn non_decreasing_in_value() {
        let max = 5 * 1024 * 1024;
        for mode in MODES {
            let mut prev = 0.0;
            let mut v = 0u64;
            while v <= max {
                let s = scale(v, max, mode);
                assert!(s >= prev, "{mode:?}: scale({v}) = {s} < {prev}");
                prev = s;
                v = v * 3 / 2 + 97;
            }
        }
    }

    #[test]
    fn values_above_max_clamp_to_one() {
        assert_eq!(scale(10_000, 1_000, ScalingMode::Linear), 1.0);
    }

    #[test]
    fn render_scale_bounds() {
        assert_eq!(render_scale(0), MIN_SCALE_VALUE);
        assert_eq!(render_scale(5000), 5000);
        assert_eq!(render_scale(u64::MAX), MAX_SCALE_LIMIT);
    }
}
