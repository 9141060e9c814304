use crate::{WhError, WhResult};

/// Pass `v` through when finite.
pub fn ensure_finite(v: f64, what: &'static str) -> WhResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(WhError::NonFinite { what, value: v })
    }
}

/// Logarithmic mean of two absolute temperatures, `(a - b) / ln(a / b)`.
///
/// Used for the mean temperature of a stream exchanging heat between an inlet
/// and an outlet. Equal temperatures give that temperature. Returns NaN when
/// the ratio is not positive; callers decide whether that is fatal.
pub fn log_mean(a: f64, b: f64) -> f64 {
    if a == b {
        return a;
    }
    (a - b) / (a / b).ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(f64::NAN, "exhaust flow").unwrap_err();
        assert!(format!("{err}").contains("exhaust flow"));
        assert_eq!(ensure_finite(2.5, "x"), Ok(2.5));
    }

    #[test]
    fn log_mean_of_exhaust_gas() {
        // 639.15 K in, 413 K out
        let t = log_mean(639.15, 413.0);
        assert!(t > 413.0 && t < 639.15);
        assert!((t - 518.5).abs() < 1.0, "t = {t}");
    }

    #[test]
    fn log_mean_of_equal_temperatures() {
        assert_eq!(log_mean(335.115, 335.115), 335.115);
        // nearby values approach the limit continuously
        let t = log_mean(335.115, 335.115 + 1e-6);
        assert!((t - 335.115).abs() < 1e-3);
    }

    #[test]
    fn log_mean_is_symmetric() {
        let a = log_mean(369.15, 328.15);
        let b = log_mean(328.15, 369.15);
        assert!((a - b).abs() < 1e-9);
    }
}
