//! Multiple-comparison correction.
//!
//! Every feature in a dataset is tested against the same family-wise error
//! rate. The number of hypotheses is fixed by the upstream analysis, so the
//! corrected threshold is a constant of the pipeline rather than something a
//! caller tunes per request.

/// Family-wise significance level before correction.
pub const ALPHA: f64 = 0.05;

/// Number of hypotheses tested upstream for each dataset.
pub const NUM_HYPOTHESES: u32 = 32;

/// Bonferroni-corrected threshold, `ALPHA / NUM_HYPOTHESES` (0.0015625).
#[allow(clippy::cast_lossless)]
pub const SIGNIFICANCE_THRESHOLD: f64 = ALPHA / NUM_HYPOTHESES as f64;

/// Bonferroni correction for a fixed family of hypotheses.
///
/// A p-value is significant when it is less than or equal to
/// `alpha / num_hypotheses`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bonferroni {
    /// Family-wise significance level.
    pub alpha: f64,
    /// Number of hypotheses in the family.
    pub num_hypotheses: u32,
}

impl Bonferroni {
    /// The correction applied throughout featlens (`0.05 / 32`).
    pub const DEFAULT: Self = Self {
        alpha: ALPHA,
        num_hypotheses: NUM_HYPOTHESES,
    };

    /// Returns the per-hypothesis threshold.
    ///
    /// # Examples
    ///
    /// ```
    /// # use featlens_stats::correction::Bonferroni;
    /// let correction = Bonferroni { alpha: 0.05, num_hypotheses: 10 };
    /// assert!((correction.threshold() - 0.005).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.alpha / f64::from(self.num_hypotheses.max(1))
    }

    /// Returns `true` if `p_value` passes the corrected threshold.
    ///
    /// The comparison is inclusive: a p-value exactly at the threshold is
    /// significant. `NaN` never is.
    #[must_use]
    pub fn is_significant(&self, p_value: f64) -> bool {
        p_value <= self.threshold()
    }
}

impl Default for Bonferroni {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_value() {
        assert!((SIGNIFICANCE_THRESHOLD - 0.001_562_5).abs() < 1e-15);
        assert_eq!(Bonferroni::DEFAULT.threshold(), SIGNIFICANCE_THRESHOLD);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let correction = Bonferroni::DEFAULT;
        assert!(correction.is_significant(SIGNIFICANCE_THRESHOLD));
        assert!(correction.is_significant(0.0));
        assert!(!correction.is_significant(0.001_562_6));
        assert!(!correction.is_significant(0.05));
    }

    #[test]
    fn test_nan_is_not_significant() {
        assert!(!Bonferroni::DEFAULT.is_significant(f64::NAN));
    }

    #[test]
    fn test_zero_hypotheses_does_not_divide_by_zero() {
        let correction = Bonferroni {
            alpha: 0.05,
            num_hypotheses: 0,
        };
        assert_eq!(correction.threshold(), 0.05);
    }
}
