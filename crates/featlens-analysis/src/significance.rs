//! Significance classification.

use featlens_model::{Feature, ResolvedField};
use featlens_stats::correction::Bonferroni;

/// Returns the p-value used for significance, with the field it came from.
#[must_use]
pub fn resolved_p_value(feature: &Feature) -> Option<ResolvedField> {
    Feature::P_VALUE.resolve_named(feature)
}

/// Returns `true` if the feature's effect on outcome passes the
/// Bonferroni-corrected threshold (`0.05 / 32`).
///
/// The p-value is taken from `logit_p_value`, falling back to
/// `win_rate_p_value`. A feature with neither is not significant.
#[must_use]
pub fn is_significant(feature: &Feature) -> bool {
    feature
        .p_value()
        .is_some_and(|p| Bonferroni::DEFAULT.is_significant(p))
}

#[cfg(test)]
mod tests {
    use featlens_stats::correction::SIGNIFICANCE_THRESHOLD;

    use super::*;

    fn feature(logit: Option<f64>, win_rate: Option<f64>) -> Feature {
        Feature {
            logit_p_value: logit,
            win_rate_p_value: win_rate,
            ..Feature::default()
        }
    }

    #[test]
    fn test_threshold_boundary() {
        assert!(is_significant(&feature(Some(SIGNIFICANCE_THRESHOLD), None)));
        assert!(is_significant(&feature(Some(0.001), None)));
        assert!(!is_significant(&feature(Some(0.0016), None)));
        assert!(!is_significant(&feature(Some(0.05), None)));
    }

    #[test]
    fn test_logit_takes_priority_over_win_rate() {
        assert!(!is_significant(&feature(Some(0.2), Some(0.0001))));
        assert!(is_significant(&feature(Some(0.0001), Some(0.2))));
    }

    #[test]
    fn test_falls_back_to_win_rate_p_value() {
        let f = feature(None, Some(0.0005));
        assert!(is_significant(&f));
        assert_eq!(resolved_p_value(&f).unwrap().field, "win_rate_p_value");
    }

    #[test]
    fn test_missing_p_value_is_not_significant() {
        assert!(!is_significant(&feature(None, None)));
        assert_eq!(resolved_p_value(&feature(None, None)), None);
    }
}
