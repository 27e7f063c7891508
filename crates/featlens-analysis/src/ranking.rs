//! Feature ranking.
//!
//! Ranking runs in a fixed order of steps:
//!
//! 1. **Fidelity gate**: drop features the catalog's [`FidelityGate`] rejects.
//!    A missing fidelity field never excludes a feature.
//! 2. **Effect size**: resolve the comparable delta through [`Feature::DELTA`].
//!    A feature without one sorts as negative infinity.
//! 3. **Partition** into significant and not-significant features.
//! 4. **Order** each partition by delta in the requested direction.
//! 5. **Concatenate**: significant features always come first.
//!
//! Ties on delta are broken by feature index and then collection key, so
//! the result is a total order and flipping the direction reverses each
//! partition exactly.

use std::cmp::Ordering;

use featlens_model::{Feature, FeatureCollection, FidelityGate};

use crate::significance::is_significant;

/// Order of features within each significance partition.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant,
)]
pub enum SortDirection {
    /// Largest delta first.
    #[default]
    #[display("descending")]
    Descending,
    /// Smallest delta first.
    #[display("ascending")]
    Ascending,
}

impl SortDirection {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            SortDirection::Descending => SortDirection::Ascending,
            SortDirection::Ascending => SortDirection::Descending,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RankOptions {
    pub direction: SortDirection,
    pub fidelity_gate: FidelityGate,
}

/// A feature that passed the fidelity gate, with its derived ranking fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedFeature<'a> {
    /// Key of the feature in its collection.
    pub key: &'a str,
    pub feature: &'a Feature,
    pub significant: bool,
    /// Comparable effect size, in the export's own scale.
    pub delta: Option<f64>,
}

impl<'a> RankedFeature<'a> {
    #[must_use]
    pub fn new(key: &'a str, feature: &'a Feature) -> Self {
        Self {
            key,
            feature,
            significant: is_significant(feature),
            delta: feature.delta(),
        }
    }

    /// Delta used for ordering; missing deltas rank last.
    #[must_use]
    pub fn sort_delta(&self) -> f64 {
        self.delta.unwrap_or(f64::NEG_INFINITY)
    }

    fn cmp_ascending(&self, other: &Self) -> Ordering {
        self.sort_delta()
            .total_cmp(&other.sort_delta())
            .then_with(|| self.feature.feature_idx.cmp(&other.feature.feature_idx))
            .then_with(|| self.key.cmp(other.key))
    }
}

/// Returns `true` if the feature passes `gate`.
#[must_use]
pub fn passes_fidelity_gate(gate: FidelityGate, feature: &Feature) -> bool {
    match gate {
        FidelityGate::CorrelationFloor { min } => {
            feature.fidelity_correlation.is_none_or(|corr| corr >= min)
        }
        FidelityGate::PValue { max } => feature.fidelity_p_value.is_none_or(|p| p <= max),
    }
}

/// Ranks the features of one dataset for display.
///
/// # Examples
///
/// ```
/// use featlens_analysis::ranking::{self, RankOptions};
/// use featlens_model::{Feature, FeatureCollection};
///
/// let mut features = FeatureCollection::new();
/// features.insert(
///     "1".to_owned(),
///     Feature {
///         feature_idx: Some(1),
///         logit_p_value: Some(0.2),
///         delta_win_rate_percentage: Some(9.0),
///         ..Feature::default()
///     },
/// );
/// features.insert(
///     "2".to_owned(),
///     Feature {
///         feature_idx: Some(2),
///         logit_p_value: Some(0.0001),
///         delta_win_rate_percentage: Some(1.0),
///         ..Feature::default()
///     },
/// );
///
/// let ranked = ranking::rank(&features, &RankOptions::default());
/// let keys = ranked.iter().map(|r| r.key).collect::<Vec<_>>();
/// assert_eq!(keys, ["2", "1"]);
/// ```
#[must_use]
pub fn rank<'a>(features: &'a FeatureCollection, options: &RankOptions) -> Vec<RankedFeature<'a>> {
    let (mut significant, mut not_significant): (Vec<_>, Vec<_>) = features
        .iter()
        .filter(|(_, feature)| passes_fidelity_gate(options.fidelity_gate, feature))
        .map(|(key, feature)| RankedFeature::new(key, feature))
        .partition(|ranked| ranked.significant);

    tracing::debug!(
        total = features.len(),
        gated_out = features.len() - significant.len() - not_significant.len(),
        significant = significant.len(),
        not_significant = not_significant.len(),
        direction = %options.direction,
        "ranked features"
    );

    sort_partition(&mut significant, options.direction);
    sort_partition(&mut not_significant, options.direction);
    significant.append(&mut not_significant);
    significant
}

fn sort_partition(partition: &mut [RankedFeature<'_>], direction: SortDirection) {
    match direction {
        SortDirection::Ascending => partition.sort_by(RankedFeature::cmp_ascending),
        SortDirection::Descending => partition.sort_by(|a, b| b.cmp_ascending(a)),
    }
}
