//! Per-dataset summaries.

use featlens_model::{FeatureCollection, FidelityGate};
use featlens_stats::descriptive::DescriptiveStats;

use crate::ranking::{self, RankOptions};

/// Counts and effect-size distribution for one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    /// Features in the feed.
    pub total: usize,
    /// Features dropped by the fidelity gate.
    pub gated_out: usize,
    pub significant: usize,
    pub not_significant: usize,
    /// Listed features without an effect size.
    pub missing_delta: usize,
    /// Listed features without any example.
    pub without_examples: usize,
    /// Distribution of the comparable delta over listed features.
    pub delta: Option<DescriptiveStats>,
}

impl DatasetSummary {
    #[must_use]
    pub fn from_features(features: &FeatureCollection, fidelity_gate: FidelityGate) -> Self {
        let ranked = ranking::rank(
            features,
            &RankOptions {
                fidelity_gate,
                ..RankOptions::default()
            },
        );
        let significant = ranked.iter().filter(|r| r.significant).count();

        Self {
            total: features.len(),
            gated_out: features.len() - ranked.len(),
            significant,
            not_significant: ranked.len() - significant,
            missing_delta: ranked.iter().filter(|r| r.delta.is_none()).count(),
            without_examples: ranked
                .iter()
                .filter(|r| r.feature.examples.is_empty())
                .count(),
            delta: DescriptiveStats::new(ranked.iter().filter_map(|r| r.delta)),
        }
    }

    /// Number of features that survive the fidelity gate.
    #[must_use]
    pub fn listed(&self) -> usize {
        self.significant + self.not_significant
    }
}
