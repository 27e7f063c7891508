//! Feature records.

use serde::{Deserialize, Serialize};

use crate::{
    de::null_as_default,
    example::ExampleBundle,
    field::{FieldAccessor, FieldChain},
};

/// Summary statistics and examples for one latent feature.
///
/// Every statistic is optional at the type level. The only field the loader
/// insists on is a p-value (see [`Feature::P_VALUE`]); everything else
/// degrades to "unavailable" downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Feature index, repeated from the collection key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_idx: Option<i64>,
    /// Human-readable description of what the feature detects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<String>,
    /// Change in judge win rate when the feature is present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_win_rate_percentage: Option<f64>,
    /// Raw win rate, used by exports without a delta.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub win_rate_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logit_p_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub win_rate_p_value: Option<f64>,
    /// Correlation between the interpretation and the activation pattern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fidelity_correlation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fidelity_p_value: Option<f64>,
    /// Share of responses on which the feature fires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prevalence_percentage: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub examples: ExampleBundle,
}

fn logit_p_value(feature: &Feature) -> Option<f64> {
    feature.logit_p_value
}

fn win_rate_p_value(feature: &Feature) -> Option<f64> {
    feature.win_rate_p_value
}

fn delta_win_rate_percentage(feature: &Feature) -> Option<f64> {
    feature.delta_win_rate_percentage
}

fn win_rate_percentage(feature: &Feature) -> Option<f64> {
    feature.win_rate_percentage
}

const P_VALUE_FIELDS: &[(&str, FieldAccessor<Feature>)] = &[
    ("logit_p_value", logit_p_value),
    ("win_rate_p_value", win_rate_p_value),
];

const DELTA_FIELDS: &[(&str, FieldAccessor<Feature>)] = &[
    ("delta_win_rate_percentage", delta_win_rate_percentage),
    ("win_rate_percentage", win_rate_percentage),
];

impl Feature {
    /// Significance statistic: logit p-value, then win-rate p-value.
    pub const P_VALUE: FieldChain<Feature> = FieldChain::new("p-value", P_VALUE_FIELDS);

    /// Effect size: delta win rate, then raw win rate.
    pub const DELTA: FieldChain<Feature> = FieldChain::new("delta win rate", DELTA_FIELDS);

    #[must_use]
    pub fn p_value(&self) -> Option<f64> {
        Self::P_VALUE.resolve(self)
    }

    #[must_use]
    pub fn delta(&self) -> Option<f64> {
        Self::DELTA.resolve(self)
    }

    /// Identifier for messages; empty when the record has no `feature_idx`.
    #[must_use]
    pub fn id_label(&self) -> String {
        self.feature_idx
            .map(|idx| idx.to_string())
            .unwrap_or_default()
    }
}
