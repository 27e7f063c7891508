//! Dataset catalog: which datasets are shown, in what order, and how their
//! exports are interpreted.
//!
//! The catalog is hand-maintained. Feed keys absent from the catalog are not
//! shown, and catalog entries absent from the feed are skipped.
//!
//! # Serialization
//!
//! ```json
//! {
//!   "datasets": [
//!     {"key": "chatbot_arena", "display_name": "Chatbot Arena"},
//!     {"key": "hh_rlhf"}
//!   ],
//!   "fidelity_gate": {"kind": "correlation_floor", "min": 0.3},
//!   "delta_scale": "percent"
//! }
//! ```

use std::collections::HashSet;

use featlens_stats::correction::SIGNIFICANCE_THRESHOLD;
use serde::{Deserialize, Serialize};

use crate::collection::{DatasetCollection, FeatureCollection};

/// Minimum fidelity correlation for a feature to be listed.
pub const MIN_FIDELITY_CORRELATION: f64 = 0.3;

/// Rule used to drop features whose interpretation does not fit their
/// activations.
///
/// An export carries one kind of fidelity evidence; the catalog names which
/// one. The rules do not combine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, derive_more::Display)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FidelityGate {
    /// Keep features whose `fidelity_correlation` is at least `min`.
    #[display("fidelity_correlation >= {min}")]
    CorrelationFloor { min: f64 },
    /// Keep features whose `fidelity_p_value` is at most `max`.
    #[display("fidelity_p_value <= {max}")]
    PValue { max: f64 },
}

impl FidelityGate {
    /// P-value gate at the corrected significance threshold.
    pub const P_VALUE: Self = FidelityGate::PValue {
        max: SIGNIFICANCE_THRESHOLD,
    };
}

impl Default for FidelityGate {
    fn default() -> Self {
        FidelityGate::CorrelationFloor {
            min: MIN_FIDELITY_CORRELATION,
        }
    }
}

/// Scale of the win-rate fields in an export.
///
/// Only affects formatting. Comparisons always use the raw field value.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, derive_more::FromStr,
)]
#[serde(rename_all = "snake_case")]
pub enum DeltaScale {
    /// Values are percentages (`4.2` means 4.2%).
    #[default]
    Percent,
    /// Values are fractions (`0.042` means 4.2%).
    Fraction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetEntry {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl DatasetEntry {
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetCatalog {
    /// Datasets in display order.
    pub datasets: Vec<DatasetEntry>,
    #[serde(default)]
    pub fidelity_gate: FidelityGate,
    #[serde(default)]
    pub delta_scale: DeltaScale,
}

/// A dataset that is both listed in the catalog and present in the feed.
#[derive(Debug, Clone, Copy)]
pub struct DatasetTab<'a> {
    pub key: &'a str,
    pub display_name: &'a str,
    pub features: &'a FeatureCollection,
}

const DEFAULT_DATASETS: &[(&str, &str)] = &[
    ("chatbot_arena", "Chatbot Arena"),
    ("hh_rlhf", "HH-RLHF"),
    ("pku_saferlhf", "PKU-SafeRLHF"),
    ("ultrafeedback", "UltraFeedback"),
];

impl Default for DatasetCatalog {
    fn default() -> Self {
        Self {
            datasets: DEFAULT_DATASETS
                .iter()
                .map(|(key, name)| DatasetEntry {
                    key: (*key).to_owned(),
                    display_name: Some((*name).to_owned()),
                })
                .collect(),
            fidelity_gate: FidelityGate::default(),
            delta_scale: DeltaScale::default(),
        }
    }
}

impl DatasetCatalog {
    /// Builds a catalog listing every given key, using keys as display names.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            datasets: keys
                .into_iter()
                .map(|key| DatasetEntry {
                    key: key.into(),
                    display_name: None,
                })
                .collect(),
            fidelity_gate: FidelityGate::default(),
            delta_scale: DeltaScale::default(),
        }
    }

    #[must_use]
    pub fn with_fidelity_gate(mut self, fidelity_gate: FidelityGate) -> Self {
        self.fidelity_gate = fidelity_gate;
        self
    }

    #[must_use]
    pub fn with_delta_scale(mut self, delta_scale: DeltaScale) -> Self {
        self.delta_scale = delta_scale;
        self
    }

    #[must_use]
    pub fn entry(&self, key: &str) -> Option<&DatasetEntry> {
        self.datasets.iter().find(|entry| entry.key == key)
    }

    /// Returns the display tabs for `collection`, in catalog order.
    ///
    /// Duplicate catalog keys are shown once, at their first position.
    #[must_use]
    pub fn tabs<'a>(&'a self, collection: &'a DatasetCollection) -> Vec<DatasetTab<'a>> {
        let mut seen = HashSet::new();
        self.datasets
            .iter()
            .filter(|entry| seen.insert(entry.key.as_str()))
            .filter_map(|entry| {
                collection.get(&entry.key).map(|features| DatasetTab {
                    key: &entry.key,
                    display_name: entry.display_name(),
                    features,
                })
            })
            .collect()
    }
}
