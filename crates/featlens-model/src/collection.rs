//! Dataset collections and load-time validation.
//!
//! A feed is parsed into a [`RawDatasetCollection`] and then validated into a
//! [`DatasetCollection`]. Validation is all-or-nothing: ranking assumes every
//! candidate feature has a significance statistic, so one bad record rejects
//! the whole feed.
//!
//! # Example
//!
//! ```
//! use featlens_model::{DatasetCollection, Feature, RawDatasetCollection};
//!
//! let mut raw = RawDatasetCollection::new();
//! raw.entry("D1".to_owned()).or_default().insert(
//!     "1".to_owned(),
//!     Feature {
//!         feature_idx: Some(1),
//!         logit_p_value: Some(0.001),
//!         ..Feature::default()
//!     },
//! );
//!
//! let collection = DatasetCollection::validate(raw).unwrap();
//! assert_eq!(collection.len(), 1);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::feature::Feature;

/// Features of one dataset, keyed by the string-encoded feature index.
pub type FeatureCollection = BTreeMap<String, Feature>;

/// Unvalidated feed contents, keyed by dataset name.
pub type RawDatasetCollection = BTreeMap<String, FeatureCollection>;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ValidationError {
    #[display(
        "Missing significance statistic (logit_p_value or win_rate_p_value) for feature '{feature}' in dataset '{dataset}'"
    )]
    MissingSignificance { dataset: String, feature: String },
}

/// Validated, immutable feed contents.
///
/// Deserializing this type runs [`DatasetCollection::validate`], so a
/// successfully parsed collection always satisfies the load invariants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDatasetCollection", into = "RawDatasetCollection")]
pub struct DatasetCollection {
    datasets: RawDatasetCollection,
}

impl DatasetCollection {
    /// Checks that every feature in every dataset carries a p-value.
    ///
    /// Stops at the first offending record. Other fields are not checked;
    /// their absence is handled by the downstream fallbacks.
    pub fn validate(datasets: RawDatasetCollection) -> Result<Self, ValidationError> {
        for (dataset, features) in &datasets {
            for feature in features.values() {
                if Feature::P_VALUE.resolve(feature).is_none() {
                    return Err(ValidationError::MissingSignificance {
                        dataset: dataset.clone(),
                        feature: feature.id_label(),
                    });
                }
            }
        }

        tracing::debug!(
            datasets = datasets.len(),
            features = datasets.values().map(BTreeMap::len).sum::<usize>(),
            "feed validated"
        );
        Ok(Self { datasets })
    }

    #[must_use]
    pub fn get(&self, dataset: &str) -> Option<&FeatureCollection> {
        self.datasets.get(dataset)
    }

    #[must_use]
    pub fn contains(&self, dataset: &str) -> bool {
        self.datasets.contains_key(dataset)
    }

    /// Dataset names in lexical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.datasets.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureCollection)> {
        self.datasets
            .iter()
            .map(|(name, features)| (name.as_str(), features))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Total number of features across all datasets.
    #[must_use]
    pub fn num_features(&self) -> usize {
        self.datasets.values().map(BTreeMap::len).sum()
    }
}

impl TryFrom<RawDatasetCollection> for DatasetCollection {
    type Error = ValidationError;

    fn try_from(datasets: RawDatasetCollection) -> Result<Self, Self::Error> {
        Self::validate(datasets)
    }
}

impl From<DatasetCollection> for RawDatasetCollection {
    fn from(collection: DatasetCollection) -> Self {
        collection.datasets
    }
}
