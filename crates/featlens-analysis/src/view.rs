//! View state and derived views.
//!
//! The browser's selections (dataset, feature, sort direction) are held in an
//! immutable [`ViewState`]. Every transition returns a new state, and
//! [`ViewState::resolve`] recomputes the whole [`View`] from the loaded
//! collection. Nothing is cached between calls.

use featlens_model::{DatasetCatalog, DatasetCollection, DatasetTab, ExampleTier};

use crate::{
    ranking::{self, RankOptions, RankedFeature, SortDirection},
    selector::{ExampleSelector, OrientationPolicy, OrientedExample},
};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ViewError {
    #[display("No dataset in the feed is listed in the catalog")]
    NoDatasets,
    #[display("Dataset '{dataset}' is not listed in the catalog or missing from the feed")]
    UnknownDataset { dataset: String },
    #[display("Feature '{feature}' is not listed in dataset '{dataset}'")]
    UnknownFeature { dataset: String, feature: String },
}

/// Current selections of the browser.
///
/// `None` selections resolve to the first tab and the first ranked feature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    dataset: Option<String>,
    feature: Option<String>,
    direction: SortDirection,
}

impl ViewState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn dataset(&self) -> Option<&str> {
        self.dataset.as_deref()
    }

    #[must_use]
    pub fn feature(&self) -> Option<&str> {
        self.feature.as_deref()
    }

    #[must_use]
    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Switches dataset. The feature selection is cleared.
    #[must_use]
    pub fn select_dataset(&self, dataset: impl Into<String>) -> Self {
        Self {
            dataset: Some(dataset.into()),
            feature: None,
            direction: self.direction,
        }
    }

    #[must_use]
    pub fn select_feature(&self, feature: impl Into<String>) -> Self {
        Self {
            feature: Some(feature.into()),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_direction(&self, direction: SortDirection) -> Self {
        Self {
            direction,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn toggle_direction(&self) -> Self {
        self.with_direction(self.direction.reversed())
    }

    /// Derives the view for this state.
    pub fn resolve<'a>(
        &self,
        collection: &'a DatasetCollection,
        catalog: &'a DatasetCatalog,
        policy: OrientationPolicy,
    ) -> Result<View<'a>, ViewError> {
        let tabs = catalog.tabs(collection);
        let dataset = match &self.dataset {
            Some(key) => tabs
                .iter()
                .find(|tab| tab.key == key.as_str())
                .copied()
                .ok_or_else(|| ViewError::UnknownDataset {
                    dataset: key.clone(),
                })?,
            None => tabs.first().copied().ok_or(ViewError::NoDatasets)?,
        };

        let options = RankOptions {
            direction: self.direction,
            fidelity_gate: catalog.fidelity_gate,
        };
        let features = ranking::rank(dataset.features, &options);

        let selected = match &self.feature {
            Some(key) => Some(
                features
                    .iter()
                    .find(|ranked| ranked.key == key.as_str())
                    .copied()
                    .ok_or_else(|| ViewError::UnknownFeature {
                        dataset: dataset.key.to_owned(),
                        feature: key.clone(),
                    })?,
            ),
            None => features.first().copied(),
        };
        let selector = ExampleSelector::new(policy);
        let selected = selected.map(|ranked| {
            let (tier, examples) = selector.select(ranked.feature);
            SelectedFeature {
                ranked,
                tier,
                examples,
            }
        });

        Ok(View {
            tabs,
            dataset,
            direction: self.direction,
            features,
            selected,
        })
    }
}

/// Everything a presentation layer needs for one state.
#[derive(Debug, Clone)]
pub struct View<'a> {
    pub tabs: Vec<DatasetTab<'a>>,
    pub dataset: DatasetTab<'a>,
    pub direction: SortDirection,
    pub features: Vec<RankedFeature<'a>>,
    /// `None` when the dataset has no listed features.
    pub selected: Option<SelectedFeature<'a>>,
}

#[derive(Debug, Clone)]
pub struct SelectedFeature<'a> {
    pub ranked: RankedFeature<'a>,
    pub tier: Option<ExampleTier>,
    pub examples: Vec<OrientedExample<'a>>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn collection() -> DatasetCollection {
        serde_json::from_value(json!({
            "b": {
                "1": {"feature_idx": 1, "logit_p_value": 0.5, "delta_win_rate_percentage": 5},
                "2": {"feature_idx": 2, "logit_p_value": 0.001, "delta_win_rate_percentage": 1,
                      "examples": {"top_5_percent": [
                          {"prompt": "p", "response_A": "a", "response_B": "b", "label": 0, "activation_z_score": 3.0}
                      ]}},
                "3": {"feature_idx": 3, "logit_p_value": 0.5, "fidelity_correlation": 0.1},
            },
            "a": {
                "7": {"feature_idx": 7, "logit_p_value": 0.5},
            },
            "hidden": {},
        }))
        .unwrap()
    }

    fn catalog() -> DatasetCatalog {
        DatasetCatalog::from_keys(["b", "a"])
    }

    #[test]
    fn test_default_state_selects_first_tab_and_feature() {
        let collection = collection();
        let catalog = catalog();
        let view = ViewState::new()
            .resolve(&collection, &catalog, OrientationPolicy::Preference)
            .unwrap();
        assert_eq!(view.tabs.len(), 2);
        assert_eq!(view.dataset.key, "b");
        let keys = view.features.iter().map(|r| r.key).collect::<Vec<_>>();
        assert_eq!(keys, ["2", "1"]);

        let selected = view.selected.unwrap();
        assert_eq!(selected.ranked.key, "2");
        assert_eq!(selected.tier, Some(ExampleTier::Top5Percent));
        assert_eq!(selected.examples[0].signed_score, Some(-3.0));
        assert_eq!(selected.examples[0].left.text, "b");
    }

    #[test]
    fn test_transitions_produce_new_states() {
        let state = ViewState::new().select_dataset("b").select_feature("1");
        let toggled = state.toggle_direction();
        assert_eq!(state.direction(), SortDirection::Descending);
        assert_eq!(toggled.direction(), SortDirection::Ascending);
        assert_eq!(toggled.feature(), Some("1"));

        let switched = toggled.select_dataset("a");
        assert_eq!(switched.dataset(), Some("a"));
        assert_eq!(switched.feature(), None);
        assert_eq!(switched.direction(), SortDirection::Ascending);
    }

    #[test]
    fn test_selected_feature_without_examples() {
        let collection = collection();
        let catalog = catalog();
        let view = ViewState::new()
            .select_feature("1")
            .resolve(&collection, &catalog, OrientationPolicy::Preference)
            .unwrap();
        let selected = view.selected.unwrap();
        assert_eq!(selected.ranked.key, "1");
        assert_eq!(selected.tier, None);
        assert!(selected.examples.is_empty());
    }

    #[test]
    fn test_unknown_selections_are_errors() {
        let collection = collection();
        let catalog = catalog();
        let err = ViewState::new()
            .select_dataset("hidden")
            .resolve(&collection, &catalog, OrientationPolicy::Preference)
            .unwrap_err();
        assert_eq!(
            err,
            ViewError::UnknownDataset {
                dataset: "hidden".to_owned()
            }
        );

        // gated out by the fidelity floor
        let err = ViewState::new()
            .select_feature("3")
            .resolve(&collection, &catalog, OrientationPolicy::Preference)
            .unwrap_err();
        assert_eq!(
            err,
            ViewError::UnknownFeature {
                dataset: "b".to_owned(),
                feature: "3".to_owned(),
            }
        );
    }

    #[test]
    fn test_no_listed_datasets() {
        let collection = collection();
        let catalog = DatasetCatalog::from_keys(["nope"]);
        let err = ViewState::new()
            .resolve(&collection, &catalog, OrientationPolicy::Preference)
            .unwrap_err();
        assert_eq!(err, ViewError::NoDatasets);
    }

    #[test]
    fn test_resolving_twice_is_identical() {
        let collection = collection();
        let catalog = catalog();
        let state = ViewState::new().toggle_direction();
        let first = state
            .resolve(&collection, &catalog, OrientationPolicy::Activation)
            .unwrap();
        let second = state
            .resolve(&collection, &catalog, OrientationPolicy::Activation)
            .unwrap();
        assert_eq!(first.features, second.features);
        assert_eq!(
            first.selected.map(|s| s.examples),
            second.selected.map(|s| s.examples)
        );
    }
}
