//! Significance, ranking and example selection for preference features
//!
//! This crate turns a validated [`DatasetCollection`](featlens_model::DatasetCollection)
//! into what a feature browser displays. Every function is a pure
//! transformation of the immutable collection plus the current selections.
//!
//! # Overview
//!
//! ```text
//! DatasetCollection ──(catalog)──> DatasetTab
//!        │
//!        └─ FeatureCollection ──rank──> Vec<RankedFeature>   (significance + fidelity gate)
//!                                          │
//!                                          └─ Feature ──select──> Vec<OrientedExample>
//! ```
//!
//! 1. **Significance** ([`significance`]): Bonferroni-corrected test of a
//!    feature's p-value
//! 2. **Ranking** ([`ranking`]): fidelity gate, significance partition, and
//!    delta ordering in either direction
//! 3. **Example selection** ([`selector`]): tier choice, activation ordering,
//!    and orientation of each response pair
//! 4. **View state** ([`view`]): immutable selections and the view derived
//!    from them
//!
//! [`summary`] and [`format`] support reports built on top of these.
//!
//! # Examples
//!
//! ```
//! use featlens_analysis::{
//!     selector::{OrientationPolicy, SideLabel},
//!     view::ViewState,
//! };
//! use featlens_model::{DatasetCatalog, DatasetCollection, Example, ExampleBundle, Feature};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let feature = Feature {
//!     feature_idx: Some(1),
//!     logit_p_value: Some(0.001),
//!     delta_win_rate_percentage: Some(10.0),
//!     fidelity_correlation: Some(0.5),
//!     examples: ExampleBundle {
//!         top_5_percent: vec![Example {
//!             prompt: "p".to_owned(),
//!             response_a: "a".to_owned(),
//!             response_b: "b".to_owned(),
//!             label: Some(1),
//!             activation_z_score: Some(2.0),
//!         }],
//!         ..ExampleBundle::default()
//!     },
//!     ..Feature::default()
//! };
//! let mut raw = featlens_model::RawDatasetCollection::new();
//! raw.entry("D1".to_owned()).or_default().insert("1".to_owned(), feature);
//! let collection = DatasetCollection::validate(raw)?;
//! let catalog = DatasetCatalog::from_keys(["D1"]);
//!
//! let view = ViewState::new().resolve(&collection, &catalog, OrientationPolicy::Preference)?;
//! let selected = view.selected.unwrap();
//! assert!(selected.ranked.significant);
//! assert_eq!(selected.examples[0].left.label, SideLabel::Chosen);
//! assert_eq!(selected.examples[0].signed_score, Some(2.0));
//! # Ok(())
//! # }
//! ```

pub mod format;
pub mod ranking;
pub mod selector;
pub mod significance;
pub mod summary;
pub mod view;
