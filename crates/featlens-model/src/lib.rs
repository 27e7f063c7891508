//! Data model for preference-feature feeds.
//!
//! A feed is a JSON document mapping dataset names to feature collections.
//! Each feature carries precomputed statistics (effect size, p-values,
//! fidelity) and a bundle of response-pair examples.
//!
//! ```text
//! DatasetCollection
//! └─ dataset name -> FeatureCollection
//!     └─ feature key -> Feature
//!         ├─ statistics (delta win rate, p-values, fidelity, prevalence)
//!         └─ examples: ExampleBundle
//!             └─ tier -> Vec<Example>
//!                 ├─ prompt, response_A, response_B
//!                 ├─ label (1 = A chosen, otherwise B)
//!                 └─ activation_z_score
//! ```
//!
//! The collection is validated once at load time ([`DatasetCollection::validate`])
//! and is immutable afterwards.

pub use self::{catalog::*, collection::*, example::*, feature::*, field::*};

pub mod catalog;
pub mod collection;
mod de;
pub mod example;
pub mod feature;
pub mod field;
