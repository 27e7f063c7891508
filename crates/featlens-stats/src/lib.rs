//! Statistical primitives for the featlens feature browser.
//!
//! The feed consumed by featlens already carries p-values, correlations and
//! effect sizes computed upstream. This crate holds the small amount of
//! statistics the browser applies on top of them:
//!
//! - **Multiple-comparison correction**: the Bonferroni-corrected significance
//!   threshold every p-value is tested against
//! - **Descriptive statistics**: min, max, mean, median and spread of a set of
//!   values, used for per-dataset summaries
//!
//! # Modules
//!
//! - [`correction`]: Bonferroni correction and the fixed significance threshold
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//!
//! # Examples
//!
//! ## Testing a p-value against the corrected threshold
//!
//! ```
//! use featlens_stats::correction::{Bonferroni, SIGNIFICANCE_THRESHOLD};
//!
//! assert_eq!(Bonferroni::DEFAULT.threshold(), SIGNIFICANCE_THRESHOLD);
//! assert!(Bonferroni::DEFAULT.is_significant(0.001));
//! assert!(!Bonferroni::DEFAULT.is_significant(0.01));
//! ```
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use featlens_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```

pub mod correction;
pub mod descriptive;
