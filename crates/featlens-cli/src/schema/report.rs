//! JSON report rows written by the `--format json` output.

use featlens_analysis::{
    format,
    ranking::RankedFeature,
    selector::{OrientedExample, OrientedResponse},
    significance,
    summary::DatasetSummary,
};
use featlens_model::{DatasetTab, DeltaScale};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DatasetRow<'a> {
    pub key: &'a str,
    pub display_name: &'a str,
    pub num_features: usize,
}

impl<'a> DatasetRow<'a> {
    pub fn new(tab: &DatasetTab<'a>) -> Self {
        Self {
            key: tab.key,
            display_name: tab.display_name,
            num_features: tab.features.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FeatureReport<'a> {
    pub dataset: &'a str,
    pub direction: String,
    pub features: Vec<FeatureRow<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeatureRow<'a> {
    /// 1-based position in the ranked list
    pub rank: usize,
    pub key: &'a str,
    pub feature_idx: Option<i64>,
    pub interpretation: Option<&'a str>,
    pub significant: bool,
    pub p_value: Option<f64>,
    pub p_value_field: Option<&'static str>,
    /// Comparable delta in the export's own scale
    pub delta: Option<f64>,
    /// Delta normalized to percentage points
    pub delta_percent: Option<f64>,
    pub fidelity_correlation: Option<f64>,
    pub fidelity_p_value: Option<f64>,
    pub prevalence_percentage: Option<f64>,
    pub num_examples: usize,
}

impl<'a> FeatureRow<'a> {
    pub fn new(rank: usize, ranked: &RankedFeature<'a>, scale: DeltaScale) -> Self {
        let feature = ranked.feature;
        let p_value = significance::resolved_p_value(feature);
        Self {
            rank,
            key: ranked.key,
            feature_idx: feature.feature_idx,
            interpretation: feature.interpretation.as_deref(),
            significant: ranked.significant,
            p_value: p_value.map(|p| p.value),
            p_value_field: p_value.map(|p| p.field),
            delta: ranked.delta,
            delta_percent: ranked.delta.map(|d| format::to_percent(d, scale)),
            fidelity_correlation: feature.fidelity_correlation,
            fidelity_p_value: feature.fidelity_p_value,
            prevalence_percentage: feature.prevalence_percentage,
            num_examples: feature
                .examples
                .first_non_empty()
                .map_or(0, |(_, examples)| examples.len()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExampleReport<'a> {
    pub dataset: &'a str,
    pub feature: FeatureRow<'a>,
    pub policy: String,
    pub tier: Option<String>,
    pub examples: Vec<ExampleRow<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExampleRow<'a> {
    pub rank: usize,
    pub prompt: &'a str,
    pub left: ResponseRow<'a>,
    pub right: ResponseRow<'a>,
    pub signed_score: Option<f64>,
    pub comparison: String,
    pub labeled: bool,
}

impl<'a> ExampleRow<'a> {
    pub fn new(rank: usize, example: &OrientedExample<'a>) -> Self {
        Self {
            rank,
            prompt: example.prompt,
            left: ResponseRow::new(&example.left),
            right: ResponseRow::new(&example.right),
            signed_score: example.signed_score,
            comparison: example.comparison.to_string(),
            labeled: example.labeled,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseRow<'a> {
    pub side: String,
    pub label: String,
    pub chosen: bool,
    pub text: &'a str,
}

impl<'a> ResponseRow<'a> {
    pub fn new(response: &OrientedResponse<'a>) -> Self {
        Self {
            side: response.side.to_string(),
            label: response.label.to_string(),
            chosen: response.chosen,
            text: response.text,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryRow<'a> {
    pub key: &'a str,
    pub display_name: &'a str,
    pub total: usize,
    pub listed: usize,
    pub gated_out: usize,
    pub significant: usize,
    pub not_significant: usize,
    pub missing_delta: usize,
    pub without_examples: usize,
    pub delta: Option<DeltaStatsRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeltaStatsRow {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
}

impl<'a> SummaryRow<'a> {
    pub fn new(tab: &DatasetTab<'a>, summary: &DatasetSummary) -> Self {
        Self {
            key: tab.key,
            display_name: tab.display_name,
            total: summary.total,
            listed: summary.listed(),
            gated_out: summary.gated_out,
            significant: summary.significant,
            not_significant: summary.not_significant,
            missing_delta: summary.missing_delta,
            without_examples: summary.without_examples,
            delta: summary.delta.as_ref().map(|stats| DeltaStatsRow {
                count: stats.count,
                min: stats.min,
                max: stats.max,
                mean: stats.mean,
                median: stats.median,
                std_dev: stats.std_dev,
            }),
        }
    }
}
