//! Response-pair examples attached to a feature.

use serde::{Deserialize, Serialize};

use crate::de::null_as_default;

/// One of the two responses in a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant)]
pub enum Side {
    #[display("Response A")]
    A,
    #[display("Response B")]
    B,
}

impl Side {
    /// Returns the other response of the pair.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// A prompt with two candidate responses and the judge's preference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    #[serde(default, deserialize_with = "null_as_default")]
    pub prompt: String,
    #[serde(rename = "response_A", default, deserialize_with = "null_as_default")]
    pub response_a: String,
    #[serde(rename = "response_B", default, deserialize_with = "null_as_default")]
    pub response_b: String,
    /// Judge label: `1` means response A was preferred, any other value means B.
    ///
    /// `None` when the export recorded no preference. Such pairs still orient
    /// as if B was chosen; check [`Example::is_labeled`] before presenting
    /// the preference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<i64>,
    /// How strongly the feature fired for this pair, if measured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation_z_score: Option<f64>,
}

impl Example {
    /// The response the judge preferred.
    #[must_use]
    pub fn chosen(&self) -> Side {
        if self.label == Some(1) {
            Side::A
        } else {
            Side::B
        }
    }

    /// Returns `true` if the judge's preference was recorded.
    #[must_use]
    pub fn is_labeled(&self) -> bool {
        self.label.is_some()
    }

    /// The response the judge rejected.
    #[must_use]
    pub fn rejected(&self) -> Side {
        self.chosen().other()
    }

    #[must_use]
    pub fn response(&self, side: Side) -> &str {
        match side {
            Side::A => &self.response_a,
            Side::B => &self.response_b,
        }
    }
}

/// Named subset of a feature's examples.
///
/// Tiers are alternatives: only the first non-empty tier in
/// [`ExampleTier::PRIORITY`] order is ever shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ExampleTier {
    #[display("top_5_percent")]
    Top5Percent,
    #[display("top_2_percent")]
    Top2Percent,
    #[display("all")]
    All,
}

impl ExampleTier {
    pub const PRIORITY: [ExampleTier; 3] = [
        ExampleTier::Top5Percent,
        ExampleTier::Top2Percent,
        ExampleTier::All,
    ];

    /// Human-readable tier name.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            ExampleTier::Top5Percent => "Top 5%",
            ExampleTier::Top2Percent => "Top 2%",
            ExampleTier::All => "All",
        }
    }
}

/// Example tiers of a feature, keyed by tier name in the feed.
///
/// Keys outside the known tier set are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExampleBundle {
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub top_5_percent: Vec<Example>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub top_2_percent: Vec<Example>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub all: Vec<Example>,
}

impl ExampleBundle {
    #[must_use]
    pub fn tier(&self, tier: ExampleTier) -> &[Example] {
        match tier {
            ExampleTier::Top5Percent => &self.top_5_percent,
            ExampleTier::Top2Percent => &self.top_2_percent,
            ExampleTier::All => &self.all,
        }
    }

    /// Returns the first non-empty tier in priority order.
    #[must_use]
    pub fn first_non_empty(&self) -> Option<(ExampleTier, &[Example])> {
        ExampleTier::PRIORITY
            .into_iter()
            .map(|tier| (tier, self.tier(tier)))
            .find(|(_, examples)| !examples.is_empty())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_non_empty().is_none()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn example(label: i64, score: Option<f64>) -> Example {
        Example {
            prompt: "p".to_owned(),
            response_a: "a".to_owned(),
            response_b: "b".to_owned(),
            label: Some(label),
            activation_z_score: score,
        }
    }

    #[test]
    fn test_label_one_means_a_chosen() {
        let ex = example(1, None);
        assert_eq!(ex.chosen(), Side::A);
        assert_eq!(ex.rejected(), Side::B);
        assert_eq!(ex.response(ex.chosen()), "a");
    }

    #[test]
    fn test_other_labels_mean_b_chosen() {
        for label in [0, 2, -1] {
            assert_eq!(example(label, None).chosen(), Side::B, "label {label}");
        }
    }

    #[test]
    fn test_missing_label_is_unlabeled() {
        let ex: Example =
            serde_json::from_value(json!({"prompt": "p", "response_A": "a", "response_B": "b"}))
                .unwrap();
        assert_eq!(ex.label, None);
        assert!(!ex.is_labeled());
        assert_eq!(ex.chosen(), Side::B);
        assert!(example(0, None).is_labeled());
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let ex: Example = serde_json::from_value(json!({
            "prompt": null,
            "response_A": null,
            "response_B": "b",
            "label": null,
            "activation_z_score": null,
        }))
        .unwrap();
        assert_eq!(ex.prompt, "");
        assert_eq!(ex.response_a, "");
        assert_eq!(ex.response_b, "b");
        assert!(!ex.is_labeled());

        let bundle: ExampleBundle = serde_json::from_value(json!({
            "top_5_percent": null,
            "top_2_percent": null,
            "all": [{"prompt": "x", "response_A": "a", "response_B": "b", "label": 1}],
        }))
        .unwrap();
        let (tier, examples) = bundle.first_non_empty().unwrap();
        assert_eq!(tier, ExampleTier::All);
        assert_eq!(examples[0].chosen(), Side::A);
    }

    #[test]
    fn test_deserialize_example_fields() {
        let ex: Example = serde_json::from_value(json!({
            "prompt": "p",
            "response_A": "a",
            "response_B": "b",
            "label": 0,
            "activation_z_score": -1.5,
        }))
        .unwrap();
        assert_eq!(ex.response_a, "a");
        assert_eq!(ex.response_b, "b");
        assert_eq!(ex.chosen(), Side::B);
        assert_eq!(ex.activation_z_score, Some(-1.5));

        let ex: Example = serde_json::from_value(json!({
            "prompt": "p",
            "response_A": "a",
            "response_B": "b",
            "label": 1,
            "activation_z_score": null,
        }))
        .unwrap();
        assert_eq!(ex.activation_z_score, None);
    }

    #[test]
    fn test_first_non_empty_tier_is_used() {
        let bundle: ExampleBundle = serde_json::from_value(json!({
            "top_5_percent": [],
            "top_2_percent": [{"prompt": "x", "response_A": "a", "response_B": "b", "label": 1}],
            "all": [
                {"prompt": "y", "response_A": "a", "response_B": "b", "label": 0},
                {"prompt": "z", "response_A": "a", "response_B": "b", "label": 0},
            ],
            "unknown_tier": [],
        }))
        .unwrap();
        let (tier, examples) = bundle.first_non_empty().unwrap();
        assert_eq!(tier, ExampleTier::Top2Percent);
        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].prompt, "x");
    }

    #[test]
    fn test_empty_bundle() {
        let bundle = ExampleBundle::default();
        assert!(bundle.is_empty());
        assert_eq!(bundle.first_non_empty(), None);
    }
}
