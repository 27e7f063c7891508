//! Example selection and orientation.
//!
//! For a chosen feature the selector picks the first non-empty example tier,
//! orders its examples by activation magnitude, and lays each response pair
//! out according to an [`OrientationPolicy`].

use std::cmp::Ordering;

use featlens_model::{Example, ExampleTier, Feature, Side};

/// How a response pair is laid out for display.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    derive_more::FromStr,
    derive_more::IsVariant,
)]
pub enum OrientationPolicy {
    /// Chosen response on the left, rejected on the right. The activation
    /// score is signed so that positive means the chosen response shows the
    /// feature more.
    #[default]
    #[display("preference")]
    Preference,
    /// The response the activation favors on the left, regardless of which
    /// one the judge preferred. Response A goes left when there is no score.
    #[display("activation")]
    Activation,
}

/// Label of a displayed response, in the active policy's terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SideLabel {
    #[display("the chosen response")]
    Chosen,
    #[display("the rejected response")]
    Rejected,
    #[display("Response A")]
    ResponseA,
    #[display("Response B")]
    ResponseB,
}

impl SideLabel {
    fn of(side: Side) -> Self {
        match side {
            Side::A => SideLabel::ResponseA,
            Side::B => SideLabel::ResponseB,
        }
    }
}

/// Which response shows the feature more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant)]
pub enum Comparison {
    /// No activation score was recorded.
    #[display("activation comparison unavailable")]
    Unavailable,
    #[display("feature appears equally in both responses")]
    Equal,
    #[display("feature appears more in {_0}")]
    MoreIn(SideLabel),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrientedResponse<'a> {
    pub side: Side,
    pub label: SideLabel,
    /// Whether the judge preferred this response.
    pub chosen: bool,
    pub text: &'a str,
}

/// A response pair laid out for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedExample<'a> {
    pub prompt: &'a str,
    pub left: OrientedResponse<'a>,
    pub right: OrientedResponse<'a>,
    /// Activation score oriented to the policy.
    ///
    /// Under [`OrientationPolicy::Preference`] this is the raw score, negated
    /// when response B was chosen. Under [`OrientationPolicy::Activation`]
    /// it is the score's magnitude, favoring the left response.
    pub signed_score: Option<f64>,
    pub comparison: Comparison,
    /// Whether the judge's preference was recorded. When `false`, the
    /// `chosen` flags and preference labels follow the unlabeled default.
    pub labeled: bool,
}

/// Examples chosen for a feature, strongest activation first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExampleSelection<'a> {
    /// Tier the examples came from; `None` when the feature has none.
    pub tier: Option<ExampleTier>,
    pub examples: Vec<&'a Example>,
}

impl ExampleSelection<'_> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}

fn activation_magnitude(example: &Example) -> f64 {
    example
        .activation_z_score
        .map_or(f64::NEG_INFINITY, f64::abs)
}

/// Picks the examples to show for `feature`.
///
/// Uses the first non-empty tier in [`ExampleTier::PRIORITY`] order and sorts
/// it by absolute activation score, descending. Examples without a score go
/// last; equal magnitudes keep their feed order.
#[must_use]
pub fn select_examples(feature: &Feature) -> ExampleSelection<'_> {
    let Some((tier, examples)) = feature.examples.first_non_empty() else {
        return ExampleSelection::default();
    };

    let mut examples = examples.iter().collect::<Vec<_>>();
    examples.sort_by(|a, b| activation_magnitude(b).total_cmp(&activation_magnitude(a)));
    tracing::debug!(%tier, count = examples.len(), "selected examples");

    ExampleSelection {
        tier: Some(tier),
        examples,
    }
}

/// Lays out one example under `policy`.
#[must_use]
pub fn orient(example: &Example, policy: OrientationPolicy) -> OrientedExample<'_> {
    let chosen = example.chosen();
    let score = example.activation_z_score;

    let (left, signed_score, left_label, right_label) = match policy {
        OrientationPolicy::Preference => {
            let sign = if chosen.is_a() { 1.0 } else { -1.0 };
            (
                chosen,
                score.map(|s| s * sign),
                SideLabel::Chosen,
                SideLabel::Rejected,
            )
        }
        OrientationPolicy::Activation => {
            let left = match score {
                Some(s) if s < 0.0 => Side::B,
                _ => Side::A,
            };
            (
                left,
                score.map(f64::abs),
                SideLabel::of(left),
                SideLabel::of(left.other()),
            )
        }
    };

    let comparison = match signed_score.map(|s| s.partial_cmp(&0.0)) {
        Some(Some(Ordering::Greater)) => Comparison::MoreIn(left_label),
        Some(Some(Ordering::Less)) => Comparison::MoreIn(right_label),
        Some(Some(Ordering::Equal)) => Comparison::Equal,
        Some(None) | None => Comparison::Unavailable,
    };

    let response = |side: Side, label: SideLabel| OrientedResponse {
        side,
        label,
        chosen: side == chosen,
        text: example.response(side),
    };

    OrientedExample {
        prompt: &example.prompt,
        left: response(left, left_label),
        right: response(left.other(), right_label),
        signed_score,
        comparison,
        labeled: example.is_labeled(),
    }
}

/// Example selector configured with one orientation policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExampleSelector {
    pub policy: OrientationPolicy,
}

impl ExampleSelector {
    #[must_use]
    pub const fn new(policy: OrientationPolicy) -> Self {
        Self { policy }
    }

    /// Selects and orients the examples of `feature`.
    #[must_use]
    pub fn select<'a>(
        &self,
        feature: &'a Feature,
    ) -> (Option<ExampleTier>, Vec<OrientedExample<'a>>) {
        let selection = select_examples(feature);
        let examples = selection
            .examples
            .into_iter()
            .map(|example| orient(example, self.policy))
            .collect();
        (selection.tier, examples)
    }

    #[must_use]
    pub fn orient<'a>(&self, example: &'a Example) -> OrientedExample<'a> {
        orient(example, self.policy)
    }
}
