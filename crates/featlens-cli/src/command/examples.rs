use std::io::Write as _;

use featlens_analysis::{format, selector::OrientationPolicy, view::ViewState};

use crate::{
    command::{FeedArg, OutputArg, OutputFormat, rank},
    schema::report::{ExampleReport, ExampleRow, FeatureRow},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ExamplesArg {
    #[clap(flatten)]
    pub(super) feed: FeedArg,
    #[clap(flatten)]
    pub(super) output: OutputArg,
    /// Dataset key (defaults to the first listed dataset)
    #[arg(long)]
    pub(super) dataset: Option<String>,
    /// Feature key (defaults to the top-ranked feature)
    #[arg(long)]
    pub(super) feature: Option<String>,
    /// Layout of response pairs: preference (chosen on the left) or activation
    #[arg(long, default_value = "preference")]
    pub(super) policy: OrientationPolicy,
    /// Maximum number of examples to print
    #[arg(long)]
    pub(super) limit: Option<usize>,
}

pub(crate) fn run(arg: &ExamplesArg) -> anyhow::Result<()> {
    let (collection, catalog) = arg.feed.load()?;

    let mut state = ViewState::new();
    if let Some(dataset) = &arg.dataset {
        state = state.select_dataset(dataset.as_str());
    }
    if let Some(feature) = &arg.feature {
        state = state.select_feature(feature.as_str());
    }
    let view = state.resolve(&collection, &catalog, arg.policy)?;

    let Some(selected) = view.selected else {
        anyhow::bail!("Dataset '{}' has no features to display", view.dataset.key);
    };
    let position = view
        .features
        .iter()
        .position(|ranked| ranked.key == selected.ranked.key)
        .map_or(0, |i| i + 1);
    if selected.examples.is_empty() {
        tracing::info!("Feature '{}' has no examples", selected.ranked.key);
    }

    let limit = arg.limit.unwrap_or(usize::MAX);
    let mut output = arg.output.open()?;
    match arg.output.format() {
        OutputFormat::Json => output.write_json(ExampleReport {
            dataset: view.dataset.key,
            feature: FeatureRow::new(position, &selected.ranked, catalog.delta_scale),
            policy: arg.policy.to_string(),
            tier: selected.tier.map(|tier| tier.to_string()),
            examples: selected
                .examples
                .iter()
                .take(limit)
                .enumerate()
                .map(|(i, example)| ExampleRow::new(i + 1, example))
                .collect(),
        })?,
        OutputFormat::Text => {
            rank::write_feature_line(
                &mut output,
                position,
                &selected.ranked,
                catalog.delta_scale,
            )?;
            let Some(tier) = selected.tier else {
                writeln!(output, "\nNo examples to display.")?;
                return output.finish();
            };
            writeln!(
                output,
                "\nExamples from tier {} ({} shown, {} layout)",
                tier.title(),
                selected.examples.len().min(limit),
                arg.policy
            )?;
            for (i, example) in selected.examples.iter().take(limit).enumerate() {
                writeln!(output, "\n#{} {}", i + 1, "-".repeat(60))?;
                writeln!(output, "Prompt: {}", example.prompt)?;
                for (place, response) in [("Left", &example.left), ("Right", &example.right)] {
                    let verdict = match (example.labeled, response.chosen) {
                        (false, _) => "unlabeled",
                        (true, true) => "chosen",
                        (true, false) => "rejected",
                    };
                    writeln!(
                        output,
                        "{place}: {} [{verdict}]\n  {}",
                        response.side, response.text
                    )?;
                }
                writeln!(
                    output,
                    "Activation: {} ({})",
                    format::format_score(example.signed_score),
                    example.comparison
                )?;
            }
            output.finish()?;
        }
    }
    Ok(())
}
