use std::io::Write as _;

use featlens_analysis::{format, summary::DatasetSummary};

use crate::{
    command::{FeedArg, OutputArg, OutputFormat},
    schema::report::SummaryRow,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SummaryArg {
    #[clap(flatten)]
    pub(super) feed: FeedArg,
    #[clap(flatten)]
    pub(super) output: OutputArg,
}

pub(crate) fn run(arg: &SummaryArg) -> anyhow::Result<()> {
    let (collection, catalog) = arg.feed.load()?;
    let tabs = catalog.tabs(&collection);
    let summaries = tabs
        .iter()
        .map(|tab| {
            (
                tab,
                DatasetSummary::from_features(tab.features, catalog.fidelity_gate),
            )
        })
        .collect::<Vec<_>>();

    let mut output = arg.output.open()?;
    match arg.output.format() {
        OutputFormat::Json => output.write_json(
            summaries
                .iter()
                .map(|(tab, summary)| SummaryRow::new(tab, summary))
                .collect::<Vec<_>>(),
        )?,
        OutputFormat::Text => {
            writeln!(output, "Fidelity gate: {}", catalog.fidelity_gate)?;
            for (tab, summary) in &summaries {
                writeln!(output, "\n{} ({})", tab.display_name, tab.key)?;
                writeln!(
                    output,
                    "  features: {} total, {} listed, {} gated out",
                    summary.total,
                    summary.listed(),
                    summary.gated_out
                )?;
                writeln!(
                    output,
                    "  significant: {}, not significant: {}",
                    summary.significant, summary.not_significant
                )?;
                writeln!(
                    output,
                    "  missing delta: {}, without examples: {}",
                    summary.missing_delta, summary.without_examples
                )?;
                match &summary.delta {
                    Some(stats) => writeln!(
                        output,
                        "  delta: min {}, median {}, max {}, mean {} (sd {})",
                        format::format_delta(Some(stats.min), catalog.delta_scale),
                        format::format_delta(Some(stats.median), catalog.delta_scale),
                        format::format_delta(Some(stats.max), catalog.delta_scale),
                        format::format_delta(Some(stats.mean), catalog.delta_scale),
                        format::format_percentage(Some(stats.std_dev), catalog.delta_scale),
                    )?,
                    None => writeln!(output, "  delta: {}", format::UNAVAILABLE)?,
                }
            }
            output.finish()?;
        }
    }
    Ok(())
}
