use std::io::{self, Write};

use featlens_analysis::{
    format,
    ranking::{RankedFeature, SortDirection},
    selector::OrientationPolicy,
    view::ViewState,
};
use featlens_model::DeltaScale;
use featlens_stats::correction::SIGNIFICANCE_THRESHOLD;

use crate::{
    command::{FeedArg, OutputArg, OutputFormat},
    schema::report::{FeatureReport, FeatureRow},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RankArg {
    #[clap(flatten)]
    pub(super) feed: FeedArg,
    #[clap(flatten)]
    pub(super) output: OutputArg,
    /// Dataset key (defaults to the first listed dataset)
    #[arg(long)]
    pub(super) dataset: Option<String>,
    /// Sort smallest delta first within each significance group
    #[arg(long)]
    pub(super) ascending: bool,
    /// Maximum number of features to print
    #[arg(long)]
    pub(super) limit: Option<usize>,
}

pub(crate) fn run(arg: &RankArg) -> anyhow::Result<()> {
    let (collection, catalog) = arg.feed.load()?;

    let mut state = ViewState::new();
    if let Some(dataset) = &arg.dataset {
        state = state.select_dataset(dataset.as_str());
    }
    if arg.ascending {
        state = state.with_direction(SortDirection::Ascending);
    }
    let view = state.resolve(&collection, &catalog, OrientationPolicy::default())?;

    let limit = arg.limit.unwrap_or(usize::MAX);
    let rows = view
        .features
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, ranked)| FeatureRow::new(i + 1, ranked, catalog.delta_scale))
        .collect::<Vec<_>>();

    let mut output = arg.output.open()?;
    match arg.output.format() {
        OutputFormat::Json => output.write_json(FeatureReport {
            dataset: view.dataset.key,
            direction: view.direction.to_string(),
            features: rows,
        })?,
        OutputFormat::Text => {
            writeln!(
                output,
                "{} ({}): {} features listed, sorted {} by delta; significant when p <= {}",
                view.dataset.display_name,
                view.dataset.key,
                view.features.len(),
                view.direction,
                SIGNIFICANCE_THRESHOLD
            )?;
            writeln!(
                output,
                "{:>4} {:>8} {:>3} {:>10} {:>10} {:>8} {:>10}  INTERPRETATION",
                "RANK", "FEATURE", "SIG", "DELTA", "P-VALUE", "FIDELITY", "PREVALENCE"
            )?;
            for (i, ranked) in view.features.iter().take(limit).enumerate() {
                write_feature_line(&mut output, i + 1, ranked, catalog.delta_scale)?;
            }
            output.finish()?;
        }
    }
    Ok(())
}

pub(crate) fn write_feature_line<W>(
    writer: &mut W,
    rank: usize,
    ranked: &RankedFeature<'_>,
    scale: DeltaScale,
) -> io::Result<()>
where
    W: Write,
{
    let feature = ranked.feature;
    let id = feature
        .feature_idx
        .map_or_else(|| ranked.key.to_owned(), |idx| idx.to_string());
    writeln!(
        writer,
        "{:>4} {:>8} {:>3} {:>10} {:>10} {:>8} {:>10}  {}",
        rank,
        id,
        if ranked.significant { "*" } else { "" },
        format::format_delta(ranked.delta, scale),
        format::format_p_value(feature.p_value()),
        format::format_correlation(feature.fidelity_correlation),
        format::format_percentage(feature.prevalence_percentage, DeltaScale::Percent),
        feature
            .interpretation
            .as_deref()
            .unwrap_or(format::UNAVAILABLE),
    )
}
