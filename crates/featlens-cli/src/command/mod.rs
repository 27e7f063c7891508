use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use featlens_model::{DatasetCatalog, DatasetCollection, DeltaScale, FidelityGate};

use self::{
    datasets::DatasetsArg, examples::ExamplesArg, rank::RankArg, summary::SummaryArg,
};
use crate::{
    logging,
    util::{self, Output},
};

mod datasets;
mod examples;
mod rank;
mod summary;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Enable debug logging (`RUST_LOG` takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// List the datasets shown as tabs, in catalog order
    Datasets(#[clap(flatten)] DatasetsArg),
    /// Rank the features of a dataset
    Rank(#[clap(flatten)] RankArg),
    /// Show the representative examples of a feature
    Examples(#[clap(flatten)] ExamplesArg),
    /// Summarize significance and effect sizes per dataset
    Summary(#[clap(flatten)] SummaryArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    logging::init(args.verbose)?;
    match args.mode {
        Mode::Datasets(arg) => datasets::run(&arg)?,
        Mode::Rank(arg) => rank::run(&arg)?,
        Mode::Examples(arg) => examples::run(&arg)?,
        Mode::Summary(arg) => summary::run(&arg)?,
    }
    Ok(())
}

/// Feed file and the catalog options that decide how it is displayed.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct FeedArg {
    /// Feature feed file (JSON)
    feed_file: PathBuf,
    /// Dataset catalog file (JSON); the built-in catalog is used if omitted
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Show every dataset in the feed, in name order, instead of the catalog's
    #[arg(long, conflicts_with = "catalog")]
    all_datasets: bool,
    /// Gate features on fidelity correlation (overrides the catalog)
    #[arg(long, conflicts_with = "max_fidelity_p_value")]
    min_fidelity_correlation: Option<f64>,
    /// Gate features on fidelity p-value (overrides the catalog)
    #[arg(long)]
    max_fidelity_p_value: Option<f64>,
    /// Scale of win-rate fields: percent or fraction (overrides the catalog)
    #[arg(long)]
    delta_scale: Option<DeltaScale>,
}

impl FeedArg {
    pub(crate) fn load(&self) -> anyhow::Result<(DatasetCollection, DatasetCatalog)> {
        tracing::info!("Loading feed from {}...", self.feed_file.display());
        let collection = util::read_feed_file(&self.feed_file)?;
        tracing::info!(
            "Loaded {} datasets ({} features)",
            collection.len(),
            collection.num_features()
        );

        let mut catalog = match &self.catalog {
            Some(path) => util::read_catalog_file(path)
                .with_context(|| format!("Failed to load catalog: {}", path.display()))?,
            None if self.all_datasets => DatasetCatalog::from_keys(collection.names()),
            None => DatasetCatalog::default(),
        };
        if let Some(min) = self.min_fidelity_correlation {
            catalog.fidelity_gate = FidelityGate::CorrelationFloor { min };
        }
        if let Some(max) = self.max_fidelity_p_value {
            catalog.fidelity_gate = FidelityGate::PValue { max };
        }
        if let Some(scale) = self.delta_scale {
            catalog.delta_scale = scale;
        }
        tracing::debug!(fidelity_gate = %catalog.fidelity_gate, "catalog ready");

        Ok((collection, catalog))
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct OutputArg {
    /// Output format: text or json
    #[arg(long, default_value = "text")]
    format: OutputFormat,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

impl OutputArg {
    pub(crate) fn format(&self) -> OutputFormat {
        self.format
    }

    pub(crate) fn open(&self) -> anyhow::Result<Output> {
        Output::from_output_path(self.output.clone())
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;
    use featlens_analysis::selector::OrientationPolicy;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_examples_args() {
        let args = CommandArgs::try_parse_from([
            "featlens",
            "examples",
            "feed.json",
            "--dataset",
            "hh_rlhf",
            "--feature",
            "12",
            "--policy",
            "activation",
            "--format",
            "json",
            "-v",
        ])
        .unwrap();
        assert!(args.verbose);
        let Mode::Examples(arg) = args.mode else {
            panic!("expected examples mode");
        };
        assert_eq!(arg.policy, OrientationPolicy::Activation);
        assert_eq!(arg.feature.as_deref(), Some("12"));
        assert_eq!(arg.output.format(), OutputFormat::Json);
    }

    #[test]
    fn test_fidelity_gate_flags_conflict() {
        let result = CommandArgs::try_parse_from([
            "featlens",
            "rank",
            "feed.json",
            "--min-fidelity-correlation",
            "0.3",
            "--max-fidelity-p-value",
            "0.001",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_applies_overrides() {
        let dir = tempdir().unwrap();
        let feed_path = dir.path().join("feed.json");
        std::fs::write(
            &feed_path,
            r#"{"zeta": {"1": {"feature_idx": 1, "logit_p_value": 0.001}}, "alpha": {}}"#,
        )
        .unwrap();

        let args = CommandArgs::try_parse_from([
            "featlens",
            "summary",
            feed_path.to_str().unwrap(),
            "--all-datasets",
            "--max-fidelity-p-value",
            "0.01",
            "--delta-scale",
            "fraction",
        ])
        .unwrap();
        let Mode::Summary(arg) = args.mode else {
            panic!("expected summary mode");
        };
        let (collection, catalog) = arg.feed.load().unwrap();
        assert_eq!(collection.len(), 2);
        let keys = catalog
            .tabs(&collection)
            .iter()
            .map(|tab| tab.key)
            .collect::<Vec<_>>();
        assert_eq!(keys, ["alpha", "zeta"]);
        assert_eq!(catalog.fidelity_gate, FidelityGate::PValue { max: 0.01 });
        assert_eq!(catalog.delta_scale, DeltaScale::Fraction);
    }

    #[test]
    fn test_load_rejects_feed_without_significance() {
        let dir = tempdir().unwrap();
        let feed_path = dir.path().join("feed.json");
        std::fs::write(&feed_path, r#"{"D1": {"4": {"feature_idx": 4}}}"#).unwrap();

        let args =
            CommandArgs::try_parse_from(["featlens", "datasets", feed_path.to_str().unwrap()])
                .unwrap();
        let Mode::Datasets(arg) = args.mode else {
            panic!("expected datasets mode");
        };
        let err = arg.feed.load().unwrap_err();
        let message = format!("{err:#}");
        assert!(
            message.contains("Missing significance statistic"),
            "unexpected error: {message}"
        );
    }

    #[test]
    fn test_datasets_json_report_uses_catalog_file() {
        let dir = tempdir().unwrap();
        let feed_path = dir.path().join("feed.json");
        let catalog_path = dir.path().join("catalog.json");
        let output_path = dir.path().join("datasets.json");
        std::fs::write(
            &feed_path,
            r#"{"b": {"1": {"feature_idx": 1, "logit_p_value": 0.5}}, "a": {}, "c": {}}"#,
        )
        .unwrap();
        std::fs::write(
            &catalog_path,
            r#"{"datasets": [{"key": "b", "display_name": "Set B"}, {"key": "a"}]}"#,
        )
        .unwrap();

        let args = CommandArgs::try_parse_from([
            "featlens",
            "datasets",
            feed_path.to_str().unwrap(),
            "--catalog",
            catalog_path.to_str().unwrap(),
            "--format",
            "json",
            "--output",
            output_path.to_str().unwrap(),
        ])
        .unwrap();
        let Mode::Datasets(arg) = args.mode else {
            panic!("expected datasets mode");
        };
        datasets::run(&arg).unwrap();

        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output_path).unwrap()).unwrap();
        assert_eq!(
            report,
            serde_json::json!([
                {"key": "b", "display_name": "Set B", "num_features": 1},
                {"key": "a", "display_name": "a", "num_features": 0},
            ])
        );
    }
}
