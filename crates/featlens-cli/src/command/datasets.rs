use std::io::Write as _;

use crate::{
    command::{FeedArg, OutputArg, OutputFormat},
    schema::report::DatasetRow,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DatasetsArg {
    #[clap(flatten)]
    pub(super) feed: FeedArg,
    #[clap(flatten)]
    pub(super) output: OutputArg,
}

pub(crate) fn run(arg: &DatasetsArg) -> anyhow::Result<()> {
    let (collection, catalog) = arg.feed.load()?;
    let tabs = catalog.tabs(&collection);
    let hidden = collection.len() - tabs.len();
    if hidden > 0 {
        tracing::info!("{hidden} dataset(s) in the feed are not listed in the catalog");
    }

    let rows = tabs.iter().map(DatasetRow::new).collect::<Vec<_>>();
    let mut output = arg.output.open()?;
    match arg.output.format() {
        OutputFormat::Json => output.write_json(&rows)?,
        OutputFormat::Text => {
            writeln!(output, "{:<24} {:<32} {:>8}", "KEY", "NAME", "FEATURES")?;
            for row in &rows {
                writeln!(
                    output,
                    "{:<24} {:<32} {:>8}",
                    row.key, row.display_name, row.num_features
                )?;
            }
            output.finish()?;
        }
    }
    Ok(())
}
