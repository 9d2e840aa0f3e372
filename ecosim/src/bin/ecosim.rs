use std::io;
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use ecosim::cli::SimCli;
use ecosim::report::WriterReporter;
use ecosim::{sim, utils};
use log::info;

fn main() -> anyhow::Result<()> {
    let args = SimCli::parse();
    utils::init_logging(&args.log_level);
    let config = args.to_config()?;
    let metrics_recorder = utils::MetricsRecorder::install()?;

    let reporter = WriterReporter::new(io::stdout(), config.format, config.header);
    let outcome = sim::run_simulation(&config, reporter)?;
    info!(
        "{} months reported in {:.1?}",
        outcome.rows,
        (outcome.finished - outcome.started).to_std().unwrap_or_default()
    );

    if !args.summary.is_empty() {
        let summary = sim::summary_json(&config, &outcome, Some(&metrics_recorder));
        info!("Dumping run summary to {}", args.summary);
        utils::write_json(Path::new(&args.summary), &summary)
            .with_context(|| format!("writing summary to {}", args.summary))?;
    }
    Ok(())
}
