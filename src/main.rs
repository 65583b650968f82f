use anyhow::Result;
use clap::Parser;
use log::{info, warn};
use media_date_renamer::cli::Cli;
use media_date_renamer::component::DateRenamer;
use media_date_renamer::config::Config;
use media_date_renamer::init;
use media_date_renamer::signal::setup_shutdown_signal;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init::init();
    let shutdown_signal = setup_shutdown_signal()?;

    let config = Config::new()?.with_extension_overrides(&cli.extensions);
    let renamer = DateRenamer::new(config, shutdown_signal);

    let summary = renamer.run(cli.directory).inspect_err(|e| warn!("Program error: {e:#}"))?;
    info!(
        "Run finished (renamed {}, skipped {}, conflicts {}, failed {})",
        summary.renamed, summary.skipped, summary.conflicts, summary.failed
    );

    summary.ensure_complete()
}
