mod analysis;
mod config;
mod data;
mod loader;
mod output;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{debug, info, warn};

use analysis::{annotate_clusters, project, summarize};
use config::AppConfig;
use output::{export_csv, print_report};

fn main() -> Result<()> {
    env_logger::init();
    let config = AppConfig::parse();
    run(&config)
}

fn run(config: &AppConfig) -> Result<()> {
    let swings = config.resolve_swings()?;
    for swing in swings.iter().filter(|swing| !swing.has_price()) {
        warn!("{} has no price and will be skipped", swing.name);
    }

    let angles = config.selected_angles();
    if angles.is_empty() {
        bail!("please select at least one angle");
    }
    debug!(
        "projecting {} swings across angles {:?} (window +/-{} days)",
        swings.len(),
        angles,
        config.cluster_window
    );

    let projections = project(&swings, &angles).context("failed to project cycle dates")?;
    debug!("projected {} cycle dates", projections.len());

    let rows = annotate_clusters(&projections, config.cluster_window);
    let summary = summarize(&rows, &swings, angles.len());
    debug!(
        "{} of {} projections fall inside a cluster",
        summary.clustered, summary.projections
    );

    print_report(&rows, &summary, config.cluster_window, usize::from(config.max_rows));

    if let Some(path) = &config.csv_path {
        export_csv(path, &rows)?;
        info!("wrote {} cycle rows to {:?}", rows.len(), path);
    }

    Ok(())
}
