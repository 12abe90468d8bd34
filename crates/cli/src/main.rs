mod args;
mod dto;
mod report;

use crate::args::Args;
use anyhow::{Context, Result};
use clap::Parser;
use farechain::{cards::Cards, journey::Segmenter, ticketing::TicketingReader};
use std::{fs::File, io, time::Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let segmenter = Segmenter::new(args.journey_config()?)?;
    let config = segmenter.config();
    info!(
        "Chaining up to {} legs within {} minutes, anchored at {:?}",
        config.max_legs,
        config.window.num_minutes(),
        config.anchor
    );

    info!("Loading taps from {}...", args.bil_path.display());
    let now = Instant::now();
    let reader = TicketingReader::from_path(&args.bil_path, args.ticketing_config()?)
        .with_context(|| format!("failed to open {}", args.bil_path.display()))?;
    let cards = Cards::from_reader(reader)
        .with_context(|| format!("failed to read {}", args.bil_path.display()))?;
    info!(
        "Loaded {} taps for {} cards in {:?}",
        cards.tap_count(),
        cards.len(),
        now.elapsed()
    );
    if cards.is_empty() {
        warn!("{} contains no taps", args.bil_path.display());
    }

    let now = Instant::now();
    let segmented = segmenter.segment_cards(cards)?;
    info!("Segmenting took {:?}", now.elapsed());
    report::log_summary(&segmented);

    let rows = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            report::write_legs(file, &segmented)?
        }
        None => report::write_legs(io::stdout().lock(), &segmented)?,
    };
    info!("Wrote {rows} legs");
    Ok(())
}
