use anyhow::Result;
use farechain::journey::CardJourneys;
use std::{collections::BTreeMap, io::Write};
use tracing::info;

use crate::dto::LegDto;

pub fn write_legs<W: Write>(writer: W, cards: &[CardJourneys]) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(writer);
    let mut rows = 0;
    for card in cards {
        for (index, journey) in card.journeys.iter().enumerate() {
            for row in LegDto::from_journey(index, journey) {
                writer.serialize(row)?;
                rows += 1;
            }
        }
    }
    writer.flush()?;
    Ok(rows)
}

/// Logs how many journeys were built for every leg count.
pub fn log_summary(cards: &[CardJourneys]) {
    let mut by_leg_count: BTreeMap<usize, usize> = BTreeMap::new();
    cards
        .iter()
        .flat_map(|card| card.journeys.iter())
        .for_each(|journey| *by_leg_count.entry(journey.leg_count()).or_default() += 1);

    let journeys: usize = by_leg_count.values().sum();
    info!("Built {journeys} journeys for {} cards", cards.len());
    for (legs, count) in by_leg_count {
        info!("{count} journeys with {legs} legs");
    }
}
