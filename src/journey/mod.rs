use chrono::{NaiveDateTime, TimeDelta};
use rayon::prelude::*;
use std::{mem, sync::Arc, time::Instant};
use thiserror::Error;
use tracing::debug;

mod config;
pub use config::*;

use crate::{cards::Cards, shared::Coordinate};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Card {0} has no taps to segment")]
    EmptyCard(Arc<str>),
    #[error("A journey must allow at least one leg")]
    InvalidLegCap,
    #[error("The chaining window must be positive")]
    InvalidWindow,
}

/// A single fare-card scan.
#[derive(Debug, Clone, PartialEq)]
pub struct TapEvent {
    pub timestamp: NaiveDateTime,
    /// The bus line boarded, as written in the export.
    pub line_code: Arc<str>,
    pub coordinate: Coordinate,
}

/// Consecutive boardings of one card chained into a single fare-integrated trip.
///
/// Legs are never empty and are ordered by timestamp. Only the [`Segmenter`]
/// builds journeys, so a journey handed out is closed for good.
#[derive(Debug, Clone, PartialEq)]
pub struct Journey {
    card_id: Arc<str>,
    legs: Vec<TapEvent>,
}

impl Journey {
    fn new(card_id: Arc<str>, first: TapEvent) -> Self {
        Self {
            card_id,
            legs: vec![first],
        }
    }

    pub fn card_id(&self) -> &Arc<str> {
        &self.card_id
    }

    pub fn legs(&self) -> &[TapEvent] {
        &self.legs
    }

    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    pub fn first(&self) -> &TapEvent {
        &self.legs[0]
    }

    pub fn last(&self) -> &TapEvent {
        &self.legs[self.legs.len() - 1]
    }

    pub fn departure(&self) -> NaiveDateTime {
        self.first().timestamp
    }

    /// Time between the first and the last boarding.
    pub fn span(&self) -> TimeDelta {
        self.last().timestamp - self.first().timestamp
    }

    pub fn into_legs(self) -> Vec<TapEvent> {
        self.legs
    }
}

/// Every journey of one card, in chronological order.
#[derive(Debug, Clone)]
pub struct CardJourneys {
    pub card_id: Arc<str>,
    pub journeys: Vec<Journey>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Segmenter {
    config: Config,
}

impl Segmenter {
    pub fn new(config: self::Config) -> Result<Self, self::Error> {
        if config.max_legs == 0 {
            return Err(self::Error::InvalidLegCap);
        }
        if config.window <= TimeDelta::zero() {
            return Err(self::Error::InvalidWindow);
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &self::Config {
        &self.config
    }

    /// Splits the taps of one card into journeys.
    ///
    /// Taps are stably sorted by timestamp first, so simultaneous taps keep
    /// their input order. Each tap either joins the open journey, when
    /// [`Config::admits`] allows it, or closes it and opens the next one.
    pub fn segment(
        &self,
        card_id: Arc<str>,
        mut events: Vec<TapEvent>,
    ) -> Result<Vec<Journey>, self::Error> {
        events.sort_by_key(|event| event.timestamp);
        let mut events = events.into_iter();
        let Some(first) = events.next() else {
            return Err(self::Error::EmptyCard(card_id));
        };

        let mut journeys = Vec::new();
        let mut current = Journey::new(card_id.clone(), first);
        for event in events {
            if self.config.admits(&current, &event) {
                current.legs.push(event);
            } else {
                let next = Journey::new(card_id.clone(), event);
                journeys.push(mem::replace(&mut current, next));
            }
        }
        journeys.push(current);
        Ok(journeys)
    }

    /// Segments every card in parallel. Cards never influence each other, the
    /// result is ordered by card id.
    pub fn segment_cards(&self, cards: Cards) -> Result<Vec<CardJourneys>, self::Error> {
        debug!("Segmenting {} cards...", cards.len());
        let now = Instant::now();
        let mut segmented = cards
            .into_inner()
            .into_par_iter()
            .map(|(card_id, events)| {
                let journeys = self.segment(card_id.clone(), events)?;
                Ok(CardJourneys { card_id, journeys })
            })
            .collect::<Result<Vec<_>, self::Error>>()?;
        segmented.par_sort_unstable_by(|a, b| a.card_id.cmp(&b.card_id));
        debug!("Segmenting cards took {:?}", now.elapsed());
        Ok(segmented)
    }

    /// Same as [`Segmenter::segment_cards`] with the per-card grouping flattened.
    pub fn segment_flat(&self, cards: Cards) -> Result<Vec<Journey>, self::Error> {
        Ok(self
            .segment_cards(cards)?
            .into_iter()
            .flat_map(|card| card.journeys)
            .collect())
    }
}
