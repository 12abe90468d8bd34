use std::{collections::HashMap, io::Read, sync::Arc};

use crate::{
    journey::TapEvent,
    ticketing::{self, CardTap, TicketingReader},
};

type CardToTaps = HashMap<Arc<str>, Vec<TapEvent>>;

/// Taps bucketed by the card that produced them. Order inside a bucket is the
/// order of insertion.
#[derive(Debug, Clone, Default)]
pub struct Cards {
    taps: CardToTaps,
}

impl Cards {
    pub fn new() -> Self {
        Default::default()
    }

    /// Drains a ticketing export into per-card buckets.
    pub fn from_reader<R: Read>(mut reader: TicketingReader<R>) -> Result<Self, ticketing::Error> {
        let mut cards = Self::new();
        reader.stream_taps(|(_, tap)| cards.insert(tap.card_id, tap.event))?;
        Ok(cards)
    }

    pub fn insert(&mut self, card_id: Arc<str>, event: TapEvent) {
        if let Some(taps) = self.taps.get_mut(&card_id) {
            taps.push(event);
        } else {
            self.taps.insert(card_id, vec![event]);
        }
    }

    pub fn get(&self, card_id: &str) -> Option<&[TapEvent]> {
        self.taps.get(card_id).map(|taps| taps.as_slice())
    }

    /// Number of distinct cards.
    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    pub fn tap_count(&self) -> usize {
        self.taps.values().map(Vec::len).sum()
    }

    pub fn into_inner(self) -> HashMap<Arc<str>, Vec<TapEvent>> {
        self.taps
    }
}

impl FromIterator<CardTap> for Cards {
    fn from_iter<I: IntoIterator<Item = CardTap>>(iter: I) -> Self {
        let mut cards = Self::new();
        iter.into_iter()
            .for_each(|tap| cards.insert(tap.card_id, tap.event));
        cards
    }
}
