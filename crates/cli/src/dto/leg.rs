use farechain::{journey::Journey, shared::to_iso_string};
use serde::Serialize;

/// One output row per leg, repeating the journey it belongs to.
#[derive(Clone, Debug, Serialize)]
pub struct LegDto<'a> {
    pub card_id: &'a str,
    pub journey: usize,
    pub leg: usize,
    pub legs: usize,
    pub timestamp: String,
    pub line_code: &'a str,
    pub latitude: f64,
    pub longitude: f64,
}

impl<'a> LegDto<'a> {
    pub fn from_journey(index: usize, journey: &'a Journey) -> impl Iterator<Item = Self> + 'a {
        journey
            .legs()
            .iter()
            .enumerate()
            .map(move |(leg, event)| Self {
                card_id: journey.card_id(),
                journey: index,
                leg,
                legs: journey.leg_count(),
                timestamp: to_iso_string(&event.timestamp),
                line_code: &event.line_code,
                latitude: event.coordinate.latitude,
                longitude: event.coordinate.longitude,
            })
    }
}
