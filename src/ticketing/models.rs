use std::sync::Arc;

use crate::journey::TapEvent;

/// One decoded row of a ticketing export.
#[derive(Debug, Clone)]
pub struct CardTap {
    pub card_id: Arc<str>,
    pub event: TapEvent,
}

/// Header positions of the columns the loader reads.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Columns {
    pub card: usize,
    pub timestamp: usize,
    pub line: usize,
    pub latitude: usize,
    pub longitude: usize,
}
