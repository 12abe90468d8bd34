pub mod cards;
pub mod journey;
pub mod shared;
pub mod ticketing;

pub mod prelude {
    pub use crate::cards::Cards;
    pub use crate::journey::{CardJourneys, Journey, Segmenter, TapEvent, WindowAnchor};
    pub use crate::shared::{Coordinate, DateOrder};
    pub use crate::ticketing::{CardTap, TicketingReader};
}
