use chrono::TimeDelta;

use crate::journey::{Journey, TapEvent};

/// Which leg of the open journey the window is measured from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WindowAnchor {
    /// The window starts at the first tap and is never refreshed.
    #[default]
    FirstLeg,
    /// The window restarts at every appended tap.
    LastLeg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Taps strictly closer than this to the anchor may join the journey.
    pub window: TimeDelta,
    /// Maximum number of legs in one journey.
    pub max_legs: usize,
    pub anchor: WindowAnchor,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: TimeDelta::hours(2),
            max_legs: 4,
            anchor: WindowAnchor::FirstLeg,
        }
    }
}

impl Config {
    /// Decides whether `event` extends the open `journey` or starts a new one.
    /// `event` must not be earlier than any leg already in the journey.
    pub fn admits(&self, journey: &Journey, event: &TapEvent) -> bool {
        if journey.leg_count() >= self.max_legs {
            return false;
        }
        let anchor = match self.anchor {
            WindowAnchor::FirstLeg => journey.first(),
            WindowAnchor::LastLeg => journey.last(),
        };
        event.timestamp - anchor.timestamp < self.window
    }
}
