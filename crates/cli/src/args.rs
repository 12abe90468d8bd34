use anyhow::{Context, Result, ensure};
use clap::{Parser, ValueEnum};
use farechain::{
    journey::{self, WindowAnchor},
    shared::{self, DateOrder},
    ticketing,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "farechain",
    about = "Rebuilds fare-integrated bus journeys from a ticketing export"
)]
pub struct Args {
    /// Path to a bilhetagem CSV file.
    #[arg(long = "bil-path", alias = "bil_path")]
    pub bil_path: PathBuf,
    /// Where to write one CSV row per leg. Defaults to stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = DateOrderArg::DayFirst)]
    pub date_order: DateOrderArg,
    /// Taps closer than this to the anchor leg are chained into one journey.
    #[arg(long, default_value_t = 120)]
    pub window_minutes: i64,
    #[arg(long, default_value_t = 4)]
    pub max_legs: usize,
    #[arg(long, value_enum, default_value_t = AnchorArg::First)]
    pub anchor: AnchorArg,
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum DateOrderArg {
    DayFirst,
    MonthFirst,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum AnchorArg {
    /// Measure the window from the first leg of the journey.
    First,
    /// Measure the window from the latest leg of the journey.
    Last,
}

impl Args {
    pub fn ticketing_config(&self) -> Result<ticketing::Config> {
        ensure!(
            self.delimiter.is_ascii(),
            "delimiter must be a single ASCII character, got {:?}",
            self.delimiter
        );
        let date_order = match self.date_order {
            DateOrderArg::DayFirst => DateOrder::DayFirst,
            DateOrderArg::MonthFirst => DateOrder::MonthFirst,
        };
        Ok(ticketing::Config {
            delimiter: self.delimiter as u8,
            date_order,
            ..Default::default()
        })
    }

    pub fn journey_config(&self) -> Result<journey::Config> {
        let window = shared::minutes(self.window_minutes)
            .with_context(|| format!("window of {} minutes is out of range", self.window_minutes))?;
        let anchor = match self.anchor {
            AnchorArg::First => WindowAnchor::FirstLeg,
            AnchorArg::Last => WindowAnchor::LastLeg,
        };
        Ok(journey::Config {
            window,
            max_legs: self.max_legs,
            anchor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_underscore_path_flag() {
        let args = Args::try_parse_from(["farechain", "--bil_path", "bilhetagem.csv"]).unwrap();
        assert_eq!(args.bil_path, PathBuf::from("bilhetagem.csv"));
    }

    #[test]
    fn defaults_match_fare_rules() {
        let args = Args::try_parse_from(["farechain", "--bil-path", "bilhetagem.csv"]).unwrap();
        assert_eq!(args.journey_config().unwrap(), journey::Config::default());
        assert_eq!(args.ticketing_config().unwrap().delimiter, b',');
    }

    #[test]
    fn rejects_non_ascii_delimiter() {
        let args = Args::try_parse_from([
            "farechain",
            "--bil-path",
            "bilhetagem.csv",
            "--delimiter",
            "§",
        ])
        .unwrap();
        assert!(args.ticketing_config().is_err());
    }
}
