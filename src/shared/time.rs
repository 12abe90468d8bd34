use chrono::{NaiveDateTime, TimeDelta};

/// Field order of the calendar date inside a ticketing timestamp.
///
/// Exports write `DD/MM/YYYY HH:MM:SS`, but some extracts have been seen with
/// the day and month swapped. The order has to be decided before segmenting
/// since it changes which taps are adjacent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateOrder {
    #[default]
    DayFirst,
    MonthFirst,
}

impl DateOrder {
    pub const fn format(&self) -> &'static str {
        match self {
            DateOrder::DayFirst => "%d/%m/%Y %H:%M:%S",
            DateOrder::MonthFirst => "%m/%d/%Y %H:%M:%S",
        }
    }
}

pub fn parse_timestamp(value: &str, order: DateOrder) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), order.format()).ok()
}

pub fn to_iso_string(timestamp: &NaiveDateTime) -> String {
    timestamp.format("%Y-%m-%dT%H:%M:%S").to_string()
}

pub fn minutes(minutes: i64) -> Option<TimeDelta> {
    TimeDelta::try_minutes(minutes)
}

#[test]
fn day_first_test_1() {
    let timestamp = parse_timestamp("03/04/2019 09:10:00", DateOrder::DayFirst).unwrap();
    assert_eq!(to_iso_string(&timestamp), "2019-04-03T09:10:00");
}

#[test]
fn day_first_test_2() {
    let timestamp = parse_timestamp(" 31/12/2019 23:59:59 ", DateOrder::DayFirst).unwrap();
    assert_eq!(to_iso_string(&timestamp), "2019-12-31T23:59:59");
}

#[test]
fn month_first_test_1() {
    let timestamp = parse_timestamp("03/04/2019 09:10:00", DateOrder::MonthFirst).unwrap();
    assert_eq!(to_iso_string(&timestamp), "2019-03-04T09:10:00");
}

#[test]
fn invalid_timestamp_test_1() {
    assert!(parse_timestamp("31/12/2019 23:59:59", DateOrder::MonthFirst).is_none());
}

#[test]
fn invalid_timestamp_test_2() {
    assert!(parse_timestamp("03/04/2019", DateOrder::DayFirst).is_none());
}

#[test]
fn invalid_timestamp_test_3() {
    assert!(parse_timestamp("03/04/2019 25:00:00", DateOrder::DayFirst).is_none());
}

#[test]
fn minutes_test() {
    assert_eq!(minutes(120), Some(TimeDelta::hours(2)));
}
