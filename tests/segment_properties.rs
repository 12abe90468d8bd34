use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use farechain::{
    journey::{Config, Journey, Segmenter, TapEvent, WindowAnchor},
    shared::Coordinate,
};
use proptest::prelude::*;

fn base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2019, 4, 3)
        .unwrap()
        .and_hms_opt(5, 0, 0)
        .unwrap()
}

/// One tap per offset, each with a unique line code so the output can be
/// matched back to the input.
fn taps(offsets: &[i64]) -> Vec<TapEvent> {
    offsets
        .iter()
        .enumerate()
        .map(|(i, minutes)| TapEvent {
            timestamp: base() + TimeDelta::minutes(*minutes),
            line_code: format!("L{i}").into(),
            coordinate: Coordinate::new(-25.43, -49.27),
        })
        .collect()
}

fn line_codes<'a>(events: impl Iterator<Item = &'a TapEvent>) -> Vec<String> {
    let mut codes: Vec<String> = events.map(|event| event.line_code.to_string()).collect();
    codes.sort();
    codes
}

// Offsets are multiples of five minutes so gaps of exactly one window are common.
fn arb_offsets() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec((0i64..200).prop_map(|step| step * 5), 1..40)
}

fn arb_config() -> impl Strategy<Value = Config> {
    (1usize..6, 1i64..30).prop_map(|(max_legs, window_steps)| Config {
        window: TimeDelta::minutes(window_steps * 5),
        max_legs,
        anchor: WindowAnchor::FirstLeg,
    })
}

proptest! {
    /// Property: every tap ends up in exactly one journey.
    #[test]
    fn partitions_taps(offsets in arb_offsets(), config in arb_config()) {
        let events = taps(&offsets);
        let expected = line_codes(events.iter());
        let journeys = Segmenter::new(config).unwrap().segment("A".into(), events).unwrap();
        let actual = line_codes(journeys.iter().flat_map(|journey| journey.legs()));
        prop_assert_eq!(actual, expected);
    }

    /// Property: legs and journeys come out in chronological order.
    #[test]
    fn chronological(offsets in arb_offsets(), config in arb_config()) {
        let journeys = Segmenter::new(config).unwrap().segment("A".into(), taps(&offsets)).unwrap();
        for journey in &journeys {
            prop_assert!(journey.legs().windows(2).all(|pair| pair[0].timestamp <= pair[1].timestamp));
        }
        prop_assert!(journeys.windows(2).all(|pair| pair[0].departure() <= pair[1].departure()));
    }

    /// Property: leg count stays within 1..=max_legs.
    #[test]
    fn respects_leg_cap(offsets in arb_offsets(), config in arb_config()) {
        let journeys = Segmenter::new(config).unwrap().segment("A".into(), taps(&offsets)).unwrap();
        for journey in &journeys {
            prop_assert!(journey.leg_count() >= 1);
            prop_assert!(journey.leg_count() <= config.max_legs);
        }
    }

    /// Property: every leg is strictly inside the window of its first leg.
    #[test]
    fn respects_window(offsets in arb_offsets(), config in arb_config()) {
        let journeys = Segmenter::new(config).unwrap().segment("A".into(), taps(&offsets)).unwrap();
        for journey in &journeys {
            for leg in &journey.legs()[1..] {
                prop_assert!(leg.timestamp - journey.departure() < config.window);
            }
        }
    }

    /// Property: a journey only starts when the previous one was full or the
    /// new tap fell outside its window.
    #[test]
    fn journeys_are_maximal(offsets in arb_offsets(), config in arb_config()) {
        let journeys = Segmenter::new(config).unwrap().segment("A".into(), taps(&offsets)).unwrap();
        for pair in journeys.windows(2) {
            let (previous, next) = (&pair[0], &pair[1]);
            prop_assert!(
                previous.leg_count() == config.max_legs
                    || next.departure() - previous.departure() >= config.window
            );
        }
    }

    /// Property: segmenting the flattened output again gives the same journeys.
    #[test]
    fn resegmenting_is_idempotent(offsets in arb_offsets(), config in arb_config()) {
        let segmenter = Segmenter::new(config).unwrap();
        let journeys = segmenter.segment("A".into(), taps(&offsets)).unwrap();
        let flattened: Vec<TapEvent> = journeys.iter().cloned().flat_map(Journey::into_legs).collect();
        let again = segmenter.segment("A".into(), flattened).unwrap();
        prop_assert_eq!(again, journeys);
    }

    /// Property: the rolling anchor never produces more journeys than the fixed one.
    #[test]
    fn rolling_anchor_merges_at_least_as_much(offsets in arb_offsets(), config in arb_config()) {
        let fixed = Segmenter::new(config).unwrap().segment("A".into(), taps(&offsets)).unwrap();
        let rolling = Segmenter::new(Config { anchor: WindowAnchor::LastLeg, ..config })
            .unwrap()
            .segment("A".into(), taps(&offsets))
            .unwrap();
        prop_assert!(rolling.len() <= fixed.len());
    }
}
