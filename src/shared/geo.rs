use std::fmt::Display;

/// A boarding location in WGS84 degrees.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}, {}", self.latitude, self.longitude))
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(value: Coordinate) -> Self {
        (value.latitude, value.longitude)
    }
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Parses a single degree value. Exports from Brazilian systems often use a
/// decimal comma, so both `-25.43` and `-25,43` are accepted.
pub fn parse_degrees(value: &str) -> Option<f64> {
    let value = value.trim();
    let degrees: f64 = if value.contains(',') {
        value.replace(',', ".").parse().ok()?
    } else {
        value.parse().ok()?
    };
    degrees.is_finite().then_some(degrees)
}

#[test]
fn parse_degrees_dot() {
    assert_eq!(parse_degrees("-25.4284"), Some(-25.4284));
}

#[test]
fn parse_degrees_comma() {
    assert_eq!(parse_degrees(" -49,2733 "), Some(-49.2733));
}

#[test]
fn parse_degrees_rejects_garbage() {
    assert!(parse_degrees("").is_none());
    assert!(parse_degrees("north").is_none());
    assert!(parse_degrees("1,2,3").is_none());
}

#[test]
fn parse_degrees_rejects_non_finite() {
    assert!(parse_degrees("NaN").is_none());
    assert!(parse_degrees("inf").is_none());
}

#[test]
fn coordinate_tuple_conversion() {
    let coordinate = Coordinate::from((-25.43, -49.27));
    assert_eq!(coordinate, Coordinate::new(-25.43, -49.27));
    let (lat, lon): (f64, f64) = coordinate.into();
    assert_eq!((lat, lon), (-25.43, -49.27));
}
