use csv::{StringRecord, Trim};
use std::{
    collections::HashSet,
    fs::File,
    io::{self, Read},
    path::Path,
    sync::Arc,
    time::Instant,
};
use thiserror::Error;
use tracing::debug;

mod config;
pub mod models;
pub use config::*;
pub use models::*;

use crate::{
    journey::TapEvent,
    shared::{Coordinate, parse_degrees, parse_timestamp},
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Ticketing export is missing column {0}")]
    MissingColumn(String),
    #[error("Row {row} has no value for column {column}")]
    MissingField { row: usize, column: String },
    #[error("Row {row} has an empty value for column {column}")]
    EmptyField { row: usize, column: String },
    #[error("Row {row} has an invalid timestamp: {value}")]
    InvalidTimestamp { row: usize, value: String },
    #[error("Row {row} has an invalid coordinate: {value}")]
    InvalidCoordinate { row: usize, value: String },
}

/// Streams typed taps out of a ticketing export.
///
/// Every row must decode; the first bad row aborts the stream with an error
/// naming the 1-based data row.
pub struct TicketingReader<R> {
    config: Config,
    reader: csv::Reader<R>,
    columns: Columns,
    card_lookup: HashSet<Arc<str>>,
    line_lookup: HashSet<Arc<str>>,
}

impl TicketingReader<File> {
    pub fn from_path<P: AsRef<Path>>(path: P, config: self::Config) -> Result<Self, self::Error> {
        let file = File::open(path)?;
        Self::from_reader(file, config)
    }
}

impl<R: Read> TicketingReader<R> {
    pub fn from_reader(reader: R, config: self::Config) -> Result<Self, self::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(config.delimiter)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);
        let columns = resolve_columns(reader.headers()?, &config)?;
        Ok(Self {
            config,
            reader,
            columns,
            card_lookup: HashSet::new(),
            line_lookup: HashSet::new(),
        })
    }

    /// Decodes every remaining row and hands it to `f` together with its
    /// zero-based index. Returns the number of taps produced.
    pub fn stream_taps<F>(&mut self, mut f: F) -> Result<usize, self::Error>
    where
        F: FnMut((usize, CardTap)),
    {
        debug!("Loading taps...");
        let now = Instant::now();
        let mut record = StringRecord::new();
        let mut count = 0;
        while self.reader.read_record(&mut record)? {
            let tap = self.decode(count + 1, &record)?;
            f((count, tap));
            count += 1;
        }
        debug!("Loading {count} taps took {:?}", now.elapsed());
        Ok(count)
    }

    pub fn read_all(mut self) -> Result<Vec<CardTap>, self::Error> {
        let mut taps = Vec::new();
        self.stream_taps(|(_, tap)| taps.push(tap))?;
        Ok(taps)
    }

    fn decode(&mut self, row: usize, record: &StringRecord) -> Result<CardTap, self::Error> {
        let card_id = field(record, self.columns.card, &self.config.card_column, row)?;
        let timestamp = field(
            record,
            self.columns.timestamp,
            &self.config.timestamp_column,
            row,
        )?;
        let line_code = field(record, self.columns.line, &self.config.line_column, row)?;
        let latitude = field(
            record,
            self.columns.latitude,
            &self.config.latitude_column,
            row,
        )?;
        let longitude = field(
            record,
            self.columns.longitude,
            &self.config.longitude_column,
            row,
        )?;

        let timestamp = parse_timestamp(timestamp, self.config.date_order).ok_or_else(|| {
            self::Error::InvalidTimestamp {
                row,
                value: timestamp.to_string(),
            }
        })?;
        let coordinate = Coordinate::new(degrees(latitude, row)?, degrees(longitude, row)?);

        Ok(CardTap {
            card_id: intern(&mut self.card_lookup, card_id),
            event: TapEvent {
                timestamp,
                line_code: intern(&mut self.line_lookup, line_code),
                coordinate,
            },
        })
    }
}

fn resolve_columns(headers: &StringRecord, config: &self::Config) -> Result<Columns, self::Error> {
    let position = |name: &str| {
        headers
            .iter()
            .position(|header| header == name)
            .ok_or(self::Error::MissingColumn(name.to_string()))
    };
    Ok(Columns {
        card: position(&config.card_column)?,
        timestamp: position(&config.timestamp_column)?,
        line: position(&config.line_column)?,
        latitude: position(&config.latitude_column)?,
        longitude: position(&config.longitude_column)?,
    })
}

fn field<'a>(
    record: &'a StringRecord,
    index: usize,
    column: &str,
    row: usize,
) -> Result<&'a str, self::Error> {
    match record.get(index) {
        None => Err(self::Error::MissingField {
            row,
            column: column.to_string(),
        }),
        Some("") => Err(self::Error::EmptyField {
            row,
            column: column.to_string(),
        }),
        Some(value) => Ok(value),
    }
}

fn degrees(value: &str, row: usize) -> Result<f64, self::Error> {
    parse_degrees(value).ok_or_else(|| self::Error::InvalidCoordinate {
        row,
        value: value.to_string(),
    })
}

fn intern(lookup: &mut HashSet<Arc<str>>, value: &str) -> Arc<str> {
    if let Some(id) = lookup.get(value) {
        id.clone()
    } else {
        let id: Arc<str> = value.into();
        lookup.insert(id.clone());
        id
    }
}
