use chrono::NaiveDateTime;
use geo::Point;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// One raw GPS reading.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// The first field of the line, kept around for display only
    pub label: String,
    pub timestamp: NaiveDateTime,
    pub latitude: f64,
    pub longitude: f64,
}

impl Sample {
    pub fn point(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// The first malformed line aborts the whole parse
    #[default]
    Strict,
    /// Malformed lines are logged and skipped
    Lenient,
}

#[derive(Debug)]
pub struct ParseReport {
    pub samples: Vec<Sample>,
    /// Only ever filled out in lenient mode
    pub skipped: Vec<Error>,
}

/// Parses tab-separated `label, timestamp, latitude, longitude` lines, failing on the first
/// malformed one. Input order is preserved; nothing is re-sorted or range-checked.
pub fn parse(raw: &str) -> Result<Vec<Sample>> {
    Ok(parse_with_mode(raw, ParseMode::Strict)?.samples)
}

pub fn parse_with_mode(raw: &str, mode: ParseMode) -> Result<ParseReport> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(raw.as_bytes());

    let mut samples = Vec::new();
    let mut skipped = Vec::new();
    for rec in reader.records() {
        let result = match rec {
            Ok(rec) => {
                // csv already drops truly empty lines, but not whitespace-only ones
                if rec.len() == 1 && rec[0].trim().is_empty() {
                    continue;
                }
                parse_record(&rec)
            }
            Err(err) => {
                let line = err.position().map(|pos| pos.line() as usize).unwrap_or(0);
                Err(Error::malformed(line, err.to_string()))
            }
        };

        match (result, mode) {
            (Ok(sample), _) => samples.push(sample),
            (Err(err), ParseMode::Strict) => return Err(err),
            (Err(err), ParseMode::Lenient) => {
                warn!("Skipping {err}");
                skipped.push(err);
            }
        }
    }

    if samples.is_empty() {
        return Err(Error::EmptyJourney);
    }
    for pair in samples.windows(2) {
        if pair[0].timestamp > pair[1].timestamp {
            // Kept as-is; elapsed time will go backwards here
            warn!(
                "Samples out-of-order: {} then {}",
                pair[0].timestamp, pair[1].timestamp
            );
        }
    }
    info!(
        "Parsed {} samples ({} lines skipped)",
        samples.len(),
        skipped.len()
    );

    Ok(ParseReport { samples, skipped })
}

fn parse_record(rec: &csv::StringRecord) -> Result<Sample> {
    let line = rec.position().map(|pos| pos.line() as usize).unwrap_or(0);
    if rec.len() < 4 {
        return Err(Error::malformed(
            line,
            format!("expected at least 4 tab-separated fields, found {}", rec.len()),
        ));
    }

    let timestamp = parse_timestamp(&rec[1]).ok_or_else(|| {
        Error::malformed(
            line,
            format!("timestamp {:?} isn't YYYY-MM-DD HH:MM:SS.ffffff", &rec[1]),
        )
    })?;
    let latitude = parse_degrees(&rec[2], "latitude", line)?;
    let longitude = parse_degrees(&rec[3], "longitude", line)?;

    Ok(Sample {
        label: rec[0].trim().to_string(),
        timestamp,
        latitude,
        longitude,
    })
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    // chrono tolerates unpadded and space-padded fields; this format is fixed, so the parsed
    // value has to print back to exactly the same text
    let timestamp = NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).ok()?;
    (timestamp.format(TIMESTAMP_FORMAT).to_string() == raw).then_some(timestamp)
}

fn parse_degrees(raw: &str, name: &str, line: usize) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|err| Error::malformed(line, format!("{name} {raw:?}: {err}")))
}
