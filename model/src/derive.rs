use chrono::{NaiveDate, NaiveDateTime, Timelike};
use geo::{Distance, Geodesic, Point};
use serde::{Deserialize, Serialize};

use crate::{EngineConfig, Error, Result, Sample};

/// A sample enriched with everything derived from it and its predecessor. Produced 1:1 with the
/// input samples, in the same order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DerivedRecord {
    pub label: String,
    pub timestamp: NaiveDateTime,
    pub latitude: f64,
    pub longitude: f64,

    pub date: NaiveDate,
    /// HH:MM:SS
    pub time_of_day: String,
    pub hour: u32,
    pub minute: u32,
    /// Since the first sample, rounded to 2 decimals
    pub elapsed_minutes: f64,

    /// From the previous record; 0 for the first
    pub segment_distance_km: f64,
    pub cumulative_distance_km: f64,
    /// Segment distance over the nominal sampling interval, NOT the real time between samples.
    /// Biased whenever the feed isn't sampled at exactly that interval.
    pub segment_speed_kmh: f64,
    /// Segment distance over the real time since the previous sample. None for the first record,
    /// and when timestamps repeat or go backwards.
    pub actual_speed_kmh: Option<f64>,
}

impl DerivedRecord {
    pub fn point(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }
}

/// Great-circle distance on the WGS84 ellipsoid.
pub fn geodesic_km(from: Point, to: Point) -> f64 {
    if from == to {
        return 0.0;
    }
    Geodesic.distance(from, to) / 1000.0
}

/// Derives per-segment distance and speed over the samples in one left-to-right pass.
pub fn derive(samples: &[Sample], config: &EngineConfig) -> Result<Vec<DerivedRecord>> {
    config.validate()?;
    let start = samples.first().ok_or(Error::EmptyJourney)?.timestamp;
    let interval_hours = config.interval_hours();

    let records: Vec<DerivedRecord> = samples
        .iter()
        .scan(None::<(&Sample, f64)>, |prev, sample| {
            let (segment_distance_km, actual_speed_kmh, cumulative_distance_km) = match *prev {
                None => (0.0, None, 0.0),
                Some((last, cumulative)) => {
                    let dist = geodesic_km(last.point(), sample.point());
                    let hours = hours_between(last.timestamp, sample.timestamp);
                    let actual = (hours > 0.0).then(|| dist / hours);
                    (dist, actual, cumulative + dist)
                }
            };
            *prev = Some((sample, cumulative_distance_km));

            let elapsed = hours_between(start, sample.timestamp) * 60.0;
            Some(DerivedRecord {
                label: sample.label.clone(),
                timestamp: sample.timestamp,
                latitude: sample.latitude,
                longitude: sample.longitude,
                date: sample.timestamp.date(),
                time_of_day: sample.timestamp.format("%H:%M:%S").to_string(),
                hour: sample.timestamp.hour(),
                minute: sample.timestamp.minute(),
                elapsed_minutes: (elapsed * 100.0).round() / 100.0,
                segment_distance_km,
                cumulative_distance_km,
                segment_speed_kmh: segment_distance_km / interval_hours,
                actual_speed_kmh,
            })
        })
        .collect();

    debug!(
        "Derived {} records covering {:.3} km",
        records.len(),
        records.last().map_or(0.0, |r| r.cumulative_distance_km)
    );
    Ok(records)
}

fn hours_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    let delta = to - from;
    match delta.num_microseconds() {
        Some(us) => us as f64 / 3_600_000_000.0,
        // Only overflows past ~290,000 years
        None => delta.num_seconds() as f64 / 3600.0,
    }
}
