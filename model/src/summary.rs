use chrono::NaiveDateTime;
use geo::Point;
use serde::{Deserialize, Serialize};

use crate::derive::geodesic_km;
use crate::{DerivedRecord, EngineConfig, Error, Result};

/// Aggregates over a whole journey, computed once from the finished records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JourneySummary {
    pub sample_count: usize,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub total_duration_minutes: f64,
    pub total_distance_km: f64,
    /// Mean of the nominal-interval segment speeds, first record included
    pub average_speed_kmh: f64,
    pub speed: SpeedPattern,
    pub rush_hour: RushHourOverlap,
    pub straight_line_km: f64,
    /// None when the route covers no distance at all
    pub efficiency: Option<RouteEfficiency>,
    pub environment: EnvironmentalImpact,
    /// Mean position, for centering a map on the route
    pub center: (f64, f64),
}

impl JourneySummary {
    pub fn new(records: &[DerivedRecord], config: &EngineConfig) -> Result<Self> {
        let (first, last) = match (records.first(), records.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(Error::EmptyJourney),
        };

        let efficiency = match route_efficiency(records, config) {
            Ok(efficiency) => Some(efficiency),
            Err(Error::DegenerateRoute) => {
                debug!("Route efficiency isn't applicable; the journey covers no distance");
                None
            }
            Err(err) => return Err(err),
        };
        let total_distance_km = last.cumulative_distance_km;
        let speed = speed_pattern(records);
        let n = records.len() as f64;

        Ok(Self {
            sample_count: records.len(),
            start: first.timestamp,
            end: last.timestamp,
            total_duration_minutes: records
                .iter()
                .map(|r| r.elapsed_minutes)
                .fold(0.0, f64::max),
            total_distance_km,
            average_speed_kmh: speed.mean_kmh,
            speed,
            rush_hour: rush_hour_overlap(records, config),
            straight_line_km: geodesic_km(first.point(), last.point()),
            efficiency,
            environment: EnvironmentalImpact::estimate(total_distance_km, config),
            center: (
                records.iter().map(|r| r.latitude).sum::<f64>() / n,
                records.iter().map(|r| r.longitude).sum::<f64>() / n,
            ),
        })
    }

    pub fn total_duration_hours(&self) -> f64 {
        self.total_duration_minutes / 60.0
    }

    pub fn center_point(&self) -> Point {
        Point::new(self.center.1, self.center.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeedPattern {
    pub mean_kmh: f64,
    /// Sample standard deviation; 0 with a single record
    pub stddev_kmh: f64,
    /// Records strictly faster than mean + stddev
    pub high_speed_segments: usize,
    /// Records strictly slower than mean - stddev
    pub low_speed_segments: usize,
}

/// A crude anomaly flag over the nominal-interval speeds. No outlier correction.
pub fn speed_pattern(records: &[DerivedRecord]) -> SpeedPattern {
    let speeds: Vec<f64> = records.iter().map(|r| r.segment_speed_kmh).collect();
    if speeds.is_empty() {
        return SpeedPattern {
            mean_kmh: 0.0,
            stddev_kmh: 0.0,
            high_speed_segments: 0,
            low_speed_segments: 0,
        };
    }

    let n = speeds.len() as f64;
    let mean = speeds.iter().sum::<f64>() / n;
    let stddev = if speeds.len() < 2 {
        0.0
    } else {
        (speeds.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
    };

    SpeedPattern {
        mean_kmh: mean,
        stddev_kmh: stddev,
        high_speed_segments: speeds.iter().filter(|s| **s > mean + stddev).count(),
        low_speed_segments: speeds.iter().filter(|s| **s < mean - stddev).count(),
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RushHourOverlap {
    pub morning: bool,
    pub evening: bool,
}

/// True per window if any record's naive local hour falls inside it.
pub fn rush_hour_overlap(records: &[DerivedRecord], config: &EngineConfig) -> RushHourOverlap {
    RushHourOverlap {
        morning: records.iter().any(|r| config.morning_rush.contains(r.hour)),
        evening: records.iter().any(|r| config.evening_rush.contains(r.hour)),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteEfficiency {
    /// Straight-line start-to-end distance over distance travelled
    pub ratio: f64,
    pub inefficient: bool,
}

pub fn route_efficiency(
    records: &[DerivedRecord],
    config: &EngineConfig,
) -> Result<RouteEfficiency> {
    let (first, last) = match (records.first(), records.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(Error::EmptyJourney),
    };
    let travelled = last.cumulative_distance_km;
    if travelled == 0.0 {
        return Err(Error::DegenerateRoute);
    }

    let ratio = geodesic_km(first.point(), last.point()) / travelled;
    Ok(RouteEfficiency {
        ratio,
        inefficient: ratio < config.efficiency_threshold,
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalImpact {
    pub fuel_liters: f64,
    pub co2_kg: f64,
}

impl EnvironmentalImpact {
    /// Linear in distance, using the configured vehicle profile.
    pub fn estimate(total_distance_km: f64, config: &EngineConfig) -> Self {
        let fuel_liters = total_distance_km * config.fuel_rate_l_per_100km / 100.0;
        Self {
            fuel_liters,
            co2_kg: fuel_liters * config.co2_per_liter_kg,
        }
    }
}
