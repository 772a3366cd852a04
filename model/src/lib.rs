//! Turns the raw GPS trace of one vehicle journey into per-segment distance and speed, plus a
//! handful of summaries: speed anomalies, rush-hour overlap, route efficiency, and a rough
//! environmental estimate. Everything here is pure; reading files and drawing maps is up to the
//! caller.

#[macro_use]
extern crate log;

mod config;
mod derive;
mod error;
pub mod export;
mod feed;
mod summary;

use serde::Serialize;

pub use self::config::{EngineConfig, HourWindow};
pub use self::derive::{derive, geodesic_km, DerivedRecord};
pub use self::error::{Error, Result};
pub use self::feed::{parse, parse_with_mode, ParseMode, ParseReport, Sample};
pub use self::summary::{
    route_efficiency, rush_hour_overlap, speed_pattern, EnvironmentalImpact, JourneySummary,
    RouteEfficiency, RushHourOverlap, SpeedPattern,
};

#[derive(Clone, Debug, Serialize)]
pub struct Journey {
    pub config: EngineConfig,
    pub records: Vec<DerivedRecord>,
    pub summary: JourneySummary,
    /// Lines dropped by a lenient parse
    #[serde(skip)]
    pub skipped: Vec<Error>,
}

impl Journey {
    /// Strictly parses the raw text, then derives everything from it.
    pub fn analyze(raw: &str, config: &EngineConfig) -> Result<Self> {
        Self::analyze_with_mode(raw, config, ParseMode::Strict)
    }

    pub fn analyze_with_mode(raw: &str, config: &EngineConfig, mode: ParseMode) -> Result<Self> {
        config.validate()?;
        let report = parse_with_mode(raw, mode)?;
        let mut journey = Self::from_samples(&report.samples, config)?;
        journey.skipped = report.skipped;
        Ok(journey)
    }

    pub fn from_samples(samples: &[Sample], config: &EngineConfig) -> Result<Self> {
        let records = derive(samples, config)?;
        let summary = JourneySummary::new(&records, config)?;
        Ok(Self {
            config: config.clone(),
            records,
            summary,
            skipped: Vec::new(),
        })
    }

    /// Fails with `Error::DegenerateRoute` when the journey covers no distance.
    pub fn route_efficiency(&self) -> Result<RouteEfficiency> {
        route_efficiency(&self.records, &self.config)
    }
}
