use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Knobs for the derivation engine. Every field has a default, so a partial JSON file is fine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Speeds divide segment distance by this fixed interval, not by the real time between
    /// samples. If the feed isn't sampled at exactly this rate, speeds are biased accordingly.
    pub nominal_interval_minutes: f64,
    pub fuel_rate_l_per_100km: f64,
    pub co2_per_liter_kg: f64,
    /// Routes with straight-line / travelled distance strictly below this are inefficient.
    pub efficiency_threshold: f64,
    pub morning_rush: HourWindow,
    pub evening_rush: HourWindow,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            nominal_interval_minutes: 10.0,
            fuel_rate_l_per_100km: 8.0,
            co2_per_liter_kg: 2.31,
            efficiency_threshold: 0.8,
            morning_rush: HourWindow { start: 7, end: 9 },
            evening_rush: HourWindow { start: 16, end: 18 },
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        // Written to also catch NaN
        if !(self.nominal_interval_minutes > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "nominal_interval_minutes must be positive, not {}",
                self.nominal_interval_minutes
            )));
        }
        if !(self.fuel_rate_l_per_100km >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "fuel_rate_l_per_100km must be non-negative, not {}",
                self.fuel_rate_l_per_100km
            )));
        }
        if !(self.co2_per_liter_kg >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "co2_per_liter_kg must be non-negative, not {}",
                self.co2_per_liter_kg
            )));
        }
        if !(self.efficiency_threshold > 0.0 && self.efficiency_threshold <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "efficiency_threshold must be in (0, 1], not {}",
                self.efficiency_threshold
            )));
        }
        for (name, window) in [
            ("morning_rush", &self.morning_rush),
            ("evening_rush", &self.evening_rush),
        ] {
            if window.start > window.end || window.end > 23 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be an hour range within 0..=23, not {}..={}",
                    window.start, window.end
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn interval_hours(&self) -> f64 {
        self.nominal_interval_minutes / 60.0
    }
}

/// An inclusive range of hours of the day, read from naive local timestamps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourWindow {
    pub start: u32,
    pub end: u32,
}

impl HourWindow {
    pub fn contains(&self, hour: u32) -> bool {
        self.hours().contains(&hour)
    }

    pub fn hours(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }
}
