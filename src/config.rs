//! Engine configuration: campaign timezone and business-hour bounds.
//!
//! Every campaign is scheduled on the wall clock of a single timezone (the
//! property's local time). The rolling-cursor placement rule works inside
//! the `[open_hour, close_hour]` window; fixed-hour events (dusk shoots,
//! open homes) carry their own hours and are not bounded by it.

use std::env;

use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Australia::Sydney;
pub const DEFAULT_OPEN_HOUR: f64 = 6.0;
pub const DEFAULT_CLOSE_HOUR: f64 = 20.0;

/// Scheduling configuration for one campaign run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleConfig {
    /// Campaign timezone; all date arithmetic happens on this wall clock.
    pub timezone: Tz,
    /// First hour of day the rolling cursor may place an event at.
    pub open_hour: f64,
    /// Last hour of day an event placed by the rolling cursor may end at.
    pub close_hour: f64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE,
            open_hour: DEFAULT_OPEN_HOUR,
            close_hour: DEFAULT_CLOSE_HOUR,
        }
    }
}

#[derive(Deserialize)]
struct ConfigFile {
    timezone: Option<String>,
    open_hour: Option<f64>,
    close_hour: Option<f64>,
}

impl ScheduleConfig {
    /// Configuration for a timezone with the default business hours.
    pub fn new(timezone: Tz) -> Self {
        Self {
            timezone,
            ..Default::default()
        }
    }

    /// Check that the business-hour window is usable.
    pub fn validate(&self) -> EngineResult<()> {
        if !self.open_hour.is_finite() || !self.close_hour.is_finite() {
            return Err(EngineError::configuration(
                "business hours must be finite numbers",
            ));
        }
        if !(0.0..24.0).contains(&self.open_hour) {
            return Err(EngineError::configuration(format!(
                "open hour {} outside [0, 24)",
                self.open_hour
            )));
        }
        if self.close_hour <= self.open_hour || self.close_hour > 24.0 {
            return Err(EngineError::configuration(format!(
                "close hour {} must be after open hour {} and at most 24",
                self.close_hour, self.open_hour
            )));
        }
        Ok(())
    }

    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `CAMPAIGN_TIMEZONE` (optional, default: `Australia/Sydney`): IANA timezone name
    /// - `CAMPAIGN_OPEN_HOUR` (optional, default: 6): opening business hour
    /// - `CAMPAIGN_CLOSE_HOUR` (optional, default: 20): closing business hour
    ///
    /// # Errors
    /// Returns a configuration error if a variable is set but unparseable,
    /// or if the resulting hours fail validation.
    pub fn from_env() -> EngineResult<Self> {
        let timezone = match env::var("CAMPAIGN_TIMEZONE") {
            Ok(name) => parse_timezone(&name)?,
            Err(_) => DEFAULT_TIMEZONE,
        };
        let open_hour = hour_from_env("CAMPAIGN_OPEN_HOUR", DEFAULT_OPEN_HOUR)?;
        let close_hour = hour_from_env("CAMPAIGN_CLOSE_HOUR", DEFAULT_CLOSE_HOUR)?;

        let config = Self {
            timezone,
            open_hour,
            close_hour,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML document. Missing keys fall back to
    /// the defaults.
    pub fn from_toml_str(text: &str) -> EngineResult<Self> {
        let file: ConfigFile = toml::from_str(text)
            .map_err(|err| EngineError::configuration(format!("invalid engine config: {}", err)))?;

        let timezone = match file.timezone {
            Some(name) => parse_timezone(&name)?,
            None => DEFAULT_TIMEZONE,
        };
        let config = Self {
            timezone,
            open_hour: file.open_hour.unwrap_or(DEFAULT_OPEN_HOUR),
            close_hour: file.close_hour.unwrap_or(DEFAULT_CLOSE_HOUR),
        };
        config.validate()?;
        Ok(config)
    }
}

fn parse_timezone(name: &str) -> EngineResult<Tz> {
    name.trim().parse::<Tz>().map_err(|err| {
        EngineError::configuration(format!("unknown timezone '{}': {}", name, err))
    })
}

fn hour_from_env(key: &str, default: f64) -> EngineResult<f64> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| EngineError::configuration(format!("{} must be a number, got '{}'", key, raw))),
        Err(_) => Ok(default),
    }
}
