//! Contractor roster and booking snapshot.
//!
//! The engine receives the roster as a frozen snapshot taken once per run:
//! contractors with weekly availability windows, plus their existing
//! bookings. Availability is keyed by three-letter uppercase day codes and
//! uses local wall-clock `HH:MM` times; bookings are absolute instants.

use std::collections::BTreeMap;
use std::fmt;

use anyhow::Context;
use chrono::{DateTime, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::api::ContractorId;
use crate::error::{EngineError, EngineResult};

/// Day-of-week code used as the availability map key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum WeekdayCode {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl WeekdayCode {
    pub fn from_weekday(day: Weekday) -> Self {
        match day {
            Weekday::Mon => Self::Mon,
            Weekday::Tue => Self::Tue,
            Weekday::Wed => Self::Wed,
            Weekday::Thu => Self::Thu,
            Weekday::Fri => Self::Fri,
            Weekday::Sat => Self::Sat,
            Weekday::Sun => Self::Sun,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mon => "MON",
            Self::Tue => "TUE",
            Self::Wed => "WED",
            Self::Thu => "THU",
            Self::Fri => "FRI",
            Self::Sat => "SAT",
            Self::Sun => "SUN",
        }
    }
}

impl fmt::Display for WeekdayCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a contractor is qualified to shoot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceCapability {
    Photographer,
    Videographer,
}

impl ServiceCapability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Photographer => "Photographer",
            Self::Videographer => "Videographer",
        }
    }
}

/// One weekday's working window. Days absent from the availability map are
/// treated as unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAvailability {
    pub available: bool,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
}

/// A bookable media contractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contractor {
    pub id: ContractorId,
    pub name: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub picture: Option<String>,
    pub services: Vec<ServiceCapability>,
    pub availability: BTreeMap<WeekdayCode, DayAvailability>,
}

impl Contractor {
    pub fn has_capability(&self, capability: ServiceCapability) -> bool {
        self.services.contains(&capability)
    }

    /// The availability window for a weekday, if one is declared.
    pub fn day_availability(&self, day: WeekdayCode) -> Option<&DayAvailability> {
        self.availability.get(&day)
    }
}

/// An existing commitment blocking a contractor's time. Never mutated by
/// the engine; persistence of new bookings is the caller's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub contractor_id: ContractorId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Frozen roster state for one scheduling run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterSnapshot {
    #[serde(default)]
    pub contractors: Vec<Contractor>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

impl RosterSnapshot {
    /// Integrity checks over the snapshot: bookings must not run backwards
    /// and declared-available windows must have positive length.
    pub fn validate(&self) -> EngineResult<()> {
        for booking in &self.bookings {
            if booking.end_time < booking.start_time {
                return Err(EngineError::degenerate_interval(
                    format!("booking for contractor {}", booking.contractor_id),
                    booking.start_time,
                    booking.end_time,
                ));
            }
        }
        for contractor in &self.contractors {
            for (day, window) in &contractor.availability {
                if window.available && window.end_time <= window.start_time {
                    return Err(EngineError::configuration(format!(
                        "contractor {} has an empty {} availability window",
                        contractor.id, day
                    )));
                }
            }
        }
        Ok(())
    }
}

fn validate_input_roster(roster_json: &str) -> anyhow::Result<()> {
    let value: serde_json::Value =
        serde_json::from_str(roster_json).context("Invalid roster JSON")?;
    let has_contractors = value
        .as_object()
        .and_then(|obj| obj.get("contractors"))
        .is_some();
    if !has_contractors {
        anyhow::bail!("Missing required 'contractors' field");
    }
    Ok(())
}

/// Parse a roster snapshot from a JSON string and run integrity validation.
pub fn parse_roster_json_str(roster_json: &str) -> anyhow::Result<RosterSnapshot> {
    validate_input_roster(roster_json)?;
    let snapshot: RosterSnapshot = serde_json::from_str(roster_json)
        .context("Failed to deserialize roster JSON using Serde")?;
    snapshot
        .validate()
        .context("Roster failed integrity validation")?;
    Ok(snapshot)
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&value, FORMAT).map_err(serde::de::Error::custom)
    }
}
