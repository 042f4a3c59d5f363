//! Public API surface for the campaign engine.
//!
//! This file consolidates the DTO types exchanged with callers.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::models::catalog::PhotoClassification;
pub use crate::models::marketing::CampaignInput;
pub use crate::models::marketing::CampaignParameters;
pub use crate::models::marketing::CampaignPlan;
pub use crate::models::marketing::MarketingCategory;
pub use crate::models::marketing::MarketingConfig;
pub use crate::models::marketing::MarketingItem;
pub use crate::models::marketing::MarketingLead;
pub use crate::models::marketing::SaleProcess;
pub use crate::models::roster::Booking;
pub use crate::models::roster::Contractor;
pub use crate::models::roster::DayAvailability;
pub use crate::models::roster::RosterSnapshot;
pub use crate::models::roster::ServiceCapability;
pub use crate::models::roster::WeekdayCode;
pub use crate::services::selection::ResolvedServices;

use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize};

/// Contractor identifier (opaque, supplied by the roster source).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContractorId(pub String);

impl ContractorId {
    pub fn new(value: impl Into<String>) -> Self {
        ContractorId(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContractorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ContractorId> for String {
    fn from(id: ContractorId) -> Self {
        id.0
    }
}

/// A resolved service request: catalog name plus its fixed duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItem {
    pub name: String,
    pub duration_hours: f64,
}

impl ServiceItem {
    pub fn new(name: impl Into<String>, duration_hours: f64) -> Self {
        Self {
            name: name.into(),
            duration_hours,
        }
    }
}

/// Contact details of the contractor assigned to an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedContractor {
    pub id: ContractorId,
    pub name: String,
    pub mobile: String,
    pub email: String,
}

impl From<&crate::models::roster::Contractor> for AssignedContractor {
    fn from(contractor: &crate::models::roster::Contractor) -> Self {
        Self {
            id: contractor.id.clone(),
            name: contractor.name.clone(),
            mobile: contractor.mobile.clone(),
            email: contractor.email.clone(),
        }
    }
}

/// One calendar entry of the generated campaign schedule.
///
/// Timestamps carry the campaign timezone's UTC offset at the event's
/// instant. `end` is null only for milestone entries with no duration.
/// Event order is insertion order from the sequencer; the list is not
/// re-sorted afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub summary: String,
    pub start: DateTime<FixedOffset>,
    pub end: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contractor: Option<AssignedContractor>,
}

impl Event {
    /// An event with a start and an end, no assignment yet.
    pub fn timed(
        summary: impl Into<String>,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            summary: summary.into(),
            start,
            end: Some(end),
            contractor: None,
        }
    }

    /// A zero-duration milestone marker.
    pub fn milestone(summary: impl Into<String>, start: DateTime<FixedOffset>) -> Self {
        Self {
            summary: summary.into(),
            start,
            end: None,
            contractor: None,
        }
    }

    /// Event length, when an end time exists.
    pub fn duration(&self) -> Option<Duration> {
        self.end.map(|end| end - self.start)
    }
}
