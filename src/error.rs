//! Error types for the campaign engine.
//!
//! Scheduling is pure computation over caller-supplied data, so everything
//! that can go wrong is either bad input (configuration) or inconsistent
//! interval data (degenerate intervals).

use chrono::{DateTime, Utc};

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Error type for engine operations
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Input that the engine cannot act on: unrecognized sale process,
    /// malformed lead-time string, unknown service item, invalid business
    /// hours, and the like.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// An interval whose end precedes its start. Raised for contractor
    /// bookings and for events submitted to contractor matching.
    #[error("Degenerate interval for {context}: end {end} precedes start {start}")]
    DegenerateInterval {
        context: String,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl EngineError {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Configuration error for a service item with no catalog duration.
    pub fn unknown_service_item(name: &str) -> Self {
        Self::configuration(format!("no catalog duration for service item '{}'", name))
    }

    /// Create a degenerate interval error.
    pub fn degenerate_interval(
        context: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self::DegenerateInterval {
            context: context.into(),
            start,
            end,
        }
    }

    /// Check whether this is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}
