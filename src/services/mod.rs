//! Service layer for campaign scheduling logic.
//!
//! This module contains the scheduling pipeline: marketing selection is
//! resolved into service items, the sequencer derives the event timeline,
//! and the matcher staffs it from the contractor roster. The engine module
//! orchestrates the full run.

pub mod engine;

pub mod fingerprint;

pub mod matching;

pub mod selection;

pub mod sequencer;

pub use engine::{generate_campaign_schedule, generate_campaign_schedule_from_json};
pub use fingerprint::{fingerprint_json_str, schedule_fingerprint};
pub use matching::assign_contractors;
pub use selection::resolve_services;
pub use sequencer::sequence_campaign_events;
