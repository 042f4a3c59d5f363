//! # Campaign Engine
//!
//! Sale-campaign event scheduling engine.
//!
//! This crate generates the marketing and sale timeline for a residential
//! property campaign: media-production shoots packed into business hours,
//! the launch-to-market milestones, the weekly open-home cadence, and the
//! closing or auction events, each staffed from a contractor roster.
//!
//! ## Features
//!
//! - **Data Loading**: Parse campaign parameters, marketing selections, and rosters from JSON
//! - **Service Resolution**: Map checked marketing items and bundles onto the service catalog
//! - **Sequencing**: Rule-driven event placement with a rolling business-hour cursor
//! - **Time Handling**: DST-safe wall-clock scheduling in the campaign timezone
//! - **Contractor Matching**: Capability, availability, and conflict-aware first-fit staffing
//! - **Fingerprinting**: SHA-256 checksums for change detection on stored schedules
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Public types for events, contractors, and service items
//! - [`config`]: Scheduling configuration and environment loading
//! - [`error`]: Engine error types
//! - [`models`]: Campaign, marketing, roster, and calendar primitives
//! - [`services`]: Selection, sequencing, matching, and orchestration

pub mod api;

pub mod config;
pub mod error;

pub mod models;

pub mod services;
