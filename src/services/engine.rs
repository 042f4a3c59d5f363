//! End-to-end schedule generation.
//!
//! Ties the pipeline together: validate the configuration, parse the
//! campaign parameters, resolve the marketing selection into service
//! items, sequence the events, then staff them from the roster.

use anyhow::Context;
use chrono::{DateTime, Utc};
use log::info;

use crate::api::Event;
use crate::config::ScheduleConfig;
use crate::error::EngineResult;
use crate::models::marketing::{
    parse_campaign_json_str, CampaignParameters, CampaignPlan, MarketingConfig,
};
use crate::models::roster::{parse_roster_json_str, RosterSnapshot};
use crate::services::matching::assign_contractors;
use crate::services::selection::resolve_services;
use crate::services::sequencer::sequence_campaign_events;

/// Generate the staffed event schedule for one campaign.
///
/// `now` anchors the marketing start date; callers inject it so runs are
/// reproducible.
///
/// # Errors
///
/// Fails on an invalid configuration, malformed campaign parameters, a
/// checked marketing item with no catalog duration, or an invalid roster.
pub fn generate_campaign_schedule(
    config: &ScheduleConfig,
    parameters: &CampaignParameters,
    marketing: &MarketingConfig,
    roster: &RosterSnapshot,
    now: DateTime<Utc>,
) -> EngineResult<Vec<Event>> {
    config.validate()?;
    let plan = CampaignPlan::from_parameters(parameters)?;
    let services = resolve_services(marketing)?;

    let events = sequence_campaign_events(config, &plan, &services, now);
    info!(
        "sequenced {} events for '{}' ({})",
        events.len(),
        plan.address,
        plan.sale_process.as_str()
    );

    assign_contractors(events, roster, config)
}

/// Generate a schedule straight from campaign and roster JSON blobs.
pub fn generate_campaign_schedule_from_json(
    config: &ScheduleConfig,
    campaign_json: &str,
    roster_json: &str,
    now: DateTime<Utc>,
) -> anyhow::Result<Vec<Event>> {
    let input = parse_campaign_json_str(campaign_json)?;
    let roster = parse_roster_json_str(roster_json)?;
    let events =
        generate_campaign_schedule(config, &input.parameters, &input.marketing, &roster, now)
            .context("Failed to generate campaign schedule")?;
    Ok(events)
}
