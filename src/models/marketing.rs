//! Campaign parameters and marketing selection state.
//!
//! The wire shapes here mirror what the surrounding product stores for a
//! property: a free-form parameter block (lead time, conclusion window,
//! sale process, finishes) and a category/item selection tree. Parsing into
//! the typed [`CampaignPlan`] happens up front so the sequencer never deals
//! with raw strings.

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// One selectable product in a marketing category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingItem {
    pub name: String,
    pub is_checked: bool,
}

/// A named category holding selectable items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingCategory {
    pub category: String,
    pub items: Vec<MarketingItem>,
}

/// Full selection state for one property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingConfig {
    pub categories: Vec<MarketingCategory>,
}

impl MarketingConfig {
    /// Checked items of a category, in category order, with unconditionally
    /// excluded product names (virtual tours, plan redraws) filtered out.
    pub fn checked_items(&self, category: &str) -> Vec<&MarketingItem> {
        self.categories
            .iter()
            .find(|cat| cat.category == category)
            .map(|cat| {
                cat.items
                    .iter()
                    .filter(|item| {
                        item.is_checked && !crate::models::catalog::is_excluded_item_name(&item.name)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Raw campaign parameters as stored by the product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignParameters {
    /// `"ASAP"` or `"<N> weeks"`.
    pub prepare_marketing: String,
    /// `"<N> weeks"` from launch to closing.
    pub conclusion_date: String,
    /// Sale method; must be one of the recognized [`SaleProcess`] names.
    pub sale_process: String,
    #[serde(default)]
    pub finishes: String,
    #[serde(default)]
    pub has_water_views: bool,
    #[serde(default)]
    pub address: String,
}

/// How long before the campaign starts marketing preparation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarketingLead {
    /// Start tomorrow.
    Asap,
    /// Start after the given number of weeks (may be fractional).
    Weeks(f64),
}

impl MarketingLead {
    pub fn parse(value: &str) -> EngineResult<Self> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("ASAP") {
            return Ok(Self::Asap);
        }
        Ok(Self::Weeks(parse_week_count(trimmed)?))
    }

    /// Whole days of lead time before the campaign begins.
    pub fn lead_days(&self) -> i64 {
        match self {
            Self::Asap => 1,
            Self::Weeks(weeks) => weeks_to_days(*weeks),
        }
    }
}

/// Convert a week count to whole days, rounding fractional weeks to the
/// nearest day.
pub fn weeks_to_days(weeks: f64) -> i64 {
    (weeks * 7.0).round() as i64
}

/// Parse `"<N> week(s)"` into a week count.
fn parse_week_count(value: &str) -> EngineResult<f64> {
    let mut tokens = value.split_whitespace();
    let number = tokens.next().unwrap_or_default();
    let unit = tokens.next().unwrap_or_default();
    let malformed =
        || EngineError::configuration(format!("expected \"<number> weeks\", got '{}'", value));

    if tokens.next().is_some() {
        return Err(malformed());
    }
    if !unit.eq_ignore_ascii_case("week") && !unit.eq_ignore_ascii_case("weeks") {
        return Err(malformed());
    }

    let weeks: f64 = number.parse().map_err(|_| malformed())?;
    if !weeks.is_finite() || weeks < 0.0 {
        return Err(malformed());
    }
    Ok(weeks)
}

/// Recognized sale methods. The closing-date rules branch on this, so an
/// unknown value is rejected rather than defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleProcess {
    Auction,
    PrivateTreaty,
    ExpressionOfInterest,
    Tender,
}

impl SaleProcess {
    pub fn parse(value: &str) -> EngineResult<Self> {
        let normalized = value.trim().to_lowercase();
        match normalized.as_str() {
            "auction" => Ok(Self::Auction),
            "private treaty" => Ok(Self::PrivateTreaty),
            "expression of interest" => Ok(Self::ExpressionOfInterest),
            "tender" => Ok(Self::Tender),
            _ => Err(EngineError::configuration(format!(
                "unrecognized sale process '{}'",
                value
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auction => "Auction",
            Self::PrivateTreaty => "Private Treaty",
            Self::ExpressionOfInterest => "Expression of Interest",
            Self::Tender => "Tender",
        }
    }

    pub fn is_auction(&self) -> bool {
        matches!(self, Self::Auction)
    }
}

/// Validated campaign parameters, ready for sequencing.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignPlan {
    pub lead: MarketingLead,
    pub conclusion_weeks: f64,
    pub sale_process: SaleProcess,
    pub high_end_finishes: bool,
    pub has_water_views: bool,
    pub address: String,
}

impl CampaignPlan {
    pub fn from_parameters(params: &CampaignParameters) -> EngineResult<Self> {
        let lead = MarketingLead::parse(&params.prepare_marketing)?;
        let conclusion_weeks = parse_week_count(params.conclusion_date.trim())?;
        let sale_process = SaleProcess::parse(&params.sale_process)?;
        Ok(Self {
            lead,
            conclusion_weeks,
            sale_process,
            high_end_finishes: is_high_end_finish(&params.finishes),
            has_water_views: params.has_water_views,
            address: params.address.clone(),
        })
    }

    /// Days between launch and the tentative closing date.
    pub fn conclusion_days(&self) -> i64 {
        weeks_to_days(self.conclusion_weeks)
    }

    /// Styling preference: high-end finishes with water views call for
    /// photography and video as separate shoots. Only takes effect when
    /// both media types are actually selected.
    pub fn prefers_separate_media(&self) -> bool {
        self.high_end_finishes && self.has_water_views
    }
}

fn is_high_end_finish(finishes: &str) -> bool {
    let trimmed = finishes.trim();
    trimmed.eq_ignore_ascii_case("high-end") || trimmed.eq_ignore_ascii_case("high end")
}

/// Everything the engine needs about one property's campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignInput {
    pub parameters: CampaignParameters,
    pub marketing: MarketingConfig,
}

fn validate_input_campaign(campaign_json: &str) -> anyhow::Result<()> {
    let value: serde_json::Value =
        serde_json::from_str(campaign_json).context("Invalid campaign JSON")?;
    let object = value
        .as_object()
        .ok_or_else(|| anyhow::anyhow!("Campaign JSON must be an object"))?;
    if !object.contains_key("parameters") {
        anyhow::bail!("Missing required 'parameters' field");
    }
    if !object.contains_key("marketing") {
        anyhow::bail!("Missing required 'marketing' field");
    }
    Ok(())
}

/// Parse a campaign input blob from a JSON string.
///
/// Validates the top-level shape first so that a missing section produces a
/// direct message instead of a deep deserialization error.
pub fn parse_campaign_json_str(campaign_json: &str) -> anyhow::Result<CampaignInput> {
    validate_input_campaign(campaign_json)?;
    let input: CampaignInput = serde_json::from_str(campaign_json)
        .context("Failed to deserialize campaign JSON using Serde")?;
    Ok(input)
}
