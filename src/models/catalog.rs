//! Static service catalog.
//!
//! Durations are a closed table keyed by canonical catalog name; every item
//! must be known before scheduling starts. The table also anchors the
//! substring classification used when resolving the "Photos" category and
//! the fixed expansions of named bundles.

use crate::error::{EngineError, EngineResult};

/// Closed table of catalog names to fixed scheduling durations in hours.
pub const SERVICE_DURATION_HOURS: &[(&str, f64)] = &[
    ("Photography 10 Images", 1.5),
    ("Photography 20 Images", 3.0),
    ("Photography 7 Images", 1.0),
    ("Photography 5 Images", 1.0),
    ("Dusk Photography", 0.5),
    ("Drone Shots", 0.5),
    ("Property Video", 1.5),
    ("Storytelling Videos", 2.0),
    ("Large Floor Plan", 2.0),
    ("Medium Floor Plan", 1.0),
    ("Small Floor Plan", 0.75),
];

/// Reserved category name whose checked items are treated as bundles.
pub const BUNDLE_CATEGORY: &str = "Bundles";

/// The one recognized bundle name.
pub const COMPLETE_CAMPAIGN_BUNDLE: &str = "Complete Campaign Bundle";

const COMPLETE_CAMPAIGN_BUNDLE_ITEMS: &[&str] = &[
    "Photography 10 Images",
    "Dusk Photography",
    "Drone Shots",
    "Property Video",
    "Medium Floor Plan",
];

/// Look up the scheduling duration for a catalog name.
pub fn duration_hours(name: &str) -> Option<f64> {
    SERVICE_DURATION_HOURS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, hours)| *hours)
}

/// Look up a duration, turning an unknown name into a configuration error.
pub fn require_duration(name: &str) -> EngineResult<f64> {
    duration_hours(name).ok_or_else(|| EngineError::unknown_service_item(name))
}

/// Fixed expansion of a recognized bundle name, if any.
pub fn bundle_expansion(name: &str) -> Option<&'static [&'static str]> {
    if name == COMPLETE_CAMPAIGN_BUNDLE {
        Some(COMPLETE_CAMPAIGN_BUNDLE_ITEMS)
    } else {
        None
    }
}

/// Semantic slot a checked "Photos" item resolves into.
///
/// Classification is by case-sensitive substring over the canonical catalog
/// names, checked most-specific first ("Dusk Photography" also contains
/// "Photography"). Items matching none of the substrings are reported as
/// [`PhotoClassification::Unclassified`] and dropped by the resolver; the
/// variant exists so that drop is a named, testable policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoClassification {
    Dusk,
    Drone,
    Photography,
    Unclassified,
}

impl PhotoClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dusk => "dusk",
            Self::Drone => "drone",
            Self::Photography => "photography",
            Self::Unclassified => "unclassified",
        }
    }
}

/// Classify a checked "Photos" item by name.
pub fn classify_photo_item(name: &str) -> PhotoClassification {
    if name.contains("Dusk Photography") {
        PhotoClassification::Dusk
    } else if name.contains("Drone Shots") {
        PhotoClassification::Drone
    } else if name.contains("Photography") {
        PhotoClassification::Photography
    } else {
        PhotoClassification::Unclassified
    }
}

/// Whether an item name is excluded from selection outright, regardless of
/// its checked state. Virtual furniture and plan-redraw products are
/// delivered without a site visit, so they never become calendar events.
pub fn is_excluded_item_name(name: &str) -> bool {
    let lowered = name.to_lowercase();
    lowered.contains("virtual") || lowered.contains("redraw")
}
