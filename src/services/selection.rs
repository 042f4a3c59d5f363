//! Service selection resolution.
//!
//! Turns the raw category/item selection tree into at most one resolved
//! [`ServiceItem`] per semantic slot. A checked bundle under the reserved
//! category overrides everything else: its fixed expansion is authoritative
//! and whatever is checked in the ordinary categories is ignored.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::api::ServiceItem;
use crate::error::EngineResult;
use crate::models::catalog::{self, PhotoClassification};
use crate::models::marketing::MarketingConfig;

pub const PHOTOS_CATEGORY: &str = "Photos";
pub const VIDEO_CATEGORY: &str = "Video";
pub const FLOORPLANS_CATEGORY: &str = "Floorplans";

/// At most one resolved service per slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedServices {
    pub photography: Option<ServiceItem>,
    pub dusk: Option<ServiceItem>,
    pub drone: Option<ServiceItem>,
    pub video: Option<ServiceItem>,
    pub floor_plan: Option<ServiceItem>,
}

impl ResolvedServices {
    pub fn is_empty(&self) -> bool {
        self.photography.is_none()
            && self.dusk.is_none()
            && self.drone.is_none()
            && self.video.is_none()
            && self.floor_plan.is_none()
    }

    pub fn has_photo_and_video(&self) -> bool {
        self.photography.is_some() && self.video.is_some()
    }
}

/// Resolve a marketing configuration into per-slot service requests.
///
/// Selection rules:
/// - a recognized bundle checked under the reserved category wins outright;
/// - "Photos" items are classified by substring into dusk/drone/photography,
///   later checked items overwriting earlier ones per slot; unclassified
///   items are dropped (a named policy, logged at debug level);
/// - "Video" and "Floorplans" each take the first checked item;
/// - any slotted item whose name has no catalog duration is a
///   configuration error.
pub fn resolve_services(marketing: &MarketingConfig) -> EngineResult<ResolvedServices> {
    if let Some(bundle_name) = checked_bundle(marketing) {
        debug!(
            "bundle '{}' checked, overriding per-category selection",
            bundle_name
        );
        return expand_bundle(bundle_name);
    }

    let mut resolved = ResolvedServices::default();

    for item in marketing.checked_items(PHOTOS_CATEGORY) {
        match catalog::classify_photo_item(&item.name) {
            PhotoClassification::Dusk => resolved.dusk = Some(service_item(&item.name)?),
            PhotoClassification::Drone => resolved.drone = Some(service_item(&item.name)?),
            PhotoClassification::Photography => {
                resolved.photography = Some(service_item(&item.name)?)
            }
            PhotoClassification::Unclassified => {
                debug!("dropping unclassified photo item '{}'", item.name);
            }
        }
    }

    if let Some(item) = marketing.checked_items(VIDEO_CATEGORY).first() {
        resolved.video = Some(service_item(&item.name)?);
    }
    if let Some(item) = marketing.checked_items(FLOORPLANS_CATEGORY).first() {
        resolved.floor_plan = Some(service_item(&item.name)?);
    }

    Ok(resolved)
}

/// First checked item under the reserved bundle category whose name is a
/// recognized bundle.
fn checked_bundle(marketing: &MarketingConfig) -> Option<&str> {
    marketing
        .checked_items(catalog::BUNDLE_CATEGORY)
        .into_iter()
        .map(|item| item.name.as_str())
        .find(|name| catalog::bundle_expansion(name).is_some())
}

fn expand_bundle(bundle_name: &str) -> EngineResult<ResolvedServices> {
    let mut resolved = ResolvedServices::default();
    for name in catalog::bundle_expansion(bundle_name).unwrap_or_default() {
        assign_bundle_item(&mut resolved, name)?;
    }
    Ok(resolved)
}

fn assign_bundle_item(resolved: &mut ResolvedServices, name: &str) -> EngineResult<()> {
    let item = service_item(name)?;
    match catalog::classify_photo_item(name) {
        PhotoClassification::Dusk => resolved.dusk = Some(item),
        PhotoClassification::Drone => resolved.drone = Some(item),
        PhotoClassification::Photography => resolved.photography = Some(item),
        PhotoClassification::Unclassified => {
            if name.contains("Video") {
                resolved.video = Some(item);
            } else if name.contains("Floor Plan") {
                resolved.floor_plan = Some(item);
            } else {
                debug!("bundle item '{}' matches no slot", name);
            }
        }
    }
    Ok(())
}

fn service_item(name: &str) -> EngineResult<ServiceItem> {
    Ok(ServiceItem::new(name, catalog::require_duration(name)?))
}
