// crates/pipegeo-core/src/model/raw.rs
use super::entity::{Country, Location, State, Zone};
use crate::common::EntityId;
use serde::Deserialize;

/// District as it arrives from the backend export.
///
/// The parent reference is optional here so a missing `stateId` can be
/// reported by id instead of failing the whole decode.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictRaw {
    pub id: EntityId,
    pub code: String,
    #[serde(default)]
    pub designation_ar: Option<String>,
    #[serde(default)]
    pub designation_en: Option<String>,
    #[serde(default)]
    pub designation_fr: Option<String>,
    #[serde(default)]
    pub state_id: Option<EntityId>,
}

/// Locality as it arrives from the backend export.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalityRaw {
    pub id: EntityId,
    pub code: String,
    #[serde(default)]
    pub designation_ar: Option<String>,
    #[serde(default)]
    pub designation_en: Option<String>,
    #[serde(default)]
    pub designation_fr: Option<String>,
    #[serde(default)]
    pub district_id: Option<EntityId>,
}

/// One backend export: every flat list fetched in a single pass.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRaw {
    #[serde(default)]
    pub countries: Vec<Country>,
    #[serde(default)]
    pub states: Vec<State>,
    #[serde(default)]
    pub districts: Vec<DistrictRaw>,
    #[serde(default)]
    pub localities: Vec<LocalityRaw>,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub zones: Vec<Zone>,
}
