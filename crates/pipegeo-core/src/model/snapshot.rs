// crates/pipegeo-core/src/model/snapshot.rs
use super::entity::{Country, District, Locality, Location, State, Zone};
use super::FieldError;
use crate::hierarchy::HierarchyIndex;
use crate::traits::Validate;
use serde::{Deserialize, Serialize};

/// Flat entity lists from one consistent backend fetch.
///
/// This is the unit the [`HierarchyIndex`] is built from and the unit the
/// loader caches.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub countries: Vec<Country>,
    #[serde(default)]
    pub states: Vec<State>,
    #[serde(default)]
    pub districts: Vec<District>,
    #[serde(default)]
    pub localities: Vec<Locality>,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub zones: Vec<Zone>,
}

impl Snapshot {
    /// Builds an index over a copy of the lists.
    pub fn index(&self) -> HierarchyIndex {
        self.clone().into_index()
    }

    /// Builds an index, consuming the snapshot.
    pub fn into_index(self) -> HierarchyIndex {
        HierarchyIndex::builder()
            .countries(self.countries)
            .states(self.states)
            .districts(self.districts)
            .localities(self.localities)
            .locations(self.locations)
            .build()
    }
}

impl Validate for Snapshot {
    fn validate(&self) -> Vec<FieldError> {
        let mut out = Vec::new();
        out.extend(self.countries.iter().flat_map(Validate::validate));
        out.extend(self.states.iter().flat_map(Validate::validate));
        out.extend(self.districts.iter().flat_map(Validate::validate));
        out.extend(self.localities.iter().flat_map(Validate::validate));
        out.extend(self.locations.iter().flat_map(Validate::validate));
        out.extend(self.zones.iter().flat_map(Validate::validate));
        out
    }
}
