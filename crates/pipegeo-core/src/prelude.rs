//! pipegeo prelude: common types and traits for demos and tools.

#![allow(unused_imports)]

pub use crate::cascade::{CascadePhase, CascadeSelector};
pub use crate::common::{EntityId, EntityKind};
pub use crate::error::{GeoError, Result};
pub use crate::hierarchy::HierarchyIndex;
pub use crate::label::{LabelResolver, Language};
pub use crate::loader::SnapshotSources;
#[cfg(feature = "json")]
pub use crate::loader::load_route_json;
pub use crate::model::{
    Coordinate, Country, Designation, District, Locality, Location, Snapshot, State, Zone,
};
pub use crate::route::{
    haversine_distance_km, nearest_point, sort_by_sequence, total_route_length, validate_route,
    Route,
};
pub use crate::service::{EntityService, InMemoryService};
pub use crate::text::fold_key;
pub use crate::traits::{Designated, Validate};
