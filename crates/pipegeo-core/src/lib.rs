// crates/pipegeo-core/src/lib.rs

pub mod cascade; // Dependent State -> District -> Locality selection
pub mod common;
pub mod error;
pub mod hierarchy;
pub mod label;
pub mod loader; // Snapshot files and the binary cache
pub mod model;
pub mod prelude;
pub mod route; // Waypoint validation and geometry
pub mod service;
pub mod text;
pub mod traits;

// Re-exports
pub use crate::error::{GeoError, Result};
pub use cascade::{CascadePhase, CascadeSelector};
pub use common::{EntityId, EntityKind, IndexStats, HIERARCHY};
pub use hierarchy::{Ancestry, HierarchyIndex, HierarchyIndexBuilder, LocationAncestry};
pub use label::{LabelResolver, Language, ResolverConfig};
pub use model::{
    Coordinate, Country, Designation, District, FieldError, GeoPoint, Locality, Location,
    Snapshot, State, Zone,
};
pub use route::{Route, RouteError, RouteSummary};
pub use service::{EntityService, InMemoryService, Record};
pub use traits::{Designated, Validate};
