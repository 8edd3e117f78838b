// crates/pipegeo-core/src/model/mod.rs
pub mod convert;
pub mod coordinate;
pub mod entity;
pub mod raw;
pub mod snapshot;
pub mod validate;

pub use coordinate::{Coordinate, GeoPoint, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};
pub use entity::{Country, Designation, District, Locality, Location, State, Zone};
pub use snapshot::Snapshot;
pub use validate::{FieldError, MAX_CODE_LEN};

#[cfg(not(feature = "compact"))]
pub const CACHE_SUFFIX: &str = "snapshot.bin";
#[cfg(feature = "compact")]
pub const CACHE_SUFFIX: &str = "snapshot.comp.bin";
