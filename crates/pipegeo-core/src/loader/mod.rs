// crates/pipegeo-core/src/loader/mod.rs

//! # Snapshot Loader
//!
//! Handles the physical layer (files, gzip) and the bincode cache, and
//! delegates payload parsing to [`crate::model::convert`].
//!
//! `load` is a read-through cache: the JSON export is parsed once and a
//! binary copy is written next to it (`<file>.snapshot.bin`, or
//! `.snapshot.comp.bin` with `compact`). Later loads use the copy as long as
//! it is not older than the export.

use crate::error::Result;
use crate::model::{Country, District, Locality, Location, Snapshot, State, Zone};
use crate::service::EntityService;
use log::debug;
use std::path::Path;

pub mod common_io;

#[cfg(feature = "json")]
mod json;

#[cfg(feature = "json")]
pub use json::load_route_json;

use common_io::CompressionMode;

/// Where [`Snapshot::from_services`] pulls each list from.
pub struct SnapshotSources<'a> {
    pub countries: &'a dyn EntityService<Country>,
    pub states: &'a dyn EntityService<State>,
    pub districts: &'a dyn EntityService<District>,
    pub localities: &'a dyn EntityService<Locality>,
    pub locations: &'a dyn EntityService<Location>,
    pub zones: &'a dyn EntityService<Zone>,
}

impl Snapshot {
    /// Reads a snapshot written by [`save_binary`](Self::save_binary).
    pub fn load_binary(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let snapshot: Snapshot = common_io::read_generic(path, CompressionMode::for_cache())?;
        debug!("loaded binary snapshot {}", path.display());
        Ok(snapshot)
    }

    /// Writes the snapshot as bincode, gzip-wrapped with `compact`.
    pub fn save_binary(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        common_io::write_generic(path, self, CompressionMode::for_cache())?;
        debug!("wrote binary snapshot {}", path.display());
        Ok(())
    }

    /// One consistent fetch of every list through the backend services.
    pub fn from_services(sources: &SnapshotSources<'_>) -> Result<Self> {
        Ok(Snapshot {
            countries: sources.countries.list()?,
            states: sources.states.list()?,
            districts: sources.districts.list()?,
            localities: sources.localities.list()?,
            locations: sources.locations.list()?,
            zones: sources.zones.list()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::InMemoryService;

    #[test]
    fn from_services_collects_every_list() {
        let countries = InMemoryService::new(vec![Country::new(1, "DZ").with_fr("Algérie")]);
        let states = InMemoryService::new(vec![State::new(16, "16").with_fr("Alger")]);
        let districts = InMemoryService::new(vec![District::new(1601, "1601", 16).with_fr("Bab El Oued")]);
        let localities: InMemoryService<Locality> = InMemoryService::default();
        let locations: InMemoryService<Location> = InMemoryService::default();
        let zones = InMemoryService::new(vec![Zone::new(1, "N").with_fr("Nord")]);

        let snap = Snapshot::from_services(&SnapshotSources {
            countries: &countries,
            states: &states,
            districts: &districts,
            localities: &localities,
            locations: &locations,
            zones: &zones,
        })
        .unwrap();

        assert_eq!(snap.countries.len(), 1);
        assert_eq!(snap.districts[0].state_id, 16);
        assert!(snap.localities.is_empty());
        assert_eq!(snap.index().districts_of_state(16).len(), 1);
    }

    #[test]
    fn binary_roundtrip() {
        let path = std::env::temp_dir().join(format!("pipegeo-bin-{}.bin", std::process::id()));
        let snap = Snapshot {
            states: vec![State::new(31, "31").with_fr("Oran")],
            districts: vec![District::new(3101, "3101", 31).with_fr("Es Senia")],
            ..Default::default()
        };
        snap.save_binary(&path).unwrap();
        assert_eq!(Snapshot::load_binary(&path).unwrap(), snap);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_binary_is_io_error() {
        let err = Snapshot::load_binary(std::env::temp_dir().join("pipegeo-absent.bin")).unwrap_err();
        assert!(matches!(err, crate::GeoError::Io(_)));
    }
}
