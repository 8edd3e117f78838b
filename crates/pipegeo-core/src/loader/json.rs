// crates/pipegeo-core/src/loader/json.rs
use super::common_io::{self, CompressionMode};
use crate::error::Result;
use crate::model::{convert, raw::SnapshotRaw, Coordinate, Snapshot, CACHE_SUFFIX};
use log::{debug, info, warn};
use std::io::Read;
use std::path::Path;

impl Snapshot {
    /// Parses a backend export (`{"states": [...], "districts": [...], ...}`).
    ///
    /// Missing lists default to empty. Every district or locality without a
    /// parent reference is reported in one [`GeoError::InvalidEntity`].
    ///
    /// [`GeoError::InvalidEntity`]: crate::GeoError::InvalidEntity
    pub fn from_json_reader(reader: impl Read) -> Result<Self> {
        let raw: SnapshotRaw = serde_json::from_reader(reader)?;
        convert::from_raw(raw)
    }

    /// Parses a JSON export from disk; `*.gz` files are decompressed.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = common_io::open_stream(path, CompressionMode::for_path(path))?;
        let snapshot = Self::from_json_reader(reader)?;
        info!(
            "parsed {}: {} states, {} districts, {} localities",
            path.display(),
            snapshot.states.len(),
            snapshot.districts.len(),
            snapshot.localities.len()
        );
        Ok(snapshot)
    }

    /// **Smart load:** uses the binary cache next to `path` when it is fresh,
    /// otherwise parses the JSON and rewrites the cache.
    ///
    /// A cache that cannot be read or written is logged and ignored.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let cache_path = common_io::get_cache_path(path, CACHE_SUFFIX)?;

        if common_io::is_cache_fresh(path, &cache_path) {
            match Self::load_binary(&cache_path) {
                Ok(snapshot) => return Ok(snapshot),
                Err(e) => warn!("ignoring unreadable cache {}: {e}", cache_path.display()),
            }
        } else {
            debug!("cache {} is missing or stale", cache_path.display());
        }

        let snapshot = Self::load_json(path)?;
        if let Err(e) = snapshot.save_binary(&cache_path) {
            warn!("could not write cache {}: {e}", cache_path.display());
        }
        Ok(snapshot)
    }
}

/// Reads the waypoint list of one route (a JSON array of coordinates).
///
/// Nothing is validated here; see [`crate::route::validate_route`].
pub fn load_route_json(path: impl AsRef<Path>) -> Result<Vec<Coordinate>> {
    let path = path.as_ref();
    let reader = common_io::open_stream(path, CompressionMode::for_path(path))?;
    let coords: Vec<Coordinate> = serde_json::from_reader(reader)?;
    debug!("read {} coordinates from {}", coords.len(), path.display());
    Ok(coords)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeoError;
    use std::fs;
    use std::path::PathBuf;
    use std::time::Duration;

    const EXPORT: &str = r#"{
        "states": [{"id": 16, "code": "16", "designationFr": "Alger"}],
        "districts": [{"id": 1601, "code": "1601", "designationFr": "Sidi M'Hamed", "stateId": 16}],
        "localities": [{"id": 160101, "code": "160101", "designationFr": "Belcourt", "districtId": 1601}]
    }"#;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("pipegeo-json-{}-{name}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn reader_defaults_missing_lists() {
        let snap = Snapshot::from_json_reader(EXPORT.as_bytes()).unwrap();
        assert_eq!(snap.states.len(), 1);
        assert_eq!(snap.localities[0].district_id, 1601);
        assert!(snap.countries.is_empty());
        assert!(snap.zones.is_empty());
    }

    #[test]
    fn missing_parent_references_are_all_reported() {
        let json = r#"{
            "districts": [{"id": 1, "code": "1"}, {"id": 2, "code": "2", "stateId": 5}],
            "localities": [{"id": 3, "code": "3"}]
        }"#;
        match Snapshot::from_json_reader(json.as_bytes()) {
            Err(GeoError::InvalidEntity(errs)) => {
                let fields: Vec<_> = errs.iter().map(|e| (e.id, e.field)).collect();
                assert_eq!(fields, vec![(Some(1), "stateId"), (Some(3), "districtId")]);
            }
            other => panic!("expected InvalidEntity, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = Snapshot::from_json_reader("{\"states\": 3}".as_bytes()).unwrap_err();
        assert!(matches!(err, GeoError::Json(_)));
    }

    #[test]
    fn load_writes_and_reuses_cache() {
        let dir = scratch("cache");
        let src = dir.join("export.json");
        fs::write(&src, EXPORT).unwrap();
        let cache = common_io::get_cache_path(&src, CACHE_SUFFIX).unwrap();
        let _ = fs::remove_file(&cache);

        let first = Snapshot::load(&src).unwrap();
        assert!(cache.exists());

        // a broken source is never parsed while the cache is newer
        fs::write(&src, "not json").unwrap();
        let src_time = fs::metadata(&src).unwrap().modified().unwrap();
        fs::OpenOptions::new()
            .write(true)
            .open(&cache)
            .unwrap()
            .set_modified(src_time + Duration::from_secs(60))
            .unwrap();
        assert!(common_io::is_cache_fresh(&src, &cache));
        assert_eq!(Snapshot::load(&src).unwrap(), first);

        // once the source is newer it is parsed again
        fs::OpenOptions::new()
            .write(true)
            .open(&cache)
            .unwrap()
            .set_modified(src_time - Duration::from_secs(60))
            .unwrap();
        assert!(!common_io::is_cache_fresh(&src, &cache));
        assert!(matches!(Snapshot::load(&src), Err(GeoError::Json(_))));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn route_json_keeps_optional_fields() {
        let dir = scratch("route");
        let path = dir.join("route.json");
        fs::write(
            &path,
            r#"[{"sequence": 1, "latitude": 36.7, "longitude": 3.0, "infrastructureId": 4},
                {"id": 9, "sequence": 2, "latitude": 36.8, "longitude": 3.1, "elevation": 12.5}]"#,
        )
        .unwrap();
        let coords = load_route_json(&path).unwrap();
        assert_eq!(coords.len(), 2);
        assert_eq!(coords[0].infrastructure_id, Some(4));
        assert_eq!(coords[1].infrastructure_id, None);
        assert_eq!(coords[1].elevation, Some(12.5));
        let _ = fs::remove_dir_all(&dir);
    }

    #[cfg(feature = "compact")]
    #[test]
    fn gz_exports_are_decompressed() {
        use flate2::{write::GzEncoder, Compression};
        use std::io::Write;

        let dir = scratch("gz");
        let path = dir.join("export.json.gz");
        let mut enc = GzEncoder::new(fs::File::create(&path).unwrap(), Compression::default());
        enc.write_all(EXPORT.as_bytes()).unwrap();
        enc.finish().unwrap();

        let snap = Snapshot::load_json(&path).unwrap();
        assert_eq!(snap.districts.len(), 1);
        let _ = fs::remove_dir_all(&dir);
    }
}
