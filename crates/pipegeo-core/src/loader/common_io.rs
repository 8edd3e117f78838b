// crates/pipegeo-core/src/loader/common_io.rs
use crate::error::{GeoError, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

#[cfg(feature = "compact")]
use flate2::{read::GzDecoder, write::GzEncoder, Compression};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    Gzip,
    None,
}

impl CompressionMode {
    /// Gzip whenever the `compact` feature is on.
    pub const fn for_cache() -> Self {
        #[cfg(feature = "compact")]
        {
            CompressionMode::Gzip
        }
        #[cfg(not(feature = "compact"))]
        {
            CompressionMode::None
        }
    }

    /// Gzip for `*.gz` paths, plain otherwise.
    pub fn for_path(path: &Path) -> Self {
        if path.extension().is_some_and(|e| e.eq_ignore_ascii_case("gz")) {
            CompressionMode::Gzip
        } else {
            CompressionMode::None
        }
    }
}

/// Opens `path` buffered, behind a gzip decoder when `mode` asks for it.
pub fn open_stream(path: &Path, mode: CompressionMode) -> Result<Box<dyn Read>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    match mode {
        CompressionMode::None => Ok(Box::new(reader)),
        CompressionMode::Gzip => {
            #[cfg(feature = "compact")]
            {
                Ok(Box::new(GzDecoder::new(reader)))
            }
            #[cfg(not(feature = "compact"))]
            {
                Err(GeoError::InvalidData(format!(
                    "{} is gzip-compressed but the 'compact' feature is disabled",
                    path.display()
                )))
            }
        }
    }
}

/// `data/snap.json` -> `data/snap.json.<suffix>`.
pub fn get_cache_path(source: &Path, suffix: &str) -> Result<PathBuf> {
    let filename = source
        .file_name()
        .ok_or_else(|| GeoError::InvalidData(format!("{} has no file name", source.display())))?
        .to_string_lossy();
    Ok(source.with_file_name(format!("{filename}.{suffix}")))
}

/// The cache is usable when it exists and is not older than its source.
pub fn is_cache_fresh(source: &Path, cache: &Path) -> bool {
    let cache_time = match fs::metadata(cache).and_then(|m| m.modified()) {
        Ok(t) => t,
        Err(_) => return false,
    };
    match fs::metadata(source).and_then(|m| m.modified()) {
        Ok(source_time) => source_time <= cache_time,
        // source gone: the cache is all there is
        Err(_) => true,
    }
}

/// Writes any serializable value as bincode.
pub fn write_generic<T: Serialize>(path: &Path, value: &T, mode: CompressionMode) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);

    match mode {
        CompressionMode::None => {
            let mut writer = writer;
            bincode::serialize_into(&mut writer, value)?;
            writer.flush()?;
        }
        CompressionMode::Gzip => {
            #[cfg(feature = "compact")]
            {
                let mut encoder = GzEncoder::new(writer, Compression::default());
                bincode::serialize_into(&mut encoder, value)?;
                encoder.finish()?.flush()?;
            }
            #[cfg(not(feature = "compact"))]
            {
                drop(writer);
                return Err(GeoError::InvalidData(
                    "gzip requested but the 'compact' feature is disabled".into(),
                ));
            }
        }
    }
    Ok(())
}

/// Reads a bincode value written by [`write_generic`].
pub fn read_generic<T: serde::de::DeserializeOwned>(path: &Path, mode: CompressionMode) -> Result<T> {
    let reader = open_stream(path, mode)?;
    Ok(bincode::deserialize_from(reader)?)
}
