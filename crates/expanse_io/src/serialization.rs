//! Serialization utilities with robust error handling.
//!
//! Provides safe JSON serialization/deserialization and the on-disk framing
//! used for save documents: plain JSON, or gzip-compressed JSON when the
//! target path ends in `.gz`. Writes go through a sibling `.tmp` file and an
//! atomic rename so a crash never leaves a partially written document behind.

use crate::error::{IoError, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Serializes data to JSON with error handling.
///
/// # Returns
/// JSON string on success, or `IoError::Serialization` on failure.
pub fn to_json<T>(data: &T) -> Result<String>
where
    T: Serialize,
{
    serde_json::to_string(data)
        .map_err(|e| IoError::serialization(format!("JSON serialization failed: {}", e)))
}

/// Serializes data to pretty-printed JSON.
pub fn to_json_pretty<T>(data: &T) -> Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(data)
        .map_err(|e| IoError::serialization(format!("JSON serialization failed: {}", e)))
}

/// Deserializes data from JSON string.
///
/// Empty input is rejected as a validation error rather than an EOF error.
pub fn from_json<T>(json: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    if json.trim().is_empty() {
        return Err(IoError::validation("Empty JSON string"));
    }

    serde_json::from_str(json)
        .map_err(|e| IoError::serialization(format!("JSON deserialization failed: {}", e)))
}

/// Returns `true` if the bytes start with the gzip magic number.
#[must_use]
pub fn is_gzip(bytes: &[u8]) -> bool {
    bytes.len() >= 2 && bytes[..2] == GZIP_MAGIC
}

/// The sibling temporary file used while replacing `path`: `path` + `.tmp`.
#[must_use]
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Writes `bytes` to `path` atomically.
///
/// The data is written to `path.tmp`, flushed to disk, then renamed over
/// `path`. On failure the temporary file is removed best-effort and whatever
/// was at `path` before is left untouched.
pub fn write_atomic(path: impl AsRef<Path>, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let tmp = temp_path_for(path);

    let result = (|| -> Result<()> {
        let mut file = File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp, path)?;
        Ok(())
    })();

    if let Err(e) = result {
        if tmp.is_file() {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                tracing::debug!(path = %tmp.display(), error = %cleanup, "Temp file cleanup failed");
            }
        }
        return Err(e.with_context(format!("writing {}", path.display())));
    }
    Ok(())
}

/// Writes a JSON document atomically, gzip-compressing it when the path ends
/// in `.gz`.
pub fn write_document(path: impl AsRef<Path>, json: &str) -> Result<()> {
    let path = path.as_ref();
    let compressed = path.extension().is_some_and(|ext| ext == "gz");
    if compressed {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(json.as_bytes())
            .map_err(|e| IoError::compression(e.to_string()))?;
        let bytes = encoder
            .finish()
            .map_err(|e| IoError::compression(e.to_string()))?;
        write_atomic(path, &bytes)
    } else {
        write_atomic(path, json.as_bytes())
    }
}

/// Reads a document written by [`write_document`] and returns its JSON text.
///
/// Gzip framing is detected from the content, not the file name. A missing
/// file yields [`IoError::NotFound`]; undecodable content yields a
/// compression or serialization error.
pub fn read_document(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(IoError::not_found(path.display().to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    let raw = if is_gzip(&bytes) {
        let mut decoder = GzDecoder::new(bytes.as_slice());
        let mut decoded = Vec::new();
        decoder
            .read_to_end(&mut decoded)
            .map_err(|e| IoError::compression(format!("gzip decode failed: {}", e)))?;
        decoded
    } else {
        bytes
    };

    String::from_utf8(raw)
        .map_err(|e| IoError::serialization(format!("Invalid UTF-8 in document: {}", e)))
}
