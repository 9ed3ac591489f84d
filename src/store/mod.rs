//! Versioned binary persistence for fitted models.
//!
//! A model blob is 4 magic bytes (`b"RCMD"`), a little-endian `u16` schema
//! version, then a bincode payload of the [`FittedModel`]. The header is
//! validated before the payload is touched: wrong magic, truncated bytes,
//! and unknown versions are each rejected with their own error so operators
//! can tell a stale artifact from a corrupt one.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{RecomendarError, Result};
use crate::item_based::FittedModel;

/// Magic bytes opening every model blob.
pub const MODEL_MAGIC: [u8; 4] = *b"RCMD";

/// Schema version this build writes and reads.
pub const SCHEMA_VERSION: u16 = 1;

const HEADER_LEN: usize = 6;

/// Encodes a fitted model into a standalone blob.
///
/// # Errors
///
/// Returns [`RecomendarError::Serialization`] if the payload cannot be
/// encoded.
pub fn to_bytes(model: &FittedModel) -> Result<Vec<u8>> {
    let payload =
        bincode::serialize(model).map_err(|e| RecomendarError::Serialization(e.to_string()))?;
    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(&MODEL_MAGIC);
    bytes.extend_from_slice(&SCHEMA_VERSION.to_le_bytes());
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Decodes a model blob produced by [`to_bytes`].
///
/// # Errors
///
/// Returns [`RecomendarError::FormatError`] for a truncated header, wrong
/// magic, or undecodable payload, and [`RecomendarError::SchemaMismatch`]
/// when the version field names a schema this build does not read.
pub fn from_bytes(bytes: &[u8]) -> Result<FittedModel> {
    if bytes.len() < HEADER_LEN {
        return Err(RecomendarError::FormatError {
            message: format!(
                "blob too short: {} bytes, header needs {HEADER_LEN}",
                bytes.len()
            ),
        });
    }
    if bytes[..4] != MODEL_MAGIC {
        return Err(RecomendarError::FormatError {
            message: format!("bad magic: expected {MODEL_MAGIC:?}, got {:?}", &bytes[..4]),
        });
    }

    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != SCHEMA_VERSION {
        return Err(RecomendarError::SchemaMismatch {
            found: version,
            supported: SCHEMA_VERSION,
        });
    }

    bincode::deserialize(&bytes[HEADER_LEN..]).map_err(|e| RecomendarError::FormatError {
        message: format!("payload does not decode: {e}"),
    })
}

/// Writes a fitted model blob to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`RecomendarError::Serialization`] if encoding fails or
/// [`RecomendarError::Io`] if the file cannot be written.
pub fn save<P: AsRef<Path>>(model: &FittedModel, path: P) -> Result<()> {
    fs::write(path, to_bytes(model)?)?;
    Ok(())
}

/// Reads a fitted model blob from `path`.
///
/// # Errors
///
/// Returns [`RecomendarError::ModelNotFound`] when no file exists at `path`;
/// otherwise the same errors as [`from_bytes`].
pub fn load<P: AsRef<Path>>(path: P) -> Result<FittedModel> {
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(RecomendarError::ModelNotFound {
                path: path.as_ref().display().to_string(),
            });
        }
        Err(e) => return Err(e.into()),
    };
    from_bytes(&bytes)
}
