/*!
 * Record Wire Codec
 * Fixed-size binary encoding of process records with bincode
 *
 * bincode's default options use fixed-width little-endian integers, so every
 * record encodes to exactly `RECORD_WIRE_SIZE` bytes.
 */

use crate::core::limits::RECORD_WIRE_SIZE;
use crate::process::types::ProcessRecord;
use serde::{de::DeserializeOwned, Serialize};

/// Result type for bincode operations
pub type BincodeResult<T> = Result<T, BincodeError>;

/// Binary serialization errors
#[derive(Debug, thiserror::Error)]
pub enum BincodeError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Deserialization error: {0}")]
    Deserialization(String),
    #[error("Wire size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Serialize to binary bytes using bincode
#[inline]
pub fn to_vec<T: Serialize>(value: &T) -> BincodeResult<Vec<u8>> {
    bincode::serialize(value).map_err(|e| BincodeError::Serialization(e.to_string()))
}

/// Deserialize from binary bytes using bincode
#[inline]
pub fn from_slice<T: DeserializeOwned>(bytes: &[u8]) -> BincodeResult<T> {
    bincode::deserialize(bytes).map_err(|e| BincodeError::Deserialization(e.to_string()))
}

/// Encode one record for copy-out
pub fn encode_record(record: &ProcessRecord) -> BincodeResult<Vec<u8>> {
    let bytes = to_vec(record)?;
    if bytes.len() != RECORD_WIRE_SIZE {
        return Err(BincodeError::SizeMismatch {
            expected: RECORD_WIRE_SIZE,
            actual: bytes.len(),
        });
    }
    Ok(bytes)
}

/// Decode one record read back from user memory
pub fn decode_record(bytes: &[u8]) -> BincodeResult<ProcessRecord> {
    if bytes.len() != RECORD_WIRE_SIZE {
        return Err(BincodeError::SizeMismatch {
            expected: RECORD_WIRE_SIZE,
            actual: bytes.len(),
        });
    }
    from_slice(bytes)
}
