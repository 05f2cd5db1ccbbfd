//! # Record Codec
//!
//! Canonical binary encoding for params and stored records: bincode with
//! fixed-width little-endian integers, a size limit and no trailing bytes.
//!
//! Decoding is strict. Input is re-encoded after decoding and rejected as
//! non-canonical when the bytes differ, so one logical value has exactly one
//! accepted encoding on every node.

use bincode::Options;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Codec failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Value could not be serialized.
    #[error("encode failed: {0}")]
    Encode(String),

    /// Bytes do not match the schema.
    #[error("decode failed: {0}")]
    Decode(String),

    /// Bytes decode but are not the canonical encoding of the value.
    #[error("non-canonical encoding")]
    NonCanonical,

    /// Input exceeds the size limit.
    #[error("input of {size} bytes exceeds limit of {limit}")]
    TooLarge {
        /// Input length
        size: usize,
        /// Configured limit
        limit: usize,
    },
}

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .reject_trailing_bytes()
}

/// Encode a value canonically.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, CodecError> {
    options()
        .serialize(value)
        .map_err(|e| CodecError::Encode(e.to_string()))
}

/// Decode a value, rejecting oversized, trailing or non-canonical input.
pub fn decode<T>(bytes: &[u8], limit: usize) -> Result<T, CodecError>
where
    T: Serialize + DeserializeOwned,
{
    if bytes.len() > limit {
        return Err(CodecError::TooLarge {
            size: bytes.len(),
            limit,
        });
    }

    // Bounding reads by the input length caps allocations driven by
    // untrusted length prefixes.
    let value: T = options()
        .with_limit(bytes.len() as u64)
        .deserialize(bytes)
        .map_err(|e| CodecError::Decode(e.to_string()))?;

    if encode(&value)? != bytes {
        return Err(CodecError::NonCanonical);
    }
    Ok(value)
}
