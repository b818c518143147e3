// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Payload compression (gzip, RFC 1952).

use std::io::{Read, Write};

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::CompressionError;

/// Decompress a gzip payload, refusing to produce more than `limit` bytes.
///
/// Concatenated gzip members are accepted and inflated back to back. Bytes
/// after the last member that do not form a valid member are an error.
pub fn inflate(compressed: &[u8], limit: usize) -> Result<Vec<u8>, CompressionError> {
    if compressed.is_empty() {
        return Err(CompressionError::Empty);
    }

    // One byte past the limit tells "exactly at limit" apart from "over".
    let cap = (limit as u64).saturating_add(1);
    let mut out = Vec::new();
    MultiGzDecoder::new(compressed)
        .take(cap)
        .read_to_end(&mut out)
        .map_err(|e| CompressionError::Stream(e.to_string()))?;

    if out.len() > limit {
        return Err(CompressionError::TooLarge { limit });
    }
    Ok(out)
}

/// Gzip `data` as a single member at the default level.
pub fn compress(data: &[u8]) -> Result<Vec<u8>, CompressionError> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 2), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| CompressionError::Stream(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| CompressionError::Stream(e.to_string()))
}
