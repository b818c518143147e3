//! Request fingerprints.

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

/// BLAKE3 hash of the raw request bytes.
///
/// Identifies a request in logs and reports without echoing its contents.
/// It is not a commitment the engine or the sender knows about.
pub fn request_digest(raw: &[u8]) -> [u8; 32] {
    *blake3::hash(raw).as_bytes()
}

/// First 8 bytes of [`request_digest`], hex encoded.
pub fn request_fingerprint(raw: &[u8]) -> String {
    let digest = request_digest(raw);
    alloy_primitives::hex::encode(&digest[..8])
}
