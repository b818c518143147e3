// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Configuration constants and decode limits.

use serde::{Deserialize, Serialize};

/// Largest envelope accepted before any decoding starts (16 MiB).
pub const MAX_ENVELOPE_BYTES: usize = 16 * 1024 * 1024;

/// Largest decompressed trace accepted (128 MiB).
pub const MAX_INFLATED_BYTES: usize = 128 * 1024 * 1024;

/// Maximum number of transactions in one trace (2^20).
pub type MaxTransactions = ssz_types::typenum::U1048576;

/// Maximum number of entries in each witness list (2^20).
pub type MaxWitnessEntries = ssz_types::typenum::U1048576;

/// Maximum byte length of a single list entry (2^30).
pub type MaxEntryBytes = ssz_types::typenum::U1073741824;

/// Bounds applied to untrusted input while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeLimits {
    pub max_envelope_bytes: usize,
    pub max_inflated_bytes: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_envelope_bytes: MAX_ENVELOPE_BYTES,
            max_inflated_bytes: MAX_INFLATED_BYTES,
        }
    }
}
