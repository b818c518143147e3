//! Verification reports.

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

use crate::error::DecodeKind;
use crate::verdict::Verdict;
use crate::verify::request_digest;

/// Serializable summary of one verdict.
///
/// This is what a transport hands back to the sender. Roots are only present
/// when the verdict carries them; `decode_kind` only for decode failures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    /// One of `accepted`, `root_mismatch`, `decode_failure`, `execution_failure`.
    pub verdict: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_root: Option<B256>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computed_root: Option<B256>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decode_kind: Option<DecodeKind>,

    /// BLAKE3 of the request bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_digest: Option<B256>,
}

impl VerificationReport {
    pub fn from_verdict(verdict: &Verdict) -> Self {
        let (claimed_root, computed_root) = match verdict {
            Verdict::Accepted { state_root } => (Some(*state_root), Some(*state_root)),
            Verdict::RootMismatch { claimed, computed } => (Some(*claimed), Some(*computed)),
            Verdict::DecodeFailure(_) | Verdict::ExecutionFailure(_) => (None, None),
        };
        Self {
            verdict: verdict.label().to_string(),
            reason: verdict.reason(),
            claimed_root,
            computed_root,
            decode_kind: verdict.decode_kind(),
            request_digest: None,
        }
    }

    /// Attach the digest of the request this report answers.
    pub fn with_request(mut self, raw: &[u8]) -> Self {
        self.request_digest = Some(B256::from(request_digest(raw)));
        self
    }

    pub fn is_accepted(&self) -> bool {
        self.verdict == "accepted"
    }
}
