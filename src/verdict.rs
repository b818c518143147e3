// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Outcome of a verification request.

use alloy_primitives::B256;

use crate::error::{DecodeError, DecodeKind, ExecutionError};

/// Exactly one verdict is produced per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The engine computed the claimed post-state root.
    Accepted { state_root: B256 },
    /// Execution succeeded but produced a different root.
    RootMismatch { claimed: B256, computed: B256 },
    /// The request bytes never reached the engine.
    DecodeFailure(DecodeError),
    /// The engine rejected the block.
    ExecutionFailure(ExecutionError),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted { .. })
    }

    /// Stable label, used in logs, metrics and responses.
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Accepted { .. } => "accepted",
            Verdict::RootMismatch { .. } => "root_mismatch",
            Verdict::DecodeFailure(_) => "decode_failure",
            Verdict::ExecutionFailure(_) => "execution_failure",
        }
    }

    pub fn decode_kind(&self) -> Option<DecodeKind> {
        match self {
            Verdict::DecodeFailure(err) => Some(err.kind()),
            _ => None,
        }
    }

    /// Human readable reason for anything other than acceptance.
    pub fn reason(&self) -> Option<String> {
        match self {
            Verdict::Accepted { .. } => None,
            Verdict::RootMismatch { claimed, computed } => {
                Some(format!("state root mismatch: claimed {claimed}, computed {computed}"))
            }
            Verdict::DecodeFailure(err) => Some(err.to_string()),
            Verdict::ExecutionFailure(err) => Some(format!("execution failed: {err}")),
        }
    }
}

impl core::fmt::Display for Verdict {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.reason() {
            Some(reason) => write!(f, "{}: {}", self.label(), reason),
            None => f.write_str(self.label()),
        }
    }
}

impl From<DecodeError> for Verdict {
    fn from(err: DecodeError) -> Self {
        Verdict::DecodeFailure(err)
    }
}
