// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! stateproof-kernel: decode a packed block execution trace, rebuild the
//! block, and judge a claimed post-state root with a stateless engine.

pub mod config;
pub mod error;
pub mod types;
pub mod container;
pub mod inflate;
pub mod trace;
pub mod assemble;
pub mod verdict;
pub mod gate;
pub mod verify;
pub mod proof;
pub mod pipeline;

pub use error::{DecodeError, DecodeKind, ExecutionError};
pub use gate::{StatelessExecutor, VerificationGate};
pub use pipeline::{build_request, decode_execution_input, Verifier};
pub use proof::VerificationReport;
pub use verdict::Verdict;

#[cfg(test)]
pub mod tests;
