// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Core types shared by the pipeline stages.

use alloy_consensus::{Block, Header, TxEnvelope};
use alloy_primitives::{Bytes, B256};
use serde::{Deserialize, Serialize};

/// Block handed to the execution engine.
pub type AssembledBlock = Block<TxEnvelope>;

/// Chain parameters forwarded verbatim to the engine.
///
/// The default is the zero configuration: no chain id, engine defaults for
/// everything else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
}

/// Virtual machine switches forwarded verbatim to the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VmConfig {
    #[serde(default)]
    pub no_base_fee: bool,
    #[serde(default)]
    pub enable_preimage_recording: bool,
}

/// Proof material for the state a block touches.
///
/// Opaque to the kernel: every entry is handed to the engine untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionWitness {
    /// Trie node preimages.
    pub state: Vec<Bytes>,
    /// Contract bytecode preimages.
    pub codes: Vec<Bytes>,
    /// Account and storage key preimages.
    pub keys: Vec<Bytes>,
    /// RLP encoded ancestor headers.
    pub headers: Vec<Bytes>,
}

impl ExecutionWitness {
    /// Total number of witness entries across all lists.
    pub fn len(&self) -> usize {
        self.state.len() + self.codes.len() + self.keys.len() + self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The claims carried by a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationInput {
    /// Forwarded only; never checked by the kernel.
    pub pre_state_root: B256,
    pub post_state_root: B256,
    pub gas_used: u64,
}

/// The material to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationPayload {
    pub witness: ExecutionWitness,
    pub header: Header,
    pub transactions: Vec<TxEnvelope>,
}
