// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Outer envelope codec.
//!
//! The envelope is a canonical RLP list:
//! `[pre_state_root, post_state_root, compressed_payload, gas_used]`.
//! Lengths declared by RLP headers are checked against the bytes actually
//! present before anything is copied, so a hostile length prefix cannot force
//! an allocation.

use alloy_primitives::{Bytes, B256, U256};
use alloy_rlp::{Decodable, RlpDecodable, RlpEncodable};

use crate::config::DecodeLimits;
use crate::error::ContainerError;
use crate::types::VerificationInput;

/// Envelope exactly as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct ContainerEnvelope {
    pub pre_state_root: B256,
    pub post_state_root: B256,
    pub compressed_payload: Bytes,
    /// Arbitrary precision on the wire, narrowed by [`ContainerEnvelope::gas_used_u64`].
    pub gas_used: U256,
}

impl ContainerEnvelope {
    pub fn new(pre_state_root: B256, post_state_root: B256, compressed_payload: Bytes, gas_used: u64) -> Self {
        Self {
            pre_state_root,
            post_state_root,
            compressed_payload,
            gas_used: U256::from(gas_used),
        }
    }

    /// Decode one envelope occupying all of `raw`.
    pub fn decode_bounded(raw: &[u8], limits: &DecodeLimits) -> Result<Self, ContainerError> {
        if raw.len() > limits.max_envelope_bytes {
            return Err(ContainerError::TooLarge {
                len: raw.len(),
                max: limits.max_envelope_bytes,
            });
        }

        let mut buf = raw;
        let envelope = Self::decode(&mut buf)?;
        if !buf.is_empty() {
            return Err(ContainerError::TrailingBytes(buf.len()));
        }
        Ok(envelope)
    }

    pub fn encode_to_vec(&self) -> Vec<u8> {
        alloy_rlp::encode(self)
    }

    /// Gas used as the engine counts it. Values above `u64::MAX` are rejected,
    /// never wrapped.
    pub fn gas_used_u64(&self) -> Result<u64, ContainerError> {
        u64::try_from(self.gas_used).map_err(|_| ContainerError::GasUsedOverflow(self.gas_used))
    }

    /// The claims this envelope makes.
    pub fn input(&self) -> Result<VerificationInput, ContainerError> {
        Ok(VerificationInput {
            pre_state_root: self.pre_state_root,
            post_state_root: self.post_state_root,
            gas_used: self.gas_used_u64()?,
        })
    }
}
