// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! End-to-end request handling: bytes in, verdict out.
//!
//! ```text
//! raw ──RLP──▶ envelope ──gzip──▶ SSZ trace ──▶ block ──engine──▶ root ══ claim?
//! ```

use alloy_primitives::{Bytes, B256};
use tracing::debug;

use crate::assemble::assemble_block;
use crate::config::DecodeLimits;
use crate::container::ContainerEnvelope;
use crate::error::{DecodeResult, EncodeError};
use crate::gate::{StatelessExecutor, VerificationGate};
use crate::inflate::{compress, inflate};
use crate::trace::{decode_trace, encode_trace, StructuredTrace};
use crate::types::{ChainConfig, VerificationInput, VerificationPayload, VmConfig};
use crate::verdict::Verdict;
use crate::verify::request_fingerprint;

/// Decode a raw request into its claims and the material to execute.
///
/// Layers are peeled outside in; the first failing layer determines the
/// error kind.
pub fn decode_execution_input(
    raw: &[u8],
    limits: &DecodeLimits,
) -> DecodeResult<(VerificationInput, VerificationPayload)> {
    let envelope = ContainerEnvelope::decode_bounded(raw, limits)?;
    let input = envelope.input()?;
    let inflated = inflate(&envelope.compressed_payload, limits.max_inflated_bytes)?;
    let trace = decode_trace(&inflated)?;
    Ok((input, trace.into_payload()))
}

/// Encode a request the way a sender would.
pub fn build_request(
    pre_state_root: B256,
    post_state_root: B256,
    gas_used: u64,
    trace: &StructuredTrace,
) -> Result<Vec<u8>, EncodeError> {
    let ssz = encode_trace(trace)?;
    let compressed = compress(&ssz)?;
    let envelope = ContainerEnvelope::new(pre_state_root, post_state_root, Bytes::from(compressed), gas_used);
    Ok(envelope.encode_to_vec())
}

/// Stateless verifier. Safe to share across threads when the engine is.
pub struct Verifier<E> {
    gate: VerificationGate<E>,
    limits: DecodeLimits,
}

impl<E: StatelessExecutor> Verifier<E> {
    pub fn new(engine: E, chain: ChainConfig, vm: VmConfig, limits: DecodeLimits) -> Self {
        Self {
            gate: VerificationGate::new(engine, chain, vm),
            limits,
        }
    }

    /// Default limits, zero chain and VM configuration.
    pub fn with_engine(engine: E) -> Self {
        Self::new(engine, ChainConfig::default(), VmConfig::default(), DecodeLimits::default())
    }

    pub fn limits(&self) -> &DecodeLimits {
        &self.limits
    }

    pub fn gate(&self) -> &VerificationGate<E> {
        &self.gate
    }

    /// Verify one request. Never panics on malformed input.
    pub fn verify(&self, raw: &[u8]) -> Verdict {
        let fingerprint = request_fingerprint(raw);

        let (input, payload) = match decode_execution_input(raw, &self.limits) {
            Ok(decoded) => decoded,
            Err(err) => {
                debug!(request = %fingerprint, kind = %err.kind(), error = %err, "request rejected before execution");
                return Verdict::DecodeFailure(err);
            }
        };

        let VerificationPayload {
            witness,
            header,
            transactions,
        } = payload;
        debug!(
            request = %fingerprint,
            txs = transactions.len(),
            witness_entries = witness.len(),
            gas_used = input.gas_used,
            "request decoded"
        );

        let block = assemble_block(&input, header, transactions);
        let verdict = self.gate.check(&input, &block, &witness);
        debug!(request = %fingerprint, verdict = verdict.label(), "verification finished");
        verdict
    }
}
