// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Structured trace schema (SSZ).
//!
//! Wire layout of the decompressed payload:
//!
//! ```text
//! Trace     { witness: Witness, transactions: List[ByteList, 2^20] }
//! Witness   { state, codes, keys, headers: List[ByteList, 2^20] }
//! ByteList  = List[u8, 2^30]
//! ```
//!
//! Transactions are EIP-2718 envelopes. The block header is NOT part of the
//! wire format: the encoder skips it and the decoder always produces
//! `Header::default()`. A decoded header therefore carries no information from
//! the sender, and only the fields the assembler overwrites are meaningful.
//! Adding the header to the schema would change the wire format.

use alloy_consensus::{Header, TxEnvelope};
use alloy_eips::eip2718::{Decodable2718, Encodable2718};
use alloy_primitives::Bytes;
use ssz::{Decode, Encode};
use ssz_derive::{Decode, Encode};
use ssz_types::VariableList;

use crate::config::{MaxEntryBytes, MaxTransactions, MaxWitnessEntries};
use crate::error::SchemaError;
use crate::types::{ExecutionWitness, VerificationPayload};

type Entry = VariableList<u8, MaxEntryBytes>;
type WitnessList = VariableList<Entry, MaxWitnessEntries>;
type TransactionList = VariableList<Entry, MaxTransactions>;

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
struct WitnessWire {
    state: WitnessList,
    codes: WitnessList,
    keys: WitnessList,
    headers: WitnessList,
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
struct TraceWire {
    witness: WitnessWire,
    /// Never on the wire. Decodes to `Header::default()`.
    #[ssz(skip_serializing, skip_deserializing)]
    block_header: Header,
    transactions: TransactionList,
}

/// Decoded execution trace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredTrace {
    pub witness: ExecutionWitness,
    /// See the module docs: always default after decoding.
    pub block_header: Header,
    pub transactions: Vec<TxEnvelope>,
}

impl StructuredTrace {
    pub fn into_payload(self) -> VerificationPayload {
        VerificationPayload {
            witness: self.witness,
            header: self.block_header,
            transactions: self.transactions,
        }
    }
}

/// Decode a trace from its SSZ bytes.
pub fn decode_trace(bytes: &[u8]) -> Result<StructuredTrace, SchemaError> {
    let wire = TraceWire::from_ssz_bytes(bytes).map_err(|e| SchemaError::Ssz(format!("{e:?}")))?;

    let transactions = wire
        .transactions
        .iter()
        .enumerate()
        .map(|(index, raw)| decode_transaction(index, raw))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(StructuredTrace {
        witness: ExecutionWitness {
            state: from_wire_list(wire.witness.state),
            codes: from_wire_list(wire.witness.codes),
            keys: from_wire_list(wire.witness.keys),
            headers: from_wire_list(wire.witness.headers),
        },
        block_header: wire.block_header,
        transactions,
    })
}

/// Encode a trace to SSZ bytes. `trace.block_header` is not written.
pub fn encode_trace(trace: &StructuredTrace) -> Result<Vec<u8>, SchemaError> {
    let transactions = trace
        .transactions
        .iter()
        .map(|tx| tx.encoded_2718())
        .map(to_entry)
        .collect::<Result<Vec<_>, _>>()?;

    let wire = TraceWire {
        witness: WitnessWire {
            state: to_wire_list(&trace.witness.state)?,
            codes: to_wire_list(&trace.witness.codes)?,
            keys: to_wire_list(&trace.witness.keys)?,
            headers: to_wire_list(&trace.witness.headers)?,
        },
        block_header: Header::default(),
        transactions: VariableList::new(transactions).map_err(|e| SchemaError::Ssz(format!("{e:?}")))?,
    };

    Ok(wire.as_ssz_bytes())
}

fn decode_transaction(index: usize, raw: &[u8]) -> Result<TxEnvelope, SchemaError> {
    let mut buf = raw;
    let tx = TxEnvelope::decode_2718(&mut buf).map_err(|e| SchemaError::Transaction {
        index,
        reason: e.to_string(),
    })?;
    if !buf.is_empty() {
        return Err(SchemaError::Transaction {
            index,
            reason: format!("{} trailing bytes", buf.len()),
        });
    }
    Ok(tx)
}

fn to_entry(bytes: Vec<u8>) -> Result<Entry, SchemaError> {
    VariableList::new(bytes).map_err(|e| SchemaError::Ssz(format!("{e:?}")))
}

fn to_wire_list(entries: &[Bytes]) -> Result<WitnessList, SchemaError> {
    let entries = entries
        .iter()
        .map(|entry| to_entry(entry.to_vec()))
        .collect::<Result<Vec<_>, _>>()?;
    VariableList::new(entries).map_err(|e| SchemaError::Ssz(format!("{e:?}")))
}

fn from_wire_list(list: WitnessList) -> Vec<Bytes> {
    Vec::from(list)
        .into_iter()
        .map(|entry| Bytes::from(Vec::from(entry)))
        .collect()
}
