// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Block assembly.

use alloy_consensus::proofs::calculate_transaction_root;
use alloy_consensus::{Block, BlockBody, Header, TxEnvelope, EMPTY_OMMER_ROOT_HASH, EMPTY_ROOT_HASH};

use crate::types::{AssembledBlock, VerificationInput};

/// Build the block the engine executes.
///
/// `gas_used` is replaced by the envelope's claim; whatever the trace carried
/// is discarded. The commitments the block format requires are derived from
/// the block itself:
/// - transactions root over `transactions`
/// - empty receipts root (no receipts are supplied)
/// - empty ommers hash
///
/// Every other header field and every transaction is passed through as is.
pub fn assemble_block(input: &VerificationInput, header: Header, transactions: Vec<TxEnvelope>) -> AssembledBlock {
    let mut header = header;
    header.gas_used = input.gas_used;
    header.transactions_root = calculate_transaction_root(&transactions);
    header.receipts_root = EMPTY_ROOT_HASH;
    header.ommers_hash = EMPTY_OMMER_ROOT_HASH;

    Block::new(
        header,
        BlockBody {
            transactions,
            ommers: Vec::new(),
            withdrawals: None,
        },
    )
}
