// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::sync::atomic::Ordering;
use std::sync::{Arc, Barrier};
use std::thread;

use alloy_consensus::Header;
use alloy_primitives::B256;

use crate::assemble::assemble_block;
use crate::gate::VerificationGate;
use crate::tests::fixtures::{post_root, pre_root, ConcurrencyTracker, FailingEngine, FixedRootEngine, TRANSFER_GAS};
use crate::types::{AssembledBlock, ChainConfig, ExecutionWitness, VerificationInput, VmConfig};
use crate::verdict::Verdict;

fn claim(post: B256) -> VerificationInput {
    VerificationInput {
        pre_state_root: pre_root(),
        post_state_root: post,
        gas_used: TRANSFER_GAS,
    }
}

fn block() -> AssembledBlock {
    assemble_block(&claim(post_root()), Header::default(), Vec::new())
}

#[test]
fn test_matching_root_accepted() {
    let gate = VerificationGate::new(FixedRootEngine(post_root()), ChainConfig::default(), VmConfig::default());
    let verdict = gate.check(&claim(post_root()), &block(), &ExecutionWitness::default());
    assert_eq!(verdict, Verdict::Accepted { state_root: post_root() });
    assert!(verdict.is_accepted());
}

#[test]
fn test_single_bit_flip_is_mismatch() {
    let gate = VerificationGate::new(FixedRootEngine(post_root()), ChainConfig::default(), VmConfig::default());
    let mut claimed = post_root();
    claimed.0[31] ^= 0x01;

    let verdict = gate.check(&claim(claimed), &block(), &ExecutionWitness::default());
    assert_eq!(
        verdict,
        Verdict::RootMismatch {
            claimed,
            computed: post_root()
        }
    );
}

#[test]
fn test_engine_error_is_execution_failure() {
    let gate = VerificationGate::new(FailingEngine("missing trie node"), ChainConfig::default(), VmConfig::default());
    let verdict = gate.check(&claim(post_root()), &block(), &ExecutionWitness::default());
    match verdict {
        Verdict::ExecutionFailure(err) => assert_eq!(err.to_string(), "missing trie node"),
        other => panic!("unexpected verdict {other:?}"),
    }
}

#[test]
fn test_pre_state_root_not_checked() {
    let gate = VerificationGate::new(FixedRootEngine(post_root()), ChainConfig::default(), VmConfig::default());
    let input = VerificationInput {
        pre_state_root: B256::repeat_byte(0xff),
        ..claim(post_root())
    };
    assert!(gate.check(&input, &block(), &ExecutionWitness::default()).is_accepted());
}

fn run_concurrently(gate: Arc<VerificationGate<ConcurrencyTracker>>) {
    let start = Arc::new(Barrier::new(4));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let gate = gate.clone();
            let start = start.clone();
            thread::spawn(move || {
                let (block, witness) = (block(), ExecutionWitness::default());
                start.wait();
                gate.check(&claim(post_root()), &block, &witness)
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap().is_accepted());
    }
}

#[test]
fn test_non_reentrant_engine_serialized() {
    let gate = Arc::new(VerificationGate::new(
        ConcurrencyTracker::new(false),
        ChainConfig::default(),
        VmConfig::default(),
    ));
    run_concurrently(gate.clone());
    assert_eq!(gate.engine().peak.load(Ordering::SeqCst), 1);
}

#[test]
fn test_reentrant_engine_not_serialized() {
    let gate = Arc::new(VerificationGate::new(
        ConcurrencyTracker::new(true),
        ChainConfig::default(),
        VmConfig::default(),
    ));
    run_concurrently(gate.clone());
    // All four calls start together and each holds the engine for 20ms.
    assert!(gate.engine().peak.load(Ordering::SeqCst) > 1);
}
