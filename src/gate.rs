// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Verification gate: hand the assembled block to the engine and compare roots.

use std::sync::{Arc, Mutex, PoisonError};

use alloy_primitives::B256;

use crate::error::ExecutionError;
use crate::types::{AssembledBlock, ChainConfig, ExecutionWitness, VerificationInput, VmConfig};
use crate::verdict::Verdict;

/// A stateless block executor.
///
/// Given a block and the witness for the state it touches, return the
/// post-state root the block produces. Implementations must not rely on any
/// state outside their arguments.
pub trait StatelessExecutor: Send + Sync {
    fn execute(
        &self,
        chain: &ChainConfig,
        vm: &VmConfig,
        block: &AssembledBlock,
        witness: &ExecutionWitness,
    ) -> Result<B256, ExecutionError>;

    /// Whether `execute` may be called from several threads at once.
    /// Non re-entrant engines are called one request at a time.
    fn is_reentrant(&self) -> bool {
        true
    }
}

impl<T: StatelessExecutor + ?Sized> StatelessExecutor for Arc<T> {
    fn execute(
        &self,
        chain: &ChainConfig,
        vm: &VmConfig,
        block: &AssembledBlock,
        witness: &ExecutionWitness,
    ) -> Result<B256, ExecutionError> {
        (**self).execute(chain, vm, block, witness)
    }

    fn is_reentrant(&self) -> bool {
        (**self).is_reentrant()
    }
}

impl<T: StatelessExecutor + ?Sized> StatelessExecutor for Box<T> {
    fn execute(
        &self,
        chain: &ChainConfig,
        vm: &VmConfig,
        block: &AssembledBlock,
        witness: &ExecutionWitness,
    ) -> Result<B256, ExecutionError> {
        (**self).execute(chain, vm, block, witness)
    }

    fn is_reentrant(&self) -> bool {
        (**self).is_reentrant()
    }
}

pub struct VerificationGate<E> {
    engine: E,
    chain: ChainConfig,
    vm: VmConfig,
    /// Present only for non re-entrant engines.
    serial: Option<Mutex<()>>,
}

impl<E: StatelessExecutor> VerificationGate<E> {
    pub fn new(engine: E, chain: ChainConfig, vm: VmConfig) -> Self {
        let serial = (!engine.is_reentrant()).then(|| Mutex::new(()));
        Self {
            engine,
            chain,
            vm,
            serial,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn chain_config(&self) -> &ChainConfig {
        &self.chain
    }

    /// Run the block and judge the claimed post-state root.
    ///
    /// The pre-state root is not checked here; the witness is what binds the
    /// execution to a pre-state.
    pub fn check(&self, input: &VerificationInput, block: &AssembledBlock, witness: &ExecutionWitness) -> Verdict {
        let result = match &self.serial {
            Some(lock) => {
                // A panic in an earlier call leaves no state behind the lock.
                let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
                self.engine.execute(&self.chain, &self.vm, block, witness)
            }
            None => self.engine.execute(&self.chain, &self.vm, block, witness),
        };

        match result {
            Err(err) => Verdict::ExecutionFailure(err),
            Ok(computed) if computed == input.post_state_root => Verdict::Accepted { state_root: computed },
            Ok(computed) => Verdict::RootMismatch {
                claimed: input.post_state_root,
                computed,
            },
        }
    }
}
