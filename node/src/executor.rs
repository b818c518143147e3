// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Execution engine reached over HTTP.

use std::time::Duration;

use alloy_primitives::{Bytes, B256};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use stateproof_kernel::error::ExecutionError;
use stateproof_kernel::gate::StatelessExecutor;
use stateproof_kernel::types::{AssembledBlock, ChainConfig, ExecutionWitness, VmConfig};
use tokio::runtime::Handle;

use crate::errors::NodeError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineRequest<'a> {
    pub chain_config: &'a ChainConfig,
    pub vm_config: &'a VmConfig,
    /// RLP encoded block.
    pub block: Bytes,
    pub witness: &'a ExecutionWitness,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_root: Option<B256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Forwards blocks to an engine service and reads back the state root.
///
/// `execute` blocks the calling thread; call it from `spawn_blocking`, never
/// from an async task.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    url: Url,
    client: Client,
    runtime: Handle,
    reentrant: bool,
}

impl HttpExecutor {
    /// Must be called inside a tokio runtime; requests run on that runtime.
    pub fn new(url: &str, timeout: Duration, reentrant: bool) -> Result<Self, NodeError> {
        let url = Url::parse(url).map_err(|e| NodeError::Config(format!("engine url {url:?}: {e}")))?;
        let runtime = Handle::try_current().map_err(|e| NodeError::Config(e.to_string()))?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url,
            client,
            runtime,
            reentrant,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn call(&self, request: &EngineRequest<'_>) -> Result<B256, ExecutionError> {
        let resp = self
            .client
            .post(self.url.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| ExecutionError::new(format!("engine unreachable: {e}")))?;

        let status = resp.status();
        let body: EngineResponse = resp
            .json()
            .await
            .map_err(|e| ExecutionError::new(format!("engine returned {status} with unreadable body: {e}")))?;

        if let Some(error) = body.error {
            return Err(ExecutionError::new(error));
        }
        if !status.is_success() {
            return Err(ExecutionError::new(format!("engine returned {status}")));
        }
        body.state_root
            .ok_or_else(|| ExecutionError::new("engine response has no stateRoot"))
    }
}

impl StatelessExecutor for HttpExecutor {
    fn execute(
        &self,
        chain: &ChainConfig,
        vm: &VmConfig,
        block: &AssembledBlock,
        witness: &ExecutionWitness,
    ) -> Result<B256, ExecutionError> {
        let request = EngineRequest {
            chain_config: chain,
            vm_config: vm,
            block: Bytes::from(alloy_rlp::encode(block)),
            witness,
        };
        self.runtime.block_on(self.call(&request))
    }

    fn is_reentrant(&self) -> bool {
        self.reentrant
    }
}
