// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Registered verification client.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::api::ClientVersionV1;

/// Shared cell holding the most recent registration.
///
/// Cloning shares the cell. A later registration replaces an earlier one.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    inner: Arc<RwLock<Option<ClientVersionV1>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-filled with a static endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        let client = ClientVersionV1 {
            name: "static".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            endpoint: endpoint.into(),
        };
        Self {
            inner: Arc::new(RwLock::new(Some(client))),
        }
    }

    /// Store `client`, returning the registration it replaced.
    pub async fn register(&self, client: ClientVersionV1) -> Option<ClientVersionV1> {
        self.inner.write().await.replace(client)
    }

    pub async fn current(&self) -> Option<ClientVersionV1> {
        self.inner.read().await.clone()
    }

    pub async fn endpoint(&self) -> Option<String> {
        self.inner.read().await.as_ref().map(|c| c.endpoint.clone())
    }
}
