// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use clap::Parser;
use stateproof_kernel::config::{DecodeLimits, MAX_ENVELOPE_BYTES};
use stateproof_kernel::types::{ChainConfig, VmConfig};

use crate::errors::NodeError;

pub const DEFAULT_HTTP_PORT: u16 = 8555;

#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub bind_addr: SocketAddr,
    /// Stateless execution engine. Required to serve `/verifyV1`.
    pub engine_url: Option<String>,
    /// Initial forwarding target, replaced by the first registration.
    pub forward_endpoint: Option<String>,
    pub auth_token: Option<String>,
    pub chain: ChainConfig,
    pub vm: VmConfig,
    pub serialize_engine: bool,
    pub limits: DecodeLimits,
    pub max_body_bytes: usize,
    pub request_timeout: Duration,
    /// Must be shorter than `request_timeout` so a slow engine ends in a verdict.
    pub engine_timeout: Duration,
    pub client_timeout: Duration,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_HTTP_PORT)),
            engine_url: None,
            forward_endpoint: None,
            auth_token: None,
            chain: ChainConfig::default(),
            vm: VmConfig::default(),
            serialize_engine: false,
            limits: DecodeLimits::default(),
            max_body_bytes: MAX_ENVELOPE_BYTES,
            request_timeout: Duration::from_secs(10),
            engine_timeout: Duration::from_secs(8),
            client_timeout: Duration::from_secs(5),
        }
    }
}

/// Command line flags. Every flag can also come from the environment.
#[derive(Parser, Debug, Clone)]
#[command(name = "stateproof-node", version, about = "Stateless block verification service")]
pub struct NodeArgs {
    /// HTTP listening interface
    #[arg(long, env = "STATEPROOF_HTTPADDR", default_value = "127.0.0.1")]
    pub http_addr: IpAddr,

    /// HTTP listening port
    #[arg(long, env = "STATEPROOF_HTTPPORT", default_value_t = DEFAULT_HTTP_PORT)]
    pub http_port: u16,

    /// URL of the stateless execution engine
    #[arg(long, env = "STATEPROOF_ENGINE_URL")]
    pub engine_url: Option<String>,

    /// Verification endpoint to forward requests to until a client registers
    #[arg(long, env = "STATEPROOF_FORWARD_ENDPOINT")]
    pub forward_endpoint: Option<String>,

    /// Bearer token required on the RPC endpoint
    #[arg(long, env = "STATEPROOF_AUTH_TOKEN")]
    pub auth_token: Option<String>,

    /// Chain id passed to the engine
    #[arg(long, env = "STATEPROOF_CHAIN_ID")]
    pub chain_id: Option<u64>,

    /// Call the engine one request at a time
    #[arg(long, env = "STATEPROOF_SERIALIZE_ENGINE")]
    pub serialize_engine: bool,

    /// Largest accepted request body
    #[arg(long, env = "STATEPROOF_MAX_BODY_BYTES", default_value_t = MAX_ENVELOPE_BYTES)]
    pub max_body_bytes: usize,

    #[arg(long, env = "STATEPROOF_REQUEST_TIMEOUT_SECS", default_value_t = 10)]
    pub request_timeout_secs: u64,

    /// Time allowed for one engine call; below the request timeout
    #[arg(long, env = "STATEPROOF_ENGINE_TIMEOUT_SECS", default_value_t = 8)]
    pub engine_timeout_secs: u64,

    #[arg(long, env = "STATEPROOF_CLIENT_TIMEOUT_SECS", default_value_t = 5)]
    pub client_timeout_secs: u64,
}

impl NodeArgs {
    pub fn into_config(self) -> Result<NodeConfig, NodeError> {
        if self.request_timeout_secs == 0 || self.client_timeout_secs == 0 || self.engine_timeout_secs == 0 {
            return Err(NodeError::Config("timeouts must be at least one second".into()));
        }
        if self.engine_timeout_secs >= self.request_timeout_secs {
            return Err(NodeError::Config(format!(
                "engine timeout ({}s) must be below the request timeout ({}s)",
                self.engine_timeout_secs, self.request_timeout_secs
            )));
        }
        // The body limit must let any envelope the decoder accepts through.
        let limits = DecodeLimits {
            max_envelope_bytes: self.max_body_bytes,
            ..DecodeLimits::default()
        };

        Ok(NodeConfig {
            bind_addr: SocketAddr::new(self.http_addr, self.http_port),
            engine_url: self.engine_url,
            forward_endpoint: self.forward_endpoint,
            auth_token: self.auth_token.filter(|t| !t.is_empty()),
            chain: ChainConfig {
                chain_id: self.chain_id,
            },
            vm: VmConfig::default(),
            serialize_engine: self.serialize_engine,
            limits,
            max_body_bytes: self.max_body_bytes,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            engine_timeout: Duration::from_secs(self.engine_timeout_secs),
            client_timeout: Duration::from_secs(self.client_timeout_secs),
        })
    }
}
