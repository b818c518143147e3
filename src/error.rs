// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.
//!
//! Every decode error belongs to exactly one layer of the request encoding
//! (container, compression, schema). The layer is what the transport reports;
//! the inner detail is for logs.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which encoding layer rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeKind {
    Container,
    Compression,
    Schema,
}

impl DecodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DecodeKind::Container => "container",
            DecodeKind::Compression => "compression",
            DecodeKind::Schema => "schema",
        }
    }
}

impl core::fmt::Display for DecodeKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outer envelope failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    #[error("envelope of {len} bytes exceeds limit of {max} bytes")]
    TooLarge { len: usize, max: usize },
    #[error("rlp: {0}")]
    Rlp(#[from] alloy_rlp::Error),
    #[error("{0} trailing bytes after envelope")]
    TrailingBytes(usize),
    /// Gas-used claim does not fit the engine's 64-bit counter.
    #[error("gas used {0} does not fit in 64 bits")]
    GasUsedOverflow(U256),
}

/// Payload decompression failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompressionError {
    #[error("compressed payload is empty")]
    Empty,
    #[error("inflated payload exceeds limit of {limit} bytes")]
    TooLarge { limit: usize },
    #[error("gzip: {0}")]
    Stream(String),
}

/// Structured trace failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("ssz: {0}")]
    Ssz(String),
    #[error("transaction {index}: {reason}")]
    Transaction { index: usize, reason: String },
}

/// A request that could not be decoded into a verifiable block.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("invalid input format: {0}")]
    Container(#[from] ContainerError),
    #[error("invalid compression: {0}")]
    Compression(#[from] CompressionError),
    #[error("invalid trace format: {0}")]
    Schema(#[from] SchemaError),
}

impl DecodeError {
    pub fn kind(&self) -> DecodeKind {
        match self {
            DecodeError::Container(_) => DecodeKind::Container,
            DecodeError::Compression(_) => DecodeKind::Compression,
            DecodeError::Schema(_) => DecodeKind::Schema,
        }
    }
}

/// Failure reported by the execution engine. Opaque to the kernel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ExecutionError(pub String);

impl ExecutionError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

pub type DecodeResult<T> = core::result::Result<T, DecodeError>;

/// Failure while building a request for sending.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("compression: {0}")]
    Compression(#[from] CompressionError),
    #[error("schema: {0}")]
    Schema(#[from] SchemaError),
}
