// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod config;
pub mod errors;
pub mod api;
pub mod registry;
pub mod rpc;
pub mod executor;
pub mod server;
pub mod network;
pub mod telemetry;
