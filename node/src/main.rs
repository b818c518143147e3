// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use clap::Parser;
use stateproof_kernel::pipeline::Verifier;
use stateproof_node::config::{NodeArgs, NodeConfig};
use stateproof_node::errors::NodeError;
use stateproof_node::executor::HttpExecutor;
use stateproof_node::registry::Registry;
use stateproof_node::server::{build_router, AppState};
use stateproof_node::telemetry::init_telemetry;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    init_telemetry();

    if let Err(e) = run(NodeArgs::parse()).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

async fn run(args: NodeArgs) -> Result<(), NodeError> {
    let cfg = args.into_config()?;
    tracing::info!("Initializing stateproof node with config: {:?}", cfg);

    let engine_url = cfg
        .engine_url
        .as_deref()
        .ok_or_else(|| NodeError::Config("--engine-url is required".into()))?;
    let engine = HttpExecutor::new(engine_url, cfg.engine_timeout, !cfg.serialize_engine)?;
    tracing::info!(engine = %engine.url(), serialized = cfg.serialize_engine, "Execution engine configured");

    let registry = match &cfg.forward_endpoint {
        Some(endpoint) => Registry::with_endpoint(endpoint.clone()),
        None => Registry::new(),
    };

    let verifier = Verifier::new(engine, cfg.chain.clone(), cfg.vm.clone(), cfg.limits);
    let app = build_router(AppState::new(verifier, registry), &cfg);

    serve(app, &cfg).await
}

async fn serve(app: axum::Router, cfg: &NodeConfig) -> Result<(), NodeError> {
    let listener = TcpListener::bind(cfg.bind_addr)
        .await
        .map_err(|e| NodeError::Config(format!("bind {}: {e}", cfg.bind_addr)))?;
    tracing::info!("Listening on {}", cfg.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| NodeError::Network(e.to_string()))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
