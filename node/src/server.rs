// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Request as AxumRequest, State};
use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum::middleware::{from_fn_with_state, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use stateproof_kernel::error::ExecutionError;
use stateproof_kernel::gate::StatelessExecutor;
use stateproof_kernel::pipeline::Verifier;
use stateproof_kernel::verdict::Verdict;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api::{RpcResponse, VerifyResponse};
use crate::config::NodeConfig;
use crate::registry::Registry;

/// Everything a handler needs. Cheap to clone.
pub struct AppState<E> {
    pub verifier: Arc<Verifier<E>>,
    pub registry: Registry,
}

impl<E> AppState<E> {
    pub fn new(verifier: Verifier<E>, registry: Registry) -> Self {
        Self {
            verifier: Arc::new(verifier),
            registry,
        }
    }
}

impl<E> Clone for AppState<E> {
    fn clone(&self) -> Self {
        Self {
            verifier: self.verifier.clone(),
            registry: self.registry.clone(),
        }
    }
}

/// HTTP status reported for each verdict.
pub fn verdict_status(verdict: &Verdict) -> StatusCode {
    match verdict {
        Verdict::Accepted { .. } => StatusCode::OK,
        Verdict::RootMismatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        Verdict::DecodeFailure(_) => StatusCode::BAD_REQUEST,
        Verdict::ExecutionFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn auth_guard(State(token): State<Arc<String>>, req: AxumRequest, next: Next) -> Result<Response, StatusCode> {
    let provided = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|val| val.to_str().ok())
        .and_then(|val| val.strip_prefix("Bearer "));

    match provided {
        Some(provided) if provided == token.as_str() => Ok(next.run(req).await),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

pub fn build_router<E: StatelessExecutor + 'static>(state: AppState<E>, cfg: &NodeConfig) -> Router {
    let mut rpc = Router::new().route("/", post(rpc_handler::<E>));

    if let Some(token) = cfg.auth_token.clone() {
        tracing::info!("Auth Enabled: Bearer token required for RPC");
        rpc = rpc.layer(from_fn_with_state(Arc::new(token), auth_guard));
    } else {
        tracing::warn!("Auth Disabled: No token configured");
    }

    Router::new()
        .route("/verifyV1", post(verify_v1::<E>))
        .route("/metrics", get(metrics_handler))
        .merge(rpc)
        .layer(DefaultBodyLimit::max(cfg.max_body_bytes))
        .layer(TimeoutLayer::new(cfg.request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn verify_v1<E: StatelessExecutor + 'static>(
    State(state): State<AppState<E>>,
    body: Bytes,
) -> (StatusCode, Json<VerifyResponse>) {
    let started = Instant::now();
    let verifier = state.verifier.clone();
    let raw = body.clone();

    // A panicking engine is a failed execution, not a transport error.
    let verdict = match tokio::task::spawn_blocking(move || verifier.verify(&raw)).await {
        Ok(verdict) => verdict,
        Err(e) => {
            tracing::error!("Verification task failed: {e}");
            Verdict::ExecutionFailure(ExecutionError::new(format!("verification task failed: {e}")))
        }
    };

    metrics::counter!("stateproof_verifications_total", 1, "verdict" => verdict.label());
    metrics::histogram!(
        "stateproof_verification_duration_seconds",
        started.elapsed().as_secs_f64()
    );

    match &verdict {
        Verdict::Accepted { state_root } => tracing::info!(%state_root, bytes = body.len(), "Block verified"),
        other => tracing::warn!(verdict = other.label(), "Block rejected: {other}"),
    }

    let status = verdict_status(&verdict);
    (status, Json(VerifyResponse::from_verdict(&verdict).with_request(&body)))
}

async fn rpc_handler<E: StatelessExecutor + 'static>(
    State(state): State<AppState<E>>,
    body: Bytes,
) -> Json<RpcResponse> {
    Json(crate::rpc::handle(&state.registry, &body).await)
}

async fn metrics_handler() -> String {
    crate::telemetry::get_metrics()
}
