use std::time::Duration;

use alloy_primitives::B256;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use stateproof_kernel::error::ExecutionError;
use stateproof_kernel::gate::StatelessExecutor;
use stateproof_kernel::pipeline::{build_request, Verifier};
use stateproof_kernel::trace::StructuredTrace;
use stateproof_kernel::types::{AssembledBlock, ChainConfig, ExecutionWitness, VmConfig};
use stateproof_kernel::verdict::Verdict;
use stateproof_node::api::ClientVersionV1;
use stateproof_node::config::NodeConfig;
use stateproof_node::errors::NodeError;
use stateproof_node::executor::HttpExecutor;
use stateproof_node::network::client::VerifyClient;
use stateproof_node::registry::Registry;
use stateproof_node::server::{build_router, AppState};

struct FixedRoot(B256);

impl StatelessExecutor for FixedRoot {
    fn execute(&self, _: &ChainConfig, _: &VmConfig, _: &AssembledBlock, _: &ExecutionWitness) -> Result<B256, ExecutionError> {
        Ok(self.0)
    }
}

fn claimed_root() -> B256 {
    B256::repeat_byte(0x22)
}

fn request_bytes() -> Vec<u8> {
    build_request(B256::ZERO, claimed_root(), 21_000, &StructuredTrace::default()).unwrap()
}

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn spawn_node(root: B256) -> String {
    let state = AppState::new(Verifier::with_engine(FixedRoot(root)), Registry::new());
    spawn(build_router(state, &NodeConfig::default())).await
}

fn client(registry: Registry) -> VerifyClient {
    VerifyClient::new(Duration::from_secs(5), registry).unwrap()
}

#[tokio::test]
async fn test_verify_v1_roundtrip() {
    let base = spawn_node(claimed_root()).await;
    let resp = client(Registry::new())
        .verify_v1(request_bytes(), &format!("{base}/verifyV1"))
        .await
        .unwrap();
    assert!(resp.is_accepted());
}

#[tokio::test]
async fn test_verify_v1_reads_rejections() {
    let base = spawn_node(B256::repeat_byte(0x33)).await;
    let client = client(Registry::new());

    let resp = client.verify_v1(request_bytes(), &format!("{base}/verifyV1")).await.unwrap();
    assert_eq!(resp.verdict, "root_mismatch");

    let resp = client.verify_v1(vec![0x01], &format!("{base}/verifyV1")).await.unwrap();
    assert_eq!(resp.verdict, "decode_failure");
}

#[tokio::test]
async fn test_verify_v1_unexpected_status() {
    let base = spawn_node(claimed_root()).await;
    let err = client(Registry::new())
        .verify_v1(request_bytes(), &format!("{base}/nowhere"))
        .await
        .unwrap_err();
    assert!(matches!(err, NodeError::Network(_)));
}

#[tokio::test]
async fn test_forward_without_registration() {
    let err = client(Registry::new()).forward(request_bytes()).await.unwrap_err();
    assert!(matches!(err, NodeError::NoEndpoint));
}

#[tokio::test]
async fn test_forward_to_registered_client() {
    let base = spawn_node(claimed_root()).await;
    let registry = Registry::new();
    registry
        .register(ClientVersionV1 {
            name: "node".into(),
            version: "0.1.0".into(),
            endpoint: format!("{base}/verifyV1"),
        })
        .await;

    let resp = client(registry).forward(request_bytes()).await.unwrap();
    assert!(resp.is_accepted());
}

async fn engine_app(reply: Value) -> String {
    let app = Router::new().route(
        "/",
        post(move |Json(req): Json<Value>| {
            let reply = reply.clone();
            async move {
                assert!(req["block"].as_str().unwrap().starts_with("0x"));
                assert!(req["witness"]["state"].is_array());
                assert!(req["chainConfig"].is_object());
                Json(reply)
            }
        }),
    );
    spawn(app).await
}

async fn verify_with_engine(url: String) -> Verdict {
    let engine = HttpExecutor::new(&url, Duration::from_secs(5), true).unwrap();
    let verifier = Verifier::with_engine(engine);
    tokio::task::spawn_blocking(move || verifier.verify(&request_bytes()))
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_http_executor_state_root() {
    let url = engine_app(json!({ "stateRoot": claimed_root() })).await;
    let verdict = verify_with_engine(url).await;
    assert_eq!(verdict, Verdict::Accepted { state_root: claimed_root() });
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_http_executor_error_body() {
    let url = engine_app(json!({ "error": "insufficient funds" })).await;
    let verdict = verify_with_engine(url).await;
    match verdict {
        Verdict::ExecutionFailure(err) => assert_eq!(err.to_string(), "insufficient funds"),
        other => panic!("unexpected verdict {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_http_executor_unreachable() {
    // Bind then drop to get a port nothing listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let verdict = verify_with_engine(url).await;
    assert!(matches!(verdict, Verdict::ExecutionFailure(_)));
}
