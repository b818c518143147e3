// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NodeError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("No verification endpoint registered")]
    NoEndpoint,
    #[error("Configuration error: {0}")]
    Config(String),
}

impl IntoResponse for NodeError {
    fn into_response(self) -> Response {
        let status = match &self {
            NodeError::Network(_) => StatusCode::BAD_GATEWAY,
            NodeError::NoEndpoint => StatusCode::SERVICE_UNAVAILABLE,
            NodeError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

impl From<reqwest::Error> for NodeError {
    fn from(e: reqwest::Error) -> Self {
        NodeError::Network(e.to_string())
    }
}
