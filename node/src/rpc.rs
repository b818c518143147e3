// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! JSON-RPC 2.0 `execute` namespace.

use reqwest::Url;
use serde_json::{json, Value};

use crate::api::{ClientVersionV1, RpcError, RpcRequest, RpcResponse, JSONRPC_VERSION};
use crate::registry::Registry;

pub const EXCHANGE_CAPABILITIES: &str = "execute_exchangeCapabilities";
pub const REGISTER_CLIENT_V1: &str = "execute_registerClientV1";

/// Methods this node serves, as reported by capability exchange.
pub const CAPABILITIES: [&str; 2] = [EXCHANGE_CAPABILITIES, REGISTER_CLIENT_V1];

/// Handle one raw JSON-RPC body.
pub async fn handle(registry: &Registry, body: &[u8]) -> RpcResponse {
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => return RpcResponse::error(Value::Null, RpcError::new(RpcError::PARSE_ERROR, e.to_string())),
    };
    let id = value.get("id").cloned().unwrap_or(Value::Null);

    let request: RpcRequest = match serde_json::from_value(value) {
        Ok(request) => request,
        Err(e) => return RpcResponse::error(id, RpcError::new(RpcError::INVALID_REQUEST, e.to_string())),
    };
    if request.jsonrpc != JSONRPC_VERSION {
        return RpcResponse::error(id, RpcError::new(RpcError::INVALID_REQUEST, "jsonrpc must be \"2.0\""));
    }

    match dispatch(registry, &request.method, request.params).await {
        Ok(result) => RpcResponse::result(request.id, result),
        Err(error) => RpcResponse::error(request.id, error),
    }
}

async fn dispatch(registry: &Registry, method: &str, params: Value) -> Result<Value, RpcError> {
    match method {
        EXCHANGE_CAPABILITIES => Ok(json!(CAPABILITIES)),
        REGISTER_CLIENT_V1 => {
            let client = register_params(params)?;
            validate_endpoint(&client.endpoint)?;
            let previous = registry.register(client.clone()).await;
            metrics::counter!("stateproof_registrations_total", 1);
            tracing::info!(
                name = %client.name,
                version = %client.version,
                endpoint = %client.endpoint,
                replaced = previous.is_some(),
                "Registered verification client"
            );
            Ok(Value::Bool(true))
        }
        other => Err(RpcError::new(
            RpcError::METHOD_NOT_FOUND,
            format!("the method {other} does not exist/is not available"),
        )),
    }
}

/// Accepts positional `[client]` or a bare `client` object.
fn register_params(params: Value) -> Result<ClientVersionV1, RpcError> {
    let client = match params {
        Value::Array(mut items) if items.len() == 1 => items.remove(0),
        obj @ Value::Object(_) => obj,
        _ => {
            return Err(RpcError::new(
                RpcError::INVALID_PARAMS,
                "expected a single client version object",
            ))
        }
    };
    serde_json::from_value(client).map_err(|e| RpcError::new(RpcError::INVALID_PARAMS, e.to_string()))
}

fn validate_endpoint(endpoint: &str) -> Result<(), RpcError> {
    let url = Url::parse(endpoint)
        .map_err(|e| RpcError::new(RpcError::INVALID_PARAMS, format!("invalid endpoint {endpoint:?}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(RpcError::new(
            RpcError::INVALID_PARAMS,
            format!("invalid endpoint {endpoint:?}: unsupported scheme {scheme}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_params_shapes() {
        let client = json!({"name": "geth", "version": "1.14.0", "endpoint": "http://127.0.0.1:8555/verifyV1"});
        assert!(register_params(json!([client.clone()])).is_ok());
        assert!(register_params(client.clone()).is_ok());
        assert!(register_params(json!([client.clone(), client])).is_err());
        assert!(register_params(json!([{"name": "geth"}])).is_err());
    }

    #[test]
    fn test_validate_endpoint() {
        assert!(validate_endpoint("https://verifier.example:443/verifyV1").is_ok());
        assert_eq!(
            validate_endpoint("not a url").unwrap_err().code,
            RpcError::INVALID_PARAMS
        );
        assert_eq!(
            validate_endpoint("ftp://host/verifyV1").unwrap_err().code,
            RpcError::INVALID_PARAMS
        );
    }
}
