//! JSON-RPC transport.
//!
//! # Responsibilities
//! - Encode a JSON-RPC 2.0 request for one endpoint
//! - Classify the reply (HTTP status, remote error, missing result)
//!
//! Timeouts are enforced by the failover client around each call, so a
//! transport only needs to report what the endpoint said.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::blockchain::types::{Endpoint, RpcError, RpcResult};

/// JSON-RPC request envelope.
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: &'a [Value],
}

impl<'a> RpcRequest<'a> {
    pub fn new(method: &'a str, params: &'a [Value]) -> Self {
        Self {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        }
    }
}

/// JSON-RPC response envelope. Either field may be absent.
#[derive(Debug, Default, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl RpcResponse {
    /// Reduce the envelope to the result payload or an attempt error.
    pub fn into_result(self) -> RpcResult<Value> {
        if let Some(error) = self.error.filter(|e| !e.is_null()) {
            let message = match error.get("message").and_then(Value::as_str) {
                Some(message) => match error.get("code") {
                    Some(code) => format!("{} (code {})", message, code),
                    None => message.to_string(),
                },
                None => error.to_string(),
            };
            return Err(RpcError::Remote(message));
        }

        match self.result {
            Some(result) if !result.is_null() => Ok(result),
            _ => Err(RpcError::EmptyResult),
        }
    }
}

/// A way of delivering one JSON-RPC call to one endpoint.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn call(&self, endpoint: &Endpoint, method: &str, params: &[Value]) -> RpcResult<Value>;
}

/// HTTP POST transport backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(user_agent: &str) -> RpcResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| RpcError::Transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn call(&self, endpoint: &Endpoint, method: &str, params: &[Value]) -> RpcResult<Value> {
        let request = RpcRequest::new(method, params);

        let response = self
            .client
            .post(endpoint.url().clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| RpcError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RpcError::Status(status.as_u16()));
        }

        let envelope: RpcResponse = response
            .json()
            .await
            .map_err(|e| RpcError::InvalidResponse(e.to_string()))?;

        envelope.into_result()
    }
}
