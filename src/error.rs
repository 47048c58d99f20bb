//! Protocol fault type with JSON-RPC error codes.
//!
//! Faults never surface as HTTP errors; the handler folds them into a
//! well-formed JSON-RPC `error` object on an HTTP 200 response.

use serde::Deserialize;
use serde::Serialize;

/// Wire-level JSON-RPC error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// A protocol fault raised while handling a request.
#[derive(Debug)]
pub struct A2AError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

impl A2AError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: impl Into<serde_json::Value>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Convert to the wire error object.
    pub fn to_jsonrpc_error(&self) -> JsonRpcError {
        JsonRpcError {
            code: self.code,
            message: self.message.clone(),
            data: self.data.clone(),
        }
    }

    // ====== Factory methods, fixed codes ======

    pub fn parse_error(detail: impl Into<serde_json::Value>) -> Self {
        Self::new(-32700, "Parse error").with_data(detail)
    }

    pub fn invalid_request(detail: impl Into<serde_json::Value>) -> Self {
        Self::new(-32600, "Invalid Request").with_data(detail)
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(-32601, "Method not found").with_data(format!("Unknown method: {method}"))
    }

    pub fn invalid_params(detail: impl Into<serde_json::Value>) -> Self {
        Self::new(-32602, "Invalid params").with_data(detail)
    }

    pub fn internal_error(detail: impl Into<serde_json::Value>) -> Self {
        Self::new(-32603, "Internal error").with_data(detail)
    }
}

impl std::fmt::Display for A2AError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "A2AError({}): {}", self.code, self.message)
    }
}

impl std::error::Error for A2AError {}
