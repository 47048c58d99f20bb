//! HTTP surface for the Wordle agent, built on Axum.
//!
//! Three routes: the JSON-RPC gameplay endpoint, a health probe, and the
//! agent card served verbatim from a file loaded once at startup.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::routing::post;
use serde_json::json;

use crate::dictionary::Dictionary;
use crate::handler::WordleHandler;
use crate::types::JsonRpcResponse;

/// The agent capability document, validated once at load time and served
/// verbatim afterwards.
#[derive(Clone)]
pub struct AgentCard(Arc<str>);

impl AgentCard {
    /// Read and validate the card from `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read agent card {}", path.display()))?;
        serde_json::from_str::<serde_json::Value>(&contents)
            .with_context(|| format!("agent card {} is not valid JSON", path.display()))?;
        Ok(Self(contents.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Shared state for the HTTP routes.
struct AppState<D> {
    handler: Arc<WordleHandler<D>>,
    agent_card: AgentCard,
}

impl<D> Clone for AppState<D> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            agent_card: self.agent_card.clone(),
        }
    }
}

/// Builder for the Wordle agent HTTP server.
pub struct WordleServer<D> {
    handler: Arc<WordleHandler<D>>,
    agent_card: AgentCard,
    addr: String,
}

impl<D: Dictionary> WordleServer<D> {
    pub fn new(handler: WordleHandler<D>, agent_card: AgentCard) -> Self {
        Self {
            handler: Arc::new(handler),
            agent_card,
            addr: "0.0.0.0:5001".to_string(),
        }
    }

    /// Set the bind address (default: `0.0.0.0:5001`).
    pub fn bind(mut self, addr: impl Into<String>) -> Self {
        self.addr = addr.into();
        self
    }

    /// Build the Axum router without starting the server.
    pub fn router(&self) -> Router {
        let state = AppState {
            handler: Arc::clone(&self.handler),
            agent_card: self.agent_card.clone(),
        };

        Router::new()
            .route("/health", get(handle_health))
            .route("/.well-known/agent.json", get(handle_agent_card::<D>))
            .route("/a2a/wordle", post(handle_rpc::<D>))
            .with_state(state)
    }

    /// Run the server (blocks until shutdown).
    pub async fn run(self) -> anyhow::Result<()> {
        let router = self.router();
        let listener = tokio::net::TcpListener::bind(&self.addr)
            .await
            .with_context(|| format!("failed to bind {}", self.addr))?;
        tracing::info!("wordle agent listening on {}", self.addr);
        axum::serve(listener, router).await?;
        Ok(())
    }
}

/// `GET /health`
async fn handle_health() -> Json<serde_json::Value> {
    Json(json!({"status": "healthy", "agent": "wordle"}))
}

/// `GET /.well-known/agent.json`
async fn handle_agent_card<D: Dictionary>(
    State(state): State<AppState<D>>,
) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        state.agent_card.as_str().to_string(),
    )
}

/// `POST /a2a/wordle`
///
/// Always HTTP 200; faults travel inside the JSON-RPC envelope.
async fn handle_rpc<D: Dictionary>(
    State(state): State<AppState<D>>,
    body: Bytes,
) -> Json<JsonRpcResponse> {
    Json(state.handler.handle(&body))
}
