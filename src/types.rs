//! A2A protocol wire types.
//!
//! Everything the agent exchanges over `POST /a2a/wordle`: the JSON-RPC
//! envelope, messages and their content parts, and the task/artifact result
//! shape. Field names follow the A2A JSON casing (`messageId`, `contextId`,
//! kebab-case task states).

use chrono::SecondsFormat;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::error::A2AError;
use crate::error::JsonRpcError;

// ============================================================
// Messages
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
    System,
}

/// One content part of a message. Tagged by `kind`, so a part can only ever
/// carry the payload matching its kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Part {
    Text { text: String },
    Data { data: serde_json::Value },
    File {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file_url: Option<String>,
    },
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    pub fn data(data: serde_json::Value) -> Self {
        Part::Data { data }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub kind: MessageKind,
    pub role: Role,
    pub parts: Vec<Part>,
    #[serde(rename = "messageId")]
    pub message_id: String,
    #[serde(rename = "taskId", skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl Message {
    /// Build an agent reply carrying a single text part.
    pub fn agent_text(text: impl Into<String>, task_id: &str) -> Self {
        Self {
            kind: MessageKind::Message,
            role: Role::Agent,
            parts: vec![Part::text(text)],
            message_id: new_id(),
            task_id: Some(task_id.to_string()),
            metadata: None,
        }
    }

    /// The content of the first text part, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            Part::Text { text } => Some(text.as_str()),
            _ => None,
        })
    }
}

// ============================================================
// Tasks and artifacts
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskState {
    Working,
    Completed,
    InputRequired,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub state: TaskState,
    /// RFC3339 UTC.
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(rename = "artifactId")]
    pub artifact_id: String,
    pub name: String,
    pub parts: Vec<Part>,
}

impl Artifact {
    pub fn named(name: impl Into<String>, parts: Vec<Part>) -> Self {
        Self {
            artifact_id: new_id(),
            name: name.into(),
            parts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResult {
    pub id: String,
    #[serde(rename = "contextId")]
    pub context_id: String,
    pub status: TaskStatus,
    pub artifacts: Vec<Artifact>,
    pub history: Vec<Message>,
    pub kind: String,
}

// ============================================================
// Method parameters
// ============================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PushNotificationConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub authentication: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageConfiguration {
    #[serde(default)]
    pub blocking: bool,
    #[serde(rename = "acceptedOutputModes", default)]
    pub accepted_output_modes: Vec<String>,
    #[serde(rename = "pushNotificationConfig", default)]
    pub push_notification_config: Option<PushNotificationConfig>,
}

/// Parameters for `message/send`.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageSendParams {
    pub message: Message,
    #[serde(default)]
    pub configuration: MessageConfiguration,
}

/// Parameters for `execute`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecuteParams {
    #[serde(rename = "contextId", default)]
    pub context_id: Option<String>,
    #[serde(rename = "taskId", default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

// ============================================================
// JSON-RPC envelope
// ============================================================

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub jsonrpc: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Always carries exactly one of `result` / `error`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<TaskResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn result(id: impl Into<String>, result: TaskResult) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: id.into(),
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: impl Into<String>, error: A2AError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: id.into(),
            result: None,
            error: Some(error.to_jsonrpc_error()),
        }
    }
}

// ============================================================
// Helpers
// ============================================================

/// Mint a globally unique identifier (context/task/message/artifact ids).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Current time as RFC3339 UTC, whole seconds.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn part_round_trips_through_kind_tag() {
        let parsed: Part =
            serde_json::from_value(json!({"kind": "text", "text": "CRANE"})).unwrap();
        assert_eq!(parsed, Part::text("CRANE"));

        let value = serde_json::to_value(Part::data(json!({"attempts": 1}))).unwrap();
        assert_eq!(value, json!({"kind": "data", "data": {"attempts": 1}}));
    }

    #[test]
    fn part_rejects_mismatched_payload() {
        // A text part must carry `text`; `data` does not satisfy it.
        let result: Result<Part, _> =
            serde_json::from_value(json!({"kind": "text", "data": {}}));
        assert!(result.is_err());
    }

    #[test]
    fn file_parts_tolerate_a_missing_url() {
        let parsed: Part = serde_json::from_value(json!({"kind": "file"})).unwrap();
        assert_eq!(parsed, Part::File { file_url: None });
        assert_eq!(serde_json::to_value(&parsed).unwrap(), json!({"kind": "file"}));
    }

    #[test]
    fn task_state_uses_kebab_case() {
        assert_eq!(
            serde_json::to_value(TaskState::InputRequired).unwrap(),
            json!("input-required")
        );
        assert_eq!(
            serde_json::to_value(TaskState::Completed).unwrap(),
            json!("completed")
        );
    }

    #[test]
    fn agent_text_links_task_and_first_text() {
        let message = Message::agent_text("hello", "task-1");
        assert_eq!(message.role, Role::Agent);
        assert_eq!(message.task_id.as_deref(), Some("task-1"));
        assert_eq!(message.first_text(), Some("hello"));
    }

    #[test]
    fn send_params_tolerate_missing_configuration() {
        let params: MessageSendParams = serde_json::from_value(json!({
            "message": {
                "kind": "message",
                "role": "user",
                "parts": [{"kind": "text", "text": "CRANE"}],
                "messageId": "m1"
            }
        }))
        .unwrap();
        assert!(!params.configuration.blocking);
        assert!(params.configuration.accepted_output_modes.is_empty());
    }
}
