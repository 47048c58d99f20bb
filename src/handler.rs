//! JSON-RPC request handling for the Wordle agent.
//!
//! One inbound body in, one envelope out. Malformed envelopes, unknown
//! methods, and bad parameters become JSON-RPC faults; everything
//! gameplay-related (wrong length, unknown word, win, loss) is a successful
//! response whose text and artifacts describe the game state.

use serde_json::json;

use crate::dictionary::Dictionary;
use crate::error::A2AError;
use crate::session::SessionStore;
use crate::session::Turn;
use crate::types::Artifact;
use crate::types::ExecuteParams;
use crate::types::JsonRpcRequest;
use crate::types::JsonRpcResponse;
use crate::types::Message;
use crate::types::MessageSendParams;
use crate::types::Part;
use crate::types::TaskResult;
use crate::types::TaskStatus;
use crate::types::new_id;
use crate::types::timestamp;

/// Processes A2A requests against a [`SessionStore`].
pub struct WordleHandler<D> {
    store: SessionStore<D>,
}

impl<D: Dictionary> WordleHandler<D> {
    pub fn new(dictionary: D) -> Self {
        Self {
            store: SessionStore::new(dictionary),
        }
    }

    /// Handle one raw request body and produce the response envelope.
    ///
    /// Never fails: every outcome, fault included, is a well-formed
    /// [`JsonRpcResponse`].
    pub fn handle(&self, body: &[u8]) -> JsonRpcResponse {
        let request: JsonRpcRequest = match serde_json::from_slice(body) {
            Ok(request) => request,
            Err(err) => {
                return JsonRpcResponse::error(String::new(), A2AError::parse_error(err.to_string()));
            }
        };

        if request.jsonrpc != "2.0" || request.id.is_empty() {
            return JsonRpcResponse::error(
                request.id,
                A2AError::invalid_request("jsonrpc must be '2.0' and id is required"),
            );
        }

        let outcome = match request.method.as_str() {
            "message/send" => self.handle_message_send(request.params),
            "execute" => self.handle_execute(request.params),
            other => Err(A2AError::method_not_found(other)),
        };

        match outcome {
            Ok(result) => JsonRpcResponse::result(request.id, result),
            Err(err) => {
                tracing::debug!(code = err.code, "request failed: {}", err.message);
                JsonRpcResponse::error(request.id, err)
            }
        }
    }

    fn handle_message_send(&self, params: serde_json::Value) -> Result<TaskResult, A2AError> {
        let params: MessageSendParams =
            serde_json::from_value(params).map_err(|err| A2AError::invalid_params(err.to_string()))?;
        tracing::debug!(
            blocking = params.configuration.blocking,
            "message/send configuration"
        );
        let task_id = params.message.task_id.clone();
        self.process_messages(vec![params.message], None, task_id)
    }

    fn handle_execute(&self, params: serde_json::Value) -> Result<TaskResult, A2AError> {
        let params: ExecuteParams =
            serde_json::from_value(params).map_err(|err| A2AError::invalid_params(err.to_string()))?;
        self.process_messages(params.messages, params.context_id, params.task_id)
    }

    /// Shared tail of both methods: resolve identifiers, advance the
    /// session with the last message's text, and render the task result.
    fn process_messages(
        &self,
        messages: Vec<Message>,
        context_id: Option<String>,
        task_id: Option<String>,
    ) -> Result<TaskResult, A2AError> {
        let context_id = non_empty(context_id).unwrap_or_else(new_id);
        let task_id = non_empty(task_id).unwrap_or_else(new_id);

        let user_message = messages
            .into_iter()
            .next_back()
            .ok_or_else(|| A2AError::internal_error("no messages provided"))?;
        let guess = extract_guess(&user_message);

        let turn = self
            .store
            .advance(&context_id, &task_id, user_message, &guess);
        Ok(build_task_result(task_id, context_id, turn))
    }
}

/// The guess is the first text part, trimmed and uppercased.
fn extract_guess(message: &Message) -> String {
    message
        .first_text()
        .map(|text| text.trim().to_uppercase())
        .unwrap_or_default()
}

fn non_empty(id: Option<String>) -> Option<String> {
    id.filter(|id| !id.is_empty())
}

fn build_task_result(task_id: String, context_id: String, turn: Turn) -> TaskResult {
    let artifacts = vec![
        Artifact::named(
            "game_state",
            vec![Part::data(json!({
                "attempts": turn.attempts,
                "max_attempts": turn.max_attempts,
                "is_complete": turn.is_complete,
            }))],
        ),
        Artifact::named(
            "wordle_feedback",
            vec![Part::data(json!({
                "feedback_emojis": turn.feedback,
            }))],
        ),
    ];

    TaskResult {
        id: task_id,
        context_id,
        status: TaskStatus {
            state: turn.state,
            timestamp: timestamp(),
            message: Some(turn.response),
        },
        artifacts,
        history: turn.history,
        kind: "task".to_string(),
    }
}
