use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use tokio::sync::Notify;

use super::types::{GenerateContentRequest, GenerateContentResponse};
use super::GenerativeModel;
use crate::error::GeminiError;

/// Replays queued replies in order and records every request it receives.
#[derive(Default)]
pub(crate) struct ScriptedModel {
    replies: Mutex<VecDeque<Result<GenerateContentResponse, GeminiError>>>,
    requests: Mutex<Vec<(String, GenerateContentRequest)>>,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl ScriptedModel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply_text(&self, text: &str) {
        self.replies.lock().push_back(Ok(text_response(text)));
    }

    pub fn reply(&self, response: GenerateContentResponse) {
        self.replies.lock().push_back(Ok(response));
    }

    pub fn fail(&self, error: GeminiError) {
        self.replies.lock().push_back(Err(error));
    }

    /// Hold every call until the returned handle is notified.
    pub fn hold(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.gate.lock() = Some(notify.clone());
        notify
    }

    pub fn requests(&self) -> Vec<(String, GenerateContentRequest)> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        self.requests
            .lock()
            .push((model.to_string(), request.clone()));
        let gate = self.gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(GeminiError::Decode("no scripted reply".into())))
    }
}

pub(crate) fn text_response(text: &str) -> GenerateContentResponse {
    serde_json::from_value(json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    }))
    .unwrap()
}

pub(crate) fn empty_response() -> GenerateContentResponse {
    serde_json::from_value(json!({"candidates": [{"finishReason": "SAFETY"}]})).unwrap()
}

pub(crate) const AGENDA_JSON: &str = r#"{
  "title": "Q3 Launch Sync",
  "summary": "Align on launch scope and owners.",
  "date": "Next Monday",
  "stakeholders": [
    {"name": "Ada Park", "role": "PM", "relevance": "Owns the launch plan"},
    {"name": "Lin Ortiz", "role": "Eng Lead", "relevance": "Owns delivery"}
  ],
  "agenda": [
    {"id": "1", "topic": "Scope", "durationMinutes": 30, "description": "Confirm scope", "speaker": "Ada Park"},
    {"id": "2", "topic": "Risks", "durationMinutes": 15, "description": "Open risks"},
    {"id": "3", "topic": "Owners", "durationMinutes": 60, "description": "Assign owners", "speaker": "Lin Ortiz"}
  ]
}"#;
