use std::sync::Arc;

use tracing::{debug, info};

use crate::agenda::AnalysisResult;
use crate::error::ChatError;
use crate::gemini::{Content, GenerateContentRequest, GenerativeModel, Part, SystemInstruction};
use crate::ingest::UploadedFile;

/// Build the grounding instruction from the analysis title and summary.
pub fn system_prompt(analysis: &AnalysisResult) -> String {
    let title = non_blank(&analysis.title).unwrap_or("Unknown");
    let summary = non_blank(&analysis.summary).unwrap_or("N/A");
    format!(
        "You are a helpful AI meeting assistant.\n\
         The user has uploaded a document which has been analyzed into a meeting agenda.\n\n\
         Meeting Context:\n\
         Title: {title}\n\
         Summary: {summary}\n\n\
         Answer questions based on the uploaded document content and the generated agenda.\n\
         Be concise, professional, and helpful."
    )
}

fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Conversation with the chat model, scoped to one document and its agenda.
///
/// The REST endpoint is stateless, so the session replays its accepted
/// history on every turn. A failed turn leaves the history unchanged.
pub struct ChatSession {
    model: Arc<dyn GenerativeModel>,
    model_name: String,
    system_instruction: SystemInstruction,
    document: Part,
    history: Vec<Content>,
}

impl ChatSession {
    pub fn new(
        model: Arc<dyn GenerativeModel>,
        model_name: impl Into<String>,
        file: &UploadedFile,
        analysis: &AnalysisResult,
    ) -> Self {
        let model_name = model_name.into();
        info!(model = %model_name, document = %file.name, "Created chat session");
        Self {
            model,
            model_name,
            system_instruction: SystemInstruction::new(system_prompt(analysis)),
            document: Part::inline_data(&file.mime_type, &file.data),
            history: Vec::new(),
        }
    }

    /// Accepted turns so far, oldest first.
    pub fn history(&self) -> &[Content] {
        &self.history
    }

    /// Send one user turn. The first turn also carries the document inline.
    ///
    /// Returns `Ok(None)` when the model answers without any text.
    pub async fn send_message(
        &mut self,
        text: &str,
        is_first_turn: bool,
    ) -> Result<Option<String>, ChatError> {
        let mut parts = Vec::with_capacity(2);
        if is_first_turn {
            parts.push(self.document.clone());
        }
        parts.push(Part::text(text));
        let turn = Content::user(parts);

        let mut contents = self.history.clone();
        contents.push(turn.clone());
        let request = GenerateContentRequest {
            contents,
            system_instruction: Some(self.system_instruction.clone()),
            generation_config: None,
        };

        debug!(first_turn = is_first_turn, history = self.history.len(), "Sending chat turn");
        let response = self
            .model
            .generate_content(&self.model_name, &request)
            .await?;

        let reply = response.text();
        if let Some(content) = response.first_content().filter(|c| !c.parts.is_empty()) {
            self.history.push(turn);
            self.history.push(content.clone());
        }
        Ok(reply)
    }
}
