use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{info, warn};

use super::model::AnalysisResult;
use crate::config::GeminiConfig;
use crate::error::GenerationError;
use crate::gemini::{Content, GenerateContentRequest, GenerationConfig, GenerativeModel, Part};

const AGENDA_INSTRUCTION: &str = "Analyze this document and generate a structured meeting agenda. \
Identify key stakeholders who should attend, the topics to cover, and estimate the time to spend on each topic. \
Create a logical flow for the meeting.";

const JSON_MIME_TYPE: &str = "application/json";

/// Response contract sent as `responseSchema` (Gemini OpenAPI subset).
pub fn agenda_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": {"type": "STRING", "description": "Proposed title for the meeting"},
            "summary": {"type": "STRING", "description": "Brief summary of the meeting goals"},
            "date": {"type": "STRING", "description": "Suggested date or relative time (e.g. 'Next Monday')"},
            "stakeholders": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": {"type": "STRING"},
                        "role": {"type": "STRING"},
                        "relevance": {"type": "STRING", "description": "Why they should be there"}
                    },
                    "required": ["name", "role", "relevance"]
                }
            },
            "agenda": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": {"type": "STRING"},
                        "topic": {"type": "STRING"},
                        "durationMinutes": {"type": "INTEGER", "description": "Estimated time in minutes"},
                        "description": {"type": "STRING", "description": "Details about this agenda item"},
                        "speaker": {"type": "STRING", "description": "Suggested speaker for this item"}
                    },
                    "required": ["id", "topic", "durationMinutes", "description"]
                }
            }
        },
        "required": ["title", "summary", "stakeholders", "agenda"]
    })
}

/// One-shot document analysis against the configured analysis model.
pub struct AgendaGenerator {
    model: Arc<dyn GenerativeModel>,
    model_name: String,
    temperature: f64,
}

impl AgendaGenerator {
    pub fn new(model: Arc<dyn GenerativeModel>, model_name: impl Into<String>, temperature: f64) -> Self {
        Self {
            model,
            model_name: model_name.into(),
            temperature,
        }
    }

    pub fn from_config(model: Arc<dyn GenerativeModel>, config: &GeminiConfig) -> Self {
        Self::new(model, config.analysis_model.clone(), config.temperature)
    }

    pub fn build_request(&self, data: &str, mime_type: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::user(vec![
                Part::inline_data(mime_type, data),
                Part::text(AGENDA_INSTRUCTION),
            ])],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                temperature: Some(self.temperature),
                response_mime_type: Some(JSON_MIME_TYPE.to_string()),
                response_schema: Some(agenda_response_schema()),
                ..Default::default()
            }),
        }
    }

    /// Generate an agenda for a base64 document. All-or-nothing.
    pub async fn generate(&self, data: &str, mime_type: &str) -> Result<AnalysisResult, GenerationError> {
        if data.is_empty() {
            return Err(GenerationError::EmptyDocument);
        }

        let request = self.build_request(data, mime_type);
        let response = self
            .model
            .generate_content(&self.model_name, &request)
            .await
            .inspect_err(|e| warn!(error = %e, "Agenda generation call failed"))?;

        let Some(text) = response.text().filter(|t| !t.trim().is_empty()) else {
            warn!(
                finish_reason = response.finish_reason().unwrap_or("none"),
                "Agenda generation returned no text"
            );
            return Err(GenerationError::EmptyResponse);
        };

        let analysis = parse_analysis(&text)
            .inspect_err(|e| warn!(error = %e, "Agenda response did not match schema"))?;

        info!(
            title = %analysis.title,
            stakeholders = analysis.stakeholders.len(),
            items = analysis.agenda.len(),
            minutes = analysis.total_minutes(),
            "Generated agenda"
        );
        Ok(analysis)
    }
}

/// Decode the model's JSON reply, tolerating a Markdown code fence.
pub fn parse_analysis(text: &str) -> Result<AnalysisResult, GenerationError> {
    Ok(serde_json::from_str(strip_code_fence(text))?)
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (`json`, `JSON`, ...) up to the first newline.
    let body = match rest.split_once('\n') {
        Some((info, body)) if !info.contains('{') => body,
        _ => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}
