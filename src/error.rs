use thiserror::Error;

/// Failures talking to the Gemini REST API.
#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("Gemini request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Gemini authentication failed: {message}. Check GEMINI_API_KEY or the [gemini] api_key setting")]
    Authentication { message: String },

    #[error("Gemini rate limit or quota exceeded: {message}")]
    RateLimit { message: String },

    #[error("Gemini rejected the request: {message}")]
    InvalidRequest { message: String },

    #[error("Gemini returned HTTP {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("Failed to decode Gemini response: {0}")]
    Decode(String),

    #[error("No Gemini API key configured")]
    MissingApiKey,
}

impl GeminiError {
    /// Classify a non-success HTTP status into an error variant.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = extract_error_message(body);
        match status {
            401 | 403 => Self::Authentication { message },
            429 => Self::RateLimit { message },
            400 if is_quota_message(&message) => Self::RateLimit { message },
            400 | 404 => Self::InvalidRequest { message },
            _ => Self::Provider { status, message },
        }
    }
}

fn is_quota_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("quota") || lower.contains("resource_exhausted")
}

/// Pull `error.message` out of a Google API error body, else return the body.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[derive(Debug, Error)]
pub enum IngestionError {
    #[error("Failed to read {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File {name} is empty")]
    Empty { name: String },

    #[error("File {name} is {size} bytes, over the {limit} byte inline limit")]
    TooLarge { name: String, size: u64, limit: u64 },
}

/// Agenda generation is all-or-nothing; every variant means no result.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Document payload is empty")]
    EmptyDocument,

    #[error(transparent)]
    Service(#[from] GeminiError),

    #[error("No response generated")]
    EmptyResponse,

    #[error("Response did not match the agenda schema: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A single chat turn failed. The session stays usable.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error(transparent)]
    Service(#[from] GeminiError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkspaceError {
    #[error("A {0} request is already in flight")]
    Busy(&'static str),

    #[error("No document is loaded")]
    NoDocument,

    #[error("No chat session is active")]
    NoSession,

    #[error("Message is empty")]
    EmptyMessage,
}
