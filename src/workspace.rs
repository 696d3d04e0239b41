//! Active document workspace
//!
//! Owns the current file, its analysis, the chat session and the visible
//! transcript, and turns every generation/chat failure into user-facing
//! state. Each file selection gets a generation token; replies that come
//! back under an older token are dropped.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::agenda::{AgendaGenerator, AnalysisResult};
use crate::chat::{ChatMessage, ChatSession, Transcript};
use crate::config::GeminiConfig;
use crate::error::{ChatError, GenerationError, WorkspaceError};
use crate::gemini::GenerativeModel;
use crate::ingest::UploadedFile;

pub const GENERATION_FAILED_MESSAGE: &str =
    "Failed to analyze the document. Please try a different file or ensure it contains readable text.";
pub const CHAT_APOLOGY_MESSAGE: &str =
    "I'm sorry, I encountered an error processing your request. Please try again.";

pub fn welcome_message(file_name: &str) -> String {
    format!(
        "Hi! I've analyzed \"{file_name}\". You can ask me questions about the agenda, stakeholders, or specific details in the document."
    )
}

#[derive(Debug)]
pub enum UploadOutcome {
    Ready(Arc<AnalysisResult>),
    /// Generation failed; the selection was reset and the error recorded.
    Failed(GenerationError),
    /// The file was cleared or replaced while the call was in flight.
    Discarded,
}

#[derive(Debug)]
pub enum ChatOutcome {
    Replied(String),
    /// The model answered without text. Nothing was appended.
    NoReply,
    /// The turn failed; one apology was appended.
    Failed(ChatError),
    /// The session was replaced while the call was in flight.
    Discarded,
}

/// Point-in-time copy of the workspace for rendering.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceSnapshot {
    pub file: Option<Arc<UploadedFile>>,
    pub analysis: Option<Arc<AnalysisResult>>,
    pub transcript: Transcript,
    pub is_processing: bool,
    pub is_sending: bool,
    pub error: Option<String>,
}

#[derive(Default)]
struct WorkspaceState {
    generation: u64,
    file: Option<Arc<UploadedFile>>,
    analysis: Option<Arc<AnalysisResult>>,
    session: Option<Arc<tokio::sync::Mutex<ChatSession>>>,
    transcript: Transcript,
    is_processing: bool,
    is_sending: bool,
    error: Option<String>,
}

impl WorkspaceState {
    /// Drop everything tied to the current selection and invalidate
    /// outstanding calls.
    fn reset(&mut self) {
        self.generation += 1;
        self.file = None;
        self.analysis = None;
        self.session = None;
        self.transcript = Transcript::new();
        self.is_processing = false;
        self.is_sending = false;
        self.error = None;
    }
}

pub struct Workspace {
    generator: AgendaGenerator,
    chat_model: Arc<dyn GenerativeModel>,
    chat_model_name: String,
    state: Mutex<WorkspaceState>,
}

impl Workspace {
    pub fn new(
        generator: AgendaGenerator,
        chat_model: Arc<dyn GenerativeModel>,
        chat_model_name: impl Into<String>,
    ) -> Self {
        Self {
            generator,
            chat_model,
            chat_model_name: chat_model_name.into(),
            state: Mutex::new(WorkspaceState::default()),
        }
    }

    pub fn from_config(model: Arc<dyn GenerativeModel>, config: &GeminiConfig) -> Self {
        let generator = AgendaGenerator::from_config(model.clone(), config);
        Self::new(generator, model, config.chat_model.clone())
    }

    /// Select a file and run agenda generation for it.
    ///
    /// Replaces any previous file, analysis and chat state. Rejected with
    /// `Busy` while another generation for a live selection is in flight.
    pub async fn upload(&self, file: UploadedFile) -> Result<UploadOutcome, WorkspaceError> {
        let file = Arc::new(file);
        let token = {
            let mut state = self.state.lock();
            if state.is_processing {
                return Err(WorkspaceError::Busy("generation"));
            }
            state.reset();
            state.file = Some(file.clone());
            state.is_processing = true;
            state.generation
        };
        info!(name = %file.name, mime = %file.mime_type, size = file.size, "Generating agenda");

        let result = self.generator.generate(&file.data, &file.mime_type).await;

        let mut state = self.state.lock();
        if state.generation != token {
            debug!(name = %file.name, "Discarding generation result for a stale selection");
            return Ok(UploadOutcome::Discarded);
        }
        state.is_processing = false;

        match result {
            Ok(analysis) => {
                let analysis = Arc::new(analysis);
                let session = ChatSession::new(
                    self.chat_model.clone(),
                    self.chat_model_name.clone(),
                    &file,
                    &analysis,
                );
                state.analysis = Some(analysis.clone());
                state.session = Some(Arc::new(tokio::sync::Mutex::new(session)));
                state.transcript.push(ChatMessage::model(welcome_message(&file.name)));
                Ok(UploadOutcome::Ready(analysis))
            }
            Err(err) => {
                warn!(name = %file.name, error = %err, "Agenda generation failed");
                state.file = None;
                state.error = Some(GENERATION_FAILED_MESSAGE.to_string());
                Ok(UploadOutcome::Failed(err))
            }
        }
    }

    /// Drop the current file, its analysis and the chat. Any generation
    /// still in flight will be discarded when it returns.
    pub fn clear_file(&self) {
        self.state.lock().reset();
        info!("Cleared document");
    }

    /// Send one chat message for the active document.
    pub async fn send_message(&self, text: &str) -> Result<ChatOutcome, WorkspaceError> {
        if text.trim().is_empty() {
            return Err(WorkspaceError::EmptyMessage);
        }

        let (token, session, is_first_turn) = {
            let mut state = self.state.lock();
            if state.file.is_none() {
                return Err(WorkspaceError::NoDocument);
            }
            let Some(session) = state.session.clone() else {
                return Err(WorkspaceError::NoSession);
            };
            if state.is_sending {
                return Err(WorkspaceError::Busy("chat"));
            }
            let is_first_turn = state.transcript.next_send_is_first_turn();
            state.transcript.push(ChatMessage::user(text));
            state.is_sending = true;
            (state.generation, session, is_first_turn)
        };

        let result = session.lock().await.send_message(text, is_first_turn).await;

        let mut state = self.state.lock();
        if state.generation != token {
            debug!("Discarding chat reply for a replaced session");
            return Ok(ChatOutcome::Discarded);
        }
        state.is_sending = false;

        match result {
            Ok(Some(reply)) => {
                state.transcript.push(ChatMessage::model(reply.clone()));
                Ok(ChatOutcome::Replied(reply))
            }
            Ok(None) => Ok(ChatOutcome::NoReply),
            Err(err) => {
                warn!(error = %err, "Chat turn failed");
                state.transcript.push(ChatMessage::model(CHAT_APOLOGY_MESSAGE));
                Ok(ChatOutcome::Failed(err))
            }
        }
    }

    pub fn snapshot(&self) -> WorkspaceSnapshot {
        let state = self.state.lock();
        WorkspaceSnapshot {
            file: state.file.clone(),
            analysis: state.analysis.clone(),
            transcript: state.transcript.clone(),
            is_processing: state.is_processing,
            is_sending: state.is_sending,
            error: state.error.clone(),
        }
    }

    pub fn analysis(&self) -> Option<Arc<AnalysisResult>> {
        self.state.lock().analysis.clone()
    }

    pub fn transcript(&self) -> Transcript {
        self.state.lock().transcript.clone()
    }
}
