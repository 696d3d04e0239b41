//! agendai: turn a document into a timed meeting agenda with Gemini, then
//! chat about it.

pub mod agenda;
pub mod chat;
pub mod config;
pub mod error;
pub mod gemini;
pub mod ingest;
pub mod render;
pub mod workspace;

pub use agenda::{AgendaGenerator, AgendaItem, AnalysisResult, Stakeholder};
pub use chat::{ChatMessage, ChatRole, ChatSession, Transcript};
pub use config::Config;
pub use error::{ChatError, GeminiError, GenerationError, IngestionError, WorkspaceError};
pub use gemini::{GeminiClient, GenerativeModel};
pub use ingest::UploadedFile;
pub use workspace::{ChatOutcome, UploadOutcome, Workspace};
