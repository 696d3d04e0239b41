//! Gemini transport
//!
//! Typed `generateContent` wire model plus the [`GenerativeModel`] seam the
//! agenda generator and chat sessions talk through.

pub mod client;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;

use crate::error::GeminiError;
pub use client::GeminiClient;
pub use types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
    SystemInstruction,
};

/// A remote generative model reachable through `generateContent`.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError>;
}
