use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use super::types::{GenerateContentRequest, GenerateContentResponse};
use super::GenerativeModel;
use crate::config::GeminiConfig;
use crate::error::GeminiError;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// HTTP client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: Arc<str>,
    http_client: HttpClient,
    base_url: Arc<str>,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self, GeminiError> {
        if api_key.trim().is_empty() {
            return Err(GeminiError::MissingApiKey);
        }
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            api_key: Arc::from(api_key),
            http_client,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        })
    }

    pub fn from_config(config: &GeminiConfig) -> Result<Self, GeminiError> {
        let api_key = config.api_key.as_deref().unwrap_or_default();
        Self::new(
            api_key,
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        debug!(model, turns = request.contents.len(), "Sending generateContent request");

        let response = self
            .http_client
            .post(self.endpoint(model))
            .header(API_KEY_HEADER, self.api_key.as_ref())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(model, status = status.as_u16(), "Gemini request failed");
            return Err(GeminiError::from_status(status.as_u16(), &body));
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| GeminiError::Decode(e.to_string()))?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                model,
                prompt_tokens = usage.prompt_token_count,
                output_tokens = usage.candidates_token_count,
                "Gemini usage"
            );
        }
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_rejected() {
        let err = GeminiClient::new("  ", "http://localhost", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, GeminiError::MissingApiKey));
    }

    #[test]
    fn endpoint_strips_trailing_slash() {
        let client =
            GeminiClient::new("key", "http://localhost:9/v1beta/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.endpoint("gemini-3-flash-preview"),
            "http://localhost:9/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }
}
