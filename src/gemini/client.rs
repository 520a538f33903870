use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use super::types::{api_error_message, GenerateContentRequest, GenerateContentResponse};
use super::{CompletionService, GenerationSettings, Part};
use crate::error::{Result, ToolbeltError};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Gemini `generateContent` client
pub struct GeminiClient {
    http: Client,
    api_key: String,
    settings: GenerationSettings,
}

impl GeminiClient {
    pub fn new(api_key: String, settings: GenerationSettings) -> Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http,
            api_key,
            settings,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", API_BASE, self.settings.model)
    }
}

impl CompletionService for GeminiClient {
    fn generate(&self, parts: &[Part]) -> Result<String> {
        let request = GenerateContentRequest::new(parts, &self.settings);
        debug!(model = %self.settings.model, parts = parts.len(), "sending generateContent request");

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()?;

        let status = response.status();
        debug!(%status, "received generateContent response");

        if !status.is_success() {
            let body = response.text()?;
            debug!(%status, "generateContent request failed");
            return Err(ToolbeltError::Service(api_error_message(status, &body)));
        }

        let body: GenerateContentResponse = response.json()?;
        body.into_text().map_err(ToolbeltError::Service)
    }
}
