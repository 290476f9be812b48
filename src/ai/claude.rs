//! Claude API integration.
//!
//! Implements the GenerativeModel trait for the Anthropic Messages API.
//! Documents ride along as base64 `document`/`image` content blocks.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{classify_http_failure, AiError, GenerationRequest, GenerativeModel};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const MAX_TOKENS: u32 = 4096;

/// Claude API backend.
pub struct ClaudeModel {
    client: Client,
    api_key: String,
    model: String,
}

impl ClaudeModel {
    /// Create a new Claude backend.
    ///
    /// Reads the API key from the ANTHROPIC_API_KEY environment variable.
    pub fn new() -> Result<Self, AiError> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| AiError::MissingApiKey("ANTHROPIC_API_KEY"))?;
        let client = Client::builder().timeout(Duration::from_secs(120)).build()?;
        Ok(Self { client, api_key, model: DEFAULT_MODEL.to_string() })
    }

    /// Create with a specific model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn request_body(&self, request: &GenerationRequest) -> ClaudeRequest {
        let mut content = Vec::with_capacity(request.media.len() + 1);
        for payload in &request.media {
            let source = ClaudeSource {
                kind: "base64".to_string(),
                media_type: payload.mime_type.clone(),
                data: payload.data.clone(),
            };
            if payload.mime_type.starts_with("image/") {
                content.push(ClaudeContentBlock::Image { source });
            } else {
                content.push(ClaudeContentBlock::Document { source });
            }
        }
        content.push(ClaudeContentBlock::Text { text: request.prompt.clone() });

        ClaudeRequest {
            model: self.model.clone(),
            max_tokens: MAX_TOKENS,
            messages: vec![ClaudeMessage { role: "user".to_string(), content }],
        }
    }
}

#[async_trait]
impl GenerativeModel for ClaudeModel {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AiError> {
        debug!(
            request_id = %request.request_id,
            model = %self.model,
            media = request.media.len(),
            "sending Claude request"
        );

        let response = self
            .client
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&self.request_body(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_http_failure(status.as_u16(), body));
        }

        let response: ClaudeResponse = response.json().await?;
        let text = response
            .content
            .first()
            .map(|block| block.text.clone())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AiError::EmptyResponse);
        }

        debug!(request_id = %request.request_id, chars = text.len(), "Claude response received");
        Ok(text)
    }

    fn name(&self) -> &str {
        "claude"
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// Claude API request structure.
#[derive(Debug, Serialize)]
struct ClaudeRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ClaudeMessage>,
}

#[derive(Debug, Serialize)]
struct ClaudeMessage {
    role: String,
    content: Vec<ClaudeContentBlock>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ClaudeContentBlock {
    Text { text: String },
    Image { source: ClaudeSource },
    Document { source: ClaudeSource },
}

#[derive(Debug, Serialize)]
struct ClaudeSource {
    #[serde(rename = "type")]
    kind: String,
    media_type: String,
    data: String,
}

/// Claude API response structure.
#[derive(Debug, Deserialize)]
struct ClaudeResponse {
    #[serde(default)]
    content: Vec<ClaudeResponseBlock>,
}

#[derive(Debug, Deserialize)]
struct ClaudeResponseBlock {
    #[serde(default)]
    text: String,
}
