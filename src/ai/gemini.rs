//! Google Gemini API integration.
//!
//! Implements the GenerativeModel trait against the Generative Language
//! `generateContent` endpoint. This is the default backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{classify_http_failure, AiError, GenerationRequest, GenerativeModel};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Gemini API backend.
pub struct GeminiModel {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiModel {
    /// Create a new Gemini backend.
    ///
    /// Reads the API key from the GEMINI_API_KEY environment variable.
    pub fn new() -> Result<Self, AiError> {
        let api_key =
            std::env::var("GEMINI_API_KEY").map_err(|_| AiError::MissingApiKey("GEMINI_API_KEY"))?;
        let client = Client::builder().timeout(Duration::from_secs(120)).build()?;
        Ok(Self { client, api_key, model: DEFAULT_MODEL.to_string() })
    }

    /// Create with a specific model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn request_body(&self, request: &GenerationRequest) -> GeminiRequest {
        let mut parts = vec![GeminiPart { text: Some(request.prompt.clone()), inline_data: None }];
        for payload in &request.media {
            parts.push(GeminiPart {
                text: None,
                inline_data: Some(GeminiInlineData {
                    mime_type: payload.mime_type.clone(),
                    data: payload.data.clone(),
                }),
            });
        }

        GeminiRequest {
            contents: vec![GeminiContent { parts }],
            generation_config: GeminiGenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        }
    }
}

#[async_trait]
impl GenerativeModel for GeminiModel {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AiError> {
        let url = format!("{}/{}:generateContent?key={}", BASE_URL, self.model, self.api_key);
        debug!(
            request_id = %request.request_id,
            model = %self.model,
            media = request.media.len(),
            "sending Gemini request"
        );

        let response = self
            .client
            .post(&url)
            .json(&self.request_body(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_http_failure(status.as_u16(), body));
        }

        let response: GeminiResponse = response.json().await?;
        let text: String = response
            .candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AiError::EmptyResponse);
        }

        debug!(request_id = %request.request_id, chars = text.len(), "Gemini response received");
        Ok(text)
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// Gemini API request structure.
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<GeminiInlineData>,
}

#[derive(Debug, Serialize)]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    response_mime_type: String,
}

/// Gemini API response structure.
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiResponseContent,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;
    use crate::core::DocumentPayload;

    fn test_model() -> GeminiModel {
        GeminiModel {
            client: Client::new(),
            api_key: "test-key".to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    #[test]
    #[serial]
    fn test_creation_fails_without_key() {
        std::env::remove_var("GEMINI_API_KEY");
        let result = GeminiModel::new();
        assert!(matches!(result, Err(AiError::MissingApiKey("GEMINI_API_KEY"))));
    }

    #[test]
    #[serial]
    fn test_creation_reads_env_key() {
        std::env::set_var("GEMINI_API_KEY", "k");
        let model = GeminiModel::new().unwrap();
        assert!(model.is_available());
        assert_eq!(model.name(), "gemini");
        std::env::remove_var("GEMINI_API_KEY");
    }

    #[test]
    fn test_with_model_override() {
        let model = test_model().with_model("gemini-2.5-pro");
        assert_eq!(model.model, "gemini-2.5-pro");
    }

    #[test]
    fn test_request_body_shape() {
        let doc = DocumentPayload::from_bytes("application/pdf", b"%PDF");
        let request = GenerationRequest::new("summarize").with_document(doc);
        let body = serde_json::to_value(test_model().request_body(&request)).unwrap();

        assert_eq!(body["contents"][0]["parts"][0]["text"], "summarize");
        assert_eq!(
            body["contents"][0]["parts"][1]["inline_data"]["mime_type"],
            "application/pdf"
        );
        assert_eq!(body["generation_config"]["response_mime_type"], "application/json");
    }

    #[test]
    fn test_response_text_extraction() {
        let raw = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "{\"answer\": "}, {"text": "\"yes\"}"}]}
            }]
        }"#;
        let response: GeminiResponse = serde_json::from_str(raw).unwrap();
        let text: String = response.candidates[0]
            .content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        assert_eq!(text, r#"{"answer": "yes"}"#);
    }
}
