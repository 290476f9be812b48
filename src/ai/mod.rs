//! Model backend integration.
//!
//! Every flow ends in one call to a hosted generative model. This module
//! defines the backend trait, the request envelope, and the error
//! taxonomy that separates transient overload (retryable) from
//! everything else (not retryable).

mod claude;
mod gemini;

pub use claude::ClaudeModel;
pub use gemini::GeminiModel;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::{AiConfig, DocumentPayload, TransientError};

/// One prompt ready to be submitted to a model backend.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Correlation id carried through backend log lines.
    pub request_id: Uuid,
    /// Fully rendered prompt text, including the response-shape contract.
    pub prompt: String,
    /// Documents embedded alongside the prompt.
    pub media: Vec<DocumentPayload>,
}

impl GenerationRequest {
    /// Create a text-only request.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self { request_id: Uuid::new_v4(), prompt: prompt.into(), media: Vec::new() }
    }

    /// Attach a document to the request.
    pub fn with_document(mut self, payload: DocumentPayload) -> Self {
        self.media.push(payload);
        self
    }

    /// Attach several documents to the request.
    pub fn with_documents(mut self, payloads: impl IntoIterator<Item = DocumentPayload>) -> Self {
        self.media.extend(payloads);
        self
    }
}

/// Model backend errors.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("{0} not set")]
    MissingApiKey(&'static str),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model overloaded ({status}): {message}")]
    Overloaded { status: u16, message: String },

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("empty response from model")]
    EmptyResponse,
}

impl TransientError for AiError {
    fn is_transient(&self) -> bool {
        matches!(self, AiError::Overloaded { .. })
    }
}

/// Classify a failed HTTP exchange once, where it is received.
///
/// A 503 status, or a body mentioning "503" or "overloaded", is the
/// service shedding load and is expected to succeed on retry. Everything
/// else is permanent.
pub(crate) fn classify_http_failure(status: u16, body: String) -> AiError {
    let lowered = body.to_lowercase();
    if status == 503 || lowered.contains("503") || lowered.contains("overloaded") {
        AiError::Overloaded { status, message: body }
    } else {
        AiError::Api { status, message: body }
    }
}

/// Trait for model backends.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Submit a request and return the model's raw text response.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AiError>;

    /// Get the backend name.
    fn name(&self) -> &str;

    /// Check if the backend is usable (credentials present).
    fn is_available(&self) -> bool;
}

/// Construct the backend selected in configuration.
pub fn model_from_config(config: &AiConfig) -> anyhow::Result<Box<dyn GenerativeModel>> {
    match config.provider.as_str() {
        "gemini" => {
            let mut model = GeminiModel::new()?;
            if let Some(name) = &config.model {
                model = model.with_model(name);
            }
            Ok(Box::new(model))
        }
        "claude" => {
            let mut model = ClaudeModel::new()?;
            if let Some(name) = &config.model {
                model = model.with_model(name);
            }
            Ok(Box::new(model))
        }
        other => anyhow::bail!("unknown model provider '{other}' (expected gemini or claude)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_503_is_transient() {
        let err = classify_http_failure(503, "Service Unavailable".into());
        assert!(err.is_transient());
    }

    #[test]
    fn test_overloaded_body_is_transient() {
        let err = classify_http_failure(500, "The model is overloaded. Try again later.".into());
        assert!(err.is_transient());
    }

    #[test]
    fn test_embedded_status_code_is_transient() {
        let err = classify_http_failure(500, "upstream returned 503".into());
        assert!(err.is_transient());
    }

    #[test]
    fn test_other_failures_are_permanent() {
        let err = classify_http_failure(401, "API key not valid".into());
        assert!(!err.is_transient());
        let err = classify_http_failure(400, "Bad Request".into());
        assert!(!err.is_transient());
    }

    #[test]
    fn test_request_builder_attaches_media() {
        let doc = DocumentPayload::from_bytes("text/plain", b"hello");
        let request = GenerationRequest::new("analyze this").with_document(doc.clone());
        assert_eq!(request.media.len(), 1);
        assert_eq!(request.media[0], doc);
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let config = AiConfig { provider: "gpt".into(), model: None };
        assert!(model_from_config(&config).is_err());
    }
}
