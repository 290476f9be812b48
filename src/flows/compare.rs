//! Two-document comparison: a summary of the differences between two
//! legal documents.

use serde::{Deserialize, Serialize};

use super::{ensure_nonempty, run, FlowError};
use crate::ai::{GenerationRequest, GenerativeModel};
use crate::core::DocumentPayload;

/// Input for [`compare_documents`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareDocumentsInput {
    pub document_a: DocumentPayload,
    pub document_b: DocumentPayload,
}

impl CompareDocumentsInput {
    fn validate(&self) -> Result<(), FlowError> {
        ensure_nonempty("document_a", &self.document_a.data)?;
        ensure_nonempty("document_b", &self.document_b.data)
    }
}

/// Output of [`compare_documents`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareDocumentsOutput {
    pub comparison_summary: String,
}

/// Compare two legal documents and summarize the differences.
pub async fn compare_documents(
    model: &dyn GenerativeModel,
    input: &CompareDocumentsInput,
) -> Result<CompareDocumentsOutput, FlowError> {
    input.validate()?;
    let request = GenerationRequest::new(render_prompt())
        .with_documents([input.document_a.clone(), input.document_b.clone()]);
    run(model, request).await
}

fn render_prompt() -> String {
    r#"You are an AI assistant specializing in legal document comparison. Your task is to compare two legal documents and provide a summary of the differences.

Two documents are attached, in order. Analyze them and highlight the key differences between them.

Respond ONLY with valid JSON matching this shape:
{"comparison_summary": "..."}
No markdown, no explanatory text outside the JSON."#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_documents_required() {
        let input = CompareDocumentsInput {
            document_a: DocumentPayload::from_bytes("application/pdf", b"%PDF one"),
            document_b: DocumentPayload { mime_type: "application/pdf".into(), data: String::new() },
        };
        assert!(matches!(input.validate(), Err(FlowError::InvalidInput(_))));
    }
}
