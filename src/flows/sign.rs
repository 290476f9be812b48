//! Electronic signing: append a standard signature block to a document.
//!
//! The signing date is an explicit input stamped by the caller, so the
//! model never has to guess what day it is.

use serde::{Deserialize, Serialize};

use super::{ensure_nonempty, run, FlowError};
use crate::ai::{GenerationRequest, GenerativeModel};

/// Input for [`sign_document`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignDocumentInput {
    /// The text content of the document to be signed.
    pub document_content: String,
    /// The full name of the person signing.
    pub signer_name: String,
    /// Human-readable signing date (e.g. "August 6, 2026").
    pub signing_date: String,
}

impl SignDocumentInput {
    fn validate(&self) -> Result<(), FlowError> {
        ensure_nonempty("document_content", &self.document_content)?;
        ensure_nonempty("signer_name", &self.signer_name)?;
        ensure_nonempty("signing_date", &self.signing_date)
    }
}

/// Output of [`sign_document`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignDocumentOutput {
    /// The document content with a signature block appended.
    pub signed_document_content: String,
}

/// Append an electronic signature block to a document.
pub async fn sign_document(
    model: &dyn GenerativeModel,
    input: &SignDocumentInput,
) -> Result<SignDocumentOutput, FlowError> {
    input.validate()?;
    run(model, GenerationRequest::new(render_prompt(input))).await
}

fn render_prompt(input: &SignDocumentInput) -> String {
    format!(
        r#"You are an AI assistant. A user wants to electronically sign a document.

Take the following document content and append a standard electronic signature block at the end. The signature block must include the signer's name and the signing date given below. The format should be clear and professional.

Document Content:
---
{content}
---

Signer's Name: {signer}
Signing Date: {date}

Return the entire document content with the signature block added.

Respond ONLY with valid JSON matching this shape:
{{"signed_document_content": "..."}}
No markdown, no explanatory text outside the JSON."#,
        content = input.document_content,
        signer = input.signer_name,
        date = input.signing_date
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_carries_signer_and_date() {
        let input = SignDocumentInput {
            document_content: "AGREEMENT ...".to_string(),
            signer_name: "Jane Doe".to_string(),
            signing_date: "August 6, 2026".to_string(),
        };
        let prompt = render_prompt(&input);
        assert!(prompt.contains("Signer's Name: Jane Doe"));
        assert!(prompt.contains("Signing Date: August 6, 2026"));
    }

    #[test]
    fn test_blank_signer_rejected() {
        let input = SignDocumentInput {
            document_content: "AGREEMENT".to_string(),
            signer_name: String::new(),
            signing_date: "August 6, 2026".to_string(),
        };
        assert!(matches!(input.validate(), Err(FlowError::InvalidInput(_))));
    }
}
