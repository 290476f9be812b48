//! Due diligence: a findings report across a set of legal and financial
//! documents for a described transaction.

use serde::{Deserialize, Serialize};

use super::{ensure_nonempty, run, FlowError, Severity};
use crate::ai::{GenerationRequest, GenerativeModel};
use crate::core::DocumentPayload;

/// Input for [`perform_due_diligence`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DueDiligenceInput {
    /// The documents under review (contracts, financial statements, ...).
    pub documents: Vec<DocumentPayload>,
    /// The transaction: merger, acquisition, partnership, and the parties' roles.
    pub transaction_details: String,
}

impl DueDiligenceInput {
    fn validate(&self) -> Result<(), FlowError> {
        if self.documents.is_empty() {
            return Err(FlowError::InvalidInput(
                "at least one document is required".to_string(),
            ));
        }
        for document in &self.documents {
            ensure_nonempty("document", &document.data)?;
        }
        ensure_nonempty("transaction_details", &self.transaction_details)
    }
}

/// One finding from the review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiligenceFinding {
    /// Area of due diligence (e.g. Financial, Legal, IP, HR).
    pub area: String,
    pub finding: String,
    pub risk_level: Severity,
    pub recommendation: String,
}

/// Output of [`perform_due_diligence`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DueDiligenceOutput {
    pub executive_summary: String,
    pub key_findings: Vec<DiligenceFinding>,
}

/// Review a document set for a transaction.
pub async fn perform_due_diligence(
    model: &dyn GenerativeModel,
    input: &DueDiligenceInput,
) -> Result<DueDiligenceOutput, FlowError> {
    input.validate()?;
    let request =
        GenerationRequest::new(render_prompt(input)).with_documents(input.documents.iter().cloned());
    run(model, request).await
}

fn render_prompt(input: &DueDiligenceInput) -> String {
    format!(
        r#"You are an AI assistant specializing in legal and financial due diligence for business transactions.

Your task is to analyze the attached set of documents related to a specific transaction and produce a concise due diligence report.

Transaction Context:
{details}

Based on your analysis of all {count} attached documents, provide:
1. An executive summary of the overall findings.
2. A list of key findings and risks. For each finding, specify the area (e.g., Financial, Legal, IP), describe the finding, assess the risk level (Low, Medium, High), and provide a clear recommendation.

Respond ONLY with valid JSON matching this shape:
{{
  "executive_summary": "...",
  "key_findings": [{{"area": "...", "finding": "...", "risk_level": "Low|Medium|High", "recommendation": "..."}}]
}}
No markdown, no explanatory text outside the JSON."#,
        details = input.transaction_details,
        count = input.documents.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_set_rejected() {
        let input = DueDiligenceInput {
            documents: Vec::new(),
            transaction_details: "Acquisition of Acme Corp".to_string(),
        };
        assert!(matches!(input.validate(), Err(FlowError::InvalidInput(_))));
    }

    #[test]
    fn test_output_parses() {
        let raw = r#"{
            "executive_summary": "Two elevated risks in the IP assignments.",
            "key_findings": [
                {"area": "IP", "finding": "Missing assignment for core patent",
                 "risk_level": "High", "recommendation": "Obtain assignment before closing"}
            ]
        }"#;
        let output: DueDiligenceOutput = serde_json::from_str(raw).unwrap();
        assert_eq!(output.key_findings[0].risk_level, Severity::High);
    }
}
