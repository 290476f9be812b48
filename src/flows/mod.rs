//! Typed flows over the model backend.
//!
//! Each flow maps a validated input record to a structured output via one
//! model call: render a prompt template, submit it, parse the JSON reply
//! against the declared output shape. Flows are stateless and may run
//! concurrently; nothing is cached or shared between invocations.
//!
//! Input validation failures reject before any network traffic. A reply
//! that does not match the output shape fails the whole invocation; a
//! partially-typed result is never returned.

mod analyze;
mod ask;
mod caselaw;
mod compare;
mod contract;
mod costs;
mod diligence;
mod junk_fees;
mod negotiate;
mod precedents;
mod sign;
mod workflow;

pub use analyze::{
    analyze_document, AnalyzeDocumentInput, AnalyzeDocumentOutput, ClauseFinding,
    ComplianceFinding, RiskFinding,
};
pub use ask::{answer_question, AnswerQuestionInput, AnswerQuestionOutput};
pub use caselaw::{search_case_law, CaseLawEntry, SearchCaseLawInput, SearchCaseLawOutput, StatuteEntry};
pub use compare::{compare_documents, CompareDocumentsInput, CompareDocumentsOutput};
pub use contract::{generate_contract, GenerateContractInput, GenerateContractOutput};
pub use costs::{
    estimate_costs, AttorneyExperience, CostItem, EstimateCostsInput, EstimateCostsOutput,
};
pub use diligence::{
    perform_due_diligence, DiligenceFinding, DueDiligenceInput, DueDiligenceOutput,
};
pub use junk_fees::{detect_junk_fees, DetectJunkFeesInput, DetectJunkFeesOutput, IdentifiedFee};
pub use negotiate::{negotiate_contract, NegotiateContractInput, NegotiateContractOutput};
pub use precedents::{
    analyze_precedents, AnalyzePrecedentsInput, AnalyzePrecedentsOutput, Precedent,
};
pub use sign::{sign_document, SignDocumentInput, SignDocumentOutput};
pub use workflow::{generate_workflow, GenerateWorkflowInput, GenerateWorkflowOutput, WorkflowStep};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ai::{AiError, GenerationRequest, GenerativeModel};
use crate::core::TransientError;

/// Flow errors.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Model(#[from] AiError),

    #[error("model output did not match the expected shape: {0}")]
    MalformedOutput(#[from] serde_json::Error),
}

impl TransientError for FlowError {
    fn is_transient(&self) -> bool {
        match self {
            FlowError::Model(err) => err.is_transient(),
            _ => false,
        }
    }
}

/// Three-level severity used by risk and finding records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "Low"),
            Severity::Medium => write!(f, "Medium"),
            Severity::High => write!(f, "High"),
        }
    }
}

/// Reject empty or whitespace-only required fields.
pub(crate) fn ensure_nonempty(field: &'static str, value: &str) -> Result<(), FlowError> {
    if value.trim().is_empty() {
        return Err(FlowError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Submit a rendered request and parse the reply into the output record.
pub(crate) async fn run<T: DeserializeOwned>(
    model: &dyn GenerativeModel,
    request: GenerationRequest,
) -> Result<T, FlowError> {
    debug!(request_id = %request.request_id, backend = model.name(), "dispatching flow request");
    let raw = model.generate(&request).await?;
    let cleaned = strip_code_fences(&raw);
    Ok(serde_json::from_str(cleaned)?)
}

/// Strip a surrounding markdown code fence, if present.
///
/// Backends are asked for bare JSON but occasionally wrap it anyway.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_serialization() {
        assert_eq!(serde_json::to_string(&Severity::High).unwrap(), "\"High\"");
        let parsed: Severity = serde_json::from_str("\"Medium\"").unwrap();
        assert_eq!(parsed, Severity::Medium);
    }

    #[test]
    fn test_ensure_nonempty() {
        assert!(ensure_nonempty("question", "what is a tort?").is_ok());
        let err = ensure_nonempty("question", "   ").unwrap_err();
        assert!(matches!(err, FlowError::InvalidInput(_)));
        assert!(err.to_string().contains("question"));
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("{\"a\": 1}"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[test]
    fn test_flow_error_transience_follows_model_error() {
        let transient = FlowError::Model(AiError::Overloaded { status: 503, message: String::new() });
        assert!(transient.is_transient());

        let permanent = FlowError::Model(AiError::Api { status: 401, message: String::new() });
        assert!(!permanent.is_transient());

        let invalid = FlowError::InvalidInput("x".into());
        assert!(!invalid.is_transient());
    }
}
