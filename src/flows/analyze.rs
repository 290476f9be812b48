//! Legal document analysis: summary, key terms, risk findings, clause
//! breakdown, and optional compliance checks against named regulations.

use serde::{Deserialize, Serialize};

use super::{ensure_nonempty, run, FlowError, Severity};
use crate::ai::{GenerationRequest, GenerativeModel};
use crate::core::DocumentPayload;

/// Input for [`analyze_document`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeDocumentInput {
    /// The legal document to analyze.
    pub document: DocumentPayload,
    /// Regulations to check compliance against (e.g. GDPR, HIPAA).
    #[serde(default)]
    pub regulations: Vec<String>,
}

impl AnalyzeDocumentInput {
    fn validate(&self) -> Result<(), FlowError> {
        ensure_nonempty("document", &self.document.data)?;
        for regulation in &self.regulations {
            ensure_nonempty("regulation", regulation)?;
        }
        Ok(())
    }
}

/// A potential legal risk identified in the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskFinding {
    pub risk: String,
    pub severity: Severity,
    pub recommendation: String,
}

/// Presence and assessment of one high-risk clause family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClauseFinding {
    pub clause_type: String,
    pub explanation: String,
    pub risk_level: Severity,
    pub is_present: bool,
}

/// Compliance assessment against one regulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceFinding {
    pub regulation: String,
    pub is_compliant: bool,
    pub reasoning: String,
}

/// Output of [`analyze_document`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeDocumentOutput {
    pub summary: String,
    pub key_terms: Vec<String>,
    pub potential_risks: Vec<RiskFinding>,
    pub clause_analysis: Vec<ClauseFinding>,
    /// Present only when regulations were supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance_analysis: Option<Vec<ComplianceFinding>>,
}

/// Analyze a legal document for risks, notable clauses, and compliance.
pub async fn analyze_document(
    model: &dyn GenerativeModel,
    input: &AnalyzeDocumentInput,
) -> Result<AnalyzeDocumentOutput, FlowError> {
    input.validate()?;
    let request =
        GenerationRequest::new(render_prompt(input)).with_document(input.document.clone());
    run(model, request).await
}

fn render_prompt(input: &AnalyzeDocumentInput) -> String {
    let compliance_task = if input.regulations.is_empty() {
        String::new()
    } else {
        format!(
            "\n5. A compliance analysis for the following regulations: {}. For each \
             regulation, state whether the document appears compliant and provide your \
             reasoning.",
            input.regulations.join(", ")
        )
    };
    let compliance_shape = if input.regulations.is_empty() {
        ""
    } else {
        r#",
  "compliance_analysis": [{"regulation": "...", "is_compliant": true, "reasoning": "..."}]"#
    };

    format!(
        r#"You are an AI assistant specializing in legal document analysis, risk assessment, and regulatory compliance.

Your task is to analyze the attached legal document and provide a comprehensive report covering:
1. A concise summary of the document.
2. A list of key terms.
3. A list of potential legal risks, each with a severity rating (Low, Medium, High) and a recommendation for mitigation.
4. A detailed clause analysis for the following specific clauses:
   - Arbitration Clause
   - Class-Action Waiver
   - Confession of Judgment
   - Auto-Renewal Terms
   - Hidden/Mandatory Fees
   - Penalty Clauses & Obligations
   For each of these clauses, determine if it is present in the document. If it is, explain why it matters and assess its risk level (Low, Medium, High). If it is not present, mark it as not present.{compliance_task}

Respond ONLY with valid JSON matching this shape:
{{
  "summary": "...",
  "key_terms": ["..."],
  "potential_risks": [{{"risk": "...", "severity": "Low|Medium|High", "recommendation": "..."}}],
  "clause_analysis": [{{"clause_type": "...", "explanation": "...", "risk_level": "Low|Medium|High", "is_present": true}}]{compliance_shape}
}}
No markdown, no explanatory text outside the JSON."#
    )
}
