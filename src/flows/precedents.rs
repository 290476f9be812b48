//! Precedent analysis: relevant prior cases, strategy, and rights
//! information for a described case in a jurisdiction.

use serde::{Deserialize, Serialize};

use super::{ensure_nonempty, run, FlowError};
use crate::ai::{GenerationRequest, GenerativeModel};

/// Input for [`analyze_precedents`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzePrecedentsInput {
    /// The case: facts and legal questions.
    pub case_details: String,
    /// The legal jurisdiction for the analysis.
    pub jurisdiction: String,
}

impl AnalyzePrecedentsInput {
    fn validate(&self) -> Result<(), FlowError> {
        ensure_nonempty("case_details", &self.case_details)?;
        ensure_nonempty("jurisdiction", &self.jurisdiction)
    }
}

/// A relevant precedent case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Precedent {
    pub title: String,
    pub citation: String,
    /// Why the case is relevant.
    pub relevance: String,
    /// The likely outcome based on this precedent.
    pub outcome: String,
}

/// Output of [`analyze_precedents`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzePrecedentsOutput {
    pub summary: String,
    pub precedents: Vec<Precedent>,
    pub case_strategy: String,
    pub arrest_prevention_measures: Vec<String>,
    pub rights_during_arrest: Vec<String>,
}

/// Analyze precedents and strategy for a case.
pub async fn analyze_precedents(
    model: &dyn GenerativeModel,
    input: &AnalyzePrecedentsInput,
) -> Result<AnalyzePrecedentsOutput, FlowError> {
    input.validate()?;
    run(model, GenerationRequest::new(render_prompt(input))).await
}

fn render_prompt(input: &AnalyzePrecedentsInput) -> String {
    format!(
        r#"You are an AI Legal Research Assistant. Your task is to provide a comprehensive analysis of a user's case, including relevant precedents, strategic advice, and critical legal information.

IMPORTANT: You are not a lawyer and this is not legal advice. Start the summary with a clear disclaimer stating this.

For the given case details and jurisdiction, provide:
1. A summary of your analysis.
2. The most relevant legal precedents. For each, include its title, citation, relevance, and potential outcome.
3. A detailed case strategy with potential solutions and steps for how to approach the case.
4. A list of arrest prevention measures outlining laws and actions to consider to avoid arrest.
5. A list of rights during arrest detailing the legal rights an individual has if they are arrested.

Jurisdiction: {jurisdiction}
Case Details: {details}

Respond ONLY with valid JSON matching this shape:
{{
  "summary": "...",
  "precedents": [{{"title": "...", "citation": "...", "relevance": "...", "outcome": "..."}}],
  "case_strategy": "...",
  "arrest_prevention_measures": ["..."],
  "rights_during_arrest": ["..."]
}}
No markdown, no explanatory text outside the JSON."#,
        jurisdiction = input.jurisdiction,
        details = input.case_details
    )
}
