//! Case-law research: relevant cases and statutes for a query within a
//! jurisdiction.

use serde::{Deserialize, Serialize};

use super::{ensure_nonempty, run, FlowError};
use crate::ai::{GenerationRequest, GenerativeModel};

/// Input for [`search_case_law`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCaseLawInput {
    /// The legal topic or question to research.
    pub query: String,
    /// The legal jurisdiction to search within.
    pub jurisdiction: String,
}

impl SearchCaseLawInput {
    fn validate(&self) -> Result<(), FlowError> {
        ensure_nonempty("query", &self.query)?;
        ensure_nonempty("jurisdiction", &self.jurisdiction)
    }
}

/// A relevant case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseLawEntry {
    pub title: String,
    pub citation: String,
    pub summary: String,
}

/// A relevant statute or regulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatuteEntry {
    pub title: String,
    pub code: String,
    pub summary: String,
}

/// Output of [`search_case_law`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCaseLawOutput {
    pub summary: String,
    pub case_law: Vec<CaseLawEntry>,
    pub statutes: Vec<StatuteEntry>,
}

/// Research case law and statutes for a query.
pub async fn search_case_law(
    model: &dyn GenerativeModel,
    input: &SearchCaseLawInput,
) -> Result<SearchCaseLawOutput, FlowError> {
    input.validate()?;
    run(model, GenerationRequest::new(render_prompt(input))).await
}

fn render_prompt(input: &SearchCaseLawInput) -> String {
    format!(
        r#"You are an AI Legal Research Assistant. Your task is to find relevant case law and statutes based on a user's query within a specific jurisdiction.

Provide a summary of the findings, then list the most relevant case laws and statutes. For each item, provide a title, citation/code, and a brief summary explaining its relevance to the query.

Jurisdiction: {jurisdiction}
Research Query: {query}

Respond ONLY with valid JSON matching this shape:
{{
  "summary": "...",
  "case_law": [{{"title": "...", "citation": "...", "summary": "..."}}],
  "statutes": [{{"title": "...", "code": "...", "summary": "..."}}]
}}
No markdown, no explanatory text outside the JSON."#,
        jurisdiction = input.jurisdiction,
        query = input.query
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_parses() {
        let raw = r#"{
            "summary": "Adverse possession requires open and notorious use.",
            "case_law": [
                {"title": "Howard v. Kunto", "citation": "3 Wn. App. 393 (1970)",
                 "summary": "Tacking of successive possessions."}
            ],
            "statutes": [
                {"title": "RCW 4.16.020", "code": "4.16.020",
                 "summary": "Ten-year limitation period."}
            ]
        }"#;
        let output: SearchCaseLawOutput = serde_json::from_str(raw).unwrap();
        assert_eq!(output.case_law.len(), 1);
        assert_eq!(output.statutes[0].code, "4.16.020");
    }
}
