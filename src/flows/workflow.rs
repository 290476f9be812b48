//! Guided legal workflows: a step-by-step guide for a legal process,
//! tailored to a jurisdiction.
//!
//! Like contract drafting, this flow retries on transient overload.

use serde::{Deserialize, Serialize};

use super::{ensure_nonempty, run, FlowError};
use crate::ai::{GenerationRequest, GenerativeModel};
use crate::core::{retry_transient, RetryPolicy};

/// Input for [`generate_workflow`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateWorkflowInput {
    /// The legal process to guide (e.g. "filing a small claims case").
    pub topic: String,
    /// The legal jurisdiction for the workflow.
    pub jurisdiction: String,
}

impl GenerateWorkflowInput {
    fn validate(&self) -> Result<(), FlowError> {
        ensure_nonempty("topic", &self.topic)?;
        ensure_nonempty("jurisdiction", &self.jurisdiction)
    }
}

/// One step in a generated workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowStep {
    pub title: String,
    pub content: String,
}

/// Output of [`generate_workflow`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateWorkflowOutput {
    pub workflow_title: String,
    pub steps: Vec<WorkflowStep>,
    /// Search queries the user can paste into YouTube for video guidance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_youtube_searches: Option<Vec<String>>,
}

/// Generate a guided workflow, retrying on transient overload.
pub async fn generate_workflow(
    model: &dyn GenerativeModel,
    policy: &RetryPolicy,
    input: &GenerateWorkflowInput,
) -> Result<GenerateWorkflowOutput, FlowError> {
    input.validate()?;
    let prompt = render_prompt(input);
    retry_transient(policy, || run(model, GenerationRequest::new(prompt.clone()))).await
}

fn render_prompt(input: &GenerateWorkflowInput) -> String {
    format!(
        r#"You are an AI Legal Assistant that creates step-by-step guides for common legal processes, tailored to a specific jurisdiction.

Your task is to generate a clear, comprehensive, and easy-to-follow workflow for the given topic and jurisdiction. Always include a disclaimer that the information is not legal advice.

Start by creating a title for the workflow. Then provide a series of steps; each step must have a clear title and detailed content explaining what to do.

Finally, provide a list of up to 3 helpful and specific search queries the user can copy and paste into YouTube to find relevant, high-quality videos about the process. Frame these as search terms, not as video titles or URLs. For example: "how to file a small claims case in {jurisdiction}".

Jurisdiction: {jurisdiction}
Legal Topic: {topic}

Respond ONLY with valid JSON matching this shape:
{{
  "workflow_title": "...",
  "steps": [{{"title": "...", "content": "..."}}],
  "suggested_youtube_searches": ["..."]
}}
No markdown, no explanatory text outside the JSON."#,
        jurisdiction = input.jurisdiction,
        topic = input.topic
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_jurisdiction_rejected() {
        let input = GenerateWorkflowInput {
            topic: "eviction response".to_string(),
            jurisdiction: " ".to_string(),
        };
        assert!(matches!(input.validate(), Err(FlowError::InvalidInput(_))));
    }

    #[test]
    fn test_output_parses_without_searches() {
        let raw = r#"{
            "workflow_title": "Filing a Small Claims Case",
            "steps": [{"title": "Check eligibility", "content": "Confirm the claim is under the limit."}]
        }"#;
        let output: GenerateWorkflowOutput = serde_json::from_str(raw).unwrap();
        assert_eq!(output.steps.len(), 1);
        assert!(output.suggested_youtube_searches.is_none());
    }
}
