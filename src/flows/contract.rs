//! Contract drafting: a complete, professionally formatted agreement from
//! a contract type and free-text requirements.
//!
//! This flow masks transient model overload with a bounded retry; the
//! drafting endpoint is the one users hit hardest during peak hours.

use serde::{Deserialize, Serialize};

use super::{ensure_nonempty, run, FlowError};
use crate::ai::{GenerationRequest, GenerativeModel};
use crate::core::{retry_transient, RetryPolicy};

/// Input for [`generate_contract`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateContractInput {
    /// The type of legal contract to generate (e.g. NDA, Lease Agreement).
    pub contract_type: String,
    /// Detailed requirements: parties, key terms, dates, specific clauses.
    pub details: String,
}

impl GenerateContractInput {
    fn validate(&self) -> Result<(), FlowError> {
        ensure_nonempty("contract_type", &self.contract_type)?;
        ensure_nonempty("details", &self.details)
    }
}

/// Output of [`generate_contract`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateContractOutput {
    /// Full text of the generated contract, plain text with section breaks.
    pub contract_text: String,
}

/// Draft a contract, retrying on transient overload.
pub async fn generate_contract(
    model: &dyn GenerativeModel,
    policy: &RetryPolicy,
    input: &GenerateContractInput,
) -> Result<GenerateContractOutput, FlowError> {
    input.validate()?;
    let prompt = render_prompt(input);
    retry_transient(policy, || run(model, GenerationRequest::new(prompt.clone()))).await
}

fn render_prompt(input: &GenerateContractInput) -> String {
    format!(
        r#"You are an AI Legal Assistant that specializes in drafting legal contracts.

Your task is to generate a complete, professionally formatted legal contract based on the user's specified contract type and detailed requirements. The contract must be comprehensive, well-structured, and ready for use.

Follow these formatting guidelines strictly:
- The contract text must be a single string.
- Use double line breaks to separate paragraphs and sections.
- Start with a clear, centered title for the agreement (e.g., "NON-DISCLOSURE AGREEMENT").
- Use numbered sections for main clauses (e.g., "1. DEFINITION OF CONFIDENTIAL INFORMATION").
- Use ALL CAPS for section headings to make them stand out.
- Use placeholders like [Name], [Address], [Date], and [Amount] for specific details the user must fill in.
- Do NOT use markdown formatting inside the contract text. Use plain text with proper spacing.
- Use lettered sub-clauses (a., b., c.) for lists within sections.
- Ensure the language is professional and legally sound.
- Include standard legal clauses where appropriate, such as Governing Law, Severability, and Entire Agreement.
- End with a proper signature block for all parties.

Contract Type: {contract_type}
Detailed Requirements:
{details}

Respond ONLY with valid JSON matching this shape:
{{"contract_text": "..."}}
No markdown, no explanatory text outside the JSON."#,
        contract_type = input.contract_type,
        details = input.details
    )
}
