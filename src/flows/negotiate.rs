//! Negotiation support: strategies for renegotiating a contract toward
//! the user's stated goals.

use serde::{Deserialize, Serialize};

use super::{ensure_nonempty, run, FlowError};
use crate::ai::{GenerationRequest, GenerativeModel};
use crate::core::DocumentPayload;

/// Input for [`negotiate_contract`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NegotiateContractInput {
    /// The contract under negotiation.
    pub contract: DocumentPayload,
    /// The user's goals for the negotiation.
    pub negotiation_goals: String,
}

impl NegotiateContractInput {
    fn validate(&self) -> Result<(), FlowError> {
        ensure_nonempty("contract", &self.contract.data)?;
        ensure_nonempty("negotiation_goals", &self.negotiation_goals)
    }
}

/// Output of [`negotiate_contract`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NegotiateContractOutput {
    /// Negotiation strategies based on the contract and the stated goals.
    pub negotiation_strategies: String,
}

/// Produce negotiation strategies for a contract.
pub async fn negotiate_contract(
    model: &dyn GenerativeModel,
    input: &NegotiateContractInput,
) -> Result<NegotiateContractOutput, FlowError> {
    input.validate()?;
    let request =
        GenerationRequest::new(render_prompt(input)).with_document(input.contract.clone());
    run(model, request).await
}

fn render_prompt(input: &NegotiateContractInput) -> String {
    format!(
        r#"You are an AI-powered legal assistant that provides negotiation strategies for contracts.

Review the attached contract and generate a list of negotiation strategies based on the contract contents and the user's stated goals.

Negotiation Goals: {goals}

Respond ONLY with valid JSON matching this shape:
{{"negotiation_strategies": "..."}}
No markdown, no explanatory text outside the JSON."#,
        goals = input.negotiation_goals
    )
}
