//! Legal cost estimation: a realistic cost range and breakdown for a case,
//! given its jurisdiction and the attorney's experience level.

use serde::{Deserialize, Serialize};

use super::{ensure_nonempty, run, FlowError};
use crate::ai::{GenerationRequest, GenerativeModel};

/// Experience level of the attorney handling the case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttorneyExperience {
    Junior,
    Senior,
    Partner,
}

impl std::fmt::Display for AttorneyExperience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttorneyExperience::Junior => write!(f, "Junior"),
            AttorneyExperience::Senior => write!(f, "Senior"),
            AttorneyExperience::Partner => write!(f, "Partner"),
        }
    }
}

impl std::str::FromStr for AttorneyExperience {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "junior" => Ok(AttorneyExperience::Junior),
            "senior" => Ok(AttorneyExperience::Senior),
            "partner" => Ok(AttorneyExperience::Partner),
            other => Err(format!("unknown experience level '{other}' (expected junior, senior, or partner)")),
        }
    }
}

/// Input for [`estimate_costs`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateCostsInput {
    /// A detailed description of the legal case.
    pub case_description: String,
    /// The legal jurisdiction for the case.
    pub jurisdiction: String,
    pub attorney_experience: AttorneyExperience,
}

impl EstimateCostsInput {
    fn validate(&self) -> Result<(), FlowError> {
        ensure_nonempty("case_description", &self.case_description)?;
        ensure_nonempty("jurisdiction", &self.jurisdiction)
    }
}

/// One component of the estimated total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostItem {
    pub item: String,
    pub cost: String,
    pub description: String,
}

/// Output of [`estimate_costs`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateCostsOutput {
    /// e.g. "$5,000 - $10,000"
    pub estimated_cost_range: String,
    pub cost_breakdown: Vec<CostItem>,
    pub disclaimer: String,
}

/// Estimate the cost of pursuing a legal case.
pub async fn estimate_costs(
    model: &dyn GenerativeModel,
    input: &EstimateCostsInput,
) -> Result<EstimateCostsOutput, FlowError> {
    input.validate()?;
    run(model, GenerationRequest::new(render_prompt(input))).await
}

fn render_prompt(input: &EstimateCostsInput) -> String {
    format!(
        r#"You are an AI Legal Cost Estimator. Your task is to provide a realistic cost estimate for a legal case based on its complexity, jurisdiction, and the experience level of the attorney.

Provide the following:
1. An estimated cost range as a string representing the likely total cost (e.g., "$5,000 - $8,000").
2. A cost breakdown detailing the components of the total. Include items like attorney fees, filing fees, expert witness fees, etc., where applicable; for each item, give the estimated cost and a brief description.
3. A clear disclaimer stating that this is an estimate, not a quote, and actual costs may vary.

Jurisdiction: {jurisdiction}
Attorney Experience Level: {experience}
Case Description: {case}

Respond ONLY with valid JSON matching this shape:
{{
  "estimated_cost_range": "...",
  "cost_breakdown": [{{"item": "...", "cost": "...", "description": "..."}}],
  "disclaimer": "..."
}}
No markdown, no explanatory text outside the JSON."#,
        jurisdiction = input.jurisdiction,
        experience = input.attorney_experience,
        case = input.case_description
    )
}
