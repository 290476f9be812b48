//! Junk-fee detection for rental leases: mandatory charges hidden outside
//! the advertised base rent, plus the true total monthly cost.

use serde::{Deserialize, Serialize};

use super::{ensure_nonempty, run, FlowError};
use crate::ai::{GenerationRequest, GenerativeModel};
use crate::core::DocumentPayload;

/// Input for [`detect_junk_fees`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectJunkFeesInput {
    /// The rental lease agreement.
    pub lease: DocumentPayload,
    /// The advertised monthly base rent amount.
    pub base_rent: f64,
}

impl DetectJunkFeesInput {
    fn validate(&self) -> Result<(), FlowError> {
        ensure_nonempty("lease", &self.lease.data)?;
        if !self.base_rent.is_finite() || self.base_rent <= 0.0 {
            return Err(FlowError::InvalidInput(
                "base_rent must be a positive amount".to_string(),
            ));
        }
        Ok(())
    }
}

/// One mandatory fee found outside the base rent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifiedFee {
    pub fee_name: String,
    pub amount: f64,
    pub description: String,
}

/// Output of [`detect_junk_fees`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectJunkFeesOutput {
    pub identified_fees: Vec<IdentifiedFee>,
    pub true_total_monthly_cost: f64,
    pub summary: String,
}

/// Analyze a lease for hidden mandatory fees.
pub async fn detect_junk_fees(
    model: &dyn GenerativeModel,
    input: &DetectJunkFeesInput,
) -> Result<DetectJunkFeesOutput, FlowError> {
    input.validate()?;
    let request = GenerationRequest::new(render_prompt(input)).with_document(input.lease.clone());
    run(model, request).await
}

fn render_prompt(input: &DetectJunkFeesInput) -> String {
    format!(
        r#"You are an AI assistant specializing in tenant rights and rental agreements. Your task is to analyze the attached rental lease agreement to identify hidden "junk fees": mandatory charges that are not part of the advertised base rent, making the true cost of living opaque.

Examples of junk fees include, but are not limited to:
- Administrative fees
- Smart lock fees
- Valet trash service fees
- Pest control fees
- Amenity fees
- Community fees
- Package handling fees

Identify all mandatory monthly fees besides the base rent. For each fee, provide its name, amount, and a brief description. Then calculate the true total monthly cost by adding the base rent to all identified monthly junk fees. Finally, provide a summary of your findings.

Base Rent: ${base_rent}

Respond ONLY with valid JSON matching this shape:
{{
  "identified_fees": [{{"fee_name": "...", "amount": 0.0, "description": "..."}}],
  "true_total_monthly_cost": 0.0,
  "summary": "..."
}}
No markdown, no explanatory text outside the JSON."#,
        base_rent = input.base_rent
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_base_rent_rejected() {
        let input = DetectJunkFeesInput {
            lease: DocumentPayload::from_bytes("application/pdf", b"%PDF"),
            base_rent: -100.0,
        };
        assert!(matches!(input.validate(), Err(FlowError::InvalidInput(_))));
    }

    #[test]
    fn test_prompt_includes_base_rent() {
        let input = DetectJunkFeesInput {
            lease: DocumentPayload::from_bytes("application/pdf", b"%PDF"),
            base_rent: 1500.0,
        };
        assert!(render_prompt(&input).contains("$1500"));
    }

    #[test]
    fn test_output_parses() {
        let raw = r#"{
            "identified_fees": [
                {"fee_name": "Administrative Fee", "amount": 25.0,
                 "description": "Monthly processing charge with no stated service"}
            ],
            "true_total_monthly_cost": 1525.0,
            "summary": "One mandatory fee raises the real cost by $25/month."
        }"#;
        let output: DetectJunkFeesOutput = serde_json::from_str(raw).unwrap();
        assert_eq!(output.identified_fees.len(), 1);
        assert!((output.true_total_monthly_cost - 1525.0).abs() < f64::EPSILON);
    }
}
