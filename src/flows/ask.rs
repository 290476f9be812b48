//! Legal Q&A: answer a question, optionally grounded in an uploaded
//! document.

use serde::{Deserialize, Serialize};

use super::{ensure_nonempty, run, FlowError};
use crate::ai::{GenerationRequest, GenerativeModel};
use crate::core::DocumentPayload;

/// Input for [`answer_question`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerQuestionInput {
    /// The legal question to be answered.
    pub question: String,
    /// Optional document to ground the answer in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<DocumentPayload>,
}

impl AnswerQuestionInput {
    fn validate(&self) -> Result<(), FlowError> {
        ensure_nonempty("question", &self.question)?;
        if let Some(document) = &self.document {
            ensure_nonempty("document", &document.data)?;
        }
        Ok(())
    }
}

/// Output of [`answer_question`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerQuestionOutput {
    pub answer: String,
}

/// Answer a legal question, with optional document context.
pub async fn answer_question(
    model: &dyn GenerativeModel,
    input: &AnswerQuestionInput,
) -> Result<AnswerQuestionOutput, FlowError> {
    input.validate()?;
    let mut request = GenerationRequest::new(render_prompt(input));
    if let Some(document) = &input.document {
        request = request.with_document(document.clone());
    }
    run(model, request).await
}

fn render_prompt(input: &AnswerQuestionInput) -> String {
    let context = if input.document.is_some() {
        "Base your answer primarily on the content of the attached document.\n\n"
    } else {
        ""
    };
    format!(
        r#"You are a helpful legal assistant. Answer the following legal question.

{context}Question: {question}

Respond ONLY with valid JSON matching this shape:
{{"answer": "..."}}
No markdown, no explanatory text outside the JSON."#,
        question = input.question
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_instruction_only_with_document() {
        let bare = AnswerQuestionInput { question: "What is a tort?".into(), document: None };
        assert!(!render_prompt(&bare).contains("attached document"));

        let grounded = AnswerQuestionInput {
            question: "What does clause 4 mean?".into(),
            document: Some(DocumentPayload::from_bytes("application/pdf", b"%PDF")),
        };
        assert!(render_prompt(&grounded).contains("attached document"));
    }

    #[test]
    fn test_empty_question_rejected() {
        let input = AnswerQuestionInput { question: "  ".into(), document: None };
        assert!(matches!(input.validate(), Err(FlowError::InvalidInput(_))));
    }
}
