//! Hiring kit generation: job description, interview scorecard and email templates.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::generation::models::{HiringKit, Seniority};
use crate::generation::prompts::hiring_kit_prompt;
use crate::generation::schema::hiring_kit_schema;
use crate::generation::structured::{
    run_structured, GenerationError, Operation, RequiredField, Requirement,
};
use crate::llm_client::{GenerativeModel, ModelConfig, StructuredRequest};

const REQUIRED: &[RequiredField] = &[
    ("jobDescription", Requirement::NonEmptyString),
    ("interviewScorecard", Requirement::Array),
    ("emailTemplates", Requirement::Present),
];

/// Inputs for one hiring kit. Non-emptiness is checked by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitRequest {
    pub notes: String,
    pub company_context: String,
    pub seniority: Seniority,
}

pub async fn generate_hiring_kit(
    llm: &dyn GenerativeModel,
    models: &ModelConfig,
    request: &KitRequest,
) -> Result<HiringKit, GenerationError> {
    let structured = StructuredRequest {
        model: models.structured_model.clone(),
        prompt: hiring_kit_prompt(&request.notes, &request.company_context, request.seniority),
        schema: hiring_kit_schema(),
        thinking_budget: Some(models.thinking_budget),
    };

    let kit: HiringKit = run_structured(llm, Operation::HiringKit, structured, REQUIRED).await?;
    info!(
        "Hiring kit generated: seniority={}, competencies={}",
        request.seniority,
        kit.interview_scorecard().len()
    );
    Ok(kit)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::llm_client::testing::ScriptedModel;
    use crate::llm_client::LlmError;

    fn request() -> KitRequest {
        KitRequest {
            notes: "Role: Video Editor".to_string(),
            company_context: "We are Trakin Tech.".to_string(),
            seniority: Seniority::Senior,
        }
    }

    fn kit_payload() -> serde_json::Value {
        json!({
            "jobDescription": "# Senior Video Editor\n- Edit fast",
            "interviewScorecard": [{
                "competency": "Editing",
                "questions": ["Tell me about a tight deadline."],
                "scoringRubric": {"weak": "w", "average": "a", "strong": "s"}
            }],
            "emailTemplates": {"nextSteps": "Next", "rejection": "Sorry"}
        })
    }

    #[tokio::test]
    async fn test_generates_kit_with_schema_and_models() {
        let model = ScriptedModel::default();
        model.push_json(kit_payload().to_string());

        let kit = generate_hiring_kit(&model, &ModelConfig::default(), &request())
            .await
            .unwrap();
        assert_eq!(kit.interview_scorecard()[0].competency, "Editing");
        assert!(kit.onboarding_plan().is_none());

        let calls = model.structured_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model, "gemini-2.5-pro");
        assert_eq!(calls[0].thinking_budget, Some(32768));
        assert_eq!(calls[0].schema, hiring_kit_schema());
        assert!(calls[0].prompt.contains("**Seniority Level:** Senior"));
        assert!(calls[0].prompt.contains("Role: Video Editor"));
    }

    #[tokio::test]
    async fn test_fenced_payload_is_accepted() {
        let model = ScriptedModel::default();
        model.push_json(format!("```json\n{}\n```", kit_payload()));
        assert!(generate_hiring_kit(&model, &ModelConfig::default(), &request())
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_missing_top_level_key_is_a_failure() {
        for key in ["jobDescription", "interviewScorecard", "emailTemplates"] {
            let mut payload = kit_payload();
            payload.as_object_mut().unwrap().remove(key);

            let model = ScriptedModel::default();
            model.push_json(payload.to_string());

            let err = generate_hiring_kit(&model, &ModelConfig::default(), &request())
                .await
                .unwrap_err();
            assert_eq!(err.operation, Operation::HiringKit);
            assert_eq!(
                err.to_string(),
                "Failed to generate content from Gemini API. Please check your input and try again."
            );
        }
    }

    #[tokio::test]
    async fn test_transport_and_parse_failures_collapse_to_same_message() {
        let model = ScriptedModel::default();
        model.push_error(LlmError::Api {
            status: 500,
            message: "boom".to_string(),
        });
        model.push_json("not json at all");

        let transport = generate_hiring_kit(&model, &ModelConfig::default(), &request())
            .await
            .unwrap_err();
        let parse = generate_hiring_kit(&model, &ModelConfig::default(), &request())
            .await
            .unwrap_err();
        assert_eq!(transport.to_string(), parse.to_string());
    }
}
