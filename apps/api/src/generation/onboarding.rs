//! 30-60-90 day onboarding plan, seeded with an already generated job description.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::generation::models::OnboardingPlan;
use crate::generation::prompts::onboarding_prompt;
use crate::generation::schema::onboarding_plan_schema;
use crate::generation::structured::{
    run_structured, GenerationError, Operation, RequiredField, Requirement,
};
use crate::llm_client::{GenerativeModel, ModelConfig, StructuredRequest};

const REQUIRED: &[RequiredField] = &[
    ("day30", Requirement::NonEmptyString),
    ("day60", Requirement::NonEmptyString),
    ("day90", Requirement::NonEmptyString),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingRequest {
    pub job_description: String,
    pub company_context: String,
}

pub async fn generate_onboarding_plan(
    llm: &dyn GenerativeModel,
    models: &ModelConfig,
    request: &OnboardingRequest,
) -> Result<OnboardingPlan, GenerationError> {
    let structured = StructuredRequest {
        model: models.structured_model.clone(),
        prompt: onboarding_prompt(&request.job_description, &request.company_context),
        schema: onboarding_plan_schema(),
        thinking_budget: Some(models.thinking_budget),
    };

    let plan = run_structured(llm, Operation::OnboardingPlan, structured, REQUIRED).await?;
    info!("Onboarding plan generated");
    Ok(plan)
}
