//! Resume analysis against the current job description and scorecard.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::generation::models::ResumeAnalysis;
use crate::generation::prompts::resume_analysis_prompt;
use crate::generation::schema::resume_analysis_schema;
use crate::generation::structured::{
    run_structured, GenerationError, Operation, RequiredField, Requirement,
};
use crate::llm_client::{GenerativeModel, ModelConfig, StructuredRequest};

const REQUIRED: &[RequiredField] = &[
    ("summary", Requirement::NonEmptyString),
    ("competencyMatches", Requirement::Array),
    ("suggestedQuestions", Requirement::Array),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub resume_text: String,
    pub job_description: String,
    /// Scorecard competencies, in scorecard order.
    pub competencies: Vec<String>,
}

pub async fn analyze_resume(
    llm: &dyn GenerativeModel,
    models: &ModelConfig,
    request: &AnalysisRequest,
) -> Result<ResumeAnalysis, GenerationError> {
    let structured = StructuredRequest {
        model: models.structured_model.clone(),
        prompt: resume_analysis_prompt(
            &request.resume_text,
            &request.job_description,
            &request.competencies,
        ),
        schema: resume_analysis_schema(),
        thinking_budget: Some(models.thinking_budget),
    };

    let analysis: ResumeAnalysis =
        run_structured(llm, Operation::ResumeAnalysis, structured, REQUIRED).await?;
    info!(
        "Resume analysis complete: {} competency matches",
        analysis.competency_matches.len()
    );
    Ok(analysis)
}
