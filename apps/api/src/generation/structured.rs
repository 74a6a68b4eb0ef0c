//! Shared call-parse-validate path for the three structured operations.
//!
//! Transport failures, unparsable payloads and missing required keys all
//! collapse into one `GenerationError` whose message is the fixed
//! user-facing text for the operation. The cause is kept for logging.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::error;

use crate::llm_client::{strip_json_fences, GenerativeModel, LlmError, StructuredRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    HiringKit,
    OnboardingPlan,
    ResumeAnalysis,
}

impl Operation {
    pub fn user_message(&self) -> &'static str {
        match self {
            Operation::HiringKit => {
                "Failed to generate content from Gemini API. Please check your input and try again."
            }
            Operation::OnboardingPlan => "Failed to generate onboarding plan from Gemini API.",
            Operation::ResumeAnalysis => {
                "Failed to analyze resume with Gemini API. Please check your input and try again."
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::HiringKit => "hiring_kit",
            Operation::OnboardingPlan => "onboarding_plan",
            Operation::ResumeAnalysis => "resume_analysis",
        }
    }
}

#[derive(Debug, Error)]
#[error("{}", .operation.user_message())]
pub struct GenerationError {
    pub operation: Operation,
    #[source]
    pub cause: GenerationCause,
}

#[derive(Debug, Error)]
pub enum GenerationCause {
    #[error(transparent)]
    Remote(#[from] LlmError),

    #[error("response is not valid JSON for the expected shape: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response is missing required field `{0}`")]
    MissingField(&'static str),
}

/// How a required top-level key must look for the payload to be accepted.
#[derive(Debug, Clone, Copy)]
pub enum Requirement {
    /// A string with at least one character.
    NonEmptyString,
    Array,
    /// Any non-null value.
    Present,
}

pub type RequiredField = (&'static str, Requirement);

/// Sends the request and returns the validated, deserialized payload.
pub async fn run_structured<T: DeserializeOwned>(
    llm: &dyn GenerativeModel,
    operation: Operation,
    request: StructuredRequest,
    required: &[RequiredField],
) -> Result<T, GenerationError> {
    let result = async {
        let text = llm.generate_json(request).await?;
        let payload: Value = serde_json::from_str(strip_json_fences(&text))?;
        check_required(&payload, required)?;
        Ok::<T, GenerationCause>(serde_json::from_value(payload)?)
    }
    .await;

    result.map_err(|cause| {
        error!(operation = operation.name(), "Structured generation failed: {cause}");
        GenerationError { operation, cause }
    })
}

fn check_required(payload: &Value, required: &[RequiredField]) -> Result<(), GenerationCause> {
    for (key, requirement) in required {
        let value = payload.get(key);
        let ok = match requirement {
            Requirement::NonEmptyString => value
                .and_then(Value::as_str)
                .map(|s| !s.is_empty())
                .unwrap_or(false),
            Requirement::Array => value.map(Value::is_array).unwrap_or(false),
            Requirement::Present => value.map(|v| !v.is_null()).unwrap_or(false),
        };
        if !ok {
            return Err(GenerationCause::MissingField(*key));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const FIELDS: &[RequiredField] = &[
        ("title", Requirement::NonEmptyString),
        ("items", Requirement::Array),
        ("meta", Requirement::Present),
    ];

    #[test]
    fn test_check_required_accepts_complete_payload() {
        let payload = json!({"title": "t", "items": [], "meta": {}});
        assert!(check_required(&payload, FIELDS).is_ok());
    }

    #[test]
    fn test_check_required_rejects_each_missing_key() {
        let cases = [
            (json!({"items": [], "meta": {}}), "title"),
            (json!({"title": "", "items": [], "meta": {}}), "title"),
            (json!({"title": "t", "items": {}, "meta": {}}), "items"),
            (json!({"title": "t", "items": [], "meta": null}), "meta"),
            (json!(["not", "an", "object"]), "title"),
        ];
        for (payload, expected) in cases {
            match check_required(&payload, FIELDS) {
                Err(GenerationCause::MissingField(key)) => assert_eq!(key, expected),
                other => panic!("expected MissingField({expected}), got {other:?}"),
            }
        }
    }

    #[test]
    fn test_error_display_is_user_message() {
        let err = GenerationError {
            operation: Operation::OnboardingPlan,
            cause: GenerationCause::MissingField("day30"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to generate onboarding plan from Gemini API."
        );
    }
}
