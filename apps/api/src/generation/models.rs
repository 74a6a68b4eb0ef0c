//! Recruiting artifacts produced by the generation calls.
//!
//! Wire names are camelCase to match the response schemas. Inner fields are
//! lenient: a missing nested string deserializes as empty, and the `match`
//! rating of a competency is kept exactly as the model wrote it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Seniority of the role being hired for. Biases tone and expectations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seniority {
    Junior,
    #[default]
    #[serde(rename = "Mid-Level")]
    MidLevel,
    Senior,
}

impl Seniority {
    pub const ALL: [Seniority; 3] = [Seniority::Junior, Seniority::MidLevel, Seniority::Senior];

    pub fn label(&self) -> &'static str {
        match self {
            Seniority::Junior => "Junior",
            Seniority::MidLevel => "Mid-Level",
            Seniority::Senior => "Senior",
        }
    }
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRubric {
    #[serde(default)]
    pub weak: String,
    #[serde(default)]
    pub average: String,
    #[serde(default)]
    pub strong: String,
}

/// One competency of the interview scorecard. Only ever produced inside a `HiringKit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorecardItem {
    #[serde(default)]
    pub competency: String,
    /// Two or three are requested; the count is not enforced.
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub scoring_rubric: ScoringRubric,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailTemplates {
    #[serde(default)]
    pub next_steps: String,
    #[serde(default)]
    pub rejection: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingPlan {
    pub day30: String,
    pub day60: String,
    pub day90: String,
}

impl OnboardingPlan {
    /// Plain-text rendition placed on the clipboard.
    pub fn copy_text(&self) -> String {
        format!(
            "First 30 Days:\n{}\n\nDays 31-60:\n{}\n\nDays 61-90:\n{}",
            self.day30, self.day60, self.day90
        )
    }
}

/// Job description, scorecard and email templates for one role.
///
/// Created whole from one remote call. The only later change is attaching
/// an onboarding plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HiringKit {
    job_description: String,
    interview_scorecard: Vec<ScorecardItem>,
    email_templates: EmailTemplates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    onboarding_plan: Option<OnboardingPlan>,
}

impl HiringKit {
    #[cfg(test)]
    pub fn new(
        job_description: impl Into<String>,
        interview_scorecard: Vec<ScorecardItem>,
        email_templates: EmailTemplates,
    ) -> Self {
        Self {
            job_description: job_description.into(),
            interview_scorecard,
            email_templates,
            onboarding_plan: None,
        }
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn interview_scorecard(&self) -> &[ScorecardItem] {
        &self.interview_scorecard
    }

    pub fn email_templates(&self) -> &EmailTemplates {
        &self.email_templates
    }

    pub fn onboarding_plan(&self) -> Option<&OnboardingPlan> {
        self.onboarding_plan.as_ref()
    }

    pub fn attach_onboarding_plan(&mut self, plan: OnboardingPlan) {
        self.onboarding_plan = Some(plan);
    }

    pub fn competencies(&self) -> Vec<&str> {
        self.interview_scorecard
            .iter()
            .map(|item| item.competency.as_str())
            .collect()
    }

    /// Plain-text rendition of the whole scorecard placed on the clipboard.
    pub fn scorecard_copy_text(&self) -> String {
        self.interview_scorecard
            .iter()
            .map(|item| {
                let questions = item
                    .questions
                    .iter()
                    .map(|q| format!("- {q}"))
                    .collect::<Vec<_>>()
                    .join("\n");
                format!(
                    "Competency: {}\n\nQuestions:\n{}\n\nScoring Rubric:\n  - Weak: {}\n  - Average: {}\n  - Strong: {}\n",
                    item.competency,
                    questions,
                    item.scoring_rubric.weak,
                    item.scoring_rubric.average,
                    item.scoring_rubric.strong
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n---\n\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetencyMatch {
    #[serde(default)]
    pub competency: String,
    /// Usually "Strong Match", "Good Match" or "Potential Gap"; never normalized.
    #[serde(default, rename = "match")]
    pub rating: String,
    #[serde(default)]
    pub evidence: String,
}

/// A candidate's resume compared against the current kit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysis {
    pub summary: String,
    pub competency_matches: Vec<CompetencyMatch>,
    pub suggested_questions: Vec<String>,
}
