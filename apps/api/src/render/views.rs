//! Serializable snapshots of the two screens.
//!
//! Model-written text that the screens show as formatted content is rendered
//! to escaped HTML here; everything else is passed through as plain strings.

use serde::Serialize;

use super::markdown::{markdown_to_html, render_inline_html, render_list_items};
use crate::generation::models::{
    CompetencyMatch, HiringKit, OnboardingPlan, ResumeAnalysis, ScorecardItem, Seniority,
};
use crate::screens::chat::{ChatMessage, ChatPhase, Transcript};
use crate::screens::clipboard::CopyTarget;
use crate::screens::hiring::{HiringForm, HiringScreen, OnboardingState, ScreenErrors, Tab};
use crate::screens::templates::QuickStart;

#[derive(Debug, Clone, Serialize)]
pub struct HiringView {
    pub form: HiringForm,
    pub busy: bool,
    pub is_generating_kit: bool,
    pub is_generating_onboarding: bool,
    pub is_analyzing: bool,
    pub onboarding_state: OnboardingState,
    pub errors: ScreenErrors,
    pub kit: Option<KitView>,
    pub analysis: Option<AnalysisView>,
    /// `None` until a kit exists.
    pub active_tab: Option<Tab>,
    pub visible_tabs: Vec<Tab>,
    pub can_generate_onboarding: bool,
    pub copied: Vec<CopyTarget>,
    pub quick_starts: Vec<QuickStartOption>,
    pub seniority_options: Vec<Seniority>,
}

impl HiringView {
    pub fn from_screen(screen: &HiringScreen) -> Self {
        let kit = screen.kit().map(KitView::from_kit);
        Self {
            form: screen.form().clone(),
            busy: screen.busy(),
            is_generating_kit: screen.is_generating_kit(),
            is_generating_onboarding: screen.is_generating_onboarding(),
            is_analyzing: screen.is_analyzing(),
            onboarding_state: screen.onboarding_state(),
            errors: screen.errors().clone(),
            active_tab: kit.as_ref().map(|_| screen.active_tab()),
            kit,
            analysis: screen.analysis().map(AnalysisView::from_analysis),
            visible_tabs: screen.visible_tabs(),
            can_generate_onboarding: screen.can_generate_onboarding(),
            copied: screen.copied_targets(),
            quick_starts: QuickStart::ALL
                .into_iter()
                .map(|template| QuickStartOption {
                    id: template,
                    label: template.label(),
                })
                .collect(),
            seniority_options: Seniority::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuickStartOption {
    pub id: QuickStart,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct KitView {
    pub job_description_html: String,
    pub scorecard: Vec<ScorecardView>,
    pub next_steps_email_html: String,
    pub rejection_email_html: String,
    pub onboarding: Option<OnboardingView>,
}

impl KitView {
    fn from_kit(kit: &HiringKit) -> Self {
        Self {
            job_description_html: markdown_to_html(kit.job_description()),
            scorecard: kit
                .interview_scorecard()
                .iter()
                .map(ScorecardView::from_item)
                .collect(),
            next_steps_email_html: render_inline_html(&kit.email_templates().next_steps),
            rejection_email_html: render_inline_html(&kit.email_templates().rejection),
            onboarding: kit.onboarding_plan().map(OnboardingView::from_plan),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScorecardView {
    pub competency: String,
    pub questions: Vec<String>,
    pub weak_html: String,
    pub average_html: String,
    pub strong_html: String,
}

impl ScorecardView {
    fn from_item(item: &ScorecardItem) -> Self {
        Self {
            competency: item.competency.clone(),
            questions: item.questions.clone(),
            weak_html: render_inline_html(&item.scoring_rubric.weak),
            average_html: render_inline_html(&item.scoring_rubric.average),
            strong_html: render_inline_html(&item.scoring_rubric.strong),
        }
    }
}

/// One list of rendered bullet items per 30-day period.
#[derive(Debug, Clone, Serialize)]
pub struct OnboardingView {
    pub day30: Vec<String>,
    pub day60: Vec<String>,
    pub day90: Vec<String>,
}

impl OnboardingView {
    fn from_plan(plan: &OnboardingPlan) -> Self {
        Self {
            day30: render_list_items(&plan.day30),
            day60: render_list_items(&plan.day60),
            day90: render_list_items(&plan.day90),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTone {
    Strong,
    Good,
    Gap,
}

impl MatchTone {
    /// Exact labels only; any other rating is shown as a gap.
    pub fn for_rating(rating: &str) -> Self {
        match rating {
            "Strong Match" => MatchTone::Strong,
            "Good Match" => MatchTone::Good,
            _ => MatchTone::Gap,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompetencyMatchView {
    pub competency: String,
    #[serde(rename = "match")]
    pub rating: String,
    pub tone: MatchTone,
    pub evidence: String,
}

impl CompetencyMatchView {
    fn from_match(m: &CompetencyMatch) -> Self {
        Self {
            competency: m.competency.clone(),
            rating: m.rating.clone(),
            tone: MatchTone::for_rating(&m.rating),
            evidence: m.evidence.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisView {
    pub summary: String,
    pub competency_matches: Vec<CompetencyMatchView>,
    pub suggested_questions: Vec<String>,
}

impl AnalysisView {
    fn from_analysis(analysis: &ResumeAnalysis) -> Self {
        Self {
            summary: analysis.summary.clone(),
            competency_matches: analysis
                .competency_matches
                .iter()
                .map(CompetencyMatchView::from_match)
                .collect(),
            suggested_questions: analysis.suggested_questions.clone(),
        }
    }
}

/// Chat messages are plain text; the client keeps whitespace as typed.
#[derive(Debug, Clone, Serialize)]
pub struct ChatView {
    pub phase: ChatPhase,
    pub busy: bool,
    pub messages: Vec<ChatMessage>,
}

impl ChatView {
    pub fn from_transcript(transcript: &Transcript) -> Self {
        Self {
            phase: transcript.phase(),
            busy: transcript.busy(),
            messages: transcript.messages().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::models::{EmailTemplates, ScoringRubric};

    fn kit() -> HiringKit {
        HiringKit::new(
            "## Role\n- Edit **fast**",
            vec![ScorecardItem {
                competency: "Editing".to_string(),
                questions: vec!["Tell us about a cut <you> love".to_string()],
                scoring_rubric: ScoringRubric {
                    weak: "No **portfolio**".to_string(),
                    average: "Some".to_string(),
                    strong: "Lots".to_string(),
                },
            }],
            EmailTemplates {
                next_steps: "Hi,\n**Next** round".to_string(),
                rejection: "Thanks".to_string(),
            },
        )
    }

    #[test]
    fn test_match_tone_uses_exact_labels() {
        assert_eq!(MatchTone::for_rating("Strong Match"), MatchTone::Strong);
        assert_eq!(MatchTone::for_rating("Good Match"), MatchTone::Good);
        assert_eq!(MatchTone::for_rating("Potential Gap"), MatchTone::Gap);
        assert_eq!(MatchTone::for_rating("strong match"), MatchTone::Gap);
        assert_eq!(MatchTone::for_rating("Excellent"), MatchTone::Gap);
    }

    #[test]
    fn test_kit_view_renders_html() {
        let view = KitView::from_kit(&kit());
        assert_eq!(
            view.job_description_html,
            "<h3>Role</h3><ul><li>Edit <strong>fast</strong></li></ul>"
        );
        assert_eq!(view.next_steps_email_html, "Hi,<br/><strong>Next</strong> round");
        assert_eq!(view.scorecard[0].weak_html, "No <strong>portfolio</strong>");
        // questions stay plain text
        assert_eq!(view.scorecard[0].questions[0], "Tell us about a cut <you> love");
        assert!(view.onboarding.is_none());
    }

    #[test]
    fn test_onboarding_view_lists_items() {
        let mut kit = kit();
        kit.attach_onboarding_plan(OnboardingPlan {
            day30: "- Meet the team\n- Learn tools".to_string(),
            day60: "- Ship".to_string(),
            day90: "Own a series".to_string(),
        });
        let view = KitView::from_kit(&kit).onboarding.unwrap();
        assert_eq!(view.day30, vec!["Meet the team", "Learn tools"]);
        assert_eq!(view.day90, vec!["Own a series"]);
    }

    #[test]
    fn test_hiring_view_without_kit() {
        let view = HiringScreen::new().view();
        assert!(view.kit.is_none());
        assert!(view.active_tab.is_none());
        assert!(view.visible_tabs.is_empty());
        assert_eq!(view.quick_starts.len(), 4);
        assert_eq!(view.seniority_options.len(), 3);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["form"]["seniority"], "Mid-Level");
        assert_eq!(json["onboarding_state"], "no_onboarding");
    }

    #[test]
    fn test_match_view_keeps_wire_name() {
        let view = CompetencyMatchView::from_match(&CompetencyMatch {
            competency: "Editing".to_string(),
            rating: "Good Match".to_string(),
            evidence: "Premiere Pro".to_string(),
        });
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["match"], "Good Match");
        assert_eq!(json["tone"], "good");
    }
}
