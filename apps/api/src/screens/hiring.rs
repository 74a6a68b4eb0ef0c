//! Hiring screen view-state.
//!
//! Three operations share the screen: kit generation, onboarding plan
//! generation and resume analysis. Only one may be in flight at a time; while
//! any runs, every submit control and form edit is rejected.
//!
//! `HiringScreen` is the synchronous state machine. `HiringSession` wraps it in
//! a lock and drives the remote calls, holding the lock only between awaits.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::generation::models::{HiringKit, OnboardingPlan, ResumeAnalysis, Seniority};
use crate::generation::{
    analyze_resume, generate_hiring_kit, generate_onboarding_plan, AnalysisRequest,
    GenerationError, KitRequest, OnboardingRequest,
};
use crate::llm_client::{GenerativeModel, ModelConfig};
use crate::render::views::HiringView;
use crate::screens::clipboard::{Clipboard, ClipboardError, CopyButton, CopyTarget};
use crate::screens::templates::QuickStart;

pub const DEFAULT_COMPANY_CONTEXT: &str = "We are Trakin Tech, a leading Indian YouTube channel focused on technology. We create high-quality, engaging videos including reviews, comparisons, and news about the latest gadgets, especially for the Indian market. Our tone is energetic, informative, and authentic. Our culture is fast-paced, creative, and collaborative, with a strong emphasis on staying ahead of tech trends.";

pub const MISSING_KIT_INPUTS: &str =
    "Please ensure both Company Context and Job Notes are filled out.";
pub const MISSING_RESUME: &str = "Please paste the resume text to analyze.";

// ────────────────────────────────────────────────────────────────────────────
// State types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Jd,
    Scorecard,
    Emails,
    Onboarding,
    Screener,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HiringForm {
    pub company_context: String,
    pub notes: String,
    pub seniority: Seniority,
    pub resume_text: String,
}

impl Default for HiringForm {
    fn default() -> Self {
        Self {
            company_context: DEFAULT_COMPANY_CONTEXT.to_string(),
            notes: String::new(),
            seniority: Seniority::default(),
            resume_text: String::new(),
        }
    }
}

/// Partial form edit; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormUpdate {
    pub company_context: Option<String>,
    pub notes: Option<String>,
    pub seniority: Option<Seniority>,
    pub resume_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KitState {
    Idle,
    Generating,
    Ready(HiringKit),
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingState {
    NoOnboarding,
    Generating,
    Ready,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisState {
    NoAnalysis,
    Analyzing,
    Ready(ResumeAnalysis),
    Failed,
}

/// Inline error slots, one per operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScreenErrors {
    pub kit: Option<String>,
    pub onboarding: Option<String>,
    pub analysis: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Empty required input; also recorded in the screen's error slot.
    #[error("{0}")]
    Invalid(&'static str),

    #[error("Another generation is already in progress")]
    Busy,

    #[error("Generate a hiring kit first")]
    NoKit,

    #[error("An onboarding plan is already attached to this hiring kit")]
    OnboardingExists,

    #[error("Generate an onboarding plan before opening its tab")]
    TabUnavailable,

    #[error("There is nothing to copy for {0:?}")]
    NothingToCopy(CopyTarget),

    #[error(transparent)]
    Clipboard(ClipboardErrorMessage),
}

/// Clipboard failures carried as text so `Rejection` stays comparable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ClipboardErrorMessage(pub String);

impl From<ClipboardError> for Rejection {
    fn from(e: ClipboardError) -> Self {
        Rejection::Clipboard(ClipboardErrorMessage(e.to_string()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// State machine
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct HiringScreen {
    form: HiringForm,
    kit: KitState,
    onboarding: OnboardingState,
    analysis: AnalysisState,
    active_tab: Tab,
    errors: ScreenErrors,
    copy_buttons: HashMap<CopyTarget, CopyButton>,
}

impl Default for HiringScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl HiringScreen {
    pub fn new() -> Self {
        Self {
            form: HiringForm::default(),
            kit: KitState::Idle,
            onboarding: OnboardingState::NoOnboarding,
            analysis: AnalysisState::NoAnalysis,
            active_tab: Tab::Jd,
            errors: ScreenErrors::default(),
            copy_buttons: CopyTarget::ALL
                .into_iter()
                .map(|target| (target, CopyButton::default()))
                .collect(),
        }
    }

    pub fn form(&self) -> &HiringForm {
        &self.form
    }

    #[cfg(test)]
    pub fn kit_state(&self) -> &KitState {
        &self.kit
    }

    pub fn kit(&self) -> Option<&HiringKit> {
        match &self.kit {
            KitState::Ready(kit) => Some(kit),
            _ => None,
        }
    }

    pub fn onboarding_state(&self) -> OnboardingState {
        self.onboarding
    }

    #[cfg(test)]
    pub fn analysis_state(&self) -> &AnalysisState {
        &self.analysis
    }

    pub fn analysis(&self) -> Option<&ResumeAnalysis> {
        match &self.analysis {
            AnalysisState::Ready(analysis) => Some(analysis),
            _ => None,
        }
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn errors(&self) -> &ScreenErrors {
        &self.errors
    }

    pub fn is_generating_kit(&self) -> bool {
        self.kit == KitState::Generating
    }

    pub fn is_generating_onboarding(&self) -> bool {
        self.onboarding == OnboardingState::Generating
    }

    pub fn is_analyzing(&self) -> bool {
        self.analysis == AnalysisState::Analyzing
    }

    /// True while any of the three operations is in flight.
    pub fn busy(&self) -> bool {
        self.is_generating_kit() || self.is_generating_onboarding() || self.is_analyzing()
    }

    /// The onboarding action is offered once a kit exists and until a plan is attached.
    pub fn can_generate_onboarding(&self) -> bool {
        self.kit().is_some_and(|kit| kit.onboarding_plan().is_none())
    }

    pub fn visible_tabs(&self) -> Vec<Tab> {
        let Some(kit) = self.kit() else {
            return Vec::new();
        };
        let mut tabs = vec![Tab::Jd, Tab::Scorecard, Tab::Emails];
        if kit.onboarding_plan().is_some() {
            tabs.push(Tab::Onboarding);
        }
        tabs.push(Tab::Screener);
        tabs
    }

    pub fn copied_targets(&self) -> Vec<CopyTarget> {
        CopyTarget::ALL
            .into_iter()
            .filter(|target| self.copy_buttons.get(target).is_some_and(CopyButton::copied))
            .collect()
    }

    pub fn update_form(&mut self, update: FormUpdate) -> Result<(), Rejection> {
        if self.busy() {
            return Err(Rejection::Busy);
        }
        if let Some(company_context) = update.company_context {
            self.form.company_context = company_context;
        }
        if let Some(notes) = update.notes {
            self.form.notes = notes;
        }
        if let Some(seniority) = update.seniority {
            self.form.seniority = seniority;
        }
        if let Some(resume_text) = update.resume_text {
            self.form.resume_text = resume_text;
        }
        Ok(())
    }

    pub fn apply_quick_start(&mut self, template: QuickStart) -> Result<(), Rejection> {
        if self.busy() {
            return Err(Rejection::Busy);
        }
        self.form.notes = template.notes().to_string();
        Ok(())
    }

    pub fn select_tab(&mut self, tab: Tab) -> Result<(), Rejection> {
        if !self.visible_tabs().contains(&tab) {
            return Err(if self.kit().is_none() {
                Rejection::NoKit
            } else {
                Rejection::TabUnavailable
            });
        }
        self.active_tab = tab;
        Ok(())
    }

    // ── Hiring kit ──────────────────────────────────────────────────────────

    /// Idle/Ready/Failed → Generating. Discards the previous kit and everything derived from it.
    pub fn begin_kit(&mut self) -> Result<KitRequest, Rejection> {
        if self.busy() {
            return Err(Rejection::Busy);
        }
        if self.form.notes.trim().is_empty() || self.form.company_context.trim().is_empty() {
            self.errors.kit = Some(MISSING_KIT_INPUTS.to_string());
            return Err(Rejection::Invalid(MISSING_KIT_INPUTS));
        }

        self.kit = KitState::Generating;
        self.onboarding = OnboardingState::NoOnboarding;
        self.analysis = AnalysisState::NoAnalysis;
        self.form.resume_text.clear();
        self.errors = ScreenErrors::default();

        Ok(KitRequest {
            notes: self.form.notes.clone(),
            company_context: self.form.company_context.clone(),
            seniority: self.form.seniority,
        })
    }

    pub fn complete_kit(&mut self, result: Result<HiringKit, GenerationError>) {
        if !self.is_generating_kit() {
            warn!("Ignoring hiring kit result: no generation in flight");
            return;
        }
        match result {
            Ok(kit) => {
                self.kit = KitState::Ready(kit);
                self.active_tab = Tab::Jd;
            }
            Err(e) => {
                self.kit = KitState::Failed;
                self.errors.kit = Some(e.to_string());
            }
        }
    }

    // ── Onboarding plan ─────────────────────────────────────────────────────

    pub fn begin_onboarding(&mut self) -> Result<OnboardingRequest, Rejection> {
        if self.busy() {
            return Err(Rejection::Busy);
        }
        let Some(kit) = self.kit() else {
            return Err(Rejection::NoKit);
        };
        if kit.onboarding_plan().is_some() {
            return Err(Rejection::OnboardingExists);
        }

        let request = OnboardingRequest {
            job_description: kit.job_description().to_string(),
            company_context: self.form.company_context.clone(),
        };
        self.onboarding = OnboardingState::Generating;
        self.errors.onboarding = None;
        Ok(request)
    }

    pub fn complete_onboarding(&mut self, result: Result<OnboardingPlan, GenerationError>) {
        if !self.is_generating_onboarding() {
            warn!("Ignoring onboarding result: no generation in flight");
            return;
        }
        match result {
            Ok(plan) => match &mut self.kit {
                KitState::Ready(kit) => {
                    kit.attach_onboarding_plan(plan);
                    self.onboarding = OnboardingState::Ready;
                    self.active_tab = Tab::Onboarding;
                }
                _ => self.onboarding = OnboardingState::NoOnboarding,
            },
            Err(e) => {
                self.onboarding = OnboardingState::Failed;
                self.errors.onboarding = Some(e.to_string());
            }
        }
    }

    // ── Resume analysis ─────────────────────────────────────────────────────

    pub fn begin_analysis(&mut self) -> Result<AnalysisRequest, Rejection> {
        if self.busy() {
            return Err(Rejection::Busy);
        }
        let Some(kit) = self.kit() else {
            return Err(Rejection::NoKit);
        };
        if self.form.resume_text.trim().is_empty() {
            self.errors.analysis = Some(MISSING_RESUME.to_string());
            return Err(Rejection::Invalid(MISSING_RESUME));
        }

        let request = AnalysisRequest {
            resume_text: self.form.resume_text.clone(),
            job_description: kit.job_description().to_string(),
            competencies: kit.competencies().into_iter().map(String::from).collect(),
        };
        self.analysis = AnalysisState::Analyzing;
        self.errors.analysis = None;
        Ok(request)
    }

    pub fn complete_analysis(&mut self, result: Result<ResumeAnalysis, GenerationError>) {
        if !self.is_analyzing() {
            warn!("Ignoring resume analysis result: no analysis in flight");
            return;
        }
        match result {
            Ok(analysis) => self.analysis = AnalysisState::Ready(analysis),
            Err(e) => {
                self.analysis = AnalysisState::Failed;
                self.errors.analysis = Some(e.to_string());
            }
        }
    }

    // ── Copy ────────────────────────────────────────────────────────────────

    pub fn copy_text(&self, target: CopyTarget) -> Option<String> {
        let kit = self.kit()?;
        match target {
            CopyTarget::JobDescription => Some(kit.job_description().to_string()),
            CopyTarget::Scorecard => Some(kit.scorecard_copy_text()),
            CopyTarget::NextStepsEmail => Some(kit.email_templates().next_steps.clone()),
            CopyTarget::RejectionEmail => Some(kit.email_templates().rejection.clone()),
            CopyTarget::OnboardingPlan => kit.onboarding_plan().map(OnboardingPlan::copy_text),
        }
    }

    /// Writes the target's text to the clipboard and starts its acknowledgement.
    pub fn copy(&self, target: CopyTarget, clipboard: &dyn Clipboard) -> Result<(), Rejection> {
        let text = self
            .copy_text(target)
            .ok_or(Rejection::NothingToCopy(target))?;
        match self.copy_buttons.get(&target) {
            Some(button) => button.copy(clipboard, &text)?,
            None => clipboard.write_text(&text)?,
        }
        Ok(())
    }

    pub fn view(&self) -> HiringView {
        HiringView::from_screen(self)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Session: lock + remote orchestration
// ────────────────────────────────────────────────────────────────────────────

/// One hiring screen shared between requests.
#[derive(Debug, Default)]
pub struct HiringSession {
    screen: Mutex<HiringScreen>,
}

impl HiringSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> MutexGuard<'_, HiringScreen> {
        self.screen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn view(&self) -> HiringView {
        self.screen().view()
    }

    pub async fn generate_kit(
        &self,
        llm: &dyn GenerativeModel,
        models: &ModelConfig,
    ) -> Result<HiringView, Rejection> {
        let request = self.screen().begin_kit()?;
        let result = generate_hiring_kit(llm, models, &request).await;

        let mut screen = self.screen();
        screen.complete_kit(result);
        Ok(screen.view())
    }

    pub async fn generate_onboarding(
        &self,
        llm: &dyn GenerativeModel,
        models: &ModelConfig,
    ) -> Result<HiringView, Rejection> {
        let request = self.screen().begin_onboarding()?;
        let result = generate_onboarding_plan(llm, models, &request).await;

        let mut screen = self.screen();
        screen.complete_onboarding(result);
        Ok(screen.view())
    }

    pub async fn analyze_resume(
        &self,
        llm: &dyn GenerativeModel,
        models: &ModelConfig,
    ) -> Result<HiringView, Rejection> {
        let request = self.screen().begin_analysis()?;
        let result = analyze_resume(llm, models, &request).await;

        let mut screen = self.screen();
        screen.complete_analysis(result);
        Ok(screen.view())
    }
}
