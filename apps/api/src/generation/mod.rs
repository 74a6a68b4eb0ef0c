// Structured generation: hiring kit, onboarding plan, resume analysis.
// All LLM calls go through llm_client; no direct HTTP here.

pub mod kit;
pub mod models;
pub mod onboarding;
pub mod prompts;
pub mod schema;
pub mod screening;
pub mod structured;

pub use kit::{generate_hiring_kit, KitRequest};
pub use onboarding::{generate_onboarding_plan, OnboardingRequest};
pub use screening::{analyze_resume, AnalysisRequest};
pub use structured::GenerationError;
