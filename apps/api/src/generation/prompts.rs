// All LLM prompt templates for the Generation module.
// Placeholders are filled with llm_client::prompts::fill_template, which embeds
// user text verbatim between the `---` delimiters.

use crate::generation::models::Seniority;
use crate::llm_client::prompts::fill_template;

/// Hiring kit prompt. Replace: {company_context}, {seniority}, {notes}
pub const HIRING_KIT_PROMPT_TEMPLATE: &str = r#"You are an expert recruitment strategist for a leading Indian tech YouTube channel, Trakin Tech.
Here is some context about the company:
---
{company_context}
---

Your task is to generate a complete "Hiring Kit" in JSON format based on the company context, raw job notes, and the specified seniority level. The tone should be energetic, authentic, and appealing to an audience passionate about technology.

**Seniority Level:** {seniority}

**Raw Notes:**
---
{notes}
---

**Instructions:**
Based on all the provided information, create a Hiring Kit with three components. The seniority level MUST significantly influence the final output:
1.  **Job Description**: A polished, engaging job description for LinkedIn.
    - For a **'Junior'** role, focus on foundational skills, learning opportunities, and assisting senior members. Requirements should be for ~1-2 years of experience or strong portfolio projects.
    - For a **'Mid-Level'** role, expect solid proficiency, autonomy on tasks, and ~3-5 years of relevant experience.
    - For a **'Senior'** role, emphasize leadership, mentorship, strategic thinking, and complex problem-solving. Require 5+ years of experience and a track record of significant impact.
    - Use markdown headings (e.g., #, ##) and bullet points (-). Include sections like "What You'll Do", "What We're Looking For", and "Why You'll Love Trakin Tech".

2.  **Interview Scorecard**: Identify 3-5 core competencies. For each competency, create:
    a. 2-3 insightful behavioral interview questions. These questions should vary in complexity based on seniority. Senior-level questions should probe more into strategy, leadership, and handling ambiguity.
    b. A scoring rubric ("Weak", "Average", "Strong"). The expectations for a "Strong" answer must be higher for a senior role.

3.  **Email Templates**:
    a. **Next Steps Email**: A friendly and professional email for successful candidates.
    b. **Rejection Email**: A respectful, empathetic rejection email for unsuccessful candidates.

Return the entire Hiring Kit in the specified JSON format."#;

/// Onboarding plan prompt. Replace: {company_context}, {job_description}
pub const ONBOARDING_PROMPT_TEMPLATE: &str = r#"You are an expert HR and Talent Development strategist at Trakin Tech, a leading tech YouTube channel.
Company Context:
---
{company_context}
---

Based on the company context and the detailed job description below, create a comprehensive 30-60-90 day onboarding plan for the new hire. The plan should be structured to set them up for success in a fast-paced content creation environment.

- **First 30 Days (Focus on Learning):** Goals should revolve around understanding the Trakin Tech brand voice, content workflow, tools, and audience. Include tasks like reviewing top-performing videos, meeting key team members, understanding the style guide, and shadowing a video project from concept to publish.
- **First 60 Days (Focus on Contributing):** Goals should transition to active participation and contribution. Include tasks like taking on smaller assignments (e.g., editing a segment, researching a topic), collaborating on a full video project, and presenting initial work for feedback.
- **First 90 Days (Focus on Owning):** Goals should focus on autonomy and initiative. Include tasks like leading a small project (e.g., scripting or editing a video solo), proposing new video ideas or format improvements, and demonstrating mastery of their core responsibilities.

Use clear markdown bullet points for each section to outline specific, actionable goals.

Job Description:
---
{job_description}
---

Return the onboarding plan in the specified JSON format."#;

/// Resume analysis prompt. Replace: {job_description}, {competencies}, {resume_text}
pub const RESUME_ANALYSIS_PROMPT_TEMPLATE: &str = r#"You are an expert HR analyst and recruiter for Trakin Tech, a leading tech YouTube channel. Your task is to analyze a candidate's resume against a specific job description and a set of core competencies. Provide a structured, unbiased analysis in JSON format.

**Job Description:**
---
{job_description}
---

**Core Competencies for the Role:**
---
{competencies}
---

**Candidate's Resume:**
---
{resume_text}
---

**Analysis Instructions:**
1.  **Summary:** Write a concise 2-3 sentence summary of the candidate's overall fit for the role.
2.  **Competency Matches:** For each of the core competencies, provide a match rating ('Strong Match', 'Good Match', 'Potential Gap') and cite specific evidence (or lack thereof) from the resume.
3.  **Suggested Questions:** Generate 2-3 specific, insightful interview questions based on the resume. These questions should be designed to probe deeper into their stated experience or explore potential gaps you've identified.

Return the complete analysis in the specified JSON format."#;

pub fn hiring_kit_prompt(notes: &str, company_context: &str, seniority: Seniority) -> String {
    fill_template(
        HIRING_KIT_PROMPT_TEMPLATE,
        &[
            ("company_context", company_context),
            ("seniority", seniority.label()),
            ("notes", notes),
        ],
    )
}

pub fn onboarding_prompt(job_description: &str, company_context: &str) -> String {
    fill_template(
        ONBOARDING_PROMPT_TEMPLATE,
        &[
            ("company_context", company_context),
            ("job_description", job_description),
        ],
    )
}

pub fn resume_analysis_prompt(
    resume_text: &str,
    job_description: &str,
    competencies: &[String],
) -> String {
    let competencies = competencies.join(", ");

    fill_template(
        RESUME_ANALYSIS_PROMPT_TEMPLATE,
        &[
            ("job_description", job_description),
            ("competencies", &competencies),
            ("resume_text", resume_text),
        ],
    )
}
