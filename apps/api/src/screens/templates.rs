//! Quick-start job notes for the roles the channel hires most often.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuickStart {
    ContentResearcher,
    Videographer,
    VideoEditor,
    ScriptWriter,
}

impl QuickStart {
    pub const ALL: [QuickStart; 4] = [
        QuickStart::ContentResearcher,
        QuickStart::Videographer,
        QuickStart::VideoEditor,
        QuickStart::ScriptWriter,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            QuickStart::ContentResearcher => "Content Researcher",
            QuickStart::Videographer => "Videographer",
            QuickStart::VideoEditor => "Video Editor",
            QuickStart::ScriptWriter => "Script Writer (Hindi/English)",
        }
    }

    pub fn notes(&self) -> &'static str {
        match self {
            QuickStart::ContentResearcher => CONTENT_RESEARCHER,
            QuickStart::Videographer => VIDEOGRAPHER,
            QuickStart::VideoEditor => VIDEO_EDITOR,
            QuickStart::ScriptWriter => SCRIPT_WRITER,
        }
    }
}

const CONTENT_RESEARCHER: &str = "Role: Content Researcher for Trakin Tech

Responsibilities:
- Deeply research upcoming smartphones, gadgets, and tech trends, with a strong focus on the Indian market.
- Track tech news, product launches, and rumors to identify compelling video topics.
- Create detailed research documents and fact-sheets for the script writers and on-screen talent.
- Compare product specifications and market positioning to find unique angles for our videos.
- Monitor viewer comments and community forums to understand audience interest and questions.

Requirements:
- Proven experience as a tech researcher or journalist.
- Obsessive knowledge of the current tech landscape, especially mobile technology.
- Ability to synthesize large amounts of information into concise, accurate summaries.
- Excellent English writing skills.
- Familiarity with the YouTube tech community.";

const VIDEOGRAPHER: &str = "Role: Videographer for Trakin Tech

Responsibilities:
- Shoot high-quality product b-roll, unboxings, and presenter segments (A-roll) in our studio.
- Set up and manage lighting, audio, and camera equipment (e.g., Sony FX series, gimbals, sliders).
- Collaborate with the creative team to develop a visually engaging style for each video.
- Ensure all footage is captured in the correct format and is well-organized for the editing team.
- Occasionally shoot on-location for events or special segments.

Requirements:
- 3+ years of professional videography experience, preferably for digital content.
- Expertise with professional cinema cameras, lighting techniques, and audio recording.
- A strong portfolio showcasing clean, modern product videography.
- Ability to work efficiently in a fast-paced, deadline-driven environment.";

const VIDEO_EDITOR: &str = "Role: Video Editor for Trakin Tech

Responsibilities:
- Edit videos in a fast-paced style suitable for YouTube, focusing on high audience retention.
- Work with Adobe Premiere Pro and After Effects to assemble footage, add graphics, color grade, and mix audio.
- Incorporate motion graphics, text overlays, and sound effects to create dynamic and informative videos.
- Adhere to the Trakin Tech brand style and tight deadlines.
- Collaborate with researchers and scriptwriters to ensure the final video is accurate and tells a compelling story.

Requirements:
- 4+ years of experience editing for YouTube or other digital platforms.
- Advanced proficiency in Adobe Premiere Pro and After Effects.
- A strong understanding of pacing, storytelling, and what makes a tech video successful on YouTube.
- Portfolio demonstrating high-quality, fast-paced edits.";

const SCRIPT_WRITER: &str = "Role: Script Writer for Trakin Tech

Responsibilities:
- Write clear, concise, and engaging video scripts based on research documents.
- Translate complex technical information into easy-to-understand language for a broad audience.
- Write in a conversational style that matches our on-screen talent's voice (primarily in a mix of Hindi and English - \"Hinglish\").
- Collaborate with the research team to ensure technical accuracy.
- Structure scripts for optimal viewer engagement and retention on YouTube.

Requirements:
- Proven experience in scriptwriting for video content, preferably in the tech niche.
- Fluent in both Hindi and English, with an exceptional ability to write in conversational Hinglish.
- Ability to simplify complex topics without losing important details.
- A portfolio of written scripts or links to published videos.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_template_names_its_role() {
        for template in QuickStart::ALL {
            assert!(template.notes().starts_with("Role: "));
            assert!(template.notes().contains("Responsibilities:"));
        }
    }

    #[test]
    fn test_path_names() {
        let parsed: QuickStart = serde_json::from_str("\"video-editor\"").unwrap();
        assert_eq!(parsed, QuickStart::VideoEditor);
    }
}
