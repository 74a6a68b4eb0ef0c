//! Response schemas sent with each structured call, in Gemini's OpenAPI-subset dialect.

use serde_json::{json, Value};

pub fn hiring_kit_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "jobDescription": {
                "type": "STRING",
                "description": "A complete, candidate-friendly job description for LinkedIn. Use markdown for headings and bullets. Include sections like 'What You'll Do', 'What We're Looking For', and 'Why You'll Love Trakin Tech'."
            },
            "interviewScorecard": {
                "type": "ARRAY",
                "description": "An array of 3-5 core competencies for the role. Each competency should have 2-3 tailored behavioral interview questions and a scoring rubric.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "competency": {
                            "type": "STRING",
                            "description": "A core competency required for the role (e.g., 'Video Editing Mastery', 'Creative Storytelling')."
                        },
                        "questions": {
                            "type": "ARRAY",
                            "description": "An array of 2-3 behavioral questions to assess this competency.",
                            "items": { "type": "STRING" }
                        },
                        "scoringRubric": {
                            "type": "OBJECT",
                            "description": "Criteria for evaluating a candidate's response.",
                            "properties": {
                                "weak": {
                                    "type": "STRING",
                                    "description": "Description of a weak or unsatisfactory answer."
                                },
                                "average": {
                                    "type": "STRING",
                                    "description": "Description of an average or satisfactory answer."
                                },
                                "strong": {
                                    "type": "STRING",
                                    "description": "Description of a strong or excellent answer."
                                }
                            },
                            "required": ["weak", "average", "strong"]
                        }
                    },
                    "required": ["competency", "questions", "scoringRubric"]
                }
            },
            "emailTemplates": {
                "type": "OBJECT",
                "description": "Professional and candidate-friendly email templates.",
                "properties": {
                    "nextSteps": {
                        "type": "STRING",
                        "description": "An email template for candidates who are moving on to the next stage. It should be encouraging and clearly state the next steps."
                    },
                    "rejection": {
                        "type": "STRING",
                        "description": "A respectful and constructive rejection email template for unsuccessful candidates. It should thank them for their time and offer encouragement."
                    }
                },
                "required": ["nextSteps", "rejection"]
            }
        },
        "required": ["jobDescription", "interviewScorecard", "emailTemplates"]
    })
}

pub fn onboarding_plan_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "day30": {
                "type": "STRING",
                "description": "A detailed plan for the new hire's first 30 days, focused on learning and integration. Use markdown bullet points."
            },
            "day60": {
                "type": "STRING",
                "description": "A detailed plan for the new hire's next 30 days (days 31-60), focused on contribution and taking on initial responsibilities. Use markdown bullet points."
            },
            "day90": {
                "type": "STRING",
                "description": "A detailed plan for the new hire's following 30 days (days 61-90), focused on owning projects and demonstrating initiative. Use markdown bullet points."
            }
        },
        "required": ["day30", "day60", "day90"]
    })
}

pub fn resume_analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": {
                "type": "STRING",
                "description": "A concise 2-3 sentence summary of the candidate's suitability for the role, based on their resume and the job description."
            },
            "competencyMatches": {
                "type": "ARRAY",
                "description": "An array analyzing the candidate's alignment with each core competency from the interview scorecard.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "competency": {
                            "type": "STRING",
                            "description": "The core competency being assessed."
                        },
                        "match": {
                            "type": "STRING",
                            "description": "A rating of the candidate's alignment (e.g., 'Strong Match', 'Good Match', 'Potential Gap')."
                        },
                        "evidence": {
                            "type": "STRING",
                            "description": "Specific evidence or keywords from the resume that support this rating. Mention missing evidence if it's a gap."
                        }
                    },
                    "required": ["competency", "match", "evidence"]
                }
            },
            "suggestedQuestions": {
                "type": "ARRAY",
                "description": "An array of 2-3 tailored interview questions to ask the candidate. These should probe into areas of strength or potential gaps identified in the resume.",
                "items": { "type": "STRING" }
            }
        },
        "required": ["summary", "competencyMatches", "suggestedQuestions"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required(schema: &Value) -> Vec<&str> {
        schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect()
    }

    #[test]
    fn test_every_required_key_is_a_declared_property() {
        for schema in [
            hiring_kit_schema(),
            onboarding_plan_schema(),
            resume_analysis_schema(),
        ] {
            assert_eq!(schema["type"], "OBJECT");
            for key in required(&schema) {
                assert!(
                    schema["properties"].get(key).is_some(),
                    "{key} required but not declared"
                );
                assert!(schema["properties"][key]["description"].is_string());
            }
        }
    }

    #[test]
    fn test_hiring_kit_schema_top_level_keys() {
        assert_eq!(
            required(&hiring_kit_schema()),
            vec!["jobDescription", "interviewScorecard", "emailTemplates"]
        );
        let items = &hiring_kit_schema()["properties"]["interviewScorecard"]["items"];
        assert_eq!(
            required(items),
            vec!["competency", "questions", "scoringRubric"]
        );
    }

    #[test]
    fn test_resume_schema_match_is_free_string() {
        let schema = resume_analysis_schema();
        let matched = &schema["properties"]["competencyMatches"]["items"]["properties"]["match"];
        assert_eq!(matched["type"], "STRING");
        assert!(matched.get("enum").is_none());
    }
}
