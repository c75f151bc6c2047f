//! JSON-schema descriptors for the three output contracts. The gateway
//! forces a function call against exactly one of these, so the response is
//! schema-validated upstream; the evaluator never parses free text.
//!
//! Field names and enum literals must mirror `models.rs` exactly: the
//! tool-call arguments are deserialized straight into those structs.

use serde_json::{json, Value};

pub const COMPARATIVE_FUNCTION: &str = "report_comparative_evaluation";
pub const QUICK_FITMENT_FUNCTION: &str = "report_quick_fitment";
pub const STANDALONE_FUNCTION: &str = "report_standalone_evaluation";

fn score() -> Value {
    json!({ "type": "integer", "minimum": 0, "maximum": 100 })
}

fn sub_scores() -> Value {
    json!({
        "type": "object",
        "properties": {
            "experience_score": score(),
            "skills_score": score(),
            "communication_score": score(),
            "achievements_score": score(),
            "progression_score": score(),
            "cultural_fit_score": score()
        },
        "required": [
            "experience_score", "skills_score", "communication_score",
            "achievements_score", "progression_score", "cultural_fit_score"
        ]
    })
}

fn red_flags() -> Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "type": { "type": "string" },
                "description": { "type": "string" }
            },
            "required": ["type", "description"]
        }
    })
}

fn interview_questions() -> Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "type": { "type": "string" },
                "question": { "type": "string" }
            },
            "required": ["type", "question"]
        }
    })
}

fn string_list() -> Value {
    json!({ "type": "array", "items": { "type": "string" } })
}

pub fn comparative_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "ai_scores": sub_scores(),
            "ai_total": score(),
            "user_total": score(),
            "category_feedback": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "category": { "type": "string" },
                        "user_score": score(),
                        "ai_score": score(),
                        "feedback": { "type": "string" },
                        "performance": {
                            "type": "string",
                            "enum": ["accurate", "too_lenient", "too_strict"]
                        }
                    },
                    "required": ["category", "user_score", "ai_score", "feedback", "performance"]
                }
            },
            "overall_feedback": { "type": "string" },
            "red_flags": red_flags(),
            "interview_questions": interview_questions(),
            "recommendation": { "type": "string" },
            "reasoning": { "type": "string" },
            "suitability_summary": { "type": "string" }
        },
        "required": [
            "ai_scores", "ai_total", "user_total", "category_feedback",
            "overall_feedback", "red_flags", "interview_questions",
            "recommendation", "reasoning"
        ]
    })
}

pub fn quick_fitment_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "fitment_percentage": score(),
            "status": { "type": "string" },
            "matched_skills": string_list(),
            "missing_skills": string_list(),
            "red_flags": red_flags(),
            "recommendation": {
                "type": "string",
                "enum": ["RECOMMENDED", "CONSIDER", "NOT_RECOMMENDED"]
            },
            "reasoning": { "type": "string" },
            "summary": { "type": "string" }
        },
        "required": [
            "fitment_percentage", "status", "matched_skills", "missing_skills",
            "recommendation", "reasoning", "summary"
        ]
    })
}

pub fn standalone_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "scores": sub_scores(),
            "total_score": score(),
            "strengths": string_list(),
            "gaps": string_list(),
            "red_flags": red_flags(),
            "interview_questions": interview_questions(),
            "recommendation": { "type": "string" },
            "reasoning": { "type": "string" },
            "suitability_summary": { "type": "string" }
        },
        "required": [
            "scores", "total_score", "strengths", "gaps", "red_flags",
            "interview_questions", "recommendation", "reasoning"
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::models::FitmentRecommendation;

    #[test]
    fn test_numeric_fields_are_bounded_0_to_100() {
        for schema in [comparative_schema(), quick_fitment_schema(), standalone_schema()] {
            let rendered = schema.to_string();
            assert!(rendered.contains(r#""minimum":0"#));
            assert!(rendered.contains(r#""maximum":100"#));
        }
        assert_eq!(comparative_schema()["properties"]["ai_total"]["maximum"], 100);
        assert_eq!(
            quick_fitment_schema()["properties"]["fitment_percentage"]["minimum"],
            0
        );
    }

    #[test]
    fn test_recommendation_enum_matches_wire_literals() {
        let schema = quick_fitment_schema();
        let literals = schema["properties"]["recommendation"]["enum"]
            .as_array()
            .unwrap()
            .clone();
        for recommendation in [
            FitmentRecommendation::Recommended,
            FitmentRecommendation::Consider,
            FitmentRecommendation::NotRecommended,
        ] {
            let literal = serde_json::to_value(recommendation).unwrap();
            assert!(literals.contains(&literal), "missing {literal}");
        }
    }

    #[test]
    fn test_comparative_required_covers_all_but_suitability() {
        let schema = comparative_schema();
        let required = schema["required"].as_array().unwrap();
        assert!(required.iter().any(|v| v == "ai_scores"));
        assert!(required.iter().any(|v| v == "category_feedback"));
        assert!(!required.iter().any(|v| v == "suitability_summary"));
    }

    #[test]
    fn test_standalone_schema_names_all_result_fields() {
        let schema = standalone_schema();
        let properties = schema["properties"].as_object().unwrap();
        for field in [
            "scores", "total_score", "strengths", "gaps", "red_flags",
            "interview_questions", "recommendation", "reasoning", "suitability_summary",
        ] {
            assert!(properties.contains_key(field), "missing {field}");
        }
    }
}
