//! Request and result models for the evaluation pipeline.
//!
//! The request mode is a sum type fixed once at the HTTP boundary; internal
//! code matches on the variant instead of probing optional fields, so it
//! cannot mis-detect mode. Exactly one result shape exists per mode.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Request side
// ────────────────────────────────────────────────────────────────────────────

/// Six trainee sub-scores plus the total, as entered on the scorecard UI.
/// All 0-100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    pub experience_score: u32,
    pub skills_score: u32,
    pub progression_score: u32,
    pub achievements_score: u32,
    pub communication_score: u32,
    pub cultural_fit_score: u32,
    pub total_score: u32,
}

/// One resume evaluation. Transient: created per call, discarded after the
/// response.
#[derive(Debug, Clone)]
pub struct EvaluationRequest {
    pub domain: String,
    pub resume_text: String,
    pub mode: EvaluationMode,
}

/// The three evaluation modes. Priority at the boundary:
/// scorecard > job description > standalone.
#[derive(Debug, Clone)]
pub enum EvaluationMode {
    /// A trainee scorecard was supplied; compare AI scores against it.
    Comparative { scorecard: Scorecard },
    /// A job description was supplied, no scorecard.
    QuickFitment { job_description: String },
    /// Resume only.
    Standalone,
}

impl EvaluationMode {
    pub fn name(&self) -> &'static str {
        match self {
            EvaluationMode::Comparative { .. } => "comparative",
            EvaluationMode::QuickFitment { .. } => "quick_fitment",
            EvaluationMode::Standalone => "standalone",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Result side
// ────────────────────────────────────────────────────────────────────────────

/// The six AI category sub-scores, each 0-100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubScores {
    pub experience_score: u32,
    pub skills_score: u32,
    pub communication_score: u32,
    pub achievements_score: u32,
    pub progression_score: u32,
    pub cultural_fit_score: u32,
}

impl SubScores {
    /// Arithmetic mean of the six scores, rounded to the nearest integer.
    pub fn rounded_mean(&self) -> u32 {
        let sum = self.experience_score
            + self.skills_score
            + self.communication_score
            + self.achievements_score
            + self.progression_score
            + self.cultural_fit_score;
        (sum as f64 / 6.0).round() as u32
    }
}

/// How the trainee's score compared to the AI's for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceTag {
    Accurate,
    TooLenient,
    TooStrict,
}

/// Per-category comparison between trainee and AI scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryFeedback {
    pub category: String,
    pub user_score: u32,
    pub ai_score: u32,
    pub feedback: String,
    pub performance: PerformanceTag,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedFlag {
    #[serde(rename = "type")]
    pub flag_type: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewQuestion {
    #[serde(rename = "type")]
    pub question_type: String,
    pub question: String,
}

/// Quick-fitment recommendation. Wire literals are screaming snake case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FitmentRecommendation {
    Recommended,
    Consider,
    NotRecommended,
}

/// Comparative-mode result: AI scores side by side with the trainee's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparativeResult {
    pub ai_scores: SubScores,
    pub ai_total: u32,
    pub user_total: u32,
    pub category_feedback: Vec<CategoryFeedback>,
    pub overall_feedback: String,
    pub red_flags: Vec<RedFlag>,
    pub interview_questions: Vec<InterviewQuestion>,
    pub recommendation: String,
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suitability_summary: Option<String>,
    // Annotation fields set by the evaluator, never by the gateway payload.
    #[serde(default)]
    pub training_config_applied: bool,
    #[serde(default)]
    pub domain: String,
}

/// Quick-fitment result: resume scored against a job description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickFitmentResult {
    /// 0-100.
    pub fitment_percentage: u32,
    pub status: String,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub red_flags: Option<Vec<RedFlag>>,
    pub recommendation: FitmentRecommendation,
    pub reasoning: String,
    pub summary: String,
    #[serde(default)]
    pub training_config_applied: bool,
    #[serde(default)]
    pub domain: String,
}

/// Standalone result: resume scored on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandaloneResult {
    pub scores: SubScores,
    pub total_score: u32,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub red_flags: Vec<RedFlag>,
    pub interview_questions: Vec<InterviewQuestion>,
    pub recommendation: String,
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suitability_summary: Option<String>,
    #[serde(default)]
    pub training_config_applied: bool,
    #[serde(default)]
    pub domain: String,
}

/// Exactly one shape per call. Serialized untagged: the wire response is the
/// bare mode-appropriate object.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EvaluationResult {
    Comparative(ComparativeResult),
    QuickFitment(QuickFitmentResult),
    Standalone(StandaloneResult),
}

impl EvaluationResult {
    /// Stamps the rule-application metadata onto the result.
    pub fn annotate(&mut self, training_config_applied: bool, domain: &str) {
        match self {
            EvaluationResult::Comparative(r) => {
                r.training_config_applied = training_config_applied;
                r.domain = domain.to_string();
            }
            EvaluationResult::QuickFitment(r) => {
                r.training_config_applied = training_config_applied;
                r.domain = domain.to_string();
            }
            EvaluationResult::Standalone(r) => {
                r.training_config_applied = training_config_applied;
                r.domain = domain.to_string();
            }
        }
    }

    pub fn reasoning(&self) -> &str {
        match self {
            EvaluationResult::Comparative(r) => &r.reasoning,
            EvaluationResult::QuickFitment(r) => &r.reasoning,
            EvaluationResult::Standalone(r) => &r.reasoning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fitment_recommendation_wire_literals() {
        assert_eq!(
            serde_json::to_string(&FitmentRecommendation::NotRecommended).unwrap(),
            r#""NOT_RECOMMENDED""#
        );
        let parsed: FitmentRecommendation = serde_json::from_str(r#""RECOMMENDED""#).unwrap();
        assert_eq!(parsed, FitmentRecommendation::Recommended);
    }

    #[test]
    fn test_performance_tag_wire_literals() {
        assert_eq!(
            serde_json::to_string(&PerformanceTag::TooLenient).unwrap(),
            r#""too_lenient""#
        );
    }

    #[test]
    fn test_rounded_mean() {
        let scores = SubScores {
            experience_score: 70,
            skills_score: 71,
            communication_score: 72,
            achievements_score: 73,
            progression_score: 74,
            cultural_fit_score: 75,
        };
        // mean = 72.5, rounds to 73
        assert_eq!(scores.rounded_mean(), 73);
    }

    #[test]
    fn test_standalone_deserializes_without_annotation_fields() {
        // Gateway payloads never include the annotation fields; they default.
        let json = serde_json::json!({
            "scores": {
                "experience_score": 60, "skills_score": 60,
                "communication_score": 60, "achievements_score": 60,
                "progression_score": 60, "cultural_fit_score": 60
            },
            "total_score": 60,
            "strengths": ["clear impact statements"],
            "gaps": ["no leadership experience"],
            "red_flags": [],
            "interview_questions": [],
            "recommendation": "Proceed to phone screen",
            "reasoning": "Solid mid-level profile."
        });
        let result: StandaloneResult = serde_json::from_value(json).unwrap();
        assert!(!result.training_config_applied);
        assert!(result.domain.is_empty());
        assert!(result.suitability_summary.is_none());
    }

    #[test]
    fn test_untagged_serialization_is_the_bare_shape() {
        let result = EvaluationResult::QuickFitment(QuickFitmentResult {
            fitment_percentage: 72,
            status: "Potential fit".to_string(),
            matched_skills: vec!["Rust".to_string()],
            missing_skills: vec![],
            red_flags: None,
            recommendation: FitmentRecommendation::Consider,
            reasoning: "Covers most requirements.".to_string(),
            summary: "Good overlap with the role.".to_string(),
            training_config_applied: true,
            domain: "Sales".to_string(),
        });
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["fitment_percentage"], 72);
        assert_eq!(value["recommendation"], "CONSIDER");
        // Untagged: no enum wrapper key.
        assert!(value.get("QuickFitment").is_none());
        // red_flags None is omitted entirely.
        assert!(value.get("red_flags").is_none());
    }

    #[test]
    fn test_red_flag_uses_type_key_on_the_wire() {
        let flag = RedFlag {
            flag_type: "employment_gap".to_string(),
            description: "14-month unexplained gap".to_string(),
        };
        let value = serde_json::to_value(&flag).unwrap();
        assert_eq!(value["type"], "employment_gap");
    }
}
