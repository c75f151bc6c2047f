//! Fallback Scorer — local, no-network substitute used when the gateway is
//! rate limited, unpaid, or down. Keeps the training flow usable during an
//! outage; every result carries an explicit disclosure so the UI can render
//! a degraded-confidence notice.
//!
//! Deterministic-with-jitter: scores are random within documented bounds so
//! tests bound them rather than pin them.

use rand::Rng;

use crate::evaluation::models::{
    CategoryFeedback, ComparativeResult, EvaluationMode, EvaluationRequest, EvaluationResult,
    FitmentRecommendation, InterviewQuestion, PerformanceTag, QuickFitmentResult, Scorecard,
    StandaloneResult, SubScores,
};

/// Disclosure embedded in reasoning and overall feedback of every fallback
/// result. The UI keys its degraded-confidence notice off this text.
pub const FALLBACK_DISCLOSURE: &str = "AI analysis was unavailable for this resume; \
    a built-in fallback scorer produced this assessment. Treat the scores as \
    low-confidence estimates.";

/// Jitter applied to each trainee sub-score in comparative mode.
const COMPARATIVE_JITTER: i64 = 10;
/// Clamp range for jittered comparative scores.
const COMPARATIVE_MIN: i64 = 30;
const COMPARATIVE_MAX: i64 = 95;
/// Uniform range for standalone scores.
const STANDALONE_MIN: u32 = 50;
const STANDALONE_MAX: u32 = 90;
/// Uniform range for quick-fitment percentages.
const FITMENT_MIN: u32 = 40;
const FITMENT_MAX: u32 = 75;

const CATEGORIES: [&str; 6] = [
    "experience",
    "skills",
    "communication",
    "achievements",
    "progression",
    "cultural_fit",
];

/// Produces the mode-appropriate fallback result for a request.
pub fn fallback_result(request: &EvaluationRequest) -> EvaluationResult {
    match &request.mode {
        EvaluationMode::Comparative { scorecard } => {
            EvaluationResult::Comparative(comparative_fallback(&request.domain, scorecard))
        }
        EvaluationMode::QuickFitment { .. } => {
            EvaluationResult::QuickFitment(quick_fitment_fallback(&request.domain))
        }
        EvaluationMode::Standalone => {
            EvaluationResult::Standalone(standalone_fallback(&request.domain))
        }
    }
}

/// Each AI sub-score is the trainee's score plus jitter in [-10, 10],
/// clamped to [30, 95]; the total is the rounded mean of the six.
pub fn comparative_fallback(domain: &str, scorecard: &Scorecard) -> ComparativeResult {
    let mut rng = rand::thread_rng();
    let ai_scores = SubScores {
        experience_score: jittered(scorecard.experience_score, &mut rng),
        skills_score: jittered(scorecard.skills_score, &mut rng),
        communication_score: jittered(scorecard.communication_score, &mut rng),
        achievements_score: jittered(scorecard.achievements_score, &mut rng),
        progression_score: jittered(scorecard.progression_score, &mut rng),
        cultural_fit_score: jittered(scorecard.cultural_fit_score, &mut rng),
    };

    let user_scores = [
        scorecard.experience_score,
        scorecard.skills_score,
        scorecard.communication_score,
        scorecard.achievements_score,
        scorecard.progression_score,
        scorecard.cultural_fit_score,
    ];
    let ai_score_values = [
        ai_scores.experience_score,
        ai_scores.skills_score,
        ai_scores.communication_score,
        ai_scores.achievements_score,
        ai_scores.progression_score,
        ai_scores.cultural_fit_score,
    ];

    let category_feedback = CATEGORIES
        .iter()
        .zip(user_scores)
        .zip(ai_score_values)
        .map(|((category, user_score), ai_score)| CategoryFeedback {
            category: category.to_string(),
            user_score,
            ai_score,
            feedback: format!(
                "Your {category} score could not be checked against a live AI \
                 assessment. Compare it against the {domain} rubric manually."
            ),
            performance: compare_scores(user_score, ai_score),
        })
        .collect();

    ComparativeResult {
        ai_total: ai_scores.rounded_mean(),
        ai_scores,
        user_total: scorecard.total_score,
        category_feedback,
        overall_feedback: format!(
            "{FALLBACK_DISCLOSURE} Your scorecard was recorded and counts toward \
             your training progress."
        ),
        red_flags: vec![],
        interview_questions: generic_questions(domain),
        recommendation: "Manual review recommended".to_string(),
        reasoning: FALLBACK_DISCLOSURE.to_string(),
        suitability_summary: None,
        training_config_applied: false,
        domain: String::new(),
    }
}

/// Six sub-scores drawn uniformly from [50, 90]; total is their rounded mean.
pub fn standalone_fallback(domain: &str) -> StandaloneResult {
    let mut rng = rand::thread_rng();
    let scores = SubScores {
        experience_score: rng.gen_range(STANDALONE_MIN..=STANDALONE_MAX),
        skills_score: rng.gen_range(STANDALONE_MIN..=STANDALONE_MAX),
        communication_score: rng.gen_range(STANDALONE_MIN..=STANDALONE_MAX),
        achievements_score: rng.gen_range(STANDALONE_MIN..=STANDALONE_MAX),
        progression_score: rng.gen_range(STANDALONE_MIN..=STANDALONE_MAX),
        cultural_fit_score: rng.gen_range(STANDALONE_MIN..=STANDALONE_MAX),
    };

    StandaloneResult {
        total_score: scores.rounded_mean(),
        scores,
        strengths: vec![
            "Resume received and queued for full review".to_string(),
            format!("Candidate applied to the {domain} department"),
        ],
        gaps: vec!["Detailed AI analysis pending".to_string()],
        red_flags: vec![],
        interview_questions: generic_questions(domain),
        recommendation: "Manual review recommended".to_string(),
        reasoning: FALLBACK_DISCLOSURE.to_string(),
        suitability_summary: None,
        training_config_applied: false,
        domain: String::new(),
    }
}

/// Fitment percentage drawn uniformly from [40, 75]; status and
/// recommendation derive from it. Matched/missing skills cannot be computed
/// locally and are left empty.
pub fn quick_fitment_fallback(domain: &str) -> QuickFitmentResult {
    let mut rng = rand::thread_rng();
    let fitment_percentage = rng.gen_range(FITMENT_MIN..=FITMENT_MAX);

    let (status, recommendation) = if fitment_percentage >= 70 {
        ("Likely fit", FitmentRecommendation::Recommended)
    } else if fitment_percentage >= 50 {
        ("Possible fit", FitmentRecommendation::Consider)
    } else {
        ("Uncertain fit", FitmentRecommendation::NotRecommended)
    };

    QuickFitmentResult {
        fitment_percentage,
        status: status.to_string(),
        matched_skills: vec![],
        missing_skills: vec![],
        red_flags: None,
        recommendation,
        reasoning: FALLBACK_DISCLOSURE.to_string(),
        summary: format!(
            "Estimated fit for the {domain} role pending full AI analysis."
        ),
        training_config_applied: false,
        domain: String::new(),
    }
}

fn jittered(user_score: u32, rng: &mut impl Rng) -> u32 {
    let jitter = rng.gen_range(-COMPARATIVE_JITTER..=COMPARATIVE_JITTER);
    (user_score as i64 + jitter).clamp(COMPARATIVE_MIN, COMPARATIVE_MAX) as u32
}

fn compare_scores(user_score: u32, ai_score: u32) -> PerformanceTag {
    let diff = user_score as i64 - ai_score as i64;
    if diff.abs() <= 5 {
        PerformanceTag::Accurate
    } else if diff > 0 {
        PerformanceTag::TooLenient
    } else {
        PerformanceTag::TooStrict
    }
}

fn generic_questions(domain: &str) -> Vec<InterviewQuestion> {
    vec![
        InterviewQuestion {
            question_type: "experience".to_string(),
            question: format!(
                "Walk me through your most relevant experience for a {domain} role."
            ),
        },
        InterviewQuestion {
            question_type: "behavioral".to_string(),
            question: "Tell me about a time you handled a difficult stakeholder.".to_string(),
        },
        InterviewQuestion {
            question_type: "motivation".to_string(),
            question: format!("What draws you to working in {domain}?"),
        },
    ]
}
