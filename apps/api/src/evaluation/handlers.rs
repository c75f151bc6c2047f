//! Axum route handlers for the Evaluation API.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::evaluation::evaluator::evaluate;
use crate::evaluation::models::{
    EvaluationMode, EvaluationRequest, EvaluationResult, Scorecard,
};
use crate::rules::loader::load_rules;
use crate::state::AppState;

/// Inbound wire shape for one evaluation.
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub resume_text: String,
    /// Domain identifier, e.g. "Sales" or "CRM".
    pub department: String,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub user_scorecard: Option<Scorecard>,
    /// The scorecard only takes effect once the trainee has finished scoring.
    #[serde(default)]
    pub assessment_complete: bool,
}

/// Fixes the evaluation mode once, at the boundary.
/// Priority: completed scorecard > job description > standalone.
fn select_mode(
    user_scorecard: Option<Scorecard>,
    assessment_complete: bool,
    job_description: Option<String>,
) -> EvaluationMode {
    match (user_scorecard, job_description) {
        (Some(scorecard), _) if assessment_complete => {
            EvaluationMode::Comparative { scorecard }
        }
        (_, Some(job_description)) => EvaluationMode::QuickFitment { job_description },
        _ => EvaluationMode::Standalone,
    }
}

/// POST /api/v1/evaluations
///
/// Runs the full pipeline: rule resolution → prompt assembly → gateway call
/// (or fallback substitution) → annotated result.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<EvaluationResult>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }
    if request.department.trim().is_empty() {
        return Err(AppError::Validation("department cannot be empty".to_string()));
    }

    let mode = select_mode(
        request.user_scorecard,
        request.assessment_complete,
        request.job_description,
    );

    let rules = load_rules(state.config_store.as_ref(), &request.department).await;
    info!(
        department = %request.department,
        mode = mode.name(),
        training_enabled = rules.training_enabled,
        "Evaluation requested"
    );

    let evaluation = EvaluationRequest {
        domain: request.department,
        resume_text: request.resume_text,
        mode,
    };

    let result = evaluate(state.gateway.as_ref(), &evaluation, &rules).await?;

    Ok(Json(result))
}
