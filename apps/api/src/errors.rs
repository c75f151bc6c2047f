use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Gateway capacity errors (402 / 429 / 5xx) never reach this type: the
/// evaluator substitutes the fallback scorer for those and returns Ok.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// The gateway answered 2xx but the structured payload was missing or
    /// unusable. Not retried, not faked.
    #[error("Resume analysis failed: {0}")]
    AnalysisFailed(String),

    /// Any non-2xx gateway status outside the fallback set, propagated
    /// verbatim with the original status code.
    #[error("Upstream gateway error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::AnalysisFailed(msg) => {
                tracing::error!("Analysis failed: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Resume analysis failed".to_string(),
                )
            }
            AppError::Upstream { status, body } => {
                tracing::error!("Upstream gateway error ({status}): {body}");
                (
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                    body.clone(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_400() {
        let response = AppError::Validation("resume_text cannot be empty".to_string());
        assert_eq!(response.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_analysis_failed_maps_to_500() {
        let response = AppError::AnalysisFailed("no tool call in payload".to_string());
        assert_eq!(
            response.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_upstream_keeps_original_status() {
        let response = AppError::Upstream {
            status: 401,
            body: "invalid api key".to_string(),
        };
        assert_eq!(response.into_response().status(), StatusCode::UNAUTHORIZED);
    }
}
