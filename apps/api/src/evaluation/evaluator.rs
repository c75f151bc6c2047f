//! Evaluator — composes the prompt, makes the single gateway call, and maps
//! its outcome.
//!
//! Flow: rules block → system prompt → mode-specific user prompt + schema →
//! one forced function call → parsed result, fallback substitute, or error.
//!
//! Error policy (no retries anywhere):
//! - 402 / 429 / 5xx: substitute the fallback scorer, return Ok.
//! - 2xx without a usable tool call: analysis failed, HTTP 500.
//! - any other non-2xx: propagated verbatim with the original status.

use anyhow::Context;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::evaluation::fallback::fallback_result;
use crate::evaluation::models::{EvaluationMode, EvaluationRequest, EvaluationResult};
use crate::evaluation::prompt_builder::{build_rules_block, compose_system};
use crate::evaluation::prompts::{
    COMPARATIVE_PROMPT_TEMPLATE, QUICK_FITMENT_PROMPT_TEMPLATE, STANDALONE_PROMPT_TEMPLATE,
};
use crate::evaluation::schema::{
    comparative_schema, quick_fitment_schema, standalone_schema, COMPARATIVE_FUNCTION,
    QUICK_FITMENT_FUNCTION, STANDALONE_FUNCTION,
};
use crate::llm_gateway::{GatewayError, LlmGateway, ToolCallRequest};
use crate::rules::loader::RulesOutcome;

/// Runs one evaluation end to end.
pub async fn evaluate(
    gateway: &dyn LlmGateway,
    request: &EvaluationRequest,
    rules: &RulesOutcome,
) -> Result<EvaluationResult, AppError> {
    let rules_block = rules.config.as_ref().map(build_rules_block);
    let system = compose_system(rules_block.as_deref());

    let tool_request = build_tool_request(request, system)?;

    info!(
        domain = %request.domain,
        mode = request.mode.name(),
        rules_applied = rules.config.is_some(),
        "Dispatching evaluation to gateway"
    );

    let mut result = match gateway.complete(&tool_request).await {
        Ok(payload) => parse_result(&request.mode, payload)?,
        Err(e) if e.is_fallback_eligible() => {
            warn!(
                domain = %request.domain,
                mode = request.mode.name(),
                "Gateway unavailable, substituting fallback scorer: {e}"
            );
            fallback_result(request)
        }
        Err(GatewayError::Api { status, message }) => {
            return Err(AppError::Upstream {
                status,
                body: message,
            })
        }
        Err(e @ (GatewayError::MissingToolCall | GatewayError::Parse(_))) => {
            return Err(AppError::AnalysisFailed(e.to_string()))
        }
        Err(GatewayError::Http(e)) => {
            return Err(AppError::AnalysisFailed(format!("gateway request failed: {e}")))
        }
        // Capacity is covered by the is_fallback_eligible arm above.
        Err(e) => return Err(AppError::AnalysisFailed(e.to_string())),
    };

    result.annotate(rules.config.is_some(), &request.domain);
    Ok(result)
}

/// Selects the user prompt, function name, and schema for the request's mode.
fn build_tool_request(
    request: &EvaluationRequest,
    system: String,
) -> Result<ToolCallRequest, AppError> {
    let (user, function_name, schema) = match &request.mode {
        EvaluationMode::Comparative { scorecard } => {
            let scorecard_json = serde_json::to_string_pretty(scorecard)
                .context("serializing scorecard")
                .map_err(AppError::Internal)?;
            (
                COMPARATIVE_PROMPT_TEMPLATE
                    .replace("{domain}", &request.domain)
                    .replace("{scorecard_json}", &scorecard_json)
                    .replace("{resume_text}", &request.resume_text),
                COMPARATIVE_FUNCTION,
                comparative_schema(),
            )
        }
        EvaluationMode::QuickFitment { job_description } => (
            QUICK_FITMENT_PROMPT_TEMPLATE
                .replace("{job_description}", job_description)
                .replace("{resume_text}", &request.resume_text),
            QUICK_FITMENT_FUNCTION,
            quick_fitment_schema(),
        ),
        EvaluationMode::Standalone => (
            STANDALONE_PROMPT_TEMPLATE
                .replace("{domain}", &request.domain)
                .replace("{resume_text}", &request.resume_text),
            STANDALONE_FUNCTION,
            standalone_schema(),
        ),
    };

    Ok(ToolCallRequest {
        system,
        user,
        function_name: function_name.to_string(),
        schema,
    })
}

/// Deserializes the tool-call payload into the mode's result shape. A payload
/// that does not match its own schema counts as malformed, not retried.
fn parse_result(
    mode: &EvaluationMode,
    payload: serde_json::Value,
) -> Result<EvaluationResult, AppError> {
    fn parse<T: DeserializeOwned>(payload: serde_json::Value) -> Result<T, AppError> {
        serde_json::from_value(payload)
            .map_err(|e| AppError::AnalysisFailed(format!("malformed gateway payload: {e}")))
    }

    Ok(match mode {
        EvaluationMode::Comparative { .. } => EvaluationResult::Comparative(parse(payload)?),
        EvaluationMode::QuickFitment { .. } => EvaluationResult::QuickFitment(parse(payload)?),
        EvaluationMode::Standalone => EvaluationResult::Standalone(parse(payload)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::models::Scorecard;
    use crate::rules::sample_config;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    /// Gateway stub that replays one scripted outcome per call.
    enum Scripted {
        Payload(Value),
        Capacity(u16),
        Api(u16),
        MissingToolCall,
    }

    struct StubGateway(Scripted);

    #[async_trait]
    impl LlmGateway for StubGateway {
        async fn complete(&self, _request: &ToolCallRequest) -> Result<Value, GatewayError> {
            match &self.0 {
                Scripted::Payload(payload) => Ok(payload.clone()),
                Scripted::Capacity(status) => Err(GatewayError::Capacity { status: *status }),
                Scripted::Api(status) => Err(GatewayError::Api {
                    status: *status,
                    message: "denied".to_string(),
                }),
                Scripted::MissingToolCall => Err(GatewayError::MissingToolCall),
            }
        }
    }

    fn standalone_request() -> EvaluationRequest {
        EvaluationRequest {
            domain: "Sales".to_string(),
            resume_text: "Ten years of enterprise sales.".to_string(),
            mode: EvaluationMode::Standalone,
        }
    }

    fn comparative_request() -> EvaluationRequest {
        EvaluationRequest {
            domain: "Sales".to_string(),
            resume_text: "Ten years of enterprise sales.".to_string(),
            mode: EvaluationMode::Comparative {
                scorecard: Scorecard {
                    experience_score: 70,
                    skills_score: 65,
                    progression_score: 60,
                    achievements_score: 75,
                    communication_score: 80,
                    cultural_fit_score: 70,
                    total_score: 70,
                },
            },
        }
    }

    fn no_rules() -> RulesOutcome {
        RulesOutcome {
            config: None,
            training_enabled: true,
        }
    }

    fn with_rules() -> RulesOutcome {
        RulesOutcome {
            config: Some(sample_config("Sales")),
            training_enabled: true,
        }
    }

    fn standalone_payload() -> Value {
        json!({
            "scores": {
                "experience_score": 72, "skills_score": 68,
                "communication_score": 75, "achievements_score": 70,
                "progression_score": 66, "cultural_fit_score": 71
            },
            "total_score": 70,
            "strengths": ["strong enterprise track record"],
            "gaps": ["no CRM tooling mentioned"],
            "red_flags": [],
            "interview_questions": [
                { "type": "experience", "question": "Describe your largest closed deal." }
            ],
            "recommendation": "Proceed to interview",
            "reasoning": "Consistent quota attainment across roles."
        })
    }

    #[tokio::test]
    async fn test_success_annotates_domain_and_rules_flag() {
        let gateway = StubGateway(Scripted::Payload(standalone_payload()));
        let result = evaluate(&gateway, &standalone_request(), &with_rules())
            .await
            .unwrap();
        match result {
            EvaluationResult::Standalone(r) => {
                assert_eq!(r.domain, "Sales");
                assert!(r.training_config_applied);
                assert_eq!(r.total_score, 70);
            }
            other => panic!("expected standalone result, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_success_without_rules_marks_config_not_applied() {
        let gateway = StubGateway(Scripted::Payload(standalone_payload()));
        let result = evaluate(&gateway, &standalone_request(), &no_rules())
            .await
            .unwrap();
        match result {
            EvaluationResult::Standalone(r) => assert!(!r.training_config_applied),
            other => panic!("expected standalone result, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rate_limit_substitutes_fallback_with_disclosure() {
        let gateway = StubGateway(Scripted::Capacity(429));
        let result = evaluate(&gateway, &standalone_request(), &no_rules())
            .await
            .unwrap();
        assert!(result.reasoning().contains("fallback scorer"));
        match result {
            EvaluationResult::Standalone(r) => assert_eq!(r.domain, "Sales"),
            other => panic!("expected standalone result, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fallback_set_is_exactly_402_429_and_5xx() {
        for status in [402u16, 429, 500, 502, 503] {
            let gateway = StubGateway(Scripted::Capacity(status));
            let result = evaluate(&gateway, &standalone_request(), &no_rules()).await;
            assert!(result.is_ok(), "status {status} should substitute fallback");
        }

        for status in [401u16, 403, 404] {
            let gateway = StubGateway(Scripted::Api(status));
            let error = evaluate(&gateway, &standalone_request(), &no_rules())
                .await
                .unwrap_err();
            match error {
                AppError::Upstream { status: s, .. } => assert_eq!(s, status),
                other => panic!("status {status} should propagate, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_missing_tool_call_is_analysis_failure() {
        let gateway = StubGateway(Scripted::MissingToolCall);
        let error = evaluate(&gateway, &standalone_request(), &no_rules())
            .await
            .unwrap_err();
        assert!(matches!(error, AppError::AnalysisFailed(_)));
    }

    #[tokio::test]
    async fn test_payload_not_matching_schema_is_analysis_failure() {
        let gateway = StubGateway(Scripted::Payload(json!({ "unexpected": true })));
        let error = evaluate(&gateway, &standalone_request(), &no_rules())
            .await
            .unwrap_err();
        assert!(matches!(error, AppError::AnalysisFailed(_)));
    }

    #[tokio::test]
    async fn test_comparative_fallback_keeps_comparative_shape() {
        let gateway = StubGateway(Scripted::Capacity(500));
        let result = evaluate(&gateway, &comparative_request(), &no_rules())
            .await
            .unwrap();
        match result {
            EvaluationResult::Comparative(r) => {
                assert_eq!(r.user_total, 70);
                assert!(r.reasoning.contains("fallback scorer"));
            }
            other => panic!("expected comparative result, got {other:?}"),
        }
    }

    #[test]
    fn test_tool_request_selects_mode_specific_contract() {
        let standalone = build_tool_request(
            &standalone_request(),
            compose_system(None),
        )
        .unwrap();
        assert_eq!(standalone.function_name, STANDALONE_FUNCTION);
        assert!(standalone.user.contains("Ten years of enterprise sales."));
        assert!(standalone.user.contains("Sales department"));

        let comparative = build_tool_request(
            &comparative_request(),
            compose_system(None),
        )
        .unwrap();
        assert_eq!(comparative.function_name, COMPARATIVE_FUNCTION);
        assert!(comparative.user.contains("\"experience_score\": 70"));

        let fitment = build_tool_request(
            &EvaluationRequest {
                mode: EvaluationMode::QuickFitment {
                    job_description: "Account executive, SaaS".to_string(),
                },
                ..standalone_request()
            },
            compose_system(None),
        )
        .unwrap();
        assert_eq!(fitment.function_name, QUICK_FITMENT_FUNCTION);
        assert!(fitment.user.contains("Account executive, SaaS"));
    }
}
