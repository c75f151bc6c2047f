/// LLM Gateway — the single point of entry for all model calls.
///
/// ARCHITECTURAL RULE: no other module may talk to the gateway directly.
/// Every request forces a function call against a JSON schema; the service
/// never parses free-form model text.
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

/// The model used for all evaluation calls.
/// Intentionally hardcoded to prevent accidental drift between environments.
pub const MODEL: &str = "gpt-4o-mini";

/// One network call, no retries: the fallback scorer is the resilience
/// mechanism, so a generous-but-bounded timeout is all we need.
const REQUEST_TIMEOUT_SECS: u64 = 45;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// 402, 429, or 5xx. These statuses qualify for fallback scoring.
    #[error("gateway capacity error (status {status})")]
    Capacity { status: u16 },

    /// Any other non-2xx status. Fatal, propagated with the original code.
    #[error("gateway error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// 2xx response that carried no tool-call payload.
    #[error("gateway response contained no tool call")]
    MissingToolCall,

    /// Tool-call arguments that were not valid JSON.
    #[error("tool call arguments were not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl GatewayError {
    /// True exactly for the statuses the fallback scorer substitutes for.
    pub fn is_fallback_eligible(&self) -> bool {
        matches!(self, GatewayError::Capacity { .. })
    }
}

/// A schema-constrained completion request: system/user message pair plus
/// the function the model is forced to call.
#[derive(Debug, Clone)]
pub struct ToolCallRequest {
    pub system: String,
    pub user: String,
    pub function_name: String,
    pub schema: Value,
}

/// The gateway seam. `AppState` carries `Arc<dyn LlmGateway>` so router and
/// evaluator tests can substitute scripted implementations.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Executes the request and returns the parsed tool-call arguments.
    async fn complete(&self, request: &ToolCallRequest) -> Result<Value, GatewayError>;
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Deserialize)]
struct ToolCall {
    function: FunctionCall,
}

#[derive(Debug, Deserialize)]
struct FunctionCall {
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct GatewayErrorBody {
    error: GatewayErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GatewayErrorDetail {
    message: String,
}

/// Reqwest-backed client for an OpenAI-compatible `/chat/completions`
/// endpoint with function calling.
pub struct OpenAiGateway {
    client: Client,
    api_key: String,
    url: String,
}

impl OpenAiGateway {
    pub fn new(api_key: String, url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            url,
        }
    }
}

/// Builds the chat-completions body, forcing the named function so the model
/// cannot answer in free text.
fn build_body(request: &ToolCallRequest) -> Value {
    json!({
        "model": MODEL,
        "messages": [
            { "role": "system", "content": request.system },
            { "role": "user", "content": request.user }
        ],
        "tools": [{
            "type": "function",
            "function": {
                "name": request.function_name,
                "parameters": request.schema
            }
        }],
        "tool_choice": {
            "type": "function",
            "function": { "name": request.function_name }
        }
    })
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn complete(&self, request: &ToolCallRequest) -> Result<Value, GatewayError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&build_body(request))
            .send()
            .await?;

        let status = response.status();
        let code = status.as_u16();

        if code == 402 || code == 429 || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            warn!("Gateway returned {status}: {body}");
            return Err(GatewayError::Capacity { status: code });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GatewayErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GatewayError::Api {
                status: code,
                message,
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;

        let arguments = completion
            .choices
            .first()
            .and_then(|choice| choice.message.tool_calls.as_ref())
            .and_then(|calls| calls.first())
            .map(|call| call.function.arguments.as_str())
            .ok_or(GatewayError::MissingToolCall)?;

        debug!("Gateway call succeeded ({} bytes of arguments)", arguments.len());

        Ok(serde_json::from_str(arguments)?)
    }
}
