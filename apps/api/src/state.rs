use std::sync::Arc;

use crate::llm_gateway::LlmGateway;
use crate::rules::store::ConfigStore;

/// Shared application state injected into route handlers via Axum extractors.
/// Both collaborators are trait objects so tests can swap in scripted
/// implementations.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn LlmGateway>,
    pub config_store: Arc<dyn ConfigStore>,
}
