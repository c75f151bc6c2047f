//! Config Loader — resolves the effective rule configuration for one
//! evaluation. Rule customization is an enhancement, not a correctness
//! dependency: every store failure degrades to "no custom rules" instead of
//! failing the evaluation.

use tracing::warn;

use super::store::ConfigStore;
use super::RuleConfig;

/// Outcome of rule resolution for a single evaluation.
#[derive(Debug, Clone)]
pub struct RulesOutcome {
    /// The active configuration for the domain, when one applies.
    pub config: Option<RuleConfig>,
    /// Whether the global rules-training toggle was on. Carried so the
    /// result annotation can distinguish "off" from "on but unconfigured".
    pub training_enabled: bool,
}

impl RulesOutcome {
    pub fn disabled() -> Self {
        Self {
            config: None,
            training_enabled: false,
        }
    }
}

/// Resolves the rule configuration for `domain`.
///
/// Toggle off or unreadable: `(None, false)`. Toggle on but no active config
/// (or the lookup fails): `(None, true)`. Active config found: `(Some, true)`.
pub async fn load_rules(store: &dyn ConfigStore, domain: &str) -> RulesOutcome {
    let enabled = match store.training_enabled().await {
        Ok(enabled) => enabled,
        Err(e) => {
            warn!("Could not read rules-training toggle, treating as off: {e}");
            return RulesOutcome::disabled();
        }
    };

    if !enabled {
        return RulesOutcome::disabled();
    }

    let config = match store.fetch_config(domain).await {
        Ok(config) => config,
        Err(e) => {
            warn!(domain, "Rule config lookup failed, evaluating without custom rules: {e}");
            None
        }
    };

    RulesOutcome {
        config,
        training_enabled: true,
    }
}
