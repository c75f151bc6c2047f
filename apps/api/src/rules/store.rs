//! Rule-config persistence. The pipeline only ever reads; writes happen in
//! the admin settings service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::{debug, warn};
use uuid::Uuid;

use super::RuleConfig;

/// Setting key for the global rules-training toggle.
const TRAINING_ENABLED_KEY: &str = "rules_training_enabled";

/// Read-only access to rule configurations and the global training toggle.
///
/// Carried in `AppState` as `Arc<dyn ConfigStore>` so tests can inject mocks.
/// Errors are explicit here; the loader decides to degrade, not the store.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// The most recently updated active configuration for the domain, if any.
    async fn fetch_config(&self, domain: &str) -> anyhow::Result<Option<RuleConfig>>;

    /// The global rules-training toggle. A missing setting row reads as off.
    async fn training_enabled(&self) -> anyhow::Result<bool>;
}

/// Postgres-backed store. Configurations live in `rule_configs` as a JSONB
/// document per row; the toggle lives in the `app_settings` key/value table.
pub struct PgConfigStore {
    pool: PgPool,
}

impl PgConfigStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RuleConfigRow {
    id: Uuid,
    domain: String,
    active: bool,
    config: Json<RuleConfig>,
    updated_at: DateTime<Utc>,
}

#[async_trait]
impl ConfigStore for PgConfigStore {
    async fn fetch_config(&self, domain: &str) -> anyhow::Result<Option<RuleConfig>> {
        let row = sqlx::query_as::<_, RuleConfigRow>(
            "SELECT id, domain, active, config, updated_at FROM rule_configs \
             WHERE domain = $1 AND active = true \
             ORDER BY updated_at DESC LIMIT 1",
        )
        .bind(domain)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| {
            debug!(
                config_id = %row.id,
                updated_at = %row.updated_at,
                "Loaded rule config for {domain}"
            );
            let mut config = row.config.0;
            // The columns are authoritative over the document copy.
            config.domain = row.domain;
            config.active = row.active;
            check_weightages(&config);
            config
        }))
    }

    async fn training_enabled(&self) -> anyhow::Result<bool> {
        let row: Option<(serde_json::Value,)> =
            sqlx::query_as("SELECT value FROM app_settings WHERE key = $1")
                .bind(TRAINING_ENABLED_KEY)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.and_then(|(value,)| value.as_bool()).unwrap_or(false))
    }
}

/// Warns when the six weightages do not sum to 100. Not a hard rejection:
/// admins have saved off-total configs historically and evaluation still
/// works, the scores are just skewed.
pub fn check_weightages(config: &RuleConfig) {
    let total = config.weights.total();
    if total != 100 {
        warn!(
            domain = %config.domain,
            total,
            "rule config weightages do not sum to 100"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::sample_config;

    #[test]
    fn test_check_weightages_accepts_off_total_config() {
        // Must not panic or reject; the warning is the whole contract.
        let mut config = sample_config("Sales");
        config.weights.experience = 90;
        check_weightages(&config);
    }

    #[test]
    fn test_row_document_defers_to_columns() {
        // Simulates the fetch_config merge: column values win over the JSONB copy.
        let mut config = sample_config("sales-old-name");
        let row = RuleConfigRow {
            id: Uuid::new_v4(),
            domain: "Sales".to_string(),
            active: true,
            config: Json(config.clone()),
            updated_at: Utc::now(),
        };
        config.domain = row.domain.clone();
        config.active = row.active;
        assert_eq!(config.domain, "Sales");
        assert!(config.active);
    }
}
