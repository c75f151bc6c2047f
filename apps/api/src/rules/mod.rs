//! Rule configuration — administrator-defined weights and keyword lists that
//! customize resume evaluation per department. Read-only from this service's
//! perspective; the settings UI that edits these lives elsewhere.

pub mod loader;
pub mod store;

use serde::{Deserialize, Serialize};

/// The six category weightage percentages of a rule configuration.
///
/// These are intended to sum to 100 but that is never enforced; the store
/// boundary logs a warning when they do not (see `store::check_weightages`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weightages {
    pub experience: u32,
    pub skills: u32,
    pub communication: u32,
    pub achievements: u32,
    pub progression: u32,
    pub cultural_fit: u32,
}

impl Weightages {
    pub fn total(&self) -> u32 {
        self.experience
            + self.skills
            + self.communication
            + self.achievements
            + self.progression
            + self.cultural_fit
    }
}

/// How deeply the role deals with customers directly (CRM domain only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionDepth {
    Low,
    Medium,
    High,
}

impl InteractionDepth {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionDepth::Low => "low",
            InteractionDepth::Medium => "medium",
            InteractionDepth::High => "high",
        }
    }
}

/// Domain-conditional rule fields, validated at the store boundary instead of
/// being scattered as loose optional keys through the prompt builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DomainExtension {
    Crm {
        crm_tools: Vec<String>,
        ticketing_experience_required: bool,
        customer_interaction_depth: InteractionDepth,
        /// Percentage, 0-100.
        conflict_handling_importance: u32,
    },
}

/// A named set of evaluation weights and keyword lists scoped to a domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub domain: String,
    pub active: bool,
    #[serde(default)]
    pub min_experience_years: Option<u32>,
    #[serde(default)]
    pub preferred_backgrounds: Vec<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub communication_indicators: Vec<String>,
    #[serde(default)]
    pub achievement_indicators: Vec<String>,
    #[serde(default)]
    pub preferred_industries: Vec<String>,
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default)]
    pub positive_keywords: Vec<String>,
    #[serde(default)]
    pub negative_keywords: Vec<String>,
    #[serde(default)]
    pub weights: Weightages,
    #[serde(default)]
    pub evaluation_notes: Option<String>,
    #[serde(default)]
    pub extension: Option<DomainExtension>,
}

#[cfg(test)]
pub(crate) fn sample_config(domain: &str) -> RuleConfig {
    RuleConfig {
        domain: domain.to_string(),
        active: true,
        min_experience_years: Some(3),
        preferred_backgrounds: vec!["B2B sales".to_string()],
        required_skills: vec!["negotiation".to_string(), "prospecting".to_string()],
        communication_indicators: vec!["client presentations".to_string()],
        achievement_indicators: vec!["quota attainment".to_string()],
        preferred_industries: vec!["SaaS".to_string()],
        red_flags: vec!["unexplained gaps".to_string()],
        positive_keywords: vec!["pipeline".to_string()],
        negative_keywords: vec!["job hopper".to_string()],
        weights: Weightages {
            experience: 25,
            skills: 25,
            communication: 15,
            achievements: 15,
            progression: 10,
            cultural_fit: 10,
        },
        evaluation_notes: Some("Prioritize outbound experience.".to_string()),
        extension: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weightages_total() {
        let weights = Weightages {
            experience: 25,
            skills: 25,
            communication: 15,
            achievements: 15,
            progression: 10,
            cultural_fit: 10,
        };
        assert_eq!(weights.total(), 100);
    }

    #[test]
    fn test_interaction_depth_serde_lowercase() {
        let depth: InteractionDepth = serde_json::from_str(r#""high""#).unwrap();
        assert_eq!(depth, InteractionDepth::High);
        assert_eq!(serde_json::to_string(&depth).unwrap(), r#""high""#);
    }

    #[test]
    fn test_crm_extension_roundtrip() {
        let json = r#"{
            "kind": "crm",
            "crm_tools": ["Zendesk"],
            "ticketing_experience_required": true,
            "customer_interaction_depth": "high",
            "conflict_handling_importance": 80
        }"#;
        let ext: DomainExtension = serde_json::from_str(json).unwrap();
        match &ext {
            DomainExtension::Crm {
                crm_tools,
                ticketing_experience_required,
                customer_interaction_depth,
                conflict_handling_importance,
            } => {
                assert_eq!(crm_tools, &["Zendesk".to_string()]);
                assert!(*ticketing_experience_required);
                assert_eq!(*customer_interaction_depth, InteractionDepth::High);
                assert_eq!(*conflict_handling_importance, 80);
            }
        }
    }

    #[test]
    fn test_rule_config_defaults_for_missing_fields() {
        // A minimal stored document must deserialize with empty lists.
        let json = r#"{ "domain": "Sales", "active": true }"#;
        let config: RuleConfig = serde_json::from_str(json).unwrap();
        assert!(config.required_skills.is_empty());
        assert!(config.min_experience_years.is_none());
        assert_eq!(config.weights.total(), 0);
        assert!(config.extension.is_none());
    }
}
