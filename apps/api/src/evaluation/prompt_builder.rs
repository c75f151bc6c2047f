//! Prompt Builder — renders a rule configuration into the text block appended
//! to the base system prompt.
//!
//! Pure and deterministic: fixed field order, no timestamps, no iteration
//! over maps. Two deeply equal configs must render byte-identical blocks so
//! prompt output is snapshot-testable.

use std::fmt::Write;

use crate::evaluation::prompts::{BASE_SYSTEM, RULES_CLOSING_INSTRUCTION};
use crate::rules::{DomainExtension, RuleConfig};

/// Composes the full system prompt: base prompt plus the rules block when a
/// configuration applies.
pub fn compose_system(rules_block: Option<&str>) -> String {
    match rules_block {
        Some(block) => format!("{BASE_SYSTEM}\n\n{block}"),
        None => BASE_SYSTEM.to_string(),
    }
}

/// Renders the rules block for one configuration.
///
/// Empty lists and zero weights are omitted, except the weightage model
/// summary which always lists all six weights.
pub fn build_rules_block(config: &RuleConfig) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "COMPANY SCREENING RULES: {} department", config.domain);

    if let Some(years) = config.min_experience_years {
        let _ = writeln!(out, "Minimum experience: {years} years");
    }
    push_list(&mut out, "Preferred backgrounds", &config.preferred_backgrounds);
    push_list(&mut out, "Required skills", &config.required_skills);
    push_list(
        &mut out,
        "Communication indicators",
        &config.communication_indicators,
    );
    push_list(
        &mut out,
        "Achievement indicators",
        &config.achievement_indicators,
    );
    push_list(
        &mut out,
        "Preferred industries and roles",
        &config.preferred_industries,
    );
    push_list(&mut out, "Red-flag phrases", &config.red_flags);
    push_list(&mut out, "Positive keywords", &config.positive_keywords);
    push_list(&mut out, "Negative keywords", &config.negative_keywords);

    if let Some(DomainExtension::Crm {
        crm_tools,
        ticketing_experience_required,
        customer_interaction_depth,
        conflict_handling_importance,
    }) = &config.extension
    {
        push_list(&mut out, "CRM tools", crm_tools);
        let _ = writeln!(
            out,
            "Ticketing experience required: {}",
            if *ticketing_experience_required { "yes" } else { "no" }
        );
        let _ = writeln!(
            out,
            "Customer interaction depth: {}",
            customer_interaction_depth.as_str()
        );
        let _ = writeln!(
            out,
            "Conflict handling importance: {conflict_handling_importance}%"
        );
    }

    let weights = &config.weights;
    let _ = writeln!(out, "Weightage model:");
    let _ = writeln!(out, "- Experience: {}%", weights.experience);
    let _ = writeln!(out, "- Skills: {}%", weights.skills);
    let _ = writeln!(out, "- Communication: {}%", weights.communication);
    let _ = writeln!(out, "- Achievements: {}%", weights.achievements);
    let _ = writeln!(out, "- Progression: {}%", weights.progression);
    let _ = writeln!(out, "- Cultural fit: {}%", weights.cultural_fit);

    if let Some(notes) = config
        .evaluation_notes
        .as_deref()
        .filter(|notes| !notes.trim().is_empty())
    {
        let _ = writeln!(out, "Evaluation notes: {notes}");
    }

    out.push_str(RULES_CLOSING_INSTRUCTION);
    out
}

fn push_list(out: &mut String, label: &str, items: &[String]) {
    if !items.is_empty() {
        let _ = writeln!(out, "{label}: {}", items.join(", "));
    }
}
