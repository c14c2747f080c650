//! Multi-drug interaction assessment backed by curated pairs and the
//! reasoning service.

use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use super::prompts;
use crate::clients::ReasoningService;
use crate::constants::limits::MAX_INTERACTION_DRUGS;
use crate::db::Store;
use crate::models::interaction::{DocumentedInteraction, InteractionResult, Severity};
use crate::models::medicine::Medicine;

#[derive(Debug, Error)]
pub enum InteractionError {
    #[error("{0}")]
    Validation(String),

    #[error("Interaction analysis unavailable: {0}")]
    Reasoning(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Trims, drops blanks and removes case-insensitive duplicates, keeping the
/// first spelling.
#[must_use]
pub fn normalize_drugs(drugs: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    drugs
        .iter()
        .map(|d| d.trim())
        .filter(|d| !d.is_empty())
        .filter(|d| seen.insert(d.to_lowercase()))
        .map(String::from)
        .collect()
}

/// Names a drug may appear under in the curated table.
fn aliases(drug: &str, catalog: &[Medicine]) -> HashSet<String> {
    let lower = drug.to_lowercase();
    let mut names = HashSet::from([lower.clone()]);
    for medicine in catalog {
        let name = medicine.name.to_lowercase();
        let ingredient = medicine.active_ingredient.to_lowercase();
        if name == lower {
            names.insert(ingredient);
        } else if ingredient == lower {
            names.insert(name);
        }
    }
    names
}

fn documented_pair<'a>(
    a: &HashSet<String>,
    b: &HashSet<String>,
    documented: &'a [DocumentedInteraction],
) -> Option<&'a DocumentedInteraction> {
    documented.iter().find(|i| {
        let x = i.drug_a.to_lowercase();
        let y = i.drug_b.to_lowercase();
        (a.contains(&x) && b.contains(&y)) || (a.contains(&y) && b.contains(&x))
    })
}

fn describe(interaction: &DocumentedInteraction) -> String {
    let mut text = format!("{} + {}", interaction.drug_a, interaction.drug_b);
    if let Some(description) = interaction.description.as_deref() {
        text.push_str(": ");
        text.push_str(description);
    }
    if let Some(recommendation) = interaction.recommendation.as_deref() {
        text.push_str(" Recommendation: ");
        text.push_str(recommendation);
    }
    text
}

fn from_documented(found: &[&DocumentedInteraction]) -> InteractionResult {
    let severity = found.iter().map(|i| i.severity).max().unwrap_or_default();
    let summary = found
        .iter()
        .map(|i| {
            i.description.clone().unwrap_or_else(|| {
                format!("Documented interaction between {} and {}.", i.drug_a, i.drug_b)
            })
        })
        .collect::<Vec<_>>()
        .join(" ");

    InteractionResult {
        safe: !severity.is_unsafe(),
        severity,
        summary,
        details: found.iter().map(|i| describe(i)).collect(),
    }
}

/// Reads a reasoning reply. `None` when severity or summary is unusable.
fn parse_reply(value: &serde_json::Value) -> Option<InteractionResult> {
    let severity = Severity::parse(value.get("severity")?.as_str()?)?;
    let summary = value
        .get("summary")?
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())?
        .to_string();
    let details = value
        .get("details")
        .and_then(serde_json::Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(serde_json::Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();
    let reported_safe = value
        .get("safe")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(true);

    Some(InteractionResult {
        safe: reported_safe && !severity.is_unsafe(),
        severity,
        summary,
        details,
    })
}

fn merge(mut result: InteractionResult, found: &[&DocumentedInteraction]) -> InteractionResult {
    for interaction in found {
        result.severity = result.severity.max(interaction.severity);
        let detail = describe(interaction);
        if !result.details.contains(&detail) {
            result.details.push(detail);
        }
    }
    result.safe = result.safe && !result.severity.is_unsafe();
    result
}

pub struct InteractionService {
    store: Store,
    reasoning: Arc<dyn ReasoningService>,
}

impl InteractionService {
    #[must_use]
    pub fn new(store: Store, reasoning: Arc<dyn ReasoningService>) -> Self {
        Self { store, reasoning }
    }

    pub async fn check(&self, drugs: &[String]) -> Result<InteractionResult, InteractionError> {
        let drugs = normalize_drugs(drugs);
        if drugs.len() < 2 {
            return Err(InteractionError::Validation(
                "Please select at least 2 drugs to check.".to_string(),
            ));
        }
        if drugs.len() > MAX_INTERACTION_DRUGS {
            return Err(InteractionError::Validation(format!(
                "At most {MAX_INTERACTION_DRUGS} drugs can be checked at once."
            )));
        }

        let catalog = self
            .store
            .list_medicines()
            .await
            .map_err(|e| InteractionError::Database(e.to_string()))?;
        let documented = self
            .store
            .list_documented_interactions()
            .await
            .map_err(|e| InteractionError::Database(e.to_string()))?;

        let names: Vec<HashSet<String>> = drugs.iter().map(|d| aliases(d, &catalog)).collect();
        let mut found = Vec::new();
        let mut undocumented_pairs = 0usize;
        for i in 0..names.len() {
            for j in (i + 1)..names.len() {
                match documented_pair(&names[i], &names[j], &documented) {
                    Some(interaction) => found.push(interaction),
                    None => undocumented_pairs += 1,
                }
            }
        }

        if undocumented_pairs == 0 {
            info!(drugs = ?drugs, "Answering interaction check from documented pairs");
            return Ok(from_documented(&found));
        }

        info!(drugs = ?drugs, documented = found.len(), "Analyzing interactions");

        let prompt = prompts::interaction_prompt(&drugs)
            .map_err(|e| InteractionError::Reasoning(e.to_string()))?;

        let reply = match self.reasoning.complete_json(&prompt).await {
            Ok(value) => parse_reply(&value)
                .ok_or_else(|| "reply was missing severity or summary".to_string()),
            Err(e) => Err(e.to_string()),
        };

        match reply {
            Ok(result) => Ok(merge(result, &found)),
            Err(reason) if !found.is_empty() => {
                warn!(error = %reason, "Interaction analysis failed, using documented pairs only");
                Ok(from_documented(&found))
            }
            Err(reason) => {
                warn!(error = %reason, "Interaction analysis failed");
                Err(InteractionError::Reasoning(reason))
            }
        }
    }
}
