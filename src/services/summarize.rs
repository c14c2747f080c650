//! Patient-facing summary composition with field-by-field raw fallback.

use serde_json::Value;
use tracing::warn;

use super::prompts;
use crate::clients::ReasoningService;
use crate::constants::labels::MAX_BRAND_NAMES;
use crate::constants::summary::{
    GENERIC_PLACEHOLDER, NOT_AVAILABLE, SOURCE_AI, SOURCE_RAW, UNKNOWN_CLASS,
};
use crate::models::drug::{DrugSummary, SummaryText};
use crate::models::label::{LabelRecord, RawLabelFields};

/// The usable parts of a reasoning-service summary reply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredSummary {
    pub standard_brand_name: Option<String>,
    pub standard_generic_name: Option<String>,
    pub common_brands: Vec<String>,
    pub purpose: Option<SummaryText>,
    pub usage: Option<SummaryText>,
    pub side_effects: Option<SummaryText>,
    pub warnings: Option<SummaryText>,
    pub interactions: Option<SummaryText>,
    pub storage: Option<String>,
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn string_list(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

fn text_field(value: &Value, key: &str) -> Option<SummaryText> {
    match value.get(key)? {
        Value::String(_) => string_field(value, key).map(SummaryText::Text),
        Value::Array(_) => {
            let items = string_list(value, key);
            (!items.is_empty()).then_some(SummaryText::List(items))
        }
        _ => None,
    }
}

impl StructuredSummary {
    /// Reads whatever fields are well-formed; wrong types count as missing.
    #[must_use]
    pub fn from_reply(value: &Value) -> Self {
        Self {
            standard_brand_name: string_field(value, "standard_brand_name"),
            standard_generic_name: string_field(value, "standard_generic_name"),
            common_brands: string_list(value, "common_brands"),
            purpose: text_field(value, "purpose"),
            usage: text_field(value, "usage"),
            side_effects: text_field(value, "side_effects"),
            warnings: text_field(value, "warnings"),
            interactions: text_field(value, "interactions"),
            storage: string_field(value, "storage"),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Requests a structured summary. `None` when the call fails or the reply
/// carries nothing usable.
pub async fn summarize(
    reasoning: &dyn ReasoningService,
    drug_name: &str,
    raw: &RawLabelFields,
    max_label_chars: usize,
) -> Option<StructuredSummary> {
    let prompt = match prompts::summary_prompt(drug_name, raw, max_label_chars) {
        Ok(p) => p,
        Err(e) => {
            warn!(drug = drug_name, error = %e, "Failed to build summary prompt");
            return None;
        }
    };

    match reasoning.complete_json(&prompt).await {
        Ok(value) => {
            let summary = StructuredSummary::from_reply(&value);
            if summary.is_empty() {
                warn!(drug = drug_name, "Summary reply had no usable fields");
                None
            } else {
                Some(summary)
            }
        }
        Err(e) => {
            warn!(drug = drug_name, error = %e, "Summarization failed");
            None
        }
    }
}

/// Title-cases each whitespace-separated word: first char upper, rest lower.
#[must_use]
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Name shown for a resolved label.
#[must_use]
pub fn display_name(resolved_generic: Option<&str>, label: &LabelRecord) -> String {
    resolved_generic
        .map(String::from)
        .or_else(|| label.first_generic_name().map(title_case))
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| GENERIC_PLACEHOLDER.to_string())
}

fn first_text(sections: &[&[String]]) -> SummaryText {
    sections
        .iter()
        .find_map(|s| s.first().filter(|t| !t.trim().is_empty()))
        .map_or_else(|| SummaryText::from(NOT_AVAILABLE), |t| SummaryText::from(t.as_str()))
}

fn pick(ai: Option<SummaryText>, fallback: SummaryText) -> SummaryText {
    ai.filter(|t| !t.is_blank()).unwrap_or(fallback)
}

/// Builds the final summary, preferring AI text and falling back to the raw
/// label section for every field it lacks.
#[must_use]
pub fn compose(display_name: &str, label: &LabelRecord, ai: Option<StructuredSummary>) -> DrugSummary {
    let source = if ai.is_some() { SOURCE_AI } else { SOURCE_RAW };
    let ai = ai.unwrap_or_default();
    let fallback_name = title_case(display_name);

    let brand_names_list = if ai.common_brands.is_empty() {
        label
            .openfda
            .brand_name
            .iter()
            .take(MAX_BRAND_NAMES)
            .cloned()
            .collect()
    } else {
        ai.common_brands
    };

    DrugSummary {
        source: source.to_string(),
        brand_name: ai.standard_brand_name.unwrap_or_else(|| fallback_name.clone()),
        generic_name: ai.standard_generic_name.unwrap_or(fallback_name),
        brand_names_list,
        pharmacologic_class: label
            .pharmacologic_class()
            .unwrap_or(UNKNOWN_CLASS)
            .to_string(),
        rxcui: None,
        purpose: pick(
            ai.purpose,
            first_text(&[
                label.purpose.as_slice(),
                label.indications_and_usage.as_slice(),
            ]),
        ),
        dosage: pick(ai.usage, first_text(&[label.dosage_and_administration.as_slice()])),
        side_effects: pick(ai.side_effects, first_text(&[label.adverse_reactions.as_slice()])),
        warnings: pick(ai.warnings, first_text(&[label.warnings.as_slice()])),
        interactions: pick(ai.interactions, first_text(&[label.drug_interactions.as_slice()])),
        storage: ai.storage,
    }
}
