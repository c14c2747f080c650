//! Prompt templates sent to the reasoning service.

use crate::models::label::RawLabelFields;

#[must_use]
pub fn generic_name_prompt(brand_name: &str) -> String {
    format!(
        r#"Convert the brand name "{brand_name}" to its standard US FDA generic name.

RULES:
1. Use "Clavulanate Potassium" instead of "Clavulanic Acid".
2. Use "Hydrochloride" instead of "HCL".
3. Return strictly VALID JSON.

Example: {{ "generic_name": "Amoxicillin and Clavulanate Potassium" }}"#
    )
}

/// Cuts `text` to at most `max_chars` characters on a char boundary.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn summary_prompt(
    drug_name: &str,
    raw: &RawLabelFields,
    max_label_chars: usize,
) -> serde_json::Result<String> {
    let data = serde_json::to_string(raw)?;
    let data = truncate_chars(&data, max_label_chars);

    Ok(format!(
        r#"You are an expert Senior Pharmacist. Write a detailed patient guide for "{drug_name}".

CRITICAL:
1. Identify the ACTIVE GENERIC INGREDIENT for "standard_brand_name".
2. Supplement the FDA data with general medical knowledge so every section is detailed.

Return strictly VALID JSON:
{{
  "standard_brand_name": "Active Generic Name (Title Case)",
  "standard_generic_name": "Active Generic Name",
  "common_brands": ["3-4 common brand names"],
  "purpose": "Detailed explanation (2-3 sentences).",
  "usage": ["Instruction 1", "Instruction 2", "Instruction 3"],
  "side_effects": ["Effect 1", "Effect 2", "Effect 3", "Effect 4", "Effect 5"],
  "warnings": ["Warning 1", "Warning 2", "Warning 3"],
  "interactions": ["Interaction 1", "Interaction 2"],
  "storage": "Detailed storage instructions"
}}

Data:
{data}"#
    ))
}

pub fn interaction_prompt(drugs: &[String]) -> serde_json::Result<String> {
    let list = serde_json::to_string(drugs)?;

    Ok(format!(
        r#"Act as a pharmacist. Analyze this drug combination: {list}
Check for dangerous interactions.
Return strictly a VALID JSON object. No markdown.

Structure:
{{
  "safe": boolean,
  "severity": "None" | "Low" | "Moderate" | "Severe",
  "summary": "Short 2-sentence explanation of the interaction.",
  "details": ["Specific warning 1", "Specific warning 2"]
}}"#
    ))
}
