use tracing::{debug, warn};

use super::prompts;
use crate::clients::ReasoningService;

/// Asks the reasoning service for the FDA generic name of a brand. Every
/// failure mode collapses to `None`.
pub async fn resolve_generic(reasoning: &dyn ReasoningService, brand_name: &str) -> Option<String> {
    let prompt = prompts::generic_name_prompt(brand_name);

    match reasoning.complete_json(&prompt).await {
        Ok(value) => {
            let name = extract_generic_name(&value);
            debug!(brand = brand_name, generic = ?name, "Generic name resolution finished");
            name
        }
        Err(e) => {
            warn!(brand = brand_name, error = %e, "Generic name resolution failed");
            None
        }
    }
}

fn extract_generic_name(value: &serde_json::Value) -> Option<String> {
    value
        .get("generic_name")
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
