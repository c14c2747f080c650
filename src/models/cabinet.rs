use serde::{Deserialize, Serialize};

/// A drug saved to an owner's cabinet, with a snapshot of the summary it was
/// saved from.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedMedicine {
    pub id: i32,
    pub brand_name: String,
    pub generic_name: Option<String>,
    pub details: serde_json::Value,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSavedMedicine {
    pub brand_name: String,
    #[serde(default)]
    pub generic_name: Option<String>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
    #[serde(default)]
    pub warnings: Option<String>,
    #[serde(default)]
    pub pharm_class: Option<String>,
    #[serde(default)]
    pub rxcui: Option<String>,
}

impl NewSavedMedicine {
    /// The stored snapshot: explicit `details` when sent, otherwise the flat
    /// fields the cabinet used to carry.
    #[must_use]
    pub fn snapshot(&self) -> serde_json::Value {
        if let Some(details) = &self.details {
            return details.clone();
        }

        serde_json::json!({
            "warnings": self.warnings,
            "pharmClass": self.pharm_class,
            "rxcui": self.rxcui,
        })
    }
}
