use serde::Serialize;

/// Catalog entry for A-Z browsing.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    pub id: i32,
    pub name: String,
    pub active_ingredient: String,
    pub description: String,
    pub simplified_description: String,
    pub common_side_effects: Vec<String>,
    pub warnings: Vec<String>,
}
