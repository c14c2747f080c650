use serde::{Deserialize, Serialize};

/// A summary section: either prose or a list of bullet points.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum SummaryText {
    Text(String),
    List(Vec<String>),
}

impl SummaryText {
    /// True when there is no visible content.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::List(items) => items.iter().all(|s| s.trim().is_empty()),
        }
    }
}

impl From<&str> for SummaryText {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SummaryText {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// The patient-facing monograph served by the search endpoint and cached
/// per normalized query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DrugSummary {
    pub source: String,
    pub brand_name: String,
    pub generic_name: String,
    #[serde(default)]
    pub brand_names_list: Vec<String>,
    pub pharmacologic_class: String,
    #[serde(default)]
    pub rxcui: Option<String>,
    pub purpose: SummaryText,
    pub dosage: SummaryText,
    pub side_effects: SummaryText,
    pub warnings: SummaryText,
    pub interactions: SummaryText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_text_accepts_string_or_list() {
        let text: SummaryText = serde_json::from_str("\"Take with food\"").unwrap();
        assert_eq!(text, SummaryText::Text("Take with food".to_string()));

        let list: SummaryText = serde_json::from_str(r#"["Nausea", "Rash"]"#).unwrap();
        assert_eq!(
            list,
            SummaryText::List(vec!["Nausea".to_string(), "Rash".to_string()])
        );
    }

    #[test]
    fn test_summary_text_blank() {
        assert!(SummaryText::Text("  ".to_string()).is_blank());
        assert!(SummaryText::List(vec![]).is_blank());
        assert!(!SummaryText::List(vec!["x".to_string()]).is_blank());
    }

    #[test]
    fn test_drug_summary_uses_camel_case() {
        let summary = DrugSummary {
            source: "US FDA (Raw)".to_string(),
            brand_name: "Acetaminophen".to_string(),
            generic_name: "Acetaminophen".to_string(),
            brand_names_list: vec!["Tylenol".to_string()],
            pharmacologic_class: "Unknown".to_string(),
            rxcui: None,
            purpose: "Pain".into(),
            dosage: "Every 6 hours".into(),
            side_effects: "Rare".into(),
            warnings: "Liver".into(),
            interactions: "Warfarin".into(),
            storage: None,
        };

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["brandName"], "Acetaminophen");
        assert_eq!(value["brandNamesList"][0], "Tylenol");
        assert_eq!(value["sideEffects"], "Rare");
        assert!(value["rxcui"].is_null());
        assert!(value.get("storage").is_none());
    }
}
