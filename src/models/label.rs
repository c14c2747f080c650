use serde::{Deserialize, Serialize};

/// A lookup against the drug label database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelQuery {
    /// Matches either the brand or the generic name.
    ByName(String),

    /// Matches the generic name only.
    ByGeneric(String),
}

impl LabelQuery {
    #[must_use]
    pub fn term(&self) -> &str {
        match self {
            Self::ByName(term) | Self::ByGeneric(term) => term,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OpenFdaMeta {
    #[serde(default)]
    pub brand_name: Vec<String>,
    #[serde(default)]
    pub generic_name: Vec<String>,
    #[serde(default)]
    pub pharm_class_epc: Vec<String>,
}

/// One monograph from the openFDA `drug/label` endpoint, reduced to the
/// sections the summary uses.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LabelRecord {
    #[serde(default)]
    pub openfda: OpenFdaMeta,
    #[serde(default)]
    pub purpose: Vec<String>,
    #[serde(default)]
    pub indications_and_usage: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub dosage_and_administration: Vec<String>,
    #[serde(default)]
    pub adverse_reactions: Vec<String>,
    #[serde(default)]
    pub drug_interactions: Vec<String>,
}

impl LabelRecord {
    /// Lower-cased brand names followed by lower-cased generic names.
    #[must_use]
    pub fn all_names_lower(&self) -> Vec<String> {
        self.openfda
            .brand_name
            .iter()
            .chain(self.openfda.generic_name.iter())
            .map(|n| n.to_lowercase())
            .collect()
    }

    #[must_use]
    pub fn first_generic_name(&self) -> Option<&str> {
        self.openfda.generic_name.first().map(String::as_str)
    }

    #[must_use]
    pub fn pharmacologic_class(&self) -> Option<&str> {
        self.openfda.pharm_class_epc.first().map(String::as_str)
    }

    /// Raw sections forwarded to the summarizer.
    #[must_use]
    pub fn raw_fields(&self) -> RawLabelFields {
        RawLabelFields {
            indications: self.indications_and_usage.clone(),
            warnings: self.warnings.clone(),
            dosage: self.dosage_and_administration.clone(),
            reactions: self.adverse_reactions.clone(),
            interactions: self.drug_interactions.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct RawLabelFields {
    pub indications: Vec<String>,
    pub warnings: Vec<String>,
    pub dosage: Vec<String>,
    pub reactions: Vec<String>,
    pub interactions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct LabelSearchResponse {
    #[serde(default)]
    pub results: Vec<LabelRecord>,
}
