use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Severity {
    #[default]
    None,
    Low,
    Moderate,
    Severe,
}

impl Severity {
    /// Moderate and Severe combinations are reported as unsafe.
    #[must_use]
    pub const fn is_unsafe(self) -> bool {
        matches!(self, Self::Moderate | Self::Severe)
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" => Some(Self::None),
            "low" => Some(Self::Low),
            "moderate" => Some(Self::Moderate),
            "severe" => Some(Self::Severe),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::None => "None",
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
        };
        f.write_str(s)
    }
}

/// Result of a multi-drug interaction check. Computed per request, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InteractionResult {
    pub safe: bool,
    pub severity: Severity,
    pub summary: String,
    #[serde(default)]
    pub details: Vec<String>,
}

/// A curated interaction between two named drugs.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DocumentedInteraction {
    pub id: i32,
    pub drug_a: String,
    pub drug_b: String,
    pub severity: Severity,
    pub description: Option<String>,
    pub recommendation: Option<String>,
}
