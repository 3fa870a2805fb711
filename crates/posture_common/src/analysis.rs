//! The structured answer the model returns for one assessment.

use serde::{Deserialize, Serialize};

/// Escalation tier. Ordered by escalation, not numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Mild,
    Moderate,
    NeedsAttention,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::NeedsAttention => "needs_attention",
        }
    }

    /// Parse the exact wire literal. Anything else is a contract violation.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "mild" => Some(Severity::Mild),
            "moderate" => Some(Severity::Moderate),
            "needs_attention" => Some(Severity::NeedsAttention),
            _ => None,
        }
    }
}

/// One recommended exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    /// Ordered instructions; never empty in a validated result.
    pub steps: Vec<String>,
    /// Free text, e.g. "10 minutes".
    pub duration: String,
    /// Free text, e.g. "2 times per day".
    pub frequency: String,
}

/// The model's validated answer. Lives only for one presentation render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub analysis: String,
    pub severity: Severity,
    pub issues: Vec<String>,
    pub exercises: Vec<Exercise>,
    pub tips: Vec<String>,
}
