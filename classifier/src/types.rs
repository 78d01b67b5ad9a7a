//! Value types the rule database and the classifier output are built from.

use aion_differ::FunctionDiff;
use aion_ir::SourceLocation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SeverityLevel {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixSuggestion {
    pub description: String,
    pub code_example: String,
    pub is_source_level: bool,
    pub is_ir_level: bool,
}

impl FixSuggestion {
    pub fn source_level(description: impl Into<String>, code_example: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            code_example: code_example.into(),
            is_source_level: true,
            is_ir_level: false,
        }
    }

    pub fn ir_level(description: impl Into<String>, code_example: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            code_example: code_example.into(),
            is_source_level: false,
            is_ir_level: true,
        }
    }
}

/// One rule in the classifier's static database. `*_substr` selectors are
/// case-insensitive substring matches against the remark; an empty
/// selector is a wildcard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationPattern {
    pub pass_substr: String,
    pub remark_substr: String,
    pub message_substr: String,
    pub short_reason: String,
    pub detailed_explanation: String,
    pub root_cause: String,
    pub optimizer_intent: String,
    pub suggestions: Vec<FixSuggestion>,
    pub severity: SeverityLevel,
    pub estimated_speedup: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticResult {
    pub pass_name: String,
    pub function_name: String,
    pub location: SourceLocation,
    pub short_reason: String,
    pub detailed_explanation: String,
    pub root_cause: String,
    pub optimizer_intent: String,
    pub suggestions: Vec<FixSuggestion>,
    pub severity: SeverityLevel,
    pub ir_diff: Option<FunctionDiff>,
    pub estimated_speedup: f64,
    pub is_machine: bool,
}
