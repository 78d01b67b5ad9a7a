//! The diagnostic classifier: owns the rule database, converts each
//! non-`Applied` remark into a `DiagnosticResult`, attaches the matching
//! function's structural diff, and sorts the result.

use aion_differ::ModuleDiff;
use aion_ir::Remark;

use crate::matcher::{best_match, fallback, interpolate};
use crate::registry;
use crate::types::{DiagnosticResult, OptimizationPattern};

pub struct DiagnosticClassifier {
    patterns: Vec<OptimizationPattern>,
}

impl DiagnosticClassifier {
    pub fn new() -> Self {
        Self {
            patterns: registry::build(),
        }
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Classify every non-`Applied` remark, attach a per-function diff
    /// from `diff`, and stably sort the result by ascending severity.
    pub fn classify(&self, remarks: &[Remark], diff: &ModuleDiff) -> Vec<DiagnosticResult> {
        let function_index = diff.function_index();

        let mut results: Vec<DiagnosticResult> = remarks
            .iter()
            .filter(|r| !r.is_applied())
            .map(|remark| {
                let pattern = best_match(&self.patterns, remark)
                    .cloned()
                    .unwrap_or_else(|| fallback(remark));
                let ir_diff = function_index.get(remark.function_name.as_str()).map(|d| (*d).clone());

                DiagnosticResult {
                    pass_name: remark.pass_name.clone(),
                    function_name: remark.function_name.clone(),
                    location: remark.loc.clone(),
                    short_reason: interpolate(&pattern.short_reason, remark),
                    detailed_explanation: interpolate(&pattern.detailed_explanation, remark),
                    root_cause: interpolate(&pattern.root_cause, remark),
                    optimizer_intent: interpolate(&pattern.optimizer_intent, remark),
                    suggestions: pattern.suggestions.clone(),
                    severity: pattern.severity,
                    ir_diff,
                    estimated_speedup: pattern.estimated_speedup,
                    is_machine: remark.is_machine,
                }
            })
            .collect();

        results.sort_by(|a, b| a.severity.cmp(&b.severity));
        results
    }
}

impl Default for DiagnosticClassifier {
    fn default() -> Self {
        Self::new()
    }
}
