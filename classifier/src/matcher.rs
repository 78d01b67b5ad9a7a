//! Rule scoring, template interpolation, and fallback-pattern synthesis.

use aion_ir::Remark;

use crate::types::{OptimizationPattern, SeverityLevel};

const PASS_WEIGHT: u32 = 2;
const REMARK_WEIGHT: u32 = 3;
const MESSAGE_WEIGHT: u32 = 4;

/// Score `pattern` against `remark`. `None` means at least one non-empty
/// selector failed to match; `Some(score)` otherwise, where an all-empty
/// pattern scores `0`.
pub fn score(pattern: &OptimizationPattern, remark: &Remark) -> Option<u32> {
    let mut total = 0;
    total += field_score(&pattern.pass_substr, &remark.pass_name, PASS_WEIGHT)?;
    total += field_score(&pattern.remark_substr, &remark.remark_name, REMARK_WEIGHT)?;
    total += field_score(&pattern.message_substr, &remark.message, MESSAGE_WEIGHT)?;
    Some(total)
}

fn field_score(selector: &str, field: &str, weight: u32) -> Option<u32> {
    if selector.is_empty() {
        return Some(0);
    }
    if field.to_lowercase().contains(selector.to_lowercase().as_str()) {
        Some(weight)
    } else {
        None
    }
}

/// Find the pattern with the highest score; first registration wins on a
/// tie. `None` if no pattern's selectors all match.
pub fn best_match<'a>(patterns: &'a [OptimizationPattern], remark: &Remark) -> Option<&'a OptimizationPattern> {
    let mut best: Option<(&OptimizationPattern, u32)> = None;
    for pattern in patterns {
        if let Some(s) = score(pattern, remark) {
            match &best {
                Some((_, best_score)) if *best_score >= s => {}
                _ => best = Some((pattern, s)),
            }
        }
    }
    best.map(|(p, _)| p)
}

/// Synthesize the fallback rule for a remark that matched nothing.
pub fn fallback(remark: &Remark) -> OptimizationPattern {
    OptimizationPattern {
        pass_substr: String::new(),
        remark_substr: String::new(),
        message_substr: String::new(),
        short_reason: format!("Optimization missed: {}", remark.remark_name),
        detailed_explanation: format!(
            "No known failure pattern matched this remark. Raw diagnostic: pass \"{}\", \
             remark \"{}\", message \"{}\".",
            remark.pass_name, remark.remark_name, remark.message
        ),
        root_cause: "Unclassified — this pass/remark combination isn't in the rule database \
                      yet."
            .to_string(),
        optimizer_intent: "Unknown.".to_string(),
        suggestions: Vec::new(),
        severity: SeverityLevel::Medium,
        estimated_speedup: 0.0,
    }
}

/// Replace every `{ArgKey}` placeholder in `template` with the matching
/// argument value from `remark.args` (first match wins), and the reserved
/// `{FunctionName}` with `remark.function_name`. Placeholders with no
/// match are left literal.
pub fn interpolate(template: &str, remark: &Remark) -> String {
    let mut out = String::with_capacity(template.len());
    let bytes = template.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'{' {
            if let Some(close) = template[i + 1..].find('}') {
                let key = &template[i + 1..i + 1 + close];
                let value = resolve(key, remark);
                match value {
                    Some(v) => out.push_str(&v),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                i = i + 1 + close + 1;
                continue;
            }
        }
        let ch = template[i..].chars().next().unwrap();
        out.push(ch);
        i += ch.len_utf8();
    }
    out
}

fn resolve(key: &str, remark: &Remark) -> Option<String> {
    if key == "FunctionName" {
        return Some(remark.function_name.clone());
    }
    remark.arg(key).map(|v| v.to_string())
}
