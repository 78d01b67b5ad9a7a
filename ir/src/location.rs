//! Source locations and the structured argument/remark-kind vocabulary
//! shared by the collector, the record-file parser, and the classifier.

use serde::{Deserialize, Serialize};

/// A location in the original source that a pass attributes a remark or
/// instruction to. Invalid iff `file` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// The location that carries no source information.
    pub fn invalid() -> Self {
        Self {
            file: String::new(),
            line: 0,
            column: 0,
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.file.is_empty()
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::invalid()
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            write!(f, "{}:{}:{}", self.file, self.line, self.column)
        } else {
            write!(f, "<unknown>")
        }
    }
}

/// The closed set of optimization-diagnostic kinds a pass manager can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemarkKind {
    Applied,
    Missed,
    Analysis,
    AnalysisAliasing,
    AnalysisFpCommute,
}

impl RemarkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemarkKind::Applied => "applied",
            RemarkKind::Missed => "missed",
            RemarkKind::Analysis => "analysis",
            RemarkKind::AnalysisAliasing => "analysis-aliasing",
            RemarkKind::AnalysisFpCommute => "analysis-fp-commute",
        }
    }
}

impl std::fmt::Display for RemarkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One structured `Key: Value` pair attached to a remark, as emitted by a
/// pass (e.g. `{Cost: "280", Threshold: "225"}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemarkArgument {
    pub key: String,
    pub value: String,
    pub loc: SourceLocation,
}

impl RemarkArgument {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            loc: SourceLocation::invalid(),
        }
    }

    pub fn with_loc(mut self, loc: SourceLocation) -> Self {
        self.loc = loc;
        self
    }
}
