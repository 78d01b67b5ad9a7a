//! The normalized `Remark` value produced by both ingestion paths (the
//! live collector and the record-file parser).

use crate::location::{RemarkArgument, RemarkKind, SourceLocation};
use serde::{Deserialize, Serialize};

/// One optimization diagnostic, already normalized from whichever source
/// produced it. `pass_name` is non-empty for any remark that made it past
/// ingestion; argument order is emission order, preserved end to end so
/// that runs on identical inputs are byte-identical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Remark {
    pub kind: RemarkKind,
    pub pass_name: String,
    pub remark_name: String,
    pub function_name: String,
    pub loc: SourceLocation,
    pub message: String,
    pub args: Vec<RemarkArgument>,
    pub hotness: Option<f64>,
    pub is_machine: bool,
}

impl Remark {
    pub fn new(
        kind: RemarkKind,
        pass_name: impl Into<String>,
        remark_name: impl Into<String>,
        function_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            pass_name: pass_name.into(),
            remark_name: remark_name.into(),
            function_name: function_name.into(),
            loc: SourceLocation::invalid(),
            message: message.into(),
            args: Vec::new(),
            hotness: None,
            is_machine: false,
        }
    }

    pub fn with_loc(mut self, loc: SourceLocation) -> Self {
        self.loc = loc;
        self
    }

    pub fn with_args(mut self, args: Vec<RemarkArgument>) -> Self {
        self.args = args;
        self
    }

    pub fn with_hotness(mut self, hotness: f64) -> Self {
        self.hotness = Some(hotness);
        self
    }

    pub fn with_machine(mut self, is_machine: bool) -> Self {
        self.is_machine = is_machine;
        self
    }

    /// Value of the first argument matching `key`, if any.
    pub fn arg(&self, key: &str) -> Option<&str> {
        self.args.iter().find(|a| a.key == key).map(|a| a.value.as_str())
    }

    pub fn is_missed(&self) -> bool {
        matches!(self.kind, RemarkKind::Missed)
    }

    pub fn is_applied(&self) -> bool {
        matches!(self.kind, RemarkKind::Applied)
    }
}
