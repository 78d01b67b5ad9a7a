//! Live remark collection (§4.1).
//!
//! The pass manager itself is an external collaborator (§6); what this
//! module owns is the thread-safe sink a pass manager's diagnostic hook
//! would be wired into, and the conversion from a raw diagnostic to the
//! normalized `Remark` value both ingestion paths share.

use aion_ir::{Remark, RemarkArgument, RemarkKind, SourceLocation};
use parking_lot::Mutex;

/// The diagnostic-source kinds a pass manager may report, before
/// normalization into `RemarkKind`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    Remark,
    MachineRemark,
    RemarkMissed,
    MachineRemarkMissed,
    RemarkAnalysis,
    MachineRemarkAnalysis,
    RemarkAnalysisAliasing,
    RemarkAnalysisFpCommute,
    /// A stack-size/resource-limit notice, not an optimization remark.
    ResourceLimit { resource_name: String, size: String, limit: String },
    /// Anything the handler doesn't claim.
    Other,
}

/// What a pass manager would hand to an installed diagnostic handler.
#[derive(Debug, Clone)]
pub struct RawDiagnostic {
    pub kind: SourceKind,
    pub pass_name: String,
    pub remark_name: String,
    pub function_name: String,
    pub loc: SourceLocation,
    /// The diagnostic's printed form, including its `"<prefix>:"` header.
    pub message: String,
    pub args: Vec<RemarkArgument>,
    pub hotness: Option<f64>,
}

/// The capability a pass manager's diagnostic channel is installed
/// against. Tagged-variant based rather than inheritance-based, per the
/// design notes — only one method is required.
pub trait DiagnosticHandler {
    /// Returns `true` iff this diagnostic was claimed; an unclaimed
    /// diagnostic falls through to the default handler unchanged.
    fn handle(&self, diagnostic: &RawDiagnostic) -> bool;
}

/// Thread-safe, append-only sink for remarks captured during one pass
/// pipeline run. Multi-writer (pass-manager threads) / single-reader
/// (after the pipeline completes).
#[derive(Default)]
pub struct RemarkCollector {
    remarks: Mutex<Vec<Remark>>,
}

impl RemarkCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Immutable ordered snapshot of every remark captured so far.
    pub fn snapshot(&self) -> Vec<Remark> {
        self.remarks.lock().clone()
    }

    pub fn missed(&self) -> Vec<Remark> {
        self.filter_by(|r| r.is_missed())
    }

    pub fn applied(&self) -> Vec<Remark> {
        self.filter_by(|r| r.is_applied())
    }

    pub fn analysis(&self) -> Vec<Remark> {
        self.filter_by(|r| matches!(r.kind, RemarkKind::Analysis | RemarkKind::AnalysisAliasing | RemarkKind::AnalysisFpCommute))
    }

    pub fn by_function_name(&self, name: &str) -> Vec<Remark> {
        self.filter_by(|r| r.function_name == name)
    }

    pub fn by_pass_name(&self, name: &str) -> Vec<Remark> {
        self.filter_by(|r| r.pass_name == name)
    }

    fn filter_by(&self, predicate: impl Fn(&Remark) -> bool) -> Vec<Remark> {
        self.remarks.lock().iter().filter(|r| predicate(r)).cloned().collect()
    }

    fn push(&self, remark: Remark) {
        self.remarks.lock().push(remark);
    }
}

impl DiagnosticHandler for RemarkCollector {
    fn handle(&self, diagnostic: &RawDiagnostic) -> bool {
        match &diagnostic.kind {
            SourceKind::ResourceLimit { resource_name, size, limit } => {
                let remark = Remark::new(
                    RemarkKind::Analysis,
                    "backend",
                    resource_name.clone(),
                    diagnostic.function_name.clone(),
                    diagnostic.message.clone(),
                )
                .with_loc(diagnostic.loc.clone())
                .with_args(vec![
                    RemarkArgument::new("Size", size.clone()),
                    RemarkArgument::new("Limit", limit.clone()),
                ]);
                self.push(remark);
                true
            }
            SourceKind::Other => false,
            source_kind => {
                let kind = map_kind(source_kind);
                let message = strip_header(&diagnostic.message);
                let mut remark = Remark::new(
                    kind,
                    diagnostic.pass_name.clone(),
                    diagnostic.remark_name.clone(),
                    diagnostic.function_name.clone(),
                    message,
                )
                .with_loc(diagnostic.loc.clone())
                .with_args(diagnostic.args.clone())
                .with_machine(is_machine(source_kind));
                if let Some(hotness) = diagnostic.hotness {
                    remark = remark.with_hotness(hotness);
                }
                self.push(remark);
                true
            }
        }
    }
}

fn map_kind(source: &SourceKind) -> RemarkKind {
    match source {
        SourceKind::Remark | SourceKind::MachineRemark => RemarkKind::Applied,
        SourceKind::RemarkMissed | SourceKind::MachineRemarkMissed => RemarkKind::Missed,
        SourceKind::RemarkAnalysis | SourceKind::MachineRemarkAnalysis => RemarkKind::Analysis,
        SourceKind::RemarkAnalysisAliasing => RemarkKind::AnalysisAliasing,
        SourceKind::RemarkAnalysisFpCommute => RemarkKind::AnalysisFpCommute,
        _ => RemarkKind::Analysis,
    }
}

fn is_machine(source: &SourceKind) -> bool {
    matches!(source, SourceKind::MachineRemark | SourceKind::MachineRemarkMissed | SourceKind::MachineRemarkAnalysis)
}

/// Strip a leading `"<prefix>: "` header (the prefix being a single
/// whitespace-free token) from a diagnostic's printed form.
fn strip_header(message: &str) -> String {
    if let Some(colon) = message.find(':') {
        let (prefix, rest) = message.split_at(colon);
        if !prefix.is_empty() && !prefix.contains(char::is_whitespace) {
            return rest[1..].trim_start().to_string();
        }
    }
    message.to_string()
}
