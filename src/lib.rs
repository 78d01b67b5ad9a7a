//! Aion — a compiler-optimization diagnostic engine.
//!
//! Given an IR program, explains why specific optimizations were missed
//! and produces actionable guidance to unblock them. Consumes either a
//! single IR file (driving a pass pipeline and collecting remarks) or a
//! pair of before/after IR snapshots together with a compiler-emitted
//! optimization-record file.
//!
//! The crate is organized leaves-first: [`aion_ir`] is the shared data
//! model, [`aion_differ`] the structural differ, [`aion_classifier`] the
//! rule-based diagnostic classifier, and this crate the session
//! orchestrator tying all three together.

pub mod collector;
pub mod config;
pub mod error;
pub mod logging;
pub mod record;
pub mod session;

pub use collector::{DiagnosticHandler, RawDiagnostic, RemarkCollector, SourceKind};
pub use config::{EngineConfig, OptimizationLevel};
pub use error::{AionError, Result};
pub use record::parse_records;
pub use session::{
    run, run_before_after, run_before_after_files, run_single_file, run_single_input, AnalysisSession, NoopPassRunner, PassRunner,
    RawSessionInput,
};

pub use aion_classifier::{DiagnosticResult, FixSuggestion, OptimizationPattern, SeverityLevel};
pub use aion_differ::{BlockDiff, DiffKind, FunctionDiff, InstructionDiff, ModuleDiff};
pub use aion_ir::{Module, Remark, RemarkArgument, RemarkKind, SourceLocation};
