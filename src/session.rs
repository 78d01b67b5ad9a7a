//! The session orchestrator (§4.5): drives Flow A (single input, live
//! pipeline) or Flow B (before/after pair plus an optional record file)
//! and assembles the immutable `AnalysisSession`.

use std::path::Path;

use aion_classifier::{DiagnosticClassifier, DiagnosticResult};
use aion_differ::{diff_modules, ModuleDiff};
use aion_ir::{Module, Remark};

use tracing::{debug, info};

use crate::collector::RemarkCollector;
use crate::config::EngineConfig;
use crate::error::{AionError, Result};
use crate::record::parse_records;

/// The seam the session drives a pass pipeline through — the bootstrap
/// that registers analyses and runs the actual optimizer is an external
/// collaborator (§6); this crate only needs the result: a transformed
/// module plus whatever remarks the run produced.
pub trait PassRunner {
    /// Run `pipeline_description` over `module` in place, reporting every
    /// optimization remark to `collector`. Returns `Ok(())` even if no
    /// optimization fired; only a hard pipeline failure is an `Err`.
    fn run_pipeline(&self, module: &mut Module, pipeline_description: &str, collector: &RemarkCollector) -> Result<()>;

    /// Structural verification, run before and (optionally) after the
    /// pipeline.
    fn verify(&self, module: &Module) -> Result<()>;
}

/// A `PassRunner` that performs no transformation and always verifies
/// successfully — useful for driving Flow A in contexts with no real
/// pass-manager bootstrap wired in yet.
#[derive(Debug, Default)]
pub struct NoopPassRunner;

impl PassRunner for NoopPassRunner {
    fn run_pipeline(&self, _module: &mut Module, _pipeline_description: &str, _collector: &RemarkCollector) -> Result<()> {
        Ok(())
    }

    fn verify(&self, _module: &Module) -> Result<()> {
        Ok(())
    }
}

/// The immutable final bundle produced by either flow.
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    pub before_ir: String,
    pub after_ir: String,
    pub remarks: Vec<Remark>,
    pub diff: ModuleDiff,
    pub diagnostics: Vec<DiagnosticResult>,
    pub pipeline_used: String,
    pub verification_failed: bool,
}

/// Flow A — single input: parse, name anonymous blocks, verify, clone,
/// drive the pipeline on the clone, diff, classify.
pub fn run_single_input(source: &str, config: &EngineConfig, runner: &dyn PassRunner) -> Result<AnalysisSession> {
    let mut before = Module::parse(source)?;
    before.name_anonymous_blocks();
    debug!(functions = before.functions.len(), "parsed single-input module");

    runner.verify(&before)?;

    let mut after = before.clone();
    let collector = RemarkCollector::new();

    let pipeline_used = config.effective_pipeline();
    info!(pipeline = %pipeline_used, "driving pass pipeline");
    let mut verification_failed = false;
    runner.run_pipeline(&mut after, &pipeline_used, &collector)?;

    if config.verify_each_pass {
        verification_failed = runner.verify(&after).is_err();
        if verification_failed {
            debug!("post-pipeline verification failed");
        }
    }

    let remarks = collector.snapshot();
    info!(remarks = remarks.len(), "collected remarks");
    assemble(before, after, remarks, pipeline_used, verification_failed)
}

/// Flow A, reading the source from a file path.
pub fn run_single_file(path: &Path, config: &EngineConfig, runner: &dyn PassRunner) -> Result<AnalysisSession> {
    let source = std::fs::read_to_string(path).map_err(|e| AionError::IoError(path.to_path_buf(), e))?;
    run_single_input(&source, config, runner)
}

/// Flow B — before/after pair plus an optional externally supplied
/// record file; no pass execution.
pub fn run_before_after(before_source: &str, after_source: &str, record_document: Option<&str>) -> Result<AnalysisSession> {
    let before = Module::parse(before_source)?;
    let after = Module::parse(after_source)?;
    let remarks = record_document.map(parse_records).unwrap_or_default();
    assemble(before, after, remarks, "external".to_string(), false)
}

/// Flow B, reading both IR files and the optional record file from disk.
pub fn run_before_after_files(before_path: &Path, after_path: &Path, record_path: Option<&Path>) -> Result<AnalysisSession> {
    let before_source = std::fs::read_to_string(before_path).map_err(|e| AionError::IoError(before_path.to_path_buf(), e))?;
    let after_source = std::fs::read_to_string(after_path).map_err(|e| AionError::IoError(after_path.to_path_buf(), e))?;
    let record_document = match record_path {
        Some(p) => Some(std::fs::read_to_string(p).map_err(|e| AionError::IoError(p.to_path_buf(), e))?),
        None => None,
    };
    run_before_after(&before_source, &after_source, record_document.as_deref())
}

/// Raw input the way a CLI front-end collects it from argv: a single IR
/// source, or a before/after pair, each independently optional. Exactly
/// one of "just `single`" or "both `before` and `after`" is valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawSessionInput<'a> {
    pub single: Option<&'a str>,
    pub before: Option<&'a str>,
    pub after: Option<&'a str>,
    pub records: Option<&'a str>,
}

enum SessionInput<'a> {
    Single(&'a str),
    BeforeAfter(&'a str, &'a str),
}

impl<'a> RawSessionInput<'a> {
    fn resolve(self) -> Result<SessionInput<'a>> {
        match (self.single, self.before, self.after) {
            (Some(source), None, None) => Ok(SessionInput::Single(source)),
            (None, Some(before), Some(after)) => Ok(SessionInput::BeforeAfter(before, after)),
            (None, None, None) => Err(AionError::ConfigError(
                "no input supplied: pass a single IR source or a before/after pair".to_string(),
            )),
            (None, Some(_), None) | (None, None, Some(_)) => Err(AionError::ConfigError(
                "a before/after diff requires both the before and the after source".to_string(),
            )),
            (Some(_), _, _) => Err(AionError::ConfigError(
                "a single input and a before/after pair are mutually exclusive".to_string(),
            )),
        }
    }
}

/// The single entry point a CLI front-end drives: validates that exactly
/// one of a single input or a before/after pair was supplied (§7's
/// `ConfigError`), then runs the corresponding flow.
pub fn run(input: RawSessionInput, config: &EngineConfig, runner: &dyn PassRunner) -> Result<AnalysisSession> {
    match input.resolve()? {
        SessionInput::Single(source) => run_single_input(source, config, runner),
        SessionInput::BeforeAfter(before, after) => run_before_after(before, after, input.records),
    }
}

/// Check the §8 invariant that every function diff lands in exactly one
/// bucket. `diff_modules` always upholds this by construction; this is
/// the orchestrator's last line of defense before handing the result back.
fn validate_diff_invariant(diff: &ModuleDiff) -> Result<()> {
    let bucketed = diff.added_functions + diff.removed_functions + diff.modified_functions + diff.unchanged_functions;
    if bucketed != diff.functions.len() {
        return Err(AionError::InternalError(format!(
            "function diff buckets ({bucketed}) do not partition the function list ({})",
            diff.functions.len()
        )));
    }
    Ok(())
}

fn assemble(before: Module, after: Module, remarks: Vec<Remark>, pipeline_used: String, verification_failed: bool) -> Result<AnalysisSession> {
    let diff = diff_modules(&before, &after);
    validate_diff_invariant(&diff)?;
    let classifier = DiagnosticClassifier::new();
    let diagnostics = classifier.classify(&remarks, &diff);

    Ok(AnalysisSession {
        before_ir: before.print(),
        after_ir: after.print(),
        remarks,
        diff,
        diagnostics,
        pipeline_used,
        verification_failed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = "define i32 @square(i32) {\nentry:\n    %1 = mul i32 %0, %0\n    ret i32 %1\n}\n";

    #[test]
    fn flow_a_with_noop_runner_diffs_identically() {
        let config = EngineConfig::default();
        let session = run_single_input(SQUARE, &config, &NoopPassRunner).unwrap();
        assert_eq!(session.diff.modified_functions, 0);
        assert_eq!(session.before_ir, session.after_ir);
        assert!(!session.verification_failed);
    }

    #[test]
    fn flow_a_names_anonymous_blocks_before_diffing() {
        let src = "define void @f() {\n    ret void\n}\n";
        let config = EngineConfig::default();
        let session = run_single_input(src, &config, &NoopPassRunner).unwrap();
        assert!(session.before_ir.contains("aion.bb.0:"));
    }

    #[test]
    fn flow_b_with_no_record_file_produces_empty_remarks() {
        let session = run_before_after(SQUARE, SQUARE, None).unwrap();
        assert!(session.remarks.is_empty());
        assert!(session.diagnostics.is_empty());
    }

    #[test]
    fn flow_b_ingests_supplied_record_document() {
        let doc = "--- !Missed\nPass: 'loop-vectorize'\nName: 'MissedDetails'\nFunction: 'square'\nArgs: [ {String: 'not vectorized'} ]\n...\n";
        let session = run_before_after(SQUARE, SQUARE, Some(doc)).unwrap();
        assert_eq!(session.remarks.len(), 1);
        assert_eq!(session.diagnostics.len(), 1);
    }

    #[test]
    fn bad_source_surfaces_a_parse_error() {
        let config = EngineConfig::default();
        let err = run_single_input("not valid ir", &config, &NoopPassRunner).unwrap_err();
        assert!(matches!(err, AionError::ParseError(_)));
    }

    #[test]
    fn run_dispatches_single_input_when_only_single_is_set() {
        let config = EngineConfig::default();
        let input = RawSessionInput { single: Some(SQUARE), ..Default::default() };
        let session = run(input, &config, &NoopPassRunner).unwrap();
        assert_eq!(session.before_ir, session.after_ir);
    }

    #[test]
    fn run_dispatches_before_after_when_pair_is_set() {
        let config = EngineConfig::default();
        let input = RawSessionInput { before: Some(SQUARE), after: Some(SQUARE), ..Default::default() };
        let session = run(input, &config, &NoopPassRunner).unwrap();
        assert_eq!(session.pipeline_used, "external");
    }

    #[test]
    fn run_rejects_no_input_at_all() {
        let config = EngineConfig::default();
        let err = run(RawSessionInput::default(), &config, &NoopPassRunner).unwrap_err();
        assert!(matches!(err, AionError::ConfigError(_)));
    }

    #[test]
    fn run_rejects_single_combined_with_a_pair() {
        let config = EngineConfig::default();
        let input = RawSessionInput { single: Some(SQUARE), before: Some(SQUARE), after: Some(SQUARE), records: None };
        let err = run(input, &config, &NoopPassRunner).unwrap_err();
        assert!(matches!(err, AionError::ConfigError(_)));
    }

    #[test]
    fn run_rejects_half_a_before_after_pair() {
        let config = EngineConfig::default();
        let input = RawSessionInput { before: Some(SQUARE), ..Default::default() };
        let err = run(input, &config, &NoopPassRunner).unwrap_err();
        assert!(matches!(err, AionError::ConfigError(_)));
    }

    #[test]
    fn validate_diff_invariant_rejects_a_diff_whose_buckets_do_not_partition() {
        let mut diff = diff_modules(&Module::parse(SQUARE).unwrap(), &Module::parse(SQUARE).unwrap());
        diff.unchanged_functions = 0;
        let err = validate_diff_invariant(&diff).unwrap_err();
        assert!(matches!(err, AionError::InternalError(_)));
    }

    #[test]
    fn run_single_file_surfaces_io_error_for_a_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist.ll");
        let config = EngineConfig::default();
        let err = run_single_file(&missing, &config, &NoopPassRunner).unwrap_err();
        assert!(matches!(err, AionError::IoError(path, _) if path == missing));
    }

    #[test]
    fn run_single_file_reads_and_analyzes_a_real_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("square.ll");
        std::fs::write(&path, SQUARE).unwrap();
        let config = EngineConfig::default();
        let session = run_single_file(&path, &config, &NoopPassRunner).unwrap();
        assert_eq!(session.diff.unchanged_functions, 1);
    }

    #[test]
    fn run_before_after_files_reads_all_three_paths() {
        let dir = tempfile::tempdir().unwrap();
        let before_path = dir.path().join("before.ll");
        let after_path = dir.path().join("after.ll");
        let record_path = dir.path().join("remarks.yaml");
        std::fs::write(&before_path, SQUARE).unwrap();
        std::fs::write(&after_path, SQUARE).unwrap();
        std::fs::write(
            &record_path,
            "--- !Missed\nPass: 'loop-vectorize'\nName: 'MissedDetails'\nFunction: 'square'\nArgs: [ {String: 'not vectorized'} ]\n...\n",
        )
        .unwrap();
        let session = run_before_after_files(&before_path, &after_path, Some(&record_path)).unwrap();
        assert_eq!(session.remarks.len(), 1);
    }
}
