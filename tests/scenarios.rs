//! End-to-end coverage of the concrete scenarios the engine is expected
//! to handle, driven through the public session API rather than any one
//! component in isolation.

use aion_core::{run_before_after, run_single_input, EngineConfig, NoopPassRunner, SeverityLevel};

const SQUARE: &str = "define i32 @square(i32) {\nentry:\n    %1 = mul i32 %0, %0\n    ret i32 %1\n}\n";

#[test]
fn scenario_diff_of_identical_modules_is_all_unchanged() {
    let session = run_before_after(SQUARE, SQUARE, None).unwrap();
    assert_eq!(session.diff.modified_functions, 0);
    assert_eq!(session.diff.added_functions, 0);
    assert_eq!(session.diff.removed_functions, 0);
    assert_eq!(session.diff.unchanged_functions, 1);
    assert_eq!(
        session.diff.total_before_instructions,
        session.diff.total_after_instructions
    );
}

#[test]
fn scenario_function_inlined_away() {
    let before = "declare void @foo()\ndeclare void @bar()\n";
    let after = "declare void @foo()\n";
    let session = run_before_after(before, after, None).unwrap();
    assert_eq!(session.diff.removed_functions, 1);
    let bar = session.diff.functions.iter().find(|f| f.function_name == "bar").unwrap();
    assert!(bar.was_inlined());
}

#[test]
fn scenario_record_parser_reconstructs_split_message() {
    let doc = "--- !Missed\nPass: 'loop-vectorize'\nName: 'MissedDetails'\nFunction: 'f'\nArgs: [ {String: 'loop not'}, {String: ' vectorized'} ]\n...\n";
    let session = run_before_after(SQUARE, SQUARE, Some(doc)).unwrap();
    assert_eq!(session.remarks.len(), 1);
    assert_eq!(session.remarks[0].message, "loop not vectorized");
    assert_eq!(session.remarks[0].kind, aion_core::RemarkKind::Missed);
}

#[test]
fn scenario_single_input_flow_drives_noop_pipeline_and_assembles_a_session() {
    let config = EngineConfig::default();
    let session = run_single_input(SQUARE, &config, &NoopPassRunner).unwrap();
    assert!(!session.pipeline_used.is_empty());
    assert!(session.before_ir.contains("define"));
    assert_eq!(session.before_ir, session.after_ir);
}

#[test]
fn scenario_classifier_fills_in_critical_and_high_severity_diagnostics() {
    let doc = concat!(
        "--- !Missed\nPass: 'loop-vectorize'\nName: ''\nFunction: 'loop_dependency'\n",
        "Args: [ {String: 'unsafe dependent memory operations'} ]\n...\n",
        "--- !Missed\nPass: 'inline'\nName: 'NotInlined'\nFunction: 'helper'\n",
        "Args: [ {String: 'noinline attribute forbids inlining'} ]\n...\n",
    );
    let session = run_before_after(SQUARE, SQUARE, Some(doc)).unwrap();
    assert_eq!(session.diagnostics.len(), 2);
    assert_eq!(session.diagnostics[0].severity, SeverityLevel::Critical);
    assert_eq!(session.diagnostics[1].severity, SeverityLevel::High);
}

#[test]
fn invariant_differ_totals_partition_the_function_list() {
    let before = "declare void @a()\ndeclare void @b()\ndeclare void @c()\n";
    let after = "declare void @a()\ndeclare void @c()\ndeclare void @d()\n";
    let session = run_before_after(before, after, None).unwrap();
    let d = &session.diff;
    assert_eq!(
        d.added_functions + d.removed_functions + d.modified_functions + d.unchanged_functions,
        d.functions.len()
    );
}

#[test]
fn empty_remark_list_still_produces_a_diff() {
    let session = run_before_after(SQUARE, SQUARE, None).unwrap();
    assert!(session.diagnostics.is_empty());
    assert_eq!(session.diff.functions.len(), 1);
}
