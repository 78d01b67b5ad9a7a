//! Module-level diff: the three-nested-alignment entry point.

use aion_ir::Module;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::function::{self, FunctionDiff};
use crate::kind::DiffKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDiff {
    pub functions: Vec<FunctionDiff>,
    pub added_functions: usize,
    pub removed_functions: usize,
    pub modified_functions: usize,
    pub unchanged_functions: usize,
    pub total_before_instructions: usize,
    pub total_after_instructions: usize,
}

/// Diff two modules: functions first all by name from `before` (in its
/// iteration order), then the names `after` introduces that `before`
/// never had.
pub fn diff_modules(before: &Module, after: &Module) -> ModuleDiff {
    let after_index: FxHashMap<&str, &aion_ir::Function> =
        after.functions.iter().map(|f| (f.name.as_str(), f)).collect();
    let before_names: FxHashMap<&str, ()> =
        before.functions.iter().map(|f| (f.name.as_str(), ())).collect();

    let mut functions = Vec::with_capacity(before.functions.len() + after.functions.len());

    for f in &before.functions {
        let diff = match after_index.get(f.name.as_str()) {
            Some(after_fn) => function::matched(f, after_fn),
            None => function::removed(f),
        };
        functions.push(diff);
    }

    for f in &after.functions {
        if !before_names.contains_key(f.name.as_str()) {
            functions.push(function::added(f));
        }
    }

    let mut added_functions = 0;
    let mut removed_functions = 0;
    let mut modified_functions = 0;
    let mut unchanged_functions = 0;
    let mut total_before_instructions = 0;
    let mut total_after_instructions = 0;

    for f in &functions {
        match f.kind {
            DiffKind::Added => added_functions += 1,
            DiffKind::Removed => removed_functions += 1,
            DiffKind::Modified => modified_functions += 1,
            DiffKind::Unchanged => unchanged_functions += 1,
        }
        total_before_instructions += f.before_instr_count;
        total_after_instructions += f.after_instr_count;
    }

    ModuleDiff {
        functions,
        added_functions,
        removed_functions,
        modified_functions,
        unchanged_functions,
        total_before_instructions,
        total_after_instructions,
    }
}

impl ModuleDiff {
    /// Build a `function_name -> &FunctionDiff` lookup, used by the
    /// classifier to attach a diff to each diagnostic.
    pub fn function_index(&self) -> FxHashMap<&str, &FunctionDiff> {
        self.functions
            .iter()
            .map(|f| (f.function_name.as_str(), f))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aion_ir::parse_module;

    #[test]
    fn self_diff_is_all_unchanged() {
        let src = "define i32 @square(i32) {\nentry:\n    %1 = mul i32 %0, %0\n    ret i32 %1\n}\n";
        let module = parse_module(src).unwrap();
        let diff = diff_modules(&module, &module);
        assert_eq!(diff.modified_functions, 0);
        assert_eq!(diff.added_functions, 0);
        assert_eq!(diff.removed_functions, 0);
        assert_eq!(diff.unchanged_functions, 1);
    }

    #[test]
    fn totals_partition_the_function_list() {
        let before = parse_module("declare void @foo()\ndeclare void @bar()\n").unwrap();
        let after = parse_module("declare void @foo()\ndeclare void @baz()\n").unwrap();
        let diff = diff_modules(&before, &after);
        assert_eq!(diff.functions.len(), 3);
        assert_eq!(
            diff.added_functions + diff.removed_functions + diff.modified_functions + diff.unchanged_functions,
            diff.functions.len()
        );
        assert_eq!(diff.removed_functions, 1);
        assert_eq!(diff.added_functions, 1);
        assert_eq!(diff.unchanged_functions, 1);
    }

    #[test]
    fn a_function_inlined_away_is_removed_and_was_inlined() {
        let before = parse_module("declare void @foo()\ndeclare void @bar()\n").unwrap();
        let after = parse_module("declare void @foo()\n").unwrap();
        let diff = diff_modules(&before, &after);
        assert_eq!(diff.removed_functions, 1);
        let bar = diff.functions.iter().find(|f| f.function_name == "bar").unwrap();
        assert!(bar.was_inlined());
    }
}
