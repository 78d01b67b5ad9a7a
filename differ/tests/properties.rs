//! Property tests for the §8 differ invariants, run over randomly
//! generated modules rather than the hand-picked cases in the unit tests.

use proptest::prelude::*;

use aion_differ::diff_modules;
use aion_ir::{BasicBlock, Function, Instruction, Module};

fn arb_instruction() -> impl Strategy<Value = Instruction> {
    (0u32..6, "[a-z]{1,4}").prop_map(|(n, op)| Instruction::new(format!("%{n} = {op} i32 %0"), op))
}

fn arb_block() -> impl Strategy<Value = BasicBlock> {
    (prop::option::of("[a-z]{1,6}"), prop::collection::vec(arb_instruction(), 0..6))
        .prop_map(|(name, instructions)| BasicBlock::new(name, instructions))
}

fn arb_named_function() -> impl Strategy<Value = (u32, Vec<BasicBlock>)> {
    (0u32..8, prop::collection::vec(arb_block(), 0..4))
}

/// A module with up to 5 functions, deduplicated by name (the first
/// generated function with a given name wins, matching how a real module
/// can never define the same function twice).
fn arb_module() -> impl Strategy<Value = Module> {
    prop::collection::vec(arb_named_function(), 0..5).prop_map(|items| {
        let mut seen = std::collections::HashSet::new();
        let mut module = Module::new();
        for (n, blocks) in items {
            if !seen.insert(n) {
                continue;
            }
            let mut f = Function::new(format!("f{n}"), "void ()");
            f.is_declaration = blocks.is_empty();
            f.blocks = blocks;
            module.push(f);
        }
        module
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Invariant 2 (§8): aligning a module against itself always yields
    /// zero added/removed/modified and every function unchanged.
    #[test]
    fn self_diff_is_always_all_unchanged(module in arb_module()) {
        let diff = diff_modules(&module, &module);
        prop_assert_eq!(diff.added_functions, 0);
        prop_assert_eq!(diff.removed_functions, 0);
        prop_assert_eq!(diff.modified_functions, 0);
        prop_assert_eq!(diff.unchanged_functions, module.functions.len());
        prop_assert_eq!(diff.total_before_instructions, diff.total_after_instructions);
    }

    /// Invariant 1 (§8): the four buckets always partition the function
    /// list, and total instruction counts match the per-function sums,
    /// for arbitrary (not just self-diffed) before/after pairs.
    #[test]
    fn diff_buckets_always_partition_the_function_list(before in arb_module(), after in arb_module()) {
        let diff = diff_modules(&before, &after);
        let bucketed = diff.added_functions + diff.removed_functions + diff.modified_functions + diff.unchanged_functions;
        prop_assert_eq!(bucketed, diff.functions.len());

        let expected_before: usize = before.functions.iter().map(|f| f.instruction_count()).sum();
        let expected_after: usize = after.functions.iter().map(|f| f.instruction_count()).sum();
        prop_assert_eq!(diff.total_before_instructions, expected_before);
        prop_assert_eq!(diff.total_after_instructions, expected_after);
    }
}
