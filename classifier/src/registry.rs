//! The classifier's static rule database.
//!
//! Grouped into one registration routine per pass family, mirroring the
//! teacher's `PatternRegistry::new` (one insert per known failure shape)
//! but split across functions instead of one long constructor body.

use crate::types::{FixSuggestion, OptimizationPattern, SeverityLevel};

pub fn build() -> Vec<OptimizationPattern> {
    let mut patterns = Vec::new();
    register_loop_vectorize(&mut patterns);
    register_slp_vectorize(&mut patterns);
    register_inlining(&mut patterns);
    register_sroa(&mut patterns);
    register_unroll(&mut patterns);
    register_tailcall(&mut patterns);
    register_gvn(&mut patterns);
    register_memcpy(&mut patterns);
    register_loop_interchange(&mut patterns);
    register_generic(&mut patterns);
    patterns
}

fn register_loop_vectorize(patterns: &mut Vec<OptimizationPattern>) {
    patterns.push(OptimizationPattern {
        pass_substr: "loop-vectorize".to_string(),
        remark_substr: String::new(),
        message_substr: "depend".to_string(),
        short_reason: "Loop vectorization blocked: memory dependency / aliasing".to_string(),
        detailed_explanation:
            "The vectorizer in {FunctionName} could not prove that loop-carried memory \
             accesses are independent across iterations, so it refused to vectorize rather \
             than risk reordering a true dependency."
                .to_string(),
        root_cause: "The compiler cannot rule out aliasing between the pointers touched by \
                      this loop body without help from the source."
            .to_string(),
        optimizer_intent: "Vectorize the loop body into SIMD-width operations once memory \
                            independence across iterations is established."
            .to_string(),
        suggestions: vec![
            FixSuggestion::source_level(
                "Mark pointer parameters `__restrict__` (or `restrict` in C) to tell the \
                 compiler they don't alias.",
                "void scale(float *__restrict__ dst, const float *__restrict__ src, int n)",
            ),
            FixSuggestion::source_level(
                "Hoist a runtime aliasing check before the loop so the vectorizer can emit a \
                 versioned loop.",
                "if (dst + n <= src || src + n <= dst) { /* vectorizable path */ }",
            ),
            FixSuggestion::source_level(
                "Add a `#pragma clang loop vectorize(assume_safety)` (or \
                 `#pragma GCC ivdep`) annotation if independence is known out-of-band.",
                "#pragma clang loop vectorize(assume_safety)\nfor (int i = 0; i < n; i++) ...",
            ),
        ],
        severity: SeverityLevel::Critical,
        estimated_speedup: 4.0,
    });

    patterns.push(OptimizationPattern {
        pass_substr: "loop-vectorize".to_string(),
        remark_substr: String::new(),
        message_substr: "trip count".to_string(),
        short_reason: "Loop vectorization skipped: trip count too small".to_string(),
        detailed_explanation:
            "{FunctionName}'s loop has a small or unknown trip count, so the estimated cost \
             of vectorizing outweighs the gain."
                .to_string(),
        root_cause: "Vectorization overhead (setup, remainder handling) dominates for short \
                      loops."
            .to_string(),
        optimizer_intent: "Only vectorize loops expected to run enough iterations to amortize \
                            the SIMD setup cost."
            .to_string(),
        suggestions: vec![FixSuggestion::source_level(
            "If the trip count is known to be large at call sites, hint it with \
             `__builtin_expect` or a loop count pragma.",
            "#pragma clang loop vectorize_width(8)",
        )],
        severity: SeverityLevel::Low,
        estimated_speedup: 1.5,
    });
}

fn register_slp_vectorize(patterns: &mut Vec<OptimizationPattern>) {
    patterns.push(OptimizationPattern {
        pass_substr: "slp-vectorizer".to_string(),
        remark_substr: String::new(),
        message_substr: String::new(),
        short_reason: "SLP vectorization not profitable".to_string(),
        detailed_explanation:
            "The superword-level parallelism vectorizer in {FunctionName} found candidate \
             scalar operations to pack but estimated the packed form would cost more than \
             the scalar sequence (extract/insert overhead)."
                .to_string(),
        root_cause: "Non-contiguous memory access or mismatched operand types raise the cost \
                      of packing scalars into a vector."
            .to_string(),
        optimizer_intent: "Combine independent scalar operations on adjacent memory into a \
                            single vector instruction."
            .to_string(),
        suggestions: vec![FixSuggestion::source_level(
            "Store the operands contiguously (e.g. as an array or small struct-of-arrays) so \
             adjacent elements share a vector lane.",
            "struct Vec4 { float x, y, z, w; };",
        )],
        severity: SeverityLevel::Medium,
        estimated_speedup: 1.8,
    });
}

fn register_inlining(patterns: &mut Vec<OptimizationPattern>) {
    patterns.push(OptimizationPattern {
        pass_substr: "inline".to_string(),
        remark_substr: "NotInlined".to_string(),
        message_substr: "noinline".to_string(),
        short_reason: "Inlining rejected: noinline attribute present".to_string(),
        detailed_explanation:
            "{FunctionName} carries an explicit `noinline` attribute, which overrides the \
             inliner's cost model entirely."
                .to_string(),
        root_cause: "A `noinline` attribute (from source, a build flag, or a prior pass) \
                      forbids inlining regardless of call-site cost."
            .to_string(),
        optimizer_intent: "Replace the call site with a copy of the callee body to remove \
                            call overhead and expose further optimization."
            .to_string(),
        suggestions: vec![
            FixSuggestion::source_level(
                "Remove the `noinline` attribute if it isn't needed for debugging or binary \
                 size control.",
                "// remove: __attribute__((noinline))",
            ),
            FixSuggestion::source_level(
                "If the attribute exists to keep a stable symbol for profiling, gate it \
                 behind a build-time flag instead.",
                "#ifndef PROFILE_BUILD\n__attribute__((always_inline))\n#endif",
            ),
        ],
        severity: SeverityLevel::High,
        estimated_speedup: 1.25,
    });

    patterns.push(OptimizationPattern {
        pass_substr: "inline".to_string(),
        remark_substr: "TooCostly".to_string(),
        message_substr: "cost".to_string(),
        short_reason: "Inlining rejected: cost exceeds threshold".to_string(),
        detailed_explanation:
            "The estimated inlining cost of {FunctionName} ({Cost}) exceeds the pass's \
             threshold ({Threshold})."
                .to_string(),
        root_cause: "The callee body is large enough, or the call site hot-path heuristic \
                      weak enough, that the cost model rejects inlining."
            .to_string(),
        optimizer_intent: "Inline call sites whose estimated cost is below the configured \
                            threshold."
            .to_string(),
        suggestions: vec![
            FixSuggestion::source_level(
                "Mark the call site hot with `__attribute__((always_inline))` if profiling \
                 shows it matters.",
                "static inline __attribute__((always_inline)) int helper(int x)",
            ),
            FixSuggestion::source_level(
                "Raise the inline threshold for this translation unit with \
                 `-mllvm -inline-threshold=N`.",
                "-mllvm -inline-threshold=500",
            ),
        ],
        severity: SeverityLevel::Medium,
        estimated_speedup: 1.15,
    });
}

fn register_sroa(patterns: &mut Vec<OptimizationPattern>) {
    patterns.push(OptimizationPattern {
        pass_substr: "sroa".to_string(),
        remark_substr: String::new(),
        message_substr: "escape".to_string(),
        short_reason: "Aggregate not split: pointer escapes the function".to_string(),
        detailed_explanation:
            "{FunctionName}'s local aggregate has its address taken and passed out of the \
             function, so scalar-replacement-of-aggregates cannot break it into registers."
                .to_string(),
        root_cause: "Taking `&local_struct` (or passing it by pointer to an unanalyzed call) \
                      forces the aggregate to remain addressable memory."
            .to_string(),
        optimizer_intent: "Replace a small stack aggregate with independent scalar values \
                            held in registers."
            .to_string(),
        suggestions: vec![FixSuggestion::source_level(
            "Pass the aggregate's fields by value instead of taking its address, if the \
             callee doesn't need aliasing.",
            "void consume(int x, int y); // instead of consume(struct Point *p)",
        )],
        severity: SeverityLevel::Medium,
        estimated_speedup: 1.3,
    });
}

fn register_unroll(patterns: &mut Vec<OptimizationPattern>) {
    patterns.push(OptimizationPattern {
        pass_substr: "unroll".to_string(),
        remark_substr: String::new(),
        message_substr: "size".to_string(),
        short_reason: "Loop unrolling skipped: body too large".to_string(),
        detailed_explanation:
            "Unrolling {FunctionName}'s loop would exceed the configured code-size growth \
             budget."
                .to_string(),
        root_cause: "The loop body already contains enough instructions that unrolling would \
                      bloat the function past the size the pass is willing to grow it."
            .to_string(),
        optimizer_intent: "Duplicate the loop body N times to amortize branch overhead and \
                            expose more instruction-level parallelism."
            .to_string(),
        suggestions: vec![FixSuggestion::source_level(
            "Hint a specific unroll factor if you know it's safe for the hot loop.",
            "#pragma clang loop unroll_count(4)",
        )],
        severity: SeverityLevel::Low,
        estimated_speedup: 1.2,
    });
}

fn register_tailcall(patterns: &mut Vec<OptimizationPattern>) {
    patterns.push(OptimizationPattern {
        pass_substr: "tailcallelim".to_string(),
        remark_substr: String::new(),
        message_substr: String::new(),
        short_reason: "Tail-call elimination blocked".to_string(),
        detailed_explanation:
            "{FunctionName} has a recursive call that is not in tail position (work remains \
             after the call returns), so the call frame cannot be reused."
                .to_string(),
        root_cause: "Code after the recursive call (even an implicit destructor or a pending \
                      arithmetic operation) keeps the call from being a true tail call."
            .to_string(),
        optimizer_intent: "Convert tail recursion into a loop, reusing the current stack \
                            frame instead of growing the call stack."
            .to_string(),
        suggestions: vec![FixSuggestion::source_level(
            "Restructure the recursive call so it's the last operation performed, with no \
             pending work afterward.",
            "return helper(acc + x, rest); // instead of return 1 + helper(...)",
        )],
        severity: SeverityLevel::Low,
        estimated_speedup: 1.1,
    });
}

fn register_gvn(patterns: &mut Vec<OptimizationPattern>) {
    patterns.push(OptimizationPattern {
        pass_substr: "gvn".to_string(),
        remark_substr: String::new(),
        message_substr: "load".to_string(),
        short_reason: "Redundant load not eliminated: may-alias store between uses".to_string(),
        detailed_explanation:
            "Global value numbering in {FunctionName} found two loads of the same address \
             but could not prove no intervening store clobbers the value."
                .to_string(),
        root_cause: "An intervening call or store through an unrelated pointer could alias \
                      the loaded address, so GVN conservatively keeps both loads."
            .to_string(),
        optimizer_intent: "Reuse a previously computed (or loaded) value instead of \
                            recomputing or reloading it."
            .to_string(),
        suggestions: vec![FixSuggestion::source_level(
            "Cache the loaded value in a local variable across the region where aliasing is \
             in doubt.",
            "int cached = *p; use(cached); use(cached);",
        )],
        severity: SeverityLevel::Medium,
        estimated_speedup: 1.4,
    });
}

fn register_memcpy(patterns: &mut Vec<OptimizationPattern>) {
    patterns.push(OptimizationPattern {
        pass_substr: "memcpyopt".to_string(),
        remark_substr: String::new(),
        message_substr: String::new(),
        short_reason: "memcpy not converted to a store".to_string(),
        detailed_explanation:
            "The copy in {FunctionName} moves more bytes than fit in a single scalar store, \
             or its size isn't known at compile time, so it stays a `memcpy` call."
                .to_string(),
        root_cause: "A variable or large copy size defeats the pattern that recognizes \
                      small, constant-size copies as store-equivalent."
            .to_string(),
        optimizer_intent: "Replace small, fixed-size `memcpy` calls with a direct scalar \
                            store."
            .to_string(),
        suggestions: vec![FixSuggestion::source_level(
            "If the copy size is always small and constant, copy the fields directly instead \
             of calling `memcpy`.",
            "dst->x = src->x; dst->y = src->y;",
        )],
        severity: SeverityLevel::Low,
        estimated_speedup: 1.1,
    });
}

fn register_loop_interchange(patterns: &mut Vec<OptimizationPattern>) {
    patterns.push(OptimizationPattern {
        pass_substr: "loop-interchange".to_string(),
        remark_substr: String::new(),
        message_substr: String::new(),
        short_reason: "Loop interchange not applied: dependence direction unfavorable".to_string(),
        detailed_explanation:
            "Swapping the nesting order of {FunctionName}'s loop pair would violate a \
             dependence carried by the outer loop."
                .to_string(),
        root_cause: "The dependence vector between the two loop levels has a direction that \
                      interchange would invert, changing program semantics."
            .to_string(),
        optimizer_intent: "Reorder a nested loop pair so the stride-1 access is on the \
                            innermost loop, improving cache locality."
            .to_string(),
        suggestions: vec![FixSuggestion::source_level(
            "Restructure the loop nest (or the array layout) so the inner loop already walks \
             memory contiguously.",
            "for (int j = 0; j < n; j++)\n  for (int i = 0; i < m; i++)\n    a[i][j] = ...;",
        )],
        severity: SeverityLevel::Medium,
        estimated_speedup: 2.0,
    });
}

fn register_generic(patterns: &mut Vec<OptimizationPattern>) {
    patterns.push(OptimizationPattern {
        pass_substr: String::new(),
        remark_substr: String::new(),
        message_substr: "optnone".to_string(),
        short_reason: "Function marked optnone: all optimization skipped".to_string(),
        detailed_explanation:
            "{FunctionName} carries the `optnone` attribute, which disables every \
             optimization pass for this function's body."
                .to_string(),
        root_cause: "`optnone` (commonly paired with `noinline`) is typically set by a debug \
                      build configuration or an explicit source annotation."
            .to_string(),
        optimizer_intent: "Run the full optimization pipeline over every function body."
            .to_string(),
        suggestions: vec![FixSuggestion::source_level(
            "Remove the `optnone` attribute (and the debug-build flag that set it) for \
             release builds.",
            "// remove: __attribute__((optnone))",
        )],
        severity: SeverityLevel::High,
        estimated_speedup: 3.0,
    });
}
