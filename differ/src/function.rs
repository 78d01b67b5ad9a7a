//! Function-level diff: block alignment plus attribute/signature
//! comparison, producing the `Modified`/`Unchanged` verdict.

use aion_ir::Function;
use serde::{Deserialize, Serialize};

use crate::block::{diff_blocks, BlockDiff};
use crate::kind::DiffKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDiff {
    pub kind: DiffKind,
    pub function_name: String,
    pub before_signature: String,
    pub after_signature: String,
    pub blocks: Vec<BlockDiff>,
    pub before_block_count: usize,
    pub after_block_count: usize,
    pub before_instr_count: usize,
    pub after_instr_count: usize,
    pub attributes_changed: bool,
    pub signature_changed: bool,
}

impl FunctionDiff {
    pub fn was_optimized(&self) -> bool {
        self.kind == DiffKind::Modified && self.after_instr_count < self.before_instr_count
    }

    pub fn was_simplified(&self) -> bool {
        self.kind == DiffKind::Modified && self.after_block_count < self.before_block_count
    }

    pub fn was_inlined(&self) -> bool {
        self.kind == DiffKind::Removed
    }
}

/// A function present only in `before`.
pub fn removed(before: &Function) -> FunctionDiff {
    FunctionDiff {
        kind: DiffKind::Removed,
        function_name: before.name.clone(),
        before_signature: before.signature.clone(),
        after_signature: String::new(),
        blocks: Vec::new(),
        before_block_count: before.block_count(),
        after_block_count: 0,
        before_instr_count: before.instruction_count(),
        after_instr_count: 0,
        attributes_changed: false,
        signature_changed: false,
    }
}

/// A function present only in `after`.
pub fn added(after: &Function) -> FunctionDiff {
    FunctionDiff {
        kind: DiffKind::Added,
        function_name: after.name.clone(),
        before_signature: String::new(),
        after_signature: after.signature.clone(),
        blocks: Vec::new(),
        before_block_count: 0,
        after_block_count: after.block_count(),
        before_instr_count: 0,
        after_instr_count: after.instruction_count(),
        attributes_changed: false,
        signature_changed: false,
    }
}

/// A function present in both modules: diff its blocks (unless either side
/// is a bare declaration) and fold in attribute/signature comparison.
pub fn matched(before: &Function, after: &Function) -> FunctionDiff {
    let signature_changed = !before.signature_equal(after);
    let attributes_changed = !before.attributes_equal(after);

    let (blocks, blocks_changed) = if before.is_declaration && after.is_declaration {
        (Vec::new(), false)
    } else if before.is_declaration != after.is_declaration {
        // One declaration, one definition: the body comparison is
        // meaningless, but the bodies plainly differ.
        (Vec::new(), true)
    } else {
        diff_blocks(before, after)
    };

    let kind = if blocks_changed || attributes_changed || signature_changed {
        DiffKind::Modified
    } else {
        DiffKind::Unchanged
    };

    FunctionDiff {
        kind,
        function_name: before.name.clone(),
        before_signature: before.signature.clone(),
        after_signature: after.signature.clone(),
        blocks,
        before_block_count: before.block_count(),
        after_block_count: after.block_count(),
        before_instr_count: before.instruction_count(),
        after_instr_count: after.instruction_count(),
        attributes_changed,
        signature_changed,
    }
}
