//! Block-level diff: align two functions' block-identity vectors, then
//! diff instructions within each matched pair.

use aion_ir::Function;
use serde::{Deserialize, Serialize};

use crate::align::{align, AlignedPair};
use crate::instruction::{diff_instructions, InstructionDiff};
use crate::kind::DiffKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDiff {
    pub kind: DiffKind,
    pub block_name: String,
    pub instructions: Vec<InstructionDiff>,
    pub before_count: usize,
    pub after_count: usize,
}

/// Align `before.blocks` against `after.blocks` by identity and diff each
/// matched pair's instructions. Returns the ordered block diffs plus
/// whether any of them is non-`Unchanged`.
pub fn diff_blocks(before: &Function, after: &Function) -> (Vec<BlockDiff>, bool) {
    let before_ids = before.block_identities();
    let after_ids = after.block_identities();

    let path = align(&before_ids, &after_ids);
    let mut diffs = Vec::with_capacity(path.len());
    let mut function_changed = false;

    for AlignedPair { a, b } in path {
        let diff = match (a, b) {
            (Some(ai), Some(bi)) => {
                let (instructions, block_changed) =
                    diff_instructions(&before.blocks[ai], &after.blocks[bi]);
                if block_changed {
                    function_changed = true;
                }
                BlockDiff {
                    kind: if block_changed {
                        DiffKind::Modified
                    } else {
                        DiffKind::Unchanged
                    },
                    block_name: before_ids[ai].clone(),
                    before_count: before.blocks[ai].instructions.len(),
                    after_count: after.blocks[bi].instructions.len(),
                    instructions,
                }
            }
            (Some(ai), None) => {
                function_changed = true;
                BlockDiff {
                    kind: DiffKind::Removed,
                    block_name: before_ids[ai].clone(),
                    instructions: Vec::new(),
                    before_count: before.blocks[ai].instructions.len(),
                    after_count: 0,
                }
            }
            (None, Some(bi)) => {
                function_changed = true;
                BlockDiff {
                    kind: DiffKind::Added,
                    block_name: after_ids[bi].clone(),
                    instructions: Vec::new(),
                    before_count: 0,
                    after_count: after.blocks[bi].instructions.len(),
                }
            }
            (None, None) => unreachable!("alignment never produces a double gap"),
        };
        diffs.push(diff);
    }

    (diffs, function_changed)
}
