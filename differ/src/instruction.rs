//! Instruction-level diff: `InstructionRecord` and `InstructionDiff`, plus
//! the alignment pass that produces them for one matched block pair.

use aion_ir::BasicBlock;
use serde::{Deserialize, Serialize};

use crate::align::{align, AlignedPair};
use crate::kind::DiffKind;

/// A stable, printable snapshot of one IR instruction, independent of the
/// `aion_ir::Instruction` it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionRecord {
    pub text: String,
    pub line_index: usize,
    pub opcode_name: String,
    pub debug_loc: String,
}

impl InstructionRecord {
    fn from_block(block: &BasicBlock, index: usize) -> Self {
        let instr = &block.instructions[index];
        InstructionRecord {
            text: instr.text.trim_start().to_string(),
            line_index: index + 1,
            opcode_name: instr.opcode_name.clone(),
            debug_loc: instr.debug_loc_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionDiff {
    pub kind: DiffKind,
    pub before: Option<InstructionRecord>,
    pub after: Option<InstructionRecord>,
}

/// Align two blocks' instruction-text sequences and produce the ordered
/// diff list, plus whether any entry is non-`Unchanged`.
pub fn diff_instructions(before: &BasicBlock, after: &BasicBlock) -> (Vec<InstructionDiff>, bool) {
    let before_text: Vec<&str> = before.instructions.iter().map(|i| i.text.as_str()).collect();
    let after_text: Vec<&str> = after.instructions.iter().map(|i| i.text.as_str()).collect();

    let path = align(&before_text, &after_text);
    let mut diffs = Vec::with_capacity(path.len());
    let mut changed = false;

    for AlignedPair { a, b } in path {
        let diff = match (a, b) {
            (Some(ai), Some(bi)) => InstructionDiff {
                kind: DiffKind::Unchanged,
                before: Some(InstructionRecord::from_block(before, ai)),
                after: Some(InstructionRecord::from_block(after, bi)),
            },
            (None, Some(bi)) => {
                changed = true;
                InstructionDiff {
                    kind: DiffKind::Added,
                    before: None,
                    after: Some(InstructionRecord::from_block(after, bi)),
                }
            }
            (Some(ai), None) => {
                changed = true;
                InstructionDiff {
                    kind: DiffKind::Removed,
                    before: Some(InstructionRecord::from_block(before, ai)),
                    after: None,
                }
            }
            (None, None) => unreachable!("alignment never produces a double gap"),
        };
        diffs.push(diff);
    }

    (diffs, changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aion_ir::Instruction;

    fn block(instrs: &[&str]) -> BasicBlock {
        BasicBlock::new(
            None,
            instrs.iter().map(|t| Instruction::new(*t, "op")).collect(),
        )
    }

    #[test]
    fn identical_blocks_are_all_unchanged() {
        let b = block(&["a", "b", "c"]);
        let (diffs, changed) = diff_instructions(&b, &b);
        assert!(!changed);
        assert!(diffs.iter().all(|d| d.kind == DiffKind::Unchanged));
        assert_eq!(diffs.len(), 3);
    }

    #[test]
    fn a_substitution_yields_added_then_removed() {
        let before = block(&["x"]);
        let after = block(&["y"]);
        let (diffs, changed) = diff_instructions(&before, &after);
        assert!(changed);
        assert_eq!(diffs.len(), 2);
        assert_eq!(diffs[0].kind, DiffKind::Added);
        assert_eq!(diffs[1].kind, DiffKind::Removed);
    }

    #[test]
    fn line_index_is_one_based_within_the_owning_block() {
        let b = block(&["first", "second"]);
        let (diffs, _) = diff_instructions(&b, &b);
        assert_eq!(diffs[0].before.as_ref().unwrap().line_index, 1);
        assert_eq!(diffs[1].before.as_ref().unwrap().line_index, 2);
    }
}
