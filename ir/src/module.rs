//! The IR data model the differ and the orchestrator operate on.
//!
//! The core treats modules "opaquely apart from the printed form, function
//! iteration, block iteration and naming, instruction iteration and
//! printing, and attribute/signature comparison" (spec). This is the
//! concrete representation that satisfies that contract without requiring
//! a real compiler toolchain to build or test against.

use crate::location::SourceLocation;
use serde::{Deserialize, Serialize};

/// One printed IR instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// Stable printed form of this instruction, leading whitespace already
    /// stripped.
    pub text: String,
    pub opcode_name: String,
    pub debug_loc: Option<SourceLocation>,
}

impl Instruction {
    pub fn new(text: impl Into<String>, opcode_name: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            opcode_name: opcode_name.into(),
            debug_loc: None,
        }
    }

    pub fn with_debug_loc(mut self, loc: SourceLocation) -> Self {
        self.debug_loc = Some(loc);
        self
    }

    pub fn debug_loc_string(&self) -> String {
        match &self.debug_loc {
            Some(loc) if loc.is_valid() => loc.to_string(),
            _ => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicBlock {
    /// The block's IR name, if the printer emitted one.
    pub name: Option<String>,
    pub instructions: Vec<Instruction>,
}

impl BasicBlock {
    pub fn new(name: Option<String>, instructions: Vec<Instruction>) -> Self {
        Self { name, instructions }
    }

    /// Stable block identity: the real name if present, else the
    /// synthetic identifier derived from `index`, this block's position
    /// within its parent function.
    pub fn identity(&self, index: usize) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("<bb.{index}>"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    /// The printed function-type string, used for signature comparison.
    pub signature: String,
    pub linkage: String,
    pub calling_convention: String,
    pub attributes: Vec<String>,
    pub blocks: Vec<BasicBlock>,
    pub is_declaration: bool,
}

impl Function {
    pub fn new(name: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            signature: signature.into(),
            linkage: String::new(),
            calling_convention: String::new(),
            attributes: Vec::new(),
            blocks: Vec::new(),
            is_declaration: true,
        }
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn instruction_count(&self) -> usize {
        self.blocks.iter().map(|b| b.instructions.len()).sum()
    }

    /// Block identities in positional order (real name, else synthetic).
    pub fn block_identities(&self) -> Vec<String> {
        self.blocks
            .iter()
            .enumerate()
            .map(|(i, b)| b.identity(i))
            .collect()
    }

    /// `true` iff calling convention, linkage, visibility (folded into
    /// `attributes` here) and the printed attribute list match.
    pub fn attributes_equal(&self, other: &Function) -> bool {
        self.calling_convention == other.calling_convention
            && self.linkage == other.linkage
            && self.attributes == other.attributes
    }

    pub fn signature_equal(&self, other: &Function) -> bool {
        self.signature == other.signature
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Module {
    pub functions: Vec<Function>,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn push(&mut self, function: Function) {
        self.functions.push(function);
    }
}
