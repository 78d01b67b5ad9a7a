//! Support types and the IR data model shared by the collector, the
//! record-file parser, the differ, and the classifier.

pub mod location;
pub mod module;
pub mod parser;
pub mod printer;

pub use location::{RemarkArgument, RemarkKind, SourceLocation};
pub use module::{BasicBlock, Function, Instruction, Module};
pub use parser::{parse_module, IrParseError};
pub use printer::print_module;

mod remark;
pub use remark::Remark;

impl Module {
    pub fn parse(source: &str) -> Result<Module, IrParseError> {
        parser::parse_module(source)
    }

    pub fn print(&self) -> String {
        printer::print_module(self)
    }

    /// Assign the synthetic name `aion.bb.<index>` to every unnamed basic
    /// block, so later diffs have stable identities regardless of
    /// whether the source IR named its blocks.
    pub fn name_anonymous_blocks(&mut self) {
        for function in &mut self.functions {
            for (index, block) in function.blocks.iter_mut().enumerate() {
                if block.name.is_none() {
                    block.name = Some(format!("aion.bb.{index}"));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_anonymous_blocks_synthetically() {
        let mut module = Module::parse("define void @f() {\n    ret void\n}\n").unwrap();
        assert_eq!(module.functions[0].blocks[0].name, None);
        module.name_anonymous_blocks();
        assert_eq!(
            module.functions[0].blocks[0].name.as_deref(),
            Some("aion.bb.0")
        );
    }
}
