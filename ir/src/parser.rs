//! Textual IR lexer/parser.
//!
//! Format (LLVM-`.ll`-flavored, but self-contained — no system LLVM
//! required to build or test this crate):
//!
//! ```text
//! declare i32 @helper(i32) nounwind
//!
//! define i32 @square(i32) {
//! entry:
//!     %1 = mul i32 %0, %0 ; square.c:3:10
//!     ret i32 %1
//! }
//! ```
//!
//! One function per `define`/`declare` line, blocks introduced by a
//! `label:` line, instructions as raw text with an optional trailing
//! `; file:line:col` debug-location comment. Mirrors the teacher's own
//! hand-rolled, line/column-tracking lexer (`fastforth_frontend::Lexer`)
//! rather than pulling in a parser-combinator crate for a grammar this
//! small.

use crate::location::SourceLocation;
use crate::module::{BasicBlock, Function, Instruction, Module};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IrParseError {
    #[error("line {line}: expected '{{' to open function body or ';'-terminated declaration")]
    UnterminatedSignature { line: usize },
    #[error("line {line}: unmatched closing brace")]
    UnmatchedBrace { line: usize },
    #[error("line {line}: function body never closed")]
    UnclosedFunction { line: usize },
    #[error("line {line}: malformed define/declare header: {reason}")]
    MalformedHeader { line: usize, reason: String },
}

pub fn parse_module(source: &str) -> Result<Module, IrParseError> {
    let mut module = Module::new();
    let mut lines = source.lines().enumerate().peekable();

    while let Some((idx, raw_line)) = lines.next() {
        let line_no = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }

        if let Some(rest) = line.strip_prefix("declare ") {
            let (signature, name, attrs) = parse_header(rest, line_no)?;
            module.push(Function {
                name,
                signature,
                linkage: "external".to_string(),
                calling_convention: "ccc".to_string(),
                attributes: attrs,
                blocks: Vec::new(),
                is_declaration: true,
            });
            continue;
        }

        if let Some(rest) = line.strip_prefix("define ") {
            let rest = rest.trim_end();
            let rest = rest
                .strip_suffix('{')
                .ok_or(IrParseError::UnterminatedSignature { line: line_no })?
                .trim_end();
            let (signature, name, attrs) = parse_header(rest, line_no)?;

            let mut blocks: Vec<BasicBlock> = Vec::new();
            let mut closed = false;

            for (body_idx, body_raw) in lines.by_ref() {
                let body_line_no = body_idx + 1;
                let body = body_raw.trim();
                if body.is_empty() || body.starts_with(';') {
                    continue;
                }
                if body == "}" {
                    closed = true;
                    break;
                }
                if is_label(body) {
                    let label = body.trim_end_matches(':').to_string();
                    blocks.push(BasicBlock::new(Some(label), Vec::new()));
                    continue;
                }
                // An instruction with no preceding label starts the
                // function's implicit, anonymous entry block.
                if blocks.is_empty() {
                    blocks.push(BasicBlock::new(None, Vec::new()));
                }
                let block = blocks.last_mut().expect("just pushed if empty");
                let _ = body_line_no;
                block.instructions.push(parse_instruction(body));
            }

            if !closed {
                return Err(IrParseError::UnclosedFunction { line: line_no });
            }

            module.push(Function {
                name,
                signature,
                linkage: "external".to_string(),
                calling_convention: "ccc".to_string(),
                attributes: attrs,
                blocks,
                is_declaration: false,
            });
            continue;
        }

        if line == "}" {
            return Err(IrParseError::UnmatchedBrace { line: line_no });
        }

        return Err(IrParseError::MalformedHeader {
            line: line_no,
            reason: format!("expected 'define' or 'declare', found {line:?}"),
        });
    }

    Ok(module)
}

/// A block label is a bare identifier line ending in `:`, with no `=`
/// and no leading `%` (which would make it an instruction result name).
fn is_label(line: &str) -> bool {
    line.ends_with(':') && !line.contains('=') && !line.starts_with('%')
}

/// Split `<signature> @<name>(<params>) <attr> <attr>...` into its parts.
fn parse_header(rest: &str, line_no: usize) -> Result<(String, String, Vec<String>), IrParseError> {
    let at_pos = rest.find('@').ok_or_else(|| IrParseError::MalformedHeader {
        line: line_no,
        reason: "missing '@name'".to_string(),
    })?;
    let signature_prefix = rest[..at_pos].trim();
    let after_at = &rest[at_pos + 1..];

    let paren_close = after_at.find(')').ok_or_else(|| IrParseError::MalformedHeader {
        line: line_no,
        reason: "missing ')' after parameter list".to_string(),
    })?;
    let name_and_params = &after_at[..=paren_close];
    let name = name_and_params
        .split('(')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();
    if name.is_empty() {
        return Err(IrParseError::MalformedHeader {
            line: line_no,
            reason: "empty function name".to_string(),
        });
    }

    let params = &name_and_params[name.len()..];
    let signature = format!("{signature_prefix} {params}").trim().to_string();

    let attrs: Vec<String> = after_at[paren_close + 1..]
        .split_whitespace()
        .map(|s| s.to_string())
        .collect();

    Ok((signature, name, attrs))
}

fn parse_instruction(line: &str) -> Instruction {
    let (body, debug_loc) = split_debug_loc(line);
    let opcode = extract_opcode(body);
    Instruction::new(body.trim().to_string(), opcode).maybe_with_debug_loc(debug_loc)
}

fn split_debug_loc(line: &str) -> (&str, Option<SourceLocation>) {
    match line.rsplit_once(';') {
        Some((body, comment)) => {
            let comment = comment.trim();
            match parse_file_line_col(comment) {
                Some(loc) => (body, Some(loc)),
                None => (line, None),
            }
        }
        None => (line, None),
    }
}

fn parse_file_line_col(text: &str) -> Option<SourceLocation> {
    let mut parts = text.rsplitn(3, ':');
    let column: u32 = parts.next()?.parse().ok()?;
    let line: u32 = parts.next()?.parse().ok()?;
    let file = parts.next()?.trim();
    if file.is_empty() {
        return None;
    }
    Some(SourceLocation::new(file, line, column))
}

fn extract_opcode(body: &str) -> String {
    let tokens: Vec<&str> = body.split_whitespace().collect();
    if let Some(eq_pos) = tokens.iter().position(|t| *t == "=") {
        tokens.get(eq_pos + 1).map(|s| s.to_string()).unwrap_or_default()
    } else {
        tokens.first().map(|s| s.to_string()).unwrap_or_default()
    }
}

impl Instruction {
    fn maybe_with_debug_loc(self, loc: Option<SourceLocation>) -> Self {
        match loc {
            Some(loc) => self.with_debug_loc(loc),
            None => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_declaration_without_body() {
        let module = parse_module("declare i32 @helper(i32) nounwind\n").unwrap();
        assert_eq!(module.functions.len(), 1);
        let f = &module.functions[0];
        assert_eq!(f.name, "helper");
        assert!(f.is_declaration);
        assert_eq!(f.attributes, vec!["nounwind"]);
    }

    #[test]
    fn parses_definition_with_blocks_and_debug_loc() {
        let src = "define i32 @square(i32) {\nentry:\n    %1 = mul i32 %0, %0 ; square.c:3:10\n    ret i32 %1\n}\n";
        let module = parse_module(src).unwrap();
        assert_eq!(module.functions.len(), 1);
        let f = &module.functions[0];
        assert!(!f.is_declaration);
        assert_eq!(f.blocks.len(), 1);
        assert_eq!(f.blocks[0].name.as_deref(), Some("entry"));
        assert_eq!(f.blocks[0].instructions.len(), 2);
        assert_eq!(f.blocks[0].instructions[0].opcode_name, "mul");
        assert_eq!(
            f.blocks[0].instructions[0].debug_loc.as_ref().unwrap().to_string(),
            "square.c:3:10"
        );
        assert_eq!(f.blocks[0].instructions[1].opcode_name, "ret");
    }

    #[test]
    fn instruction_without_label_starts_anonymous_entry_block() {
        let src = "define void @f() {\n    ret void\n}\n";
        let module = parse_module(src).unwrap();
        let f = &module.functions[0];
        assert_eq!(f.blocks.len(), 1);
        assert_eq!(f.blocks[0].name, None);
        assert_eq!(f.blocks[0].instructions.len(), 1);
    }

    #[test]
    fn unclosed_function_is_an_error() {
        let src = "define void @f() {\nentry:\n    ret void\n";
        assert_eq!(
            parse_module(src).unwrap_err(),
            IrParseError::UnclosedFunction { line: 1 }
        );
    }
}
