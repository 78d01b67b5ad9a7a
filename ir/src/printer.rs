//! Printing a `Module` back to the textual form `parser.rs` reads.
//!
//! `Module::print` round-trips with `parse_module` for any module built
//! through the public API (the session orchestrator clones a module and
//! prints both the before and after copies into `AnalysisSession`).

use crate::module::Module;

pub fn print_module(module: &Module) -> String {
    let mut out = String::new();
    for (i, function) in module.functions.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        print_function(&mut out, module, function);
    }
    out
}

fn print_function(out: &mut String, _module: &Module, function: &crate::module::Function) {
    let attrs = if function.attributes.is_empty() {
        String::new()
    } else {
        format!(" {}", function.attributes.join(" "))
    };

    if function.is_declaration {
        out.push_str(&format!(
            "declare {} @{}{attrs}\n",
            function.signature_prefix(),
            function.name_with_params()
        ));
        return;
    }

    out.push_str(&format!(
        "define {} @{}{attrs} {{\n",
        function.signature_prefix(),
        function.name_with_params()
    ));
    for block in &function.blocks {
        if let Some(name) = &block.name {
            out.push_str(&format!("{name}:\n"));
        }
        for instr in &block.instructions {
            let loc = instr.debug_loc_string();
            if loc.is_empty() {
                out.push_str(&format!("    {}\n", instr.text));
            } else {
                out.push_str(&format!("    {} ; {}\n", instr.text, loc));
            }
        }
    }
    out.push_str("}\n");
}

impl crate::module::Function {
    /// The signature string minus the trailing `(params)`, for printing
    /// `<ret-type> @name(params)` back in the original order.
    fn signature_prefix(&self) -> String {
        match self.signature.find('(') {
            Some(idx) => self.signature[..idx].trim().to_string(),
            None => self.signature.clone(),
        }
    }

    fn name_with_params(&self) -> String {
        match self.signature.find('(') {
            Some(idx) => format!("{}{}", self.name, &self.signature[idx..]),
            None => format!("{}()", self.name),
        }
    }
}
