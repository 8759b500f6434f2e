//! No-op implementations of interfaces
//!
//! For an interface `Store` at level `L` the generator emits a `NoOpStore`
//! type remembering `L`, a constructor, a `GetLevel` accessor and one
//! placeholder method per parseable signature returning zero values.

use crate::signature::parse_method_signature;
use crate::zero_values::zero_values;
use declorder_core::analysis::{CodeGenerator, FileWriter, GenericCodeGenerator, ImplementationNamer};
use declorder_core::InterfaceDecl;
use tracing::debug;

/// Name of the generated implementation type for `interface`
fn noop_name(interface: &str) -> String {
    format!("NoOp{interface}")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InterfaceImplementationNamer;

impl ImplementationNamer<InterfaceDecl> for InterfaceImplementationNamer {
    fn implementation_name(&self, item: &InterfaceDecl) -> String {
        noop_name(&item.name)
    }
}

/// Generates Go source for the no-op implementation of one interface
#[derive(Debug, Clone, Copy, Default)]
pub struct InterfaceNoOpGenerator;

/// Receiver name for a stub method; `n` unless the signature already uses it
fn receiver_name(params: &str, returns: &str) -> &'static str {
    let uses_n = [params, returns]
        .into_iter()
        .flat_map(|text| text.split(|c: char| !(c.is_alphanumeric() || c == '_')))
        .any(|token| token == "n");
    if uses_n {
        "_"
    } else {
        "n"
    }
}

impl InterfaceNoOpGenerator {
    /// Placeholder method for one signature, `None` when it cannot be parsed
    fn method_stub(signature: &str, implementation: &str, level: usize) -> Option<String> {
        let Some(method) = parse_method_signature(signature) else {
            debug!(signature, "skipping unparseable method signature");
            return None;
        };
        let name = method.name;
        let receiver = receiver_name(method.params, method.returns);

        let mut out = format!("// {name} is a no-op implementation (Level {level})\n");
        out.push_str(&format!("func ({receiver} *{implementation}) {name}({})", method.params));
        if !method.returns.is_empty() {
            out.push(' ');
            out.push_str(method.returns);
        }
        out.push_str(" {\n");
        out.push_str(&format!("\t// TODO: Implement {name} (Level {level})\n"));

        let values = zero_values(method.returns);
        if !values.is_empty() {
            out.push_str(&format!("\treturn {values}\n"));
        }
        out.push('}');
        Some(out)
    }
}

impl CodeGenerator<InterfaceDecl> for InterfaceNoOpGenerator {
    fn generate_code(&self, item: &InterfaceDecl) -> Option<String> {
        if item.name.is_empty() {
            return None;
        }

        let name = &item.name;
        let implementation = noop_name(name);
        let level = item.level;

        let mut out = format!("// {implementation} is a no-op implementation of {name} interface (Level {level})\n");
        out.push_str(&format!("type {implementation} struct {{\n"));
        out.push_str(&format!("\tlevel int // Dependency level: {level}\n"));
        out.push_str("}\n\n");

        out.push_str(&format!("// New{implementation} creates a new no-op implementation at the specified level\n"));
        out.push_str(&format!("func New{implementation}(level int) *{implementation} {{\n"));
        out.push_str(&format!("\treturn &{implementation}{{level: level}}\n"));
        out.push_str("}\n\n");

        out.push_str(&format!("// GetLevel returns the dependency level of this {implementation}\n"));
        out.push_str(&format!("func (n *{implementation}) GetLevel() int {{\n"));
        out.push_str("\treturn n.level\n");
        out.push_str("}\n\n");

        for method in item
            .shape
            .methods
            .iter()
            .filter_map(|signature| Self::method_stub(signature, &implementation, level))
        {
            out.push_str(&method);
            out.push('\n');
        }

        Some(out)
    }
}

/// Interface stub generation persisting through `writer`
pub fn interface_code_generator<'a>(writer: impl FileWriter + 'a) -> GenericCodeGenerator<'a, InterfaceDecl> {
    GenericCodeGenerator::new(InterfaceNoOpGenerator, InterfaceImplementationNamer, writer)
}
