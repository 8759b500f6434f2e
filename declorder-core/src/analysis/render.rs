//! Report rendering

use super::{ItemRenderer, OutputFormatter, RenderedItem};
use crate::models::{
    ConstantDecl, FunctionDecl, ImportDecl, InterfaceDecl, StructDecl, VariableDecl,
};

fn push_level(out: &mut String, level: usize) {
    if level > 0 {
        out.push_str(&format!("\n  Level: {level}"));
    }
}

fn push_list(out: &mut String, label: &str, items: &[String]) {
    if !items.is_empty() {
        out.push_str(&format!("\n  {label}: {}", items.join(", ")));
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StructRenderer;

impl ItemRenderer<StructDecl> for StructRenderer {
    fn render_item(&self, item: &StructDecl) -> String {
        if item.name.is_empty() {
            return String::new();
        }
        let mut out = format!("Struct: {} (Package: {}) at {}", item.name, item.package, item.position);
        push_list(&mut out, "Fields", &item.shape.fields);
        push_level(&mut out, item.level);
        out
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InterfaceRenderer;

impl ItemRenderer<InterfaceDecl> for InterfaceRenderer {
    fn render_item(&self, item: &InterfaceDecl) -> String {
        if item.name.is_empty() {
            return String::new();
        }
        let mut out = format!("Interface: {} (Package: {}) at {}", item.name, item.package, item.position);
        push_list(&mut out, "Methods", &item.shape.methods);
        push_level(&mut out, item.level);
        out
    }
}

/// Renders plain functions and methods; methods show their receiver
#[derive(Debug, Clone, Copy, Default)]
pub struct FunctionRenderer;

impl ItemRenderer<FunctionDecl> for FunctionRenderer {
    fn render_item(&self, item: &FunctionDecl) -> String {
        if item.name.is_empty() {
            return String::new();
        }
        let mut out = match item.shape.receiver.as_deref().filter(|r| !r.is_empty()) {
            Some(receiver) => format!(
                "Method: {} (Receiver: {}, Package: {}) at {}",
                item.name, receiver, item.package, item.position
            ),
            None => format!("Function: {} (Package: {}) at {}", item.name, item.package, item.position),
        };
        push_list(&mut out, "Parameters", &item.shape.parameters);
        push_list(&mut out, "Returns", &item.shape.returns);
        push_level(&mut out, item.level);
        out
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VariableRenderer;

impl ItemRenderer<VariableDecl> for VariableRenderer {
    fn render_item(&self, item: &VariableDecl) -> String {
        if item.name.is_empty() {
            return String::new();
        }
        let mut out = format!(
            "Variable: {} {} (Package: {}) at {}",
            item.name, item.shape.type_name, item.package, item.position
        );
        push_level(&mut out, item.level);
        out
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantRenderer;

impl ItemRenderer<ConstantDecl> for ConstantRenderer {
    fn render_item(&self, item: &ConstantDecl) -> String {
        if item.name.is_empty() {
            return String::new();
        }
        let mut out = format!("Constant: {}", item.name);
        if !item.shape.type_name.is_empty() {
            out.push(' ');
            out.push_str(&item.shape.type_name);
        }
        if !item.shape.value.is_empty() {
            out.push_str(" = ");
            out.push_str(&item.shape.value);
        }
        out.push_str(&format!(" (Package: {}) at {}", item.package, item.position));
        push_level(&mut out, item.level);
        out
    }
}

/// Imports are keyed by path; a dot import hides its alias
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportRenderer;

impl ItemRenderer<ImportDecl> for ImportRenderer {
    fn render_item(&self, item: &ImportDecl) -> String {
        if item.shape.path.is_empty() {
            return String::new();
        }
        let mut out = format!("Import: {}", item.shape.path);
        if !item.name.is_empty() && item.name != "." {
            out.push_str(" as ");
            out.push_str(&item.name);
        }
        out.push_str(&format!(" at {}", item.position));
        push_level(&mut out, item.level);
        out
    }
}

/// One `[Level i]` entry per rendered item, followed by its generated code
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelListFormatter;

impl OutputFormatter for LevelListFormatter {
    fn format_output(&self, items: &[RenderedItem]) -> String {
        let mut out = String::new();
        for (level, item) in items.iter().enumerate() {
            if item.text.is_empty() {
                continue;
            }
            out.push_str(&format!("[Level {level}] {}\n", item.text));
            if let Some(code) = &item.attachment {
                out.push_str(&format!("\n--- NoOp Implementation ---\n{code}\n"));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ConstantShape, FunctionShape, ImportShape, InterfaceShape, StructShape, VariableShape,
    };

    #[test]
    fn test_struct_rendering() {
        let mut user = StructDecl::new(
            "User",
            StructShape {
                fields: vec!["ID int".to_string(), "Profile *Profile".to_string()],
            },
        )
        .with_package("models")
        .with_position("user.go:3:6");

        assert_eq!(
            StructRenderer.render_item(&user),
            "Struct: User (Package: models) at user.go:3:6\n  Fields: ID int, Profile *Profile"
        );

        user.level = 2;
        assert!(StructRenderer.render_item(&user).ends_with("\n  Level: 2"));
    }

    #[test]
    fn test_interface_without_methods() {
        let empty = InterfaceDecl::new("Marker", InterfaceShape::default()).with_package("p");
        assert_eq!(InterfaceRenderer.render_item(&empty), "Interface: Marker (Package: p) at ");
    }

    #[test]
    fn test_method_rendering() {
        let method = FunctionDecl::new(
            "Serve",
            FunctionShape {
                receiver: Some("*Server".to_string()),
                parameters: vec!["addr string".to_string()],
                returns: vec!["error".to_string()],
            },
        )
        .with_package("http")
        .with_position("server.go:10:1");

        assert_eq!(
            FunctionRenderer.render_item(&method),
            "Method: Serve (Receiver: *Server, Package: http) at server.go:10:1\n  Parameters: addr string\n  Returns: error"
        );

        let function = FunctionDecl::new("main", FunctionShape::default()).with_package("main");
        assert_eq!(FunctionRenderer.render_item(&function), "Function: main (Package: main) at ");
    }

    #[test]
    fn test_variable_and_constant_rendering() {
        let var = VariableDecl::new("cfg", VariableShape { type_name: "inferred".to_string() })
            .with_package("main")
            .with_position("main.go:5:5");
        assert_eq!(VariableRenderer.render_item(&var), "Variable: cfg inferred (Package: main) at main.go:5:5");

        let typed = ConstantDecl::new(
            "Port",
            ConstantShape {
                type_name: "int".to_string(),
                value: "8080".to_string(),
            },
        )
        .with_package("main");
        assert_eq!(ConstantRenderer.render_item(&typed), "Constant: Port int = 8080 (Package: main) at ");

        let untyped = ConstantDecl::new("Name", ConstantShape::default()).with_package("main");
        assert_eq!(ConstantRenderer.render_item(&untyped), "Constant: Name (Package: main) at ");
    }

    #[test]
    fn test_import_rendering() {
        let aliased = ImportDecl::new("str", ImportShape { path: "\"strings\"".to_string() })
            .with_position("a.go:3:2");
        assert_eq!(ImportRenderer.render_item(&aliased), "Import: \"strings\" as str at a.go:3:2");

        let dot = ImportDecl::new(".", ImportShape { path: "\"fmt\"".to_string() });
        assert_eq!(ImportRenderer.render_item(&dot), "Import: \"fmt\" at ");

        let invalid = ImportDecl::new("x", ImportShape::default());
        assert!(ImportRenderer.render_item(&invalid).is_empty());
    }

    #[test]
    fn test_level_list_skips_empty_but_keeps_index() {
        let items = vec![
            RenderedItem { text: "first".to_string(), attachment: None },
            RenderedItem { text: String::new(), attachment: None },
            RenderedItem { text: "third".to_string(), attachment: Some("code\n".to_string()) },
        ];

        assert_eq!(
            LevelListFormatter.format_output(&items),
            "[Level 0] first\n[Level 2] third\n\n--- NoOp Implementation ---\ncode\n\n"
        );
    }
}
