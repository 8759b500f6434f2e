//! Go source units parsed with tree-sitter

use crate::analysis::{KindVisitors, NodeVisitor, UnitSession};
use crate::models::{
    ConstantDecl, ConstantShape, DeclarationKind, FunctionDecl, FunctionShape, ImportDecl,
    ImportShape, InterfaceDecl, InterfaceShape, StructDecl, StructShape, VariableDecl,
    VariableShape,
};
use crate::{Error, Result};
use declorder_utils::normalize_whitespace;
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser, Tree};

/// One parsed Go file
pub struct GoSourceUnit {
    path: PathBuf,
    source: String,
    tree: Tree,
    package: String,
}

impl std::fmt::Debug for GoSourceUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoSourceUnit")
            .field("path", &self.path)
            .field("package", &self.package)
            .finish_non_exhaustive()
    }
}

fn top_level_kinds(kind: DeclarationKind) -> &'static [&'static str] {
    match kind {
        DeclarationKind::Struct | DeclarationKind::Interface => &["type_declaration"],
        DeclarationKind::Function => &["function_declaration", "method_declaration"],
        DeclarationKind::Variable => &["var_declaration"],
        DeclarationKind::Constant => &["const_declaration"],
        DeclarationKind::Import => &["import_declaration"],
    }
}

fn push_descendants<'t>(node: Node<'t>, out: &mut Vec<Node<'t>>) {
    out.push(node);
    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.named_children(&mut cursor).collect();
    for child in children {
        push_descendants(child, out);
    }
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().filter(|c| c.has_error()).find_map(first_error)
}

impl GoSourceUnit {
    /// Parse `source`, reported under `path`
    pub fn parse(path: impl Into<PathBuf>, source: String) -> Result<Self> {
        let path = path.into();
        let mut parser = Parser::new();
        parser
            .set_language(tree_sitter_go::language())
            .map_err(|e| Error::Parse {
                path: path.display().to_string(),
                message: format!("failed to load Go grammar: {e}"),
            })?;

        let tree = parser.parse(&source, None).ok_or_else(|| Error::Parse {
            path: path.display().to_string(),
            message: "parser produced no tree".to_string(),
        })?;

        let root = tree.root_node();
        if root.has_error() {
            let location = first_error(root).map_or_else(
                || "unknown location".to_string(),
                |node| {
                    let point = node.start_position();
                    format!("{}:{}", point.row + 1, point.column + 1)
                },
            );
            return Err(Error::Parse {
                path: path.display().to_string(),
                message: format!("syntax error at {location}"),
            });
        }

        let package = {
            let mut cursor = root.walk();
            let clause = root
                .named_children(&mut cursor)
                .find(|child| child.kind() == "package_clause");
            clause
                .and_then(|clause| {
                    let mut cursor = clause.walk();
                    let name = clause
                        .named_children(&mut cursor)
                        .find(|child| child.kind() == "package_identifier");
                    name
                })
                .and_then(|name| name.utf8_text(source.as_bytes()).ok())
                .map(str::to_string)
        };
        let package = package.ok_or_else(|| Error::Parse {
            path: path.display().to_string(),
            message: "missing package clause".to_string(),
        })?;

        Ok(Self { path, source, tree, package })
    }

    /// Read and parse a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = declorder_utils::read_text_file(path)?;
        Self::parse(path, source)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Every node under the top-level declarations relevant to `kind`, in
    /// source order
    pub fn syntax_units(&self, kind: DeclarationKind) -> Vec<Node<'_>> {
        let wanted = top_level_kinds(kind);
        let root = self.tree.root_node();
        let mut cursor = root.walk();
        let mut units = Vec::new();
        for declaration in root
            .named_children(&mut cursor)
            .filter(|node| wanted.contains(&node.kind()))
        {
            push_descendants(declaration, &mut units);
        }
        units
    }

    pub fn kind_visitors(&self) -> KindVisitors<'_, Node<'_>> {
        KindVisitors::uniform(GoNodeVisitor { unit: self })
    }

    /// Feed every active kind of `session` from this unit
    pub fn feed<'s, 'a>(&'s self, session: &mut UnitSession<'a, Node<'s>>)
    where
        's: 'a,
    {
        for kind in DeclarationKind::ALL {
            if session.is_active(kind) {
                session.feed_all(kind, &self.syntax_units(kind));
            }
        }
    }

    fn text(&self, node: Node<'_>) -> String {
        node.utf8_text(self.source.as_bytes())
            .map(normalize_whitespace)
            .unwrap_or_default()
    }

    fn position(&self, node: Node<'_>) -> String {
        let point = node.start_position();
        format!("{}:{}:{}", self.path.display(), point.row + 1, point.column + 1)
    }

    fn field_text(&self, node: Node<'_>, field: &str) -> Option<String> {
        node.child_by_field_name(field).map(|child| self.text(child))
    }

    /// Parameter entries as `name type`, one per name, or the bare type
    fn parameter_entries(&self, list: Node<'_>) -> Vec<String> {
        let mut entries = Vec::new();
        let mut cursor = list.walk();
        for param in list.named_children(&mut cursor) {
            let type_text = match param.kind() {
                "parameter_declaration" => self.field_text(param, "type").unwrap_or_default(),
                "variadic_parameter_declaration" => {
                    format!("...{}", self.field_text(param, "type").unwrap_or_default())
                }
                _ => continue,
            };
            let mut name_cursor = param.walk();
            let names: Vec<String> = param
                .children_by_field_name("name", &mut name_cursor)
                .map(|name| self.text(name))
                .collect();
            if names.is_empty() {
                entries.push(type_text);
            } else {
                entries.extend(names.into_iter().map(|name| format!("{name} {type_text}")));
            }
        }
        entries
    }

    /// Parameter types only, repeated once per declared name
    fn parameter_types(&self, list: Node<'_>) -> Vec<String> {
        let mut types = Vec::new();
        let mut cursor = list.walk();
        for param in list.named_children(&mut cursor) {
            let type_text = match param.kind() {
                "parameter_declaration" => self.field_text(param, "type").unwrap_or_default(),
                "variadic_parameter_declaration" => {
                    format!("...{}", self.field_text(param, "type").unwrap_or_default())
                }
                _ => continue,
            };
            let mut name_cursor = param.walk();
            let count = param.children_by_field_name("name", &mut name_cursor).count().max(1);
            types.extend(std::iter::repeat(type_text).take(count));
        }
        types
    }

    /// `Name(T1, T2) R` or `Name(T) (R1, R2)`
    fn method_signature(&self, method: Node<'_>) -> Option<String> {
        let name = self.field_text(method, "name")?;
        let params = method
            .child_by_field_name("parameters")
            .map(|list| self.parameter_types(list))
            .unwrap_or_default();

        let results = match method.child_by_field_name("result") {
            Some(result) if result.kind() == "parameter_list" => self.parameter_types(result),
            Some(result) => vec![self.text(result)],
            None => Vec::new(),
        };
        let results = match results.as_slice() {
            [] => String::new(),
            [single] => format!(" {single}"),
            many => format!(" ({})", many.join(", ")),
        };

        Some(format!("{name}({}){results}", params.join(", ")))
    }

    fn interface_members(&self, body: Node<'_>, members: &mut Vec<String>) {
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            match member.kind() {
                "method_spec" | "method_elem" => members.extend(self.method_signature(member)),
                "method_spec_list" => self.interface_members(member, members),
                "comment" => {}
                _ => members.push(self.text(member)),
            }
        }
    }

    fn struct_fields(&self, body: Node<'_>) -> Vec<String> {
        let mut fields = Vec::new();
        let mut cursor = body.walk();
        let Some(list) = body
            .named_children(&mut cursor)
            .find(|child| child.kind() == "field_declaration_list")
        else {
            return fields;
        };

        let mut list_cursor = list.walk();
        for field in list
            .named_children(&mut list_cursor)
            .filter(|child| child.kind() == "field_declaration")
        {
            let mut type_text = self.field_text(field, "type").unwrap_or_default();
            let mut name_cursor = field.walk();
            let names: Vec<String> = field
                .children_by_field_name("name", &mut name_cursor)
                .map(|name| self.text(name))
                .collect();

            if names.is_empty() {
                let mut child_cursor = field.walk();
                let embedded_pointer = field.children(&mut child_cursor).any(|c| c.kind() == "*");
                if embedded_pointer {
                    type_text.insert(0, '*');
                }
                fields.push(type_text);
            } else {
                fields.extend(names.into_iter().map(|name| format!("{name} {type_text}")));
            }
        }
        fields
    }

    fn type_spec_body<'t>(node: Node<'t>, body_kind: &str) -> Option<Node<'t>> {
        if node.kind() != "type_spec" {
            return None;
        }
        node.child_by_field_name("type").filter(|body| body.kind() == body_kind)
    }
}

/// Maps tree-sitter nodes of one unit to declaration records
#[derive(Debug, Clone, Copy)]
pub struct GoNodeVisitor<'u> {
    unit: &'u GoSourceUnit,
}

impl<'u> NodeVisitor<Node<'u>, StructDecl> for GoNodeVisitor<'u> {
    fn visit_node(&self, node: &Node<'u>) -> Option<StructDecl> {
        let body = GoSourceUnit::type_spec_body(*node, "struct_type")?;
        let unit = self.unit;
        Some(
            StructDecl::new(
                unit.field_text(*node, "name")?,
                StructShape { fields: unit.struct_fields(body) },
            )
            .with_package(&unit.package)
            .with_position(unit.position(*node)),
        )
    }
}

impl<'u> NodeVisitor<Node<'u>, InterfaceDecl> for GoNodeVisitor<'u> {
    fn visit_node(&self, node: &Node<'u>) -> Option<InterfaceDecl> {
        let body = GoSourceUnit::type_spec_body(*node, "interface_type")?;
        let unit = self.unit;
        let mut methods = Vec::new();
        unit.interface_members(body, &mut methods);
        Some(
            InterfaceDecl::new(unit.field_text(*node, "name")?, InterfaceShape { methods })
                .with_package(&unit.package)
                .with_position(unit.position(*node)),
        )
    }
}

impl<'u> NodeVisitor<Node<'u>, FunctionDecl> for GoNodeVisitor<'u> {
    fn visit_node(&self, node: &Node<'u>) -> Option<FunctionDecl> {
        if !matches!(node.kind(), "function_declaration" | "method_declaration") {
            return None;
        }
        let unit = self.unit;

        let receiver = node.child_by_field_name("receiver").and_then(|list| {
            let mut cursor = list.walk();
            let first = list
                .named_children(&mut cursor)
                .find(|param| param.kind() == "parameter_declaration");
            first.and_then(|param| unit.field_text(param, "type"))
        });
        let parameters = node
            .child_by_field_name("parameters")
            .map(|list| unit.parameter_entries(list))
            .unwrap_or_default();
        let returns = match node.child_by_field_name("result") {
            Some(result) if result.kind() == "parameter_list" => unit.parameter_entries(result),
            Some(result) => vec![unit.text(result)],
            None => Vec::new(),
        };

        Some(
            FunctionDecl::new(
                unit.field_text(*node, "name")?,
                FunctionShape { receiver, parameters, returns },
            )
            .with_package(&unit.package)
            .with_position(unit.position(*node)),
        )
    }
}

impl<'u> NodeVisitor<Node<'u>, VariableDecl> for GoNodeVisitor<'u> {
    fn visit_node(&self, node: &Node<'u>) -> Option<VariableDecl> {
        if node.kind() != "var_spec" {
            return None;
        }
        let unit = self.unit;
        let name = node.child_by_field_name("name")?;
        let type_name = match unit.field_text(*node, "type") {
            Some(type_text) => type_text,
            None if node.child_by_field_name("value").is_some() => "inferred".to_string(),
            None => String::new(),
        };

        Some(
            VariableDecl::new(unit.text(name), VariableShape { type_name })
                .with_package(&unit.package)
                .with_position(unit.position(name)),
        )
    }
}

impl<'u> NodeVisitor<Node<'u>, ConstantDecl> for GoNodeVisitor<'u> {
    fn visit_node(&self, node: &Node<'u>) -> Option<ConstantDecl> {
        if node.kind() != "const_spec" {
            return None;
        }
        let unit = self.unit;
        let name = node.child_by_field_name("name")?;
        let value = node
            .child_by_field_name("value")
            .and_then(|list| {
                let mut cursor = list.walk();
                let first = list.named_children(&mut cursor).next();
                first
            })
            .map(|expr| unit.text(expr))
            .unwrap_or_default();

        Some(
            ConstantDecl::new(
                unit.text(name),
                ConstantShape {
                    type_name: unit.field_text(*node, "type").unwrap_or_default(),
                    value,
                },
            )
            .with_package(&unit.package)
            .with_position(unit.position(name)),
        )
    }
}

impl<'u> NodeVisitor<Node<'u>, ImportDecl> for GoNodeVisitor<'u> {
    fn visit_node(&self, node: &Node<'u>) -> Option<ImportDecl> {
        if node.kind() != "import_spec" {
            return None;
        }
        let unit = self.unit;
        Some(
            ImportDecl::new(
                unit.field_text(*node, "name").unwrap_or_default(),
                ImportShape {
                    path: unit.field_text(*node, "path").unwrap_or_default(),
                },
            )
            .with_package(&unit.package)
            .with_position(unit.position(*node)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"package shop

import (
	"fmt"
	str "strings"
)

type Item struct {
	Name  string
	Price float64
}

type Cart struct {
	*Owner
	Items []Item
	a, b  int
}

type Store interface {
	Find(id int, tags ...string) (*Item, error)
	Count() int
	fmt.Stringer
}

var defaultCart = Cart{}

const MaxItems int = 10

func (c *Cart) Add(item Item) error {
	return nil
}

func Total(items []Item) (sum float64) {
	return 0
}
"#;

    fn unit() -> GoSourceUnit {
        GoSourceUnit::parse("shop.go", SOURCE.to_string()).unwrap()
    }

    fn visit<T>(unit: &GoSourceUnit, kind: DeclarationKind) -> Vec<T>
    where
        for<'u> GoNodeVisitor<'u>: NodeVisitor<Node<'u>, T>,
    {
        let visitor = GoNodeVisitor { unit };
        unit.syntax_units(kind)
            .iter()
            .filter_map(|node| visitor.visit_node(node))
            .collect()
    }

    #[test]
    fn test_package_and_positions() {
        let unit = unit();
        assert_eq!(unit.package(), "shop");

        let structs: Vec<StructDecl> = visit(&unit, DeclarationKind::Struct);
        assert_eq!(structs[0].position, "shop.go:8:6");
        assert_eq!(structs[0].package, "shop");
    }

    #[test]
    fn test_struct_fields() {
        let structs: Vec<StructDecl> = visit(&unit(), DeclarationKind::Struct);

        assert_eq!(structs.len(), 2);
        assert_eq!(structs[0].shape.fields, vec!["Name string", "Price float64"]);
        assert_eq!(structs[1].shape.fields, vec!["*Owner", "Items []Item", "a int", "b int"]);
    }

    #[test]
    fn test_interface_signatures() {
        let interfaces: Vec<InterfaceDecl> = visit(&unit(), DeclarationKind::Interface);

        assert_eq!(interfaces.len(), 1);
        assert_eq!(
            interfaces[0].shape.methods,
            vec!["Find(int, ...string) (*Item, error)", "Count() int", "fmt.Stringer"]
        );
    }

    #[test]
    fn test_functions_and_methods() {
        let functions: Vec<FunctionDecl> = visit(&unit(), DeclarationKind::Function);

        assert_eq!(functions.len(), 2);
        assert_eq!(functions[0].shape.receiver.as_deref(), Some("*Cart"));
        assert_eq!(functions[0].shape.parameters, vec!["item Item"]);
        assert_eq!(functions[0].shape.returns, vec!["error"]);
        assert_eq!(functions[0].key(), "*Cart.Add");
        assert_eq!(functions[1].shape.returns, vec!["sum float64"]);
        assert_eq!(functions[1].position, "shop.go:33:1");
    }

    #[test]
    fn test_values_and_imports() {
        let unit = unit();
        let vars: Vec<VariableDecl> = visit(&unit, DeclarationKind::Variable);
        let consts: Vec<ConstantDecl> = visit(&unit, DeclarationKind::Constant);
        let imports: Vec<ImportDecl> = visit(&unit, DeclarationKind::Import);

        assert_eq!(vars[0].name, "defaultCart");
        assert_eq!(vars[0].shape.type_name, "inferred");
        assert_eq!(consts[0].shape.type_name, "int");
        assert_eq!(consts[0].shape.value, "10");
        assert_eq!(imports.len(), 2);
        assert_eq!(imports[0].shape.path, "\"fmt\"");
        assert_eq!(imports[1].name, "str");
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let result = GoSourceUnit::parse("bad.go", "package bad\n\nfunc {".to_string());
        assert!(matches!(result, Err(Error::Parse { .. })));
    }
}
