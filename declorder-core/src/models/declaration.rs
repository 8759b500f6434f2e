//! Declaration records.
//!
//! One generic record carries the attributes every kind shares; the
//! kind-specific text lives in a shape type. Shapes hold already-rendered
//! strings so nothing downstream needs a syntax tree.

use super::kind::DeclarationKind;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Kind-specific textual shape of a declaration
pub trait Shape {
    /// Kind this shape belongs to
    const KIND: DeclarationKind;

    /// Text fragments scanned for dependencies
    fn type_fragments(&self) -> Vec<&str>;

    /// Key identifying the declaration in the dependency graph
    fn graph_key<'a>(&'a self, name: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(name)
    }
}

/// Records that carry an ordering level
pub trait Leveled {
    fn level(&self) -> usize;
    fn set_level(&mut self, level: usize);
}

/// A declaration of one kind, generic over its shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration<S> {
    /// Declared name (the alias for imports, possibly empty)
    #[serde(default)]
    pub name: String,
    /// Owning package
    #[serde(default)]
    pub package: String,
    /// Human-readable source location
    #[serde(default)]
    pub position: String,
    /// Position in the dependency order, assigned by a resolver
    #[serde(default)]
    pub level: usize,
    #[serde(flatten)]
    pub shape: S,
}

impl<S: Shape> Declaration<S> {
    pub fn new(name: impl Into<String>, shape: S) -> Self {
        Self {
            name: name.into(),
            package: String::new(),
            position: String::new(),
            level: 0,
            shape,
        }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = position.into();
        self
    }

    pub fn kind(&self) -> DeclarationKind {
        S::KIND
    }

    /// Graph key: the name for most kinds, `Receiver.Name` for methods and
    /// the path for imports
    pub fn key(&self) -> Cow<'_, str> {
        self.shape.graph_key(&self.name)
    }
}

impl<S> Leveled for Declaration<S> {
    fn level(&self) -> usize {
        self.level
    }

    fn set_level(&mut self, level: usize) {
        self.level = level;
    }
}

/// Struct body: one "name type" entry per field, or just the type when embedded
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructShape {
    #[serde(default)]
    pub fields: Vec<String>,
}

impl Shape for StructShape {
    const KIND: DeclarationKind = DeclarationKind::Struct;

    fn type_fragments(&self) -> Vec<&str> {
        self.fields.iter().map(String::as_str).collect()
    }
}

/// Interface body: raw method signatures `Name(params) returns`, or an
/// embedded type name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceShape {
    #[serde(default)]
    pub methods: Vec<String>,
}

impl Shape for InterfaceShape {
    const KIND: DeclarationKind = DeclarationKind::Interface;

    fn type_fragments(&self) -> Vec<&str> {
        self.methods.iter().map(String::as_str).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionShape {
    /// Receiver type for methods, e.g. `*Server`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default)]
    pub returns: Vec<String>,
}

impl Shape for FunctionShape {
    const KIND: DeclarationKind = DeclarationKind::Function;

    fn type_fragments(&self) -> Vec<&str> {
        self.receiver
            .iter()
            .chain(&self.parameters)
            .chain(&self.returns)
            .map(String::as_str)
            .collect()
    }

    fn graph_key<'a>(&'a self, name: &'a str) -> Cow<'a, str> {
        match self.receiver.as_deref() {
            Some(receiver) if !receiver.is_empty() && !name.is_empty() => {
                Cow::Owned(format!("{receiver}.{name}"))
            }
            _ => Cow::Borrowed(name),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableShape {
    /// Declared type, `inferred` when only an initializer is present
    #[serde(default, rename = "type")]
    pub type_name: String,
}

impl Shape for VariableShape {
    const KIND: DeclarationKind = DeclarationKind::Variable;

    fn type_fragments(&self) -> Vec<&str> {
        vec![self.type_name.as_str()]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantShape {
    #[serde(default, rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub value: String,
}

impl Shape for ConstantShape {
    const KIND: DeclarationKind = DeclarationKind::Constant;

    fn type_fragments(&self) -> Vec<&str> {
        vec![self.type_name.as_str()]
    }
}

/// Import path, quotes included as written
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportShape {
    #[serde(default)]
    pub path: String,
}

impl Shape for ImportShape {
    const KIND: DeclarationKind = DeclarationKind::Import;

    fn type_fragments(&self) -> Vec<&str> {
        Vec::new()
    }

    fn graph_key<'a>(&'a self, _name: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(&self.path)
    }
}

pub type StructDecl = Declaration<StructShape>;
pub type InterfaceDecl = Declaration<InterfaceShape>;
pub type FunctionDecl = Declaration<FunctionShape>;
pub type VariableDecl = Declaration<VariableShape>;
pub type ConstantDecl = Declaration<ConstantShape>;
pub type ImportDecl = Declaration<ImportShape>;
