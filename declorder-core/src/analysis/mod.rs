//! declorder analysis pipeline
//!
//! Every declaration kind runs through the same orchestration. What differs
//! per kind is plugged in through one small trait per responsibility:
//! mapping a syntax unit to a record, validating it, naming it, sorting,
//! rendering and generating code.

use crate::models::{Declaration, ManifestEntry, Shape};
use crate::models::{
    ConstantDecl, FunctionDecl, ImportDecl, InterfaceDecl, StructDecl, VariableDecl,
};
use crate::Result;
use std::borrow::Cow;
use std::path::Path;

pub mod pipeline;
pub mod render;
pub mod session;

pub use pipeline::{
    declaration_engine, AnalysisEngine, DependencySorter, GeneratedStub, GenericCodeGenerator,
    GenericFormatter, GenericVisitor, GENERATED_HEADER,
};
pub use render::{
    ConstantRenderer, FunctionRenderer, ImportRenderer, InterfaceRenderer, LevelListFormatter,
    StructRenderer, VariableRenderer,
};
pub use session::{KindVisitors, UnitSession};

/// Maps one syntax unit to a record, or `None` when the unit is not of
/// this visitor's kind
pub trait NodeVisitor<N, T> {
    fn visit_node(&self, node: &N) -> Option<T>;
}

impl<N, T, V> NodeVisitor<N, T> for Box<V>
where
    V: NodeVisitor<N, T> + ?Sized,
{
    fn visit_node(&self, node: &N) -> Option<T> {
        (**self).visit_node(node)
    }
}

/// Accumulates accepted records in arrival order
pub trait ResultCollector<T> {
    fn add_result(&mut self, item: T);
    fn results(&self) -> &[T];
}

pub trait ItemValidator<T> {
    fn is_valid(&self, item: &T) -> bool;
}

/// Key identifying an item in the dependency graph
pub trait TypeNameProvider<T> {
    fn type_name<'a>(&self, item: &'a T) -> Cow<'a, str>;
}

/// Human-readable rendering of one record; empty for invalid records
pub trait ItemRenderer<T> {
    fn render_item(&self, item: &T) -> String;
}

/// A rendered item plus any generated code that belongs under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedItem {
    pub text: String,
    pub attachment: Option<String>,
}

/// Joins rendered items into a report section
pub trait OutputFormatter {
    fn format_output(&self, items: &[RenderedItem]) -> String;
}

pub trait ItemSorter<T> {
    fn sort_items(&self, items: Vec<T>) -> Vec<T>;
}

/// Produces source text for one record, `None` when nothing is generated
pub trait CodeGenerator<T> {
    fn generate_code(&self, item: &T) -> Option<String>;
}

pub trait ImplementationNamer<T> {
    fn implementation_name(&self, item: &T) -> String;
}

/// Stores named textual content
pub trait FileWriter {
    fn write_to_file(&self, content: &str, path: &Path) -> Result<()>;
}

/// Names a declaration by its graph key
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyNameProvider;

impl<S: Shape> TypeNameProvider<Declaration<S>> for KeyNameProvider {
    fn type_name<'a>(&self, item: &'a Declaration<S>) -> Cow<'a, str> {
        item.key()
    }
}

/// Accepts declarations with a non-empty graph key
#[derive(Debug, Clone, Copy, Default)]
pub struct NonEmptyKeyValidator;

impl<S: Shape> ItemValidator<Declaration<S>> for NonEmptyKeyValidator {
    fn is_valid(&self, item: &Declaration<S>) -> bool {
        !item.key().is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct VecCollector<T> {
    results: Vec<T>,
}

impl<T> Default for VecCollector<T> {
    fn default() -> Self {
        Self { results: Vec::new() }
    }
}

impl<T> ResultCollector<T> for VecCollector<T> {
    fn add_result(&mut self, item: T) {
        self.results.push(item);
    }

    fn results(&self) -> &[T] {
        &self.results
    }
}

/// Visitor for records that arrive already extracted, e.g. from a manifest
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughVisitor;

macro_rules! passthrough {
    ($variant:ident, $decl:ty) => {
        impl NodeVisitor<ManifestEntry, $decl> for PassthroughVisitor {
            fn visit_node(&self, node: &ManifestEntry) -> Option<$decl> {
                match node {
                    ManifestEntry::$variant(decl) => Some(decl.clone()),
                    _ => None,
                }
            }
        }
    };
}

passthrough!(Struct, StructDecl);
passthrough!(Interface, InterfaceDecl);
passthrough!(Function, FunctionDecl);
passthrough!(Variable, VariableDecl);
passthrough!(Constant, ConstantDecl);
passthrough!(Import, ImportDecl);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ImportShape, StructShape};

    #[test]
    fn test_key_validator() {
        let import = ImportDecl::new("alias", ImportShape::default());
        assert!(!NonEmptyKeyValidator.is_valid(&import));

        let unnamed = StructDecl::new("", StructShape::default());
        assert!(!NonEmptyKeyValidator.is_valid(&unnamed));
        assert!(NonEmptyKeyValidator.is_valid(&StructDecl::new("User", StructShape::default())));
    }

    #[test]
    fn test_passthrough_matches_kind() {
        let entry = ManifestEntry::Struct(StructDecl::new("User", StructShape::default()));

        let as_struct: Option<StructDecl> = PassthroughVisitor.visit_node(&entry);
        let as_import: Option<ImportDecl> = PassthroughVisitor.visit_node(&entry);

        assert_eq!(as_struct.map(|d| d.name), Some("User".to_string()));
        assert!(as_import.is_none());
    }

    #[test]
    fn test_collector_keeps_arrival_order() {
        let mut collector = VecCollector::default();
        collector.add_result(2);
        collector.add_result(1);
        assert_eq!(collector.results(), &[2, 1]);
    }
}
