//! Dependency extractors
//!
//! Dependencies are recovered lexically from the rendered text of a
//! declaration's shape. Nothing is resolved against a type system, so
//! extraction never fails: unexpected text at worst yields fewer names.

pub mod type_deps;

pub use type_deps::{extract_type_dependencies, is_builtin_type, is_valid_identifier};

use crate::models::{Declaration, Shape};
use std::collections::BTreeSet;

/// Returns the names an item textually references
pub trait DependencyExtractor<T> {
    fn extract_dependencies(&self, item: &T) -> BTreeSet<String>;
}

/// Extractor shared by every declaration kind.
///
/// Scans each of the shape's type fragments and drops a reference to the
/// declaration's own name, so a self-referencing struct does not depend on
/// itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeDependencyExtractor;

impl<S: Shape> DependencyExtractor<Declaration<S>> for ShapeDependencyExtractor {
    fn extract_dependencies(&self, item: &Declaration<S>) -> BTreeSet<String> {
        let mut deps: BTreeSet<String> = item
            .shape
            .type_fragments()
            .into_iter()
            .flat_map(extract_type_dependencies)
            .collect();
        deps.remove(&item.name);
        deps
    }
}
