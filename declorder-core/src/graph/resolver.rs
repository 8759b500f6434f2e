//! Dependency resolvers.
//!
//! A resolver takes every collected item of one kind and returns them in
//! output order with levels assigned. Items whose key is empty never reach
//! the output.

use super::DependencyGraph;
use crate::analysis::TypeNameProvider;
use crate::extractors::DependencyExtractor;
use crate::models::Leveled;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Orders a collection of items
pub trait DependencyResolver<T> {
    fn resolve_dependencies(&self, items: Vec<T>) -> Vec<T>;
}

fn assign_levels<T: Leveled>(items: &mut [T]) {
    for (level, item) in items.iter_mut().enumerate() {
        item.set_level(level);
    }
}

/// Kahn's algorithm over the extracted dependencies.
///
/// When two items share a key the later one wins. Dependencies on keys that
/// are not in the collection are ignored. Items that never become ready
/// because of a cycle are appended after the ordered ones, in input order.
#[derive(Debug, Clone, Default)]
pub struct TopologicalResolver<E, P> {
    extractor: E,
    names: P,
}

impl<E, P> TopologicalResolver<E, P> {
    pub fn new(extractor: E, names: P) -> Self {
        Self { extractor, names }
    }
}

impl<T, E, P> DependencyResolver<T> for TopologicalResolver<E, P>
where
    T: Leveled,
    E: DependencyExtractor<T>,
    P: TypeNameProvider<T>,
{
    fn resolve_dependencies(&self, items: Vec<T>) -> Vec<T> {
        let keys: Vec<String> = items
            .iter()
            .map(|item| self.names.type_name(item).into_owned())
            .collect();

        let mut by_key: HashMap<&str, usize> = HashMap::new();
        for (index, key) in keys.iter().enumerate() {
            if !key.is_empty() {
                by_key.insert(key.as_str(), index);
            }
        }

        let mut graph = DependencyGraph::new();
        for key in by_key.keys() {
            graph.add_node(key);
        }
        for (key, &index) in &by_key {
            for dependency in self.extractor.extract_dependencies(&items[index]) {
                graph.add_dependency(&dependency, key);
            }
        }
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built dependency graph"
        );

        let order = graph.topological_order();
        let emitted: HashSet<&str> = order.iter().map(String::as_str).collect();

        let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
        let mut result = Vec::with_capacity(slots.len());

        for key in &order {
            if let Some(item) = by_key.get(key.as_str()).and_then(|&index| slots[index].take()) {
                result.push(item);
            }
        }

        let ordered = result.len();
        for (index, key) in keys.iter().enumerate() {
            if key.is_empty() || emitted.contains(key.as_str()) {
                continue;
            }
            if let Some(item) = slots[index].take() {
                result.push(item);
            }
        }
        if result.len() > ordered {
            debug!(unresolved = result.len() - ordered, "appending items left over by cycles");
        }

        assign_levels(&mut result);
        result
    }
}

/// Orders items by key alone, ignoring dependencies
#[derive(Debug, Clone, Default)]
pub struct AlphabeticalResolver<P> {
    names: P,
}

impl<P> AlphabeticalResolver<P> {
    pub fn new(names: P) -> Self {
        Self { names }
    }
}

impl<T, P> DependencyResolver<T> for AlphabeticalResolver<P>
where
    T: Leveled,
    P: TypeNameProvider<T>,
{
    fn resolve_dependencies(&self, items: Vec<T>) -> Vec<T> {
        let mut keyed: Vec<(String, T)> = items
            .into_iter()
            .map(|item| (self.names.type_name(&item).into_owned(), item))
            .filter(|(key, _)| !key.is_empty())
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));

        let mut result: Vec<T> = keyed.into_iter().map(|(_, item)| item).collect();
        assign_levels(&mut result);
        result
    }
}
