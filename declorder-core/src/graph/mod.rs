//! Dependency graph and ordering
//!
//! Provides:
//! - A name-keyed directed graph whose edges run from a dependency to each
//!   of its dependents
//! - Kahn's algorithm with a lexicographically ordered ready set, so the
//!   same input always yields the same order
//! - Resolvers that turn a collection of declarations into a leveled order

use std::collections::{BTreeMap, HashMap};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

pub mod resolver;

pub use resolver::{DependencyResolver, TopologicalResolver, AlphabeticalResolver};

/// Directed graph over declaration keys.
///
/// Built fresh for every sort and dropped afterwards.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    graph: DiGraph<String, ()>,
    nodes: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, returning the existing index when `name` is already known
    pub fn add_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&node_id) = self.nodes.get(name) {
            node_id
        } else {
            let node_id = self.graph.add_node(name.to_string());
            self.nodes.insert(name.to_string(), node_id);
            node_id
        }
    }

    /// Record that `dependent` depends on `dependency`.
    ///
    /// Both names must already be nodes; unknown names are ignored and
    /// `false` is returned. Repeating an edge does not add a second one.
    pub fn add_dependency(&mut self, dependency: &str, dependent: &str) -> bool {
        match (self.nodes.get(dependency), self.nodes.get(dependent)) {
            (Some(&from), Some(&to)) => {
                self.graph.update_edge(from, to, ());
                true
            }
            _ => false,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Names in dependency order.
    ///
    /// Among nodes that are ready at the same time the lexicographically
    /// smallest goes first. Nodes on a cycle, and everything downstream of
    /// one, never become ready and are left out of the result.
    pub fn topological_order(&self) -> Vec<String> {
        let mut in_degree: HashMap<NodeIndex, usize> = self
            .graph
            .node_indices()
            .map(|node| (node, self.graph.neighbors_directed(node, Direction::Incoming).count()))
            .collect();

        let mut ready: BTreeMap<&str, NodeIndex> = in_degree
            .iter()
            .filter(|(_, &degree)| degree == 0)
            .map(|(&node, _)| (self.graph[node].as_str(), node))
            .collect();

        let mut order = Vec::with_capacity(self.graph.node_count());
        while let Some((name, node)) = ready.pop_first() {
            order.push(name.to_string());

            for dependent in self.graph.neighbors_directed(node, Direction::Outgoing) {
                if let Some(degree) = in_degree.get_mut(&dependent) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.insert(self.graph[dependent].as_str(), dependent);
                    }
                }
            }
        }

        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(nodes: &[&str], edges: &[(&str, &str)]) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for node in nodes {
            graph.add_node(node);
        }
        for (dependency, dependent) in edges {
            graph.add_dependency(dependency, dependent);
        }
        graph
    }

    #[test]
    fn test_ready_set_is_lexicographic() {
        let graph = graph(&["Bravo", "Alpha", "Charlie"], &[]);
        assert_eq!(graph.topological_order(), vec!["Alpha", "Bravo", "Charlie"]);
    }

    #[test]
    fn test_dependencies_come_first() {
        let graph = graph(
            &["App", "Config", "Logger"],
            &[("Config", "App"), ("Logger", "App"), ("Config", "Logger")],
        );
        assert_eq!(graph.topological_order(), vec!["Config", "Logger", "App"]);
    }

    #[test]
    fn test_newly_ready_node_competes_with_waiting_ones() {
        // B becomes ready after A and must still precede C.
        let graph = graph(&["A", "B", "C"], &[("A", "B")]);
        assert_eq!(graph.topological_order(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_cycle_members_are_left_out() {
        let graph = graph(&["A", "B", "Z"], &[("A", "B"), ("B", "A")]);
        assert_eq!(graph.topological_order(), vec!["Z"]);
    }

    #[test]
    fn test_unknown_names_and_duplicate_edges() {
        let mut graph = graph(&["A", "B"], &[]);
        assert!(!graph.add_dependency("External", "A"));
        assert!(graph.add_dependency("A", "B"));
        assert!(graph.add_dependency("A", "B"));

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.add_node("A"), graph.add_node("A"));
    }
}
