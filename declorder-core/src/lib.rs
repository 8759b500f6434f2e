//! declorder core - declaration ordering engine
//!
//! This crate provides:
//! - Declaration records generic over a per-kind shape
//! - Lexical dependency extraction from rendered type text
//! - Dependency graph construction and deterministic topological ordering
//! - Capability traits and the generic per-kind analysis pipeline
//! - A tree-sitter front-end that turns Go source files into declaration records
//!
//! Identifiers are never resolved against a real type system. Dependencies
//! are recovered from the rendered text of fields and signatures, which keeps
//! the ordering independent of any particular parser.

//#![deny(missing_docs)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
)]
#![allow(
    clippy::module_name_repetitions,  // Often necessary for clarity
)]

pub mod models;
pub mod extractors;
pub mod graph;
pub mod analysis;
pub mod source;

use std::collections::BTreeSet;
use std::path::PathBuf;

// Re-export commonly used types for convenience
pub use models::{
    Declaration, DeclarationKind, DeclarationManifest, ManifestEntry, Leveled, Shape,
    StructDecl, InterfaceDecl, FunctionDecl, VariableDecl, ConstantDecl, ImportDecl,
};
pub use extractors::{DependencyExtractor, ShapeDependencyExtractor, extract_type_dependencies};
pub use graph::{DependencyGraph, DependencyResolver, TopologicalResolver, AlphabeticalResolver};
pub use analysis::{AnalysisEngine, GeneratedStub, UnitSession};

/// Result type used throughout declorder core
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for declorder core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Source unit could not be parsed
    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    /// Generated output could not be stored
    #[error("Failed to write {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Code generation requested from an engine without a generator
    #[error("code generator not available")]
    GeneratorUnavailable,

    /// Utility error
    #[error("Utility error: {0}")]
    Util(#[from] declorder_utils::UtilError),
}

/// Ordering strategy applied to every active declaration kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum SortStrategy {
    /// Dependencies first, ties broken lexicographically
    #[default]
    Topological,
    /// Plain lexicographic order by graph key
    Alphabetical,
}

impl std::fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortStrategy::Topological => write!(f, "Topological"),
            SortStrategy::Alphabetical => write!(f, "Alphabetical"),
        }
    }
}

impl std::str::FromStr for SortStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "topological" | "topo" => Ok(SortStrategy::Topological),
            "alphabetical" | "alpha" => Ok(SortStrategy::Alphabetical),
            _ => Err(format!("Invalid sort strategy: '{s}'. Valid options: topological, alphabetical")),
        }
    }
}

/// No-op stub generation settings
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NoOpConfig {
    /// Generate stubs for interfaces
    pub enabled: bool,
    /// Directory receiving one generated file per source unit
    pub output_dir: PathBuf,
    /// Package clause written at the top of every generated file
    pub package_name: String,
}

impl Default for NoOpConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            output_dir: PathBuf::from("./noop"),
            package_name: "main".to_string(),
        }
    }
}

/// Per-run analysis configuration.
///
/// Built once per run and passed down; there is no global engine registry.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Active declaration kinds; empty means every kind
    pub kinds: BTreeSet<DeclarationKind>,
    /// Ordering strategy
    pub sort: SortStrategy,
    /// Stub generation
    pub noop: NoOpConfig,
    /// Directories to analyze
    pub dirs: Vec<PathBuf>,
    /// Directory names and `*.ext` patterns skipped while walking
    pub exclude_patterns: BTreeSet<String>,
    /// Skip `*_test.go` files
    pub skip_test_files: bool,
    /// Analyze independent source units in parallel
    pub parallel_processing: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            kinds: BTreeSet::new(),
            sort: SortStrategy::Topological,
            noop: NoOpConfig::default(),
            dirs: vec![PathBuf::from(".")],
            exclude_patterns: declorder_utils::default_exclusion_patterns(),
            skip_test_files: true,
            parallel_processing: true,
        }
    }
}

impl AnalysisConfig {
    /// Kinds that take part in this run, in report order
    pub fn active_kinds(&self) -> Vec<DeclarationKind> {
        DeclarationKind::ALL
            .into_iter()
            .filter(|kind| self.kinds.is_empty() || self.kinds.contains(kind))
            .collect()
    }

    /// Whether `kind` takes part in this run
    pub fn is_active(&self, kind: DeclarationKind) -> bool {
        self.kinds.is_empty() || self.kinds.contains(&kind)
    }
}

impl declorder_utils::config::ValidateConfig for AnalysisConfig {
    fn validate(&self) -> declorder_utils::Result<()> {
        if self.noop.enabled && self.noop.output_dir.as_os_str().is_empty() {
            return Err(declorder_utils::UtilError::Config(
                "noop.output_dir must not be empty when generation is enabled".to_string(),
            ));
        }
        if !extractors::is_valid_identifier(&self.noop.package_name) {
            return Err(declorder_utils::UtilError::Config(format!(
                "noop.package_name is not a valid identifier: '{}'",
                self.noop.package_name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use declorder_utils::config::{ConfigBuilder, ValidateConfig};

    #[test]
    fn test_empty_kind_set_activates_everything() {
        let config = AnalysisConfig::default();
        assert_eq!(config.active_kinds(), DeclarationKind::ALL.to_vec());
        assert!(config.is_active(DeclarationKind::Import));
    }

    #[test]
    fn test_selected_kinds_keep_report_order() {
        let config = AnalysisConfig {
            kinds: [DeclarationKind::Import, DeclarationKind::Struct].into_iter().collect(),
            ..Default::default()
        };
        assert_eq!(config.active_kinds(), vec![DeclarationKind::Struct, DeclarationKind::Import]);
        assert!(!config.is_active(DeclarationKind::Function));
    }

    #[test]
    fn test_sort_strategy_parsing() {
        assert_eq!("alpha".parse::<SortStrategy>(), Ok(SortStrategy::Alphabetical));
        assert_eq!("Topological".parse::<SortStrategy>(), Ok(SortStrategy::Topological));
        assert!("random".parse::<SortStrategy>().is_err());
    }

    #[test]
    fn test_invalid_package_name_rejected() {
        let mut config = AnalysisConfig::default();
        config.noop.package_name = "not valid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_override_merges() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let config: AnalysisConfig = ConfigBuilder::new()
            .merge_value(serde_json::json!({
                "sort": "alphabetical",
                "kinds": ["interfaces"],
                "noop": { "enabled": true }
            }))?
            .build()?;

        assert_eq!(config.sort, SortStrategy::Alphabetical);
        assert_eq!(config.active_kinds(), vec![DeclarationKind::Interface]);
        assert!(config.noop.enabled);
        assert_eq!(config.noop.package_name, "main");
        assert!(config.skip_test_files);
        Ok(())
    }
}
