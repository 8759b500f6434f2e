//! declorder utilities
//!
//! Small helpers shared by the declorder crates:
//! - configuration loading and layered merging (TOML, JSON, YAML)
//! - tracing subscriber bootstrap
//! - file persistence
//! - whitespace normalisation for rendered source text

//#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

pub mod file;
pub mod string;
pub mod config;
pub mod logging;

/// Re-export commonly used utilities
pub use file::{read_text_file, ensure_dir, write_text_file};
pub use string::normalize_whitespace;
pub use config::{load_config, ConfigBuilder};

/// Result type used throughout declorder utilities
pub type Result<T> = std::result::Result<T, UtilError>;

/// Error types for utility operations
#[derive(Debug, thiserror::Error)]
pub enum UtilError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Path operation error
    #[error("Path operation error: {0}")]
    PathOperation(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Directory and file patterns skipped while walking a source tree
pub fn default_exclusion_patterns() -> std::collections::BTreeSet<String> {
    [
        // Version control
        ".git", ".svn", ".hg",
        // Vendored and generated trees
        "vendor", "testdata", "node_modules", "target",
        // IDE and editor files
        ".vscode", ".idea", "*.swp",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// Check if a path should be excluded based on patterns.
///
/// `*.ext` patterns match the file extension; any other pattern must equal
/// one of the path components.
pub fn should_exclude_path<'a, I>(path: &std::path::Path, patterns: I) -> bool
where
    I: IntoIterator<Item = &'a String>,
{
    for pattern in patterns {
        if let Some(ext) = pattern.strip_prefix("*.") {
            if let Some(file_ext) = path.extension().and_then(|e| e.to_str()) {
                if file_ext.eq_ignore_ascii_case(ext) {
                    return true;
                }
            }
        } else if path.components().any(|component| {
            matches!(component, std::path::Component::Normal(name) if name.to_str() == Some(pattern.as_str()))
        }) {
            return true;
        }
    }

    false
}
