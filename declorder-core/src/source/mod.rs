//! Source front-ends
//!
//! Turns source files into the syntax units the analysis engines consume.
//! The core ordering logic never looks at a syntax tree; only this module
//! does.

pub mod go;

pub use go::{GoNodeVisitor, GoSourceUnit};

use crate::{AnalysisConfig, Error, Result};
use declorder_utils::should_exclude_path;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Go files under `dir` in lexical path order.
///
/// Entries matching `config.exclude_patterns` are skipped (whole directories
/// included), as are `*_test.go` files when `config.skip_test_files` is set.
/// The root itself is never excluded.
pub fn find_go_files(dir: &Path, config: &AnalysisConfig) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !should_exclude_path(Path::new(entry.file_name()), &config.exclude_patterns)
        });

    for entry in walker {
        let entry = entry.map_err(|e| Error::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !name.ends_with(".go") || (config.skip_test_files && name.ends_with("_test.go")) {
            continue;
        }
        files.push(entry.into_path());
    }

    tracing::debug!(dir = %dir.display(), files = files.len(), "collected Go files");
    Ok(files)
}
