//! Persistence of generated documents

use declorder_core::analysis::FileWriter;
use declorder_core::{Error, Result};
use declorder_utils::write_text_file;
use std::path::{Path, PathBuf};

/// Writes generated content to the local filesystem, creating parent
/// directories as needed
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFileWriter;

impl FileWriter for FsFileWriter {
    fn write_to_file(&self, content: &str, path: &Path) -> Result<()> {
        write_text_file(path, content).map_err(|source| Error::Persist {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Output file for the stubs of one source unit: `noop_<unit>_interfaces.go`
/// under `noop_dir`. A trailing `.go` on `unit` is dropped.
pub fn noop_file_path(noop_dir: &Path, unit: &str) -> PathBuf {
    let stem = unit.strip_suffix(".go").unwrap_or(unit);
    noop_dir.join(format!("noop_{stem}_interfaces.go"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_noop_file_path() {
        let dir = Path::new("out");
        assert_eq!(noop_file_path(dir, "shop.go"), PathBuf::from("out/noop_shop_interfaces.go"));
        assert_eq!(noop_file_path(dir, "streams"), PathBuf::from("out/noop_streams_interfaces.go"));
    }

    #[test]
    fn test_writer_creates_parents() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let temp = tempdir()?;
        let target = temp.path().join("nested/noop/out.go");

        FsFileWriter.write_to_file("package main\n", &target)?;
        assert_eq!(fs::read_to_string(&target)?, "package main\n");
        Ok(())
    }

    #[test]
    fn test_failure_carries_path() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let temp = tempdir()?;
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "file, not a directory")?;
        let target = blocker.join("out.go");

        match FsFileWriter.write_to_file("x", &target) {
            Err(Error::Persist { path, .. }) => assert_eq!(path, target),
            other => panic!("expected a persistence error, got {other:?}"),
        }
        Ok(())
    }
}
