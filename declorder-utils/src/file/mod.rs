//! File system utilities
//!
//! Reading source units and persisting generated documents.

use std::fs;
use std::path::Path;

/// Read a text file, replacing invalid UTF-8 sequences
pub fn read_text_file(path: &Path) -> crate::Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
            let bytes = fs::read(path)?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        Err(e) => Err(e.into()),
    }
}

/// Ensure directory exists, creating parents as needed
pub fn ensure_dir(path: &Path) -> crate::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    } else if !path.is_dir() {
        return Err(crate::UtilError::PathOperation(
            format!("Path exists but is not a directory: {}", path.display())
        ));
    }
    Ok(())
}

/// Write text content to `path`, creating the parent directory first.
///
/// Returns the underlying I/O error so callers can attach the target path to
/// their own error type.
pub fn write_text_file(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_creates_parent_directories() -> crate::Result<()> {
        let temp_dir = tempdir()?;
        let target = temp_dir.path().join("noop").join("nested").join("out.go");

        write_text_file(&target, "package main\n")?;

        assert_eq!(read_text_file(&target)?, "package main\n");
        Ok(())
    }

    #[test]
    fn test_write_into_file_parent_fails() -> crate::Result<()> {
        let temp_dir = tempdir()?;
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a directory")?;

        let result = write_text_file(&blocker.join("out.go"), "x");
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn test_ensure_dir() -> crate::Result<()> {
        let temp_dir = tempdir()?;
        let dir = temp_dir.path().join("a").join("b");

        ensure_dir(&dir)?;
        assert!(dir.is_dir());
        ensure_dir(&dir)?;

        let file = temp_dir.path().join("file.txt");
        fs::write(&file, "x")?;
        assert!(matches!(ensure_dir(&file), Err(crate::UtilError::PathOperation(_))));
        Ok(())
    }

    #[test]
    fn test_read_invalid_utf8_is_lossy() -> crate::Result<()> {
        let temp_dir = tempdir()?;
        let path = temp_dir.path().join("bad.go");
        fs::write(&path, [b'p', b'k', b'g', 0xff])?;

        let text = read_text_file(&path)?;
        assert!(text.starts_with("pkg"));
        Ok(())
    }
}
