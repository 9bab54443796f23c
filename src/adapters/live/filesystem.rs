//! Live filesystem adapter using `std::fs`.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;

use crate::ports::filesystem::FileSystem;

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

impl FileSystem for LiveFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        ensure_parent(path)?;
        // Rename over the target so a crash mid-write never truncates it.
        let mut tmp_name = path.file_name().map(std::ffi::OsStr::to_os_string).unwrap_or_default();
        tmp_name.push(".tmp");
        let tmp = path.with_file_name(tmp_name);
        std::fs::write(&tmp, contents)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    fn create_new(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        ensure_parent(path)?;
        match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(mut file) => {
                file.write_all(contents.as_bytes())?;
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn remove_file(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_creates_parents_and_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("ledger.json");

        LiveFileSystem.write(&path, "{}").unwrap();
        LiveFileSystem.write(&path, "{\"a\": {}}").unwrap();

        assert_eq!(LiveFileSystem.read_to_string(&path).unwrap(), "{\"a\": {}}");
        assert!(!dir.path().join("state").join("ledger.json.tmp").exists());
    }

    #[test]
    fn create_new_refuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json.lock");

        assert!(LiveFileSystem.create_new(&path, "first").unwrap());
        assert!(!LiveFileSystem.create_new(&path, "second").unwrap());
        assert_eq!(LiveFileSystem.read_to_string(&path).unwrap(), "first");
    }

    #[test]
    fn remove_missing_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing");
        assert!(LiveFileSystem.remove_file(&path).is_ok());
        assert!(!LiveFileSystem.exists(&path));
    }
}
