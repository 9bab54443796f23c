//! Filesystem port for the schedule, ledger and lease files.

use std::path::Path;

/// Provides filesystem access for reading and writing files.
///
/// Abstracting the filesystem allows deterministic replay and testing
/// without touching the real disk.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;

    /// Replaces the file's contents, creating parent directories as needed.
    ///
    /// Readers observe either the old or the new contents, never a partial
    /// write.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Creates the file only if it does not exist yet.
    ///
    /// Returns `Ok(false)` when the file already exists.
    ///
    /// # Errors
    ///
    /// Returns an error for any failure other than the file already existing.
    fn create_new(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;

    /// Removes a file. Removing a missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    fn remove_file(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Returns `true` if the path exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;
}
