//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use infragen_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{InfraGenError, InfraGenResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> InfraGenResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> InfraGenResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> InfraGenError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_files_under_created_directories() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("deploy/prod");
        let fs = LocalFilesystem::new();

        fs.create_dir_all(&out).unwrap();
        fs.write_file(&out.join(".env"), "A=1\n").unwrap();

        assert!(fs.exists(&out.join(".env")));
        assert_eq!(std::fs::read_to_string(out.join(".env")).unwrap(), "A=1\n");
    }

    #[test]
    fn write_into_missing_directory_reports_the_path() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("missing/main.tf");

        let err = LocalFilesystem::new().write_file(&target, "").unwrap_err();
        assert!(matches!(
            err,
            InfraGenError::Application(ApplicationError::FilesystemError { ref path, .. })
                if path == &target
        ));
    }
}
