//! Application layer errors.
//!
//! These errors represent failures in orchestration and in the adapters
//! behind the ports, not business rules. Business rule violations are
//! `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::TargetKind;
use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// A renderer could not turn a validated project into text.
    #[error("Rendering failed for target {target}: {reason}")]
    RenderingFailed { target: TargetKind, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A project document could not be encoded, decoded, read or written.
    #[error("Failed to persist project at {path}: {reason}")]
    PersistenceFailed { path: PathBuf, reason: String },

    /// No project document exists where one was expected.
    #[error("No project file found at {path}")]
    ProjectNotFound { path: PathBuf },

    /// A project document already exists and overwriting was not allowed.
    #[error("Project file already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// Custom presets could not be loaded.
    #[error("Failed to load presets from {path}: {reason}")]
    CatalogLoad { path: PathBuf, reason: String },

    /// Store access failed (lock poisoned).
    #[error("Preset catalog is unavailable")]
    StoreLockError,

    /// One or more targets failed while the others were generated.
    #[error("{failed} of {total} target(s) failed")]
    GenerationIncomplete { failed: usize, total: usize },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::RenderingFailed { target, .. } => vec![
                format!("The {} renderer rejected this project", target.display_name()),
                "Check the project for unusual characters in names or values".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::PersistenceFailed { path, .. } => vec![
                format!("Inspect {} for syntax errors", path.display()),
                "Recreate it with: infragen init <PRESET> --force".into(),
            ],
            Self::ProjectNotFound { .. } => vec![
                "Create one with: infragen init <PRESET> --name <NAME>".into(),
                "Or point at an existing file with --project".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("{} already exists", path.display()),
                "Use --force to overwrite it".into(),
            ],
            Self::CatalogLoad { path, .. } => vec![
                format!("Check that {} is a readable directory", path.display()),
                "Or unset presets.local_path in your configuration".into(),
            ],
            Self::StoreLockError => vec!["Try again in a moment".into()],
            Self::GenerationIncomplete { .. } => {
                vec!["See the per-target errors above; the other targets were written".into()]
            }
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ProjectNotFound { .. } => ErrorCategory::NotFound,
            Self::ProjectExists { .. } | Self::GenerationIncomplete { .. } => {
                ErrorCategory::Validation
            }
            Self::PersistenceFailed { .. } | Self::CatalogLoad { .. } => {
                ErrorCategory::Configuration
            }
            Self::RenderingFailed { .. } | Self::FilesystemError { .. } | Self::StoreLockError => {
                ErrorCategory::Internal
            }
        }
    }
}
