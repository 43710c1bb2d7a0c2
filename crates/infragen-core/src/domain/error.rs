// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use crate::domain::validation::ValidationErrors;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (for reporting the same failure per target)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    /// One validation pass found one or more problems.
    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("Invalid preset '{id}': {reason}")]
    InvalidPreset { id: String, reason: String },

    #[error("Unknown target: {0}")]
    UnknownTarget(String),

    #[error("Unknown project type: {0}")]
    UnknownProjectType(String),

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Not Found Errors (404-level equivalent)
    // ========================================================================
    #[error("Preset '{id}' not found")]
    PresetNotFound { id: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Validation(errors) => {
                let mut out = vec![format!(
                    "Fix the {} problem(s) listed above in your project file",
                    errors.len()
                )];
                out.push("Re-check with: infragen validate".into());
                out
            }
            Self::PresetNotFound { id } => vec![
                format!("No preset is registered under '{}'", id),
                "Try: infragen list presets".into(),
            ],
            Self::UnknownTarget(target) => vec![
                format!("'{}' is not a supported target", target),
                "Supported targets: docker, ansible, terraform".into(),
            ],
            Self::UnknownProjectType(_) => vec![
                "Supported project types: web-app, microservice, database, ml, infrastructure"
                    .into(),
            ],
            Self::InvalidPreset { id, .. } => vec![
                format!("Preset '{}' is malformed", id),
                "Check the preset file or remove it from the presets directory".into(),
            ],
            Self::AbsolutePathNotAllowed { .. } => {
                vec!["Generated paths must be relative to the output directory".into()]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_)
            | Self::InvalidPreset { .. }
            | Self::UnknownTarget(_)
            | Self::UnknownProjectType(_) => ErrorCategory::Validation,
            Self::PresetNotFound { .. } => ErrorCategory::NotFound,
            Self::AbsolutePathNotAllowed { .. } => ErrorCategory::Internal,
        }
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
