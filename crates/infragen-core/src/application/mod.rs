//! Application layer for infragen.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (PresetService, ProjectService, GenerationService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    CategorySummary, GenerationReport, GenerationService, PROJECT_FILE, PresetService,
    ProjectService, TargetOutcome,
};

pub use ports::{Filesystem, Generator, PresetCatalog, ProjectStore};

pub use error::ApplicationError;
