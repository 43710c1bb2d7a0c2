//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `infragen-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{
    DomainValidator, GeneratedFile, Preset, ProjectConfig, TargetKind, ValidationErrors,
};
use crate::error::InfraGenResult;

/// Port for rendering a project into one target's artifacts.
///
/// Implemented by:
/// - `infragen_adapters::generators::ComposeGenerator`
/// - `infragen_adapters::generators::AnsibleGenerator`
/// - `infragen_adapters::generators::TerraformGenerator`
///
/// Implementations must not perform I/O and must not mutate the input.
#[cfg_attr(test, mockall::automock)]
pub trait Generator: Send + Sync {
    /// The target this generator renders for.
    fn target(&self) -> TargetKind;

    /// Check the generation minimum, reporting every problem at once.
    fn validate(&self, config: &ProjectConfig) -> Result<(), ValidationErrors> {
        DomainValidator::validate_for_generation(config)
    }

    /// Validate, then render. Produces nothing when validation fails.
    fn generate(&self, config: &ProjectConfig) -> InfraGenResult<Vec<GeneratedFile>>;
}

/// Port for preset lookup.
///
/// Implemented by:
/// - `infragen_adapters::catalog::InMemoryCatalog` (built-in and custom presets)
#[cfg_attr(test, mockall::automock)]
pub trait PresetCatalog: Send + Sync {
    /// Get a preset by id. Unknown ids fail with `PresetNotFound`.
    fn get(&self, id: &str) -> InfraGenResult<Preset>;

    /// List all presets, ordered by id.
    fn list(&self) -> InfraGenResult<Vec<Preset>>;

    /// List presets in one category, ordered by id.
    fn list_by_category(&self, category: &str) -> InfraGenResult<Vec<Preset>>;
}

/// Port for project document persistence.
///
/// Implemented by:
/// - `infragen_adapters::project_store::YamlProjectStore` (production)
/// - `infragen_adapters::project_store::MemoryProjectStore` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait ProjectStore: Send + Sync {
    fn save(&self, config: &ProjectConfig, path: &Path) -> InfraGenResult<()>;

    fn load(&self, path: &Path) -> InfraGenResult<ProjectConfig>;

    fn exists(&self, path: &Path) -> bool;
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `infragen_adapters::filesystem::LocalFilesystem` (production)
/// - `infragen_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> InfraGenResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> InfraGenResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}
