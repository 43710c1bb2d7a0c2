//! Project document persistence adapters.

mod memory;
mod yaml;

pub use memory::MemoryProjectStore;
pub use yaml::YamlProjectStore;

use std::path::Path;

use infragen_core::{application::ApplicationError, domain::ProjectConfig};

fn persistence_error(path: &Path, reason: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::PersistenceFailed {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Encode a project as the persisted YAML document.
pub fn encode(config: &ProjectConfig, path: &Path) -> Result<String, ApplicationError> {
    serde_yaml::to_string(config).map_err(|e| persistence_error(path, e))
}

/// Decode a persisted YAML document.
pub fn decode(raw: &str, path: &Path) -> Result<ProjectConfig, ApplicationError> {
    serde_yaml::from_str(raw).map_err(|e| persistence_error(path, format!("invalid YAML: {e}")))
}
