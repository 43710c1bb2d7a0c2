//! YAML project store backed by the local filesystem.

use std::{fs, path::Path};

use tracing::debug;

use infragen_core::{
    application::ports::ProjectStore, domain::ProjectConfig, error::InfraGenResult,
};

use super::{decode, encode, persistence_error};

/// Production project store: one YAML document per project.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlProjectStore;

impl YamlProjectStore {
    pub fn new() -> Self {
        Self
    }
}

impl ProjectStore for YamlProjectStore {
    fn save(&self, config: &ProjectConfig, path: &Path) -> InfraGenResult<()> {
        let document = encode(config, path)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| persistence_error(path, format!("create directory: {e}")))?;
        }
        fs::write(path, document).map_err(|e| persistence_error(path, format!("write: {e}")))?;

        debug!(path = %path.display(), "wrote project document");
        Ok(())
    }

    fn load(&self, path: &Path) -> InfraGenResult<ProjectConfig> {
        let raw =
            fs::read_to_string(path).map_err(|e| persistence_error(path, format!("read: {e}")))?;
        Ok(decode(&raw, path)?)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}
