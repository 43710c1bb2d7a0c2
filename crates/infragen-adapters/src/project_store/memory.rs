//! In-memory project store for testing.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use infragen_core::{
    application::{ApplicationError, ports::ProjectStore},
    domain::ProjectConfig,
    error::InfraGenResult,
};

use super::{decode, encode, persistence_error};

/// Keeps encoded YAML documents keyed by path.
///
/// Documents go through the same encoding as [`super::YamlProjectStore`],
/// so a round trip here exercises the persisted format.
#[derive(Debug, Clone, Default)]
pub struct MemoryProjectStore {
    documents: Arc<RwLock<HashMap<PathBuf, String>>>,
}

impl MemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw document (testing helper).
    pub fn insert_raw(&self, path: impl Into<PathBuf>, raw: impl Into<String>) {
        if let Ok(mut documents) = self.documents.write() {
            documents.insert(path.into(), raw.into());
        }
    }

    /// Raw document stored at `path` (testing helper).
    pub fn raw(&self, path: &Path) -> Option<String> {
        self.documents.read().ok()?.get(path).cloned()
    }
}

impl ProjectStore for MemoryProjectStore {
    fn save(&self, config: &ProjectConfig, path: &Path) -> InfraGenResult<()> {
        let document = encode(config, path)?;
        let mut documents = self
            .documents
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        documents.insert(path.to_path_buf(), document);
        Ok(())
    }

    fn load(&self, path: &Path) -> InfraGenResult<ProjectConfig> {
        let documents = self
            .documents
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        let raw = documents
            .get(path)
            .ok_or_else(|| persistence_error(path, "no document stored"))?;
        Ok(decode(raw, path)?)
    }

    fn exists(&self, path: &Path) -> bool {
        self.documents
            .read()
            .map(|documents| documents.contains_key(path))
            .unwrap_or(false)
    }
}
