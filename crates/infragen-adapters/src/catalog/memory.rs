//! In-memory preset catalog with built-in presets.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, RwLock},
};

use tracing::{debug, info};

use infragen_core::{
    application::{ApplicationError, ports::PresetCatalog},
    domain::{DomainError, DomainValidator as validator, Preset},
    error::InfraGenResult,
};

use crate::{builtin_presets, preset_loader::FilesystemPresetLoader};

/// Thread-safe in-memory preset catalog.
#[derive(Clone)]
pub struct InMemoryCatalog {
    inner: Arc<RwLock<HashMap<String, Preset>>>,
}

impl InMemoryCatalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a catalog with the built-in presets loaded.
    pub fn with_builtin() -> InfraGenResult<Self> {
        let catalog = Self::new();
        for preset in builtin_presets::all_presets() {
            catalog.insert(preset)?;
        }
        Ok(catalog)
    }

    /// Validate and add a preset, replacing any preset with the same id.
    pub fn insert(&self, preset: Preset) -> InfraGenResult<()> {
        validator::validate_preset(&preset)?;

        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        if inner.contains_key(&preset.id) {
            debug!(id = %preset.id, "replacing preset");
        }
        inner.insert(preset.id.clone(), preset);
        Ok(())
    }

    /// Merge every custom preset found in `dir` into the catalog.
    ///
    /// Returns the number of presets loaded.
    pub fn load_dir(&self, dir: &Path) -> InfraGenResult<usize> {
        let presets = FilesystemPresetLoader::new(dir).load_all()?;
        let count = presets.len();
        for preset in presets {
            self.insert(preset)?;
        }
        info!(count, dir = %dir.display(), "Loaded custom presets");
        Ok(count)
    }

    /// Get the number of presets.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn sorted(&self, filter: impl Fn(&Preset) -> bool) -> InfraGenResult<Vec<Preset>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let mut presets: Vec<Preset> = inner.values().filter(|p| filter(p)).cloned().collect();
        presets.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(presets)
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl PresetCatalog for InMemoryCatalog {
    fn get(&self, id: &str) -> InfraGenResult<Preset> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.get(id).cloned().ok_or_else(|| {
            DomainError::PresetNotFound {
                id: id.to_string(),
            }
            .into()
        })
    }

    fn list(&self) -> InfraGenResult<Vec<Preset>> {
        self.sorted(|_| true)
    }

    fn list_by_category(&self, category: &str) -> InfraGenResult<Vec<Preset>> {
        self.sorted(|p| p.category.eq_ignore_ascii_case(category))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use infragen_core::domain::PresetService;
    use infragen_core::error::{ErrorCategory, InfraGenError};
    use tempfile::TempDir;

    #[test]
    fn builtin_catalog_lists_five_presets_sorted() {
        let catalog = InMemoryCatalog::with_builtin().unwrap();
        let ids: Vec<_> = catalog.list().unwrap().into_iter().map(|p| p.id).collect();

        assert_eq!(catalog.len(), 5);
        assert_eq!(
            ids,
            vec!["database", "infrastructure", "microservice", "ml", "web-app"]
        );
    }

    #[test]
    fn unknown_id_is_not_found_and_carries_the_id() {
        let catalog = InMemoryCatalog::with_builtin().unwrap();
        let err = catalog.get("nope").unwrap_err();

        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(matches!(
            err,
            InfraGenError::Domain(DomainError::PresetNotFound { ref id }) if id == "nope"
        ));
    }

    #[test]
    fn category_filter_ignores_case() {
        let catalog = InMemoryCatalog::with_builtin().unwrap();
        let web = catalog.list_by_category("web applications").unwrap();

        assert_eq!(web.len(), 1);
        assert_eq!(web[0].id, "web-app");
        assert!(catalog.list_by_category("Quantum").unwrap().is_empty());
    }

    #[test]
    fn insert_rejects_invalid_presets() {
        let catalog = InMemoryCatalog::new();
        let dup = Preset::new("dup", "Dup", "Test")
            .with_service(PresetService::new("a", "web"))
            .with_service(PresetService::new("a", "web"));

        let err = catalog.insert(dup).unwrap_err();
        assert!(matches!(
            err,
            InfraGenError::Domain(DomainError::InvalidPreset { .. })
        ));
        assert!(catalog.is_empty());
    }

    #[test]
    fn custom_presets_override_builtins() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("web-app.yaml"),
            "id: web-app\nname: Company web app\ncategory: Web Applications\nservices:\n  - {name: site, type: frontend, image: 'caddy:2'}\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("edge.yml"),
            "id: edge\nname: Edge\nservices:\n  - {name: proxy, type: web}\n",
        )
        .unwrap();

        let catalog = InMemoryCatalog::with_builtin().unwrap();
        let loaded = catalog.load_dir(dir.path()).unwrap();

        assert_eq!(loaded, 2);
        assert_eq!(catalog.len(), 6);
        let web = catalog.get("web-app").unwrap();
        assert_eq!(web.name, "Company web app");
        assert_eq!(web.services.len(), 1);
    }

    #[test]
    fn missing_custom_dir_is_reported() {
        let catalog = InMemoryCatalog::with_builtin().unwrap();
        let err = catalog
            .load_dir(Path::new("/definitely/not/here"))
            .unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(catalog.len(), 5);
    }
}
