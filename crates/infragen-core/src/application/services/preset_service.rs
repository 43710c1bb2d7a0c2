//! Preset Service - catalog queries and project bootstrap.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::{debug, instrument};

use crate::{
    application::ports::PresetCatalog,
    domain::{Preset, ProjectConfig, ProjectType},
    error::InfraGenResult,
};

/// Version stamped on every freshly bootstrapped project.
pub const INITIAL_VERSION: &str = "1.0.0";

/// One catalog category with the number of presets in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub name: String,
    pub presets: usize,
}

/// Service for preset operations.
pub struct PresetService {
    catalog: Box<dyn PresetCatalog>,
}

impl PresetService {
    pub fn new(catalog: Box<dyn PresetCatalog>) -> Self {
        Self { catalog }
    }

    /// Get a preset by id.
    pub fn get(&self, id: &str) -> InfraGenResult<Preset> {
        self.catalog.get(id)
    }

    /// List all presets.
    pub fn list(&self) -> InfraGenResult<Vec<Preset>> {
        self.catalog.list()
    }

    /// List presets in one category.
    pub fn list_by_category(&self, category: &str) -> InfraGenResult<Vec<Preset>> {
        self.catalog.list_by_category(category)
    }

    /// Categories in name order, each with its preset count.
    pub fn categories(&self) -> InfraGenResult<Vec<CategorySummary>> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for preset in self.catalog.list()? {
            *counts.entry(preset.category).or_default() += 1;
        }

        Ok(counts
            .into_iter()
            .map(|(name, presets)| CategorySummary { name, presets })
            .collect())
    }

    /// Instantiate a new project from a preset.
    ///
    /// Optional preset services start disabled. Both timestamps are set to
    /// the same instant.
    #[instrument(skip(self), fields(preset = %preset_id))]
    pub fn create_project(
        &self,
        preset_id: &str,
        name: &str,
        environment: &str,
    ) -> InfraGenResult<ProjectConfig> {
        let preset = self.catalog.get(preset_id)?;
        debug!(services = preset.services.len(), "Preset resolved");

        let now = Utc::now();
        Ok(ProjectConfig {
            name: name.to_string(),
            project_type: ProjectType::from_preset_id(&preset.id),
            description: (!preset.description.is_empty()).then(|| preset.description.clone()),
            version: Some(INITIAL_VERSION.to_string()),
            environment: Some(environment.to_string()),
            services: preset.services.iter().map(|s| s.to_service()).collect(),
            variables: preset.variables.clone(),
            created_at: now,
            updated_at: now,
        })
    }
}
