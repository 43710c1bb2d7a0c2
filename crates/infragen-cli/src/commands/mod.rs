//! Command handlers, one module per subcommand.
//!
//! Handlers translate arguments into service calls and display results. No
//! business logic lives here.

pub mod completions;
pub mod config;
pub mod generate;
pub mod init;
pub mod list;
pub mod validate;

use std::path::PathBuf;

use tracing::debug;

use infragen_adapters::{InMemoryCatalog, YamlProjectStore};
use infragen_core::{
    application::{PresetService, ProjectService},
    domain::ProjectConfig,
};

use crate::{config::AppConfig, error::CliResult};

/// Built-in presets, overlaid with the custom presets directory when one is
/// configured.
pub(crate) fn preset_service(config: &AppConfig) -> CliResult<PresetService> {
    let catalog = InMemoryCatalog::with_builtin()?;
    if let Some(dir) = &config.presets.local_path {
        let loaded = catalog.load_dir(dir)?;
        debug!(loaded, dir = %dir.display(), "custom presets merged");
    }
    Ok(PresetService::new(Box::new(catalog)))
}

pub(crate) fn project_service() -> ProjectService {
    ProjectService::new(Box::new(YamlProjectStore::new()))
}

/// `--project` when given, else `defaults.project_file`.
pub(crate) fn project_path(arg: Option<PathBuf>, config: &AppConfig) -> PathBuf {
    arg.unwrap_or_else(|| config.defaults.project_file.clone())
}

pub(crate) fn load_project(arg: Option<PathBuf>, config: &AppConfig) -> CliResult<ProjectConfig> {
    let path = project_path(arg, config);
    Ok(project_service().load(&path)?)
}
