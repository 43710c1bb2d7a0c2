//! Filesystem-based preset loader.
//!
//! Discovers custom presets in a directory, one preset per file, and
//! parses them into domain [`Preset`] objects.
//!
//! # Directory layout expected
//!
//! ```text
//! presets/
//! ├── data-platform.yaml
//! ├── edge.yml
//! └── legacy-stack.toml
//! ```
//!
//! # File format
//!
//! ```yaml
//! id: data-platform
//! name: Data Platform
//! description: Kafka with a schema registry
//! category: Data
//! services:
//!   - name: kafka
//!     type: queue
//!     image: bitnami/kafka:3.7
//!     ports:
//!       - container: 9092
//!         protocol: tcp
//!   - name: registry
//!     type: api
//!     image: confluentinc/cp-schema-registry:7.6.0
//!     depends_on: [kafka]
//!     optional: true
//! ```
//!
//! TOML files carry the same fields, with services as `[[services]]` tables.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use infragen_core::{
    application::ApplicationError,
    domain::{DomainValidator, Preset},
    error::InfraGenResult,
};

/// Why one preset file could not be used.
#[derive(Debug, thiserror::Error)]
pub enum PresetFileError {
    #[error("failed to read file: {0}")]
    Read(#[from] std::io::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported extension")]
    UnsupportedExtension,

    #[error("{0}")]
    Invalid(String),
}

/// Loads [`Preset`] objects from the files of one directory.
///
/// Files that cannot be read, parsed or validated emit a `WARN` log and are
/// skipped; they do not prevent other presets from loading.
///
/// # Example
///
/// ```no_run
/// use infragen_adapters::preset_loader::FilesystemPresetLoader;
///
/// let loader = FilesystemPresetLoader::new("./presets");
/// let presets = loader.load_all()?;
/// println!("Loaded {} presets", presets.len());
/// # Ok::<(), infragen_core::error::InfraGenError>(())
/// ```
pub struct FilesystemPresetLoader {
    presets_dir: PathBuf,
}

impl FilesystemPresetLoader {
    /// Create a loader pointed at `presets_dir`.
    pub fn new(presets_dir: impl Into<PathBuf>) -> Self {
        Self {
            presets_dir: presets_dir.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.presets_dir
    }

    /// Load every valid preset found directly under the directory, ordered
    /// by file name.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::CatalogLoad`] if the directory does not
    /// exist or cannot be read.
    #[instrument(skip(self), fields(dir = %self.presets_dir.display()))]
    pub fn load_all(&self) -> InfraGenResult<Vec<Preset>> {
        let catalog_error = |reason: String| ApplicationError::CatalogLoad {
            path: self.presets_dir.clone(),
            reason,
        };

        if !self.presets_dir.is_dir() {
            return Err(catalog_error("presets directory not found".into()).into());
        }

        let mut presets = Vec::new();

        for entry in WalkDir::new(&self.presets_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| catalog_error(format!("directory walk error: {e}")))?;
            if !entry.file_type().is_file() || !is_preset_file(entry.path()) {
                continue;
            }

            match load_file(entry.path()) {
                Ok(preset) => {
                    debug!(id = %preset.id, file = %entry.path().display(), "loaded preset");
                    presets.push(preset);
                }
                Err(e) => {
                    warn!(
                        file  = %entry.path().display(),
                        error = %e,
                        "skipping preset file due to load error"
                    );
                }
            }
        }

        debug!(count = presets.len(), "finished loading presets");
        Ok(presets)
    }
}

fn is_preset_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml" | "toml")
    )
}

/// Parse and validate one preset file.
pub fn load_file(path: &Path) -> Result<Preset, PresetFileError> {
    let raw = fs::read_to_string(path)?;

    let preset: Preset = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => serde_yaml::from_str(&raw)?,
        Some("toml") => toml::from_str(&raw)?,
        _ => return Err(PresetFileError::UnsupportedExtension),
    };

    DomainValidator::validate_preset(&preset)
        .map_err(|e| PresetFileError::Invalid(e.to_string()))?;

    Ok(preset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use infragen_core::error::{ErrorCategory, InfraGenError};
    use tempfile::TempDir;

    const YAML_PRESET: &str = r#"
id: data-platform
name: Data Platform
category: Data
services:
  - name: kafka
    type: queue
    image: bitnami/kafka:3.7
    ports:
      - container: 9092
        protocol: tcp
  - name: registry
    type: api
    depends_on: [kafka]
    optional: true
"#;

    const TOML_PRESET: &str = r#"
id = "edge"
name = "Edge"
description = "Reverse proxy"

[[services]]
name = "proxy"
type = "web"
image = "traefik:v3"

[[services.ports]]
host = 443
container = 443
"#;

    fn write(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).unwrap();
    }

    #[test]
    fn loads_yaml_and_toml_presets() {
        let dir = TempDir::new().unwrap();
        write(&dir, "data.yaml", YAML_PRESET);
        write(&dir, "edge.toml", TOML_PRESET);

        let presets = FilesystemPresetLoader::new(dir.path()).load_all().unwrap();

        assert_eq!(presets.len(), 2);
        let data = &presets[0];
        assert_eq!(data.id, "data-platform");
        assert_eq!(data.services[0].ports[0].container, 9092);
        assert!(data.services[1].optional);
        assert_eq!(data.services[1].depends_on, vec!["kafka".to_string()]);

        let edge = &presets[1];
        assert_eq!(edge.category, "General");
        assert_eq!(edge.services[0].ports[0].host, Some(443));
    }

    #[test]
    fn broken_and_unrelated_files_are_skipped() {
        let dir = TempDir::new().unwrap();
        write(&dir, "good.yml", YAML_PRESET);
        write(&dir, "broken.yaml", "id: [unterminated");
        write(&dir, "no-name.yaml", "id: x\nname: ''\n");
        write(&dir, "README.md", "# not a preset");

        let presets = FilesystemPresetLoader::new(dir.path()).load_all().unwrap();
        assert_eq!(presets.len(), 1);
        assert_eq!(presets[0].id, "data-platform");
    }

    #[test]
    fn missing_directory_is_a_catalog_error() {
        let dir = TempDir::new().unwrap();
        let err = FilesystemPresetLoader::new(dir.path().join("nope"))
            .load_all()
            .unwrap_err();

        assert!(matches!(
            err,
            InfraGenError::Application(ApplicationError::CatalogLoad { .. })
        ));
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn load_file_rejects_duplicate_services() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "dup.yaml",
            "id: dup\nname: Dup\nservices:\n  - {name: a, type: web}\n  - {name: a, type: web}\n",
        );

        let err = load_file(&dir.path().join("dup.yaml")).unwrap_err();
        assert!(matches!(err, PresetFileError::Invalid(_)));
    }
}
