//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `INFRAGEN_<SECTION>__<KEY>`, e.g.
//!    `INFRAGEN_OUTPUT__DIRECTORY=deploy` (a `.env` file is honoured)
//! 3. Config file: `--config FILE`, else `.infragen.toml` in the current
//!    directory, else the platform config file (see [`AppConfig::config_path`])
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Name of the per-directory configuration file.
pub const LOCAL_CONFIG_FILE: &str = ".infragen.toml";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Preset settings.
    pub presets: PresetConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defaults {
    /// Environment label stamped on `init` when `--environment` is absent.
    pub environment: String,
    /// Project file read by `generate`, `validate` and `list project`.
    pub project_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
    /// Directory that receives generated files.
    pub directory: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PresetConfig {
    /// Directory of custom presets merged over the built-ins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: Defaults {
                environment: "development".into(),
                project_file: PathBuf::from(infragen_core::application::PROJECT_FILE),
            },
            output: OutputConfig {
                no_color: false,
                format: "human".into(),
                directory: PathBuf::from("."),
            },
            presets: PresetConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then the
    /// environment.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let file_source = match config_file {
            Some(path) => toml_file(path, true),
            None => {
                let local = Path::new(LOCAL_CONFIG_FILE);
                if local.is_file() {
                    toml_file(local, false)
                } else {
                    toml_file(&Self::config_path(), false)
                }
            }
        };

        Self::builder()?
            .add_source(file_source)
            .add_source(
                Environment::with_prefix("INFRAGEN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Load from defaults plus the TOML text `raw` (no environment).
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        Self::builder()?
            .add_source(File::from_str(raw, FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    fn builder() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(Config::builder().add_source(Config::try_from(&Self::default())?))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.infragen.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "infragen", "infragen")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Render as TOML, the format read back by [`Self::load`].
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

fn toml_file(path: &Path, required: bool) -> File<config::FileSourceFile, FileFormat> {
    File::from(path).format(FileFormat::Toml).required(required)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_environment_is_development() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.environment, "development");
        assert_eq!(cfg.defaults.project_file, PathBuf::from("infra-gen.yml"));
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = AppConfig::from_toml("[output]\ndirectory = \"deploy\"\n").unwrap();
        assert_eq!(cfg.output.directory, PathBuf::from("deploy"));
        assert_eq!(cfg.output.format, "human");
        assert_eq!(cfg.defaults.environment, "development");
    }

    #[test]
    fn explicit_file_is_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("infragen.toml");
        std::fs::write(
            &path,
            "[defaults]\nenvironment = \"staging\"\n\n[presets]\nlocal_path = \"presets\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.defaults.environment, "staging");
        assert_eq!(cfg.presets.local_path, Some(PathBuf::from("presets")));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(AppConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn toml_round_trip() {
        let cfg = AppConfig::default();
        let text = cfg.to_toml().unwrap();
        assert_eq!(AppConfig::from_toml(&text).unwrap(), cfg);
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
