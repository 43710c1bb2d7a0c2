//! `infragen config`: read and write configuration values.

use std::path::PathBuf;

use tracing::info;

use crate::{
    cli::ConfigCommands,
    config::{AppConfig, LOCAL_CONFIG_FILE},
    error::{CliError, CliResult, IntoCli as _},
    output::OutputManager,
};

/// Keys accepted by `config get`.
const KEYS: [&str; 6] = [
    "defaults.environment",
    "defaults.project_file",
    "output.no_color",
    "output.format",
    "output.directory",
    "presets.local_path",
];

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            if output.is_json() {
                output.json(&serde_json::json!({ "key": key, "value": value }))?;
            } else {
                output.print(&format!("{key} = {value}"))?;
            }
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
            } else {
                output.header("Current Configuration:")?;
                let serialised = config
                    .to_toml()
                    .with_cli_context(|| "Failed to serialise config")?;
                output.print(&serialised)?;
            }
        }

        ConfigCommands::Path => {
            output.print(&AppConfig::config_path().display().to_string())?;
        }

        ConfigCommands::Init { local, force } => {
            let path = if local {
                PathBuf::from(LOCAL_CONFIG_FILE)
            } else {
                AppConfig::config_path()
            };
            write_default(path, force, &output)?;
        }
    }

    Ok(())
}

fn write_default(path: PathBuf, force: bool, output: &OutputManager) -> CliResult<()> {
    if path.exists() && !force {
        return Err(CliError::ConfigExists { path });
    }

    let toml = AppConfig::default()
        .to_toml()
        .with_cli_context(|| "Failed to serialise default config")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }

    std::fs::write(&path, &toml)
        .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))?;

    info!(path = %path.display(), "Default configuration written");
    output.success(&format!("Configuration created at {}", path.display()))?;
    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    match key {
        "defaults.environment" => Ok(config.defaults.environment.clone()),
        "defaults.project_file" => Ok(config.defaults.project_file.display().to_string()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config.output.format.clone()),
        "output.directory" => Ok(config.output.directory.display().to_string()),
        "presets.local_path" => Ok(config
            .presets
            .local_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()),
        _ => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}' (known: {})", KEYS.join(", ")),
            source: None,
        }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{GlobalArgs, OutputFormat};
    use tempfile::TempDir;

    fn quiet_output() -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet: true,
            no_color: true,
            config: None,
            output_format: OutputFormat::Plain,
            log_file: None,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn get_known_key() {
        let cfg = AppConfig::default();
        assert_eq!(
            get_config_value(&cfg, "defaults.environment").unwrap(),
            "development"
        );
        assert_eq!(
            get_config_value(&cfg, "defaults.project_file").unwrap(),
            "infra-gen.yml"
        );
    }

    #[test]
    fn every_listed_key_resolves() {
        let cfg = AppConfig::default();
        for key in KEYS {
            assert!(get_config_value(&cfg, key).is_ok(), "{key}");
        }
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        assert!(matches!(
            get_config_value(&cfg, "does.not.exist"),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn get_no_color_default() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "output.no_color").unwrap(), "false");
    }

    #[test]
    fn write_default_creates_parent_and_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        write_default(path.clone(), false, &quiet_output()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(AppConfig::from_toml(&written).unwrap(), AppConfig::default());

        let err = write_default(path.clone(), false, &quiet_output()).unwrap_err();
        assert!(matches!(err, CliError::ConfigExists { .. }));
        assert_eq!(err.exit_code(), 2);

        write_default(path, true, &quiet_output()).unwrap();
    }
}
