//! `infragen init`: bootstrap a project file from a preset.

use std::path::{Path, PathBuf};

use serde_json::json;
use tracing::{info, instrument};

use infragen_core::application::PROJECT_FILE;

use crate::{
    cli::{GlobalArgs, InitArgs},
    commands::{preset_service, project_service},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Create `infra-gen.yml` from a preset.
///
/// Dispatch sequence:
/// 1. Check the project name
/// 2. Resolve the preset and build the project
/// 3. Confirm an overwrite when possible, otherwise refuse without `--force`
/// 4. Save and print next steps
#[instrument(skip_all, fields(preset = %args.preset, project = %args.name))]
pub fn execute(
    args: InitArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let name = args.name.trim();
    if name.is_empty() {
        return Err(CliError::InvalidInput {
            message: "--name must not be empty".into(),
        });
    }

    let environment = args
        .environment
        .unwrap_or_else(|| config.defaults.environment.clone());

    let presets = preset_service(&config)?;
    let preset = presets.get(&args.preset)?;
    let project = presets.create_project(&preset.id, name, &environment)?;

    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from("."))
        .join(PROJECT_FILE);

    let mut overwrite = args.force;
    if !overwrite && path.exists() && !global.quiet {
        match confirm_overwrite(&path)? {
            Some(true) => overwrite = true,
            Some(false) => return Err(CliError::Cancelled),
            None => {}
        }
    }

    project_service().save(&project, &path, overwrite)?;
    info!(path = %path.display(), "Project initialised");

    if output.is_json() {
        output.json(&json!({
            "project": project.name,
            "preset": preset.id,
            "environment": environment,
            "path": path,
            "services": project.services.len(),
        }))?;
        return Ok(());
    }

    output.success(&format!("Project '{}' initialized successfully!", project.name))?;
    output.print(&format!("Configuration saved to: {}", path.display()))?;
    output.print(&format!("Preset: {} - {}", preset.name, preset.description))?;
    output.print(&format!("Services: {}", project.services.len()))?;
    output.print("")?;
    output.print("Next steps:")?;
    output.print("  infragen validate")?;
    output.print("  infragen generate docker")?;
    output.print("  infragen generate all --output deploy")?;

    Ok(())
}

/// Ask before replacing an existing project file.
///
/// `None` when no prompt is possible (feature off or stdin not a terminal).
#[cfg(feature = "interactive")]
fn confirm_overwrite(path: &Path) -> CliResult<Option<bool>> {
    use std::io::IsTerminal as _;

    use crate::error::IntoCli as _;

    if !std::io::stdin().is_terminal() {
        return Ok(None);
    }

    dialoguer::Confirm::new()
        .with_prompt(format!("{} already exists. Overwrite?", path.display()))
        .default(false)
        .interact()
        .map(Some)
        .map_err(std::io::Error::from)
        .with_cli_context(|| "failed to read confirmation input")
}

#[cfg(not(feature = "interactive"))]
fn confirm_overwrite(_path: &Path) -> CliResult<Option<bool>> {
    Ok(None)
}
