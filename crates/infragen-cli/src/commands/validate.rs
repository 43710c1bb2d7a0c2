//! `infragen validate`: check a project against each target's rules.

use serde::Serialize;
use tracing::{instrument, warn};

use infragen_adapters::{LocalFilesystem, generators};
use infragen_core::{
    application::GenerationService,
    domain::{Advisory, AdvisoryKind, ValidationErrors},
};

use crate::{
    cli::ValidateArgs,
    commands::{load_project, project_service},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct TargetView {
    target: String,
    valid: bool,
    errors: Vec<String>,
}

#[derive(Debug, Serialize)]
struct AdvisoryView<'a> {
    kind: &'static str,
    message: &'a str,
}

#[derive(Debug, Serialize)]
struct ReportView<'a> {
    project: &'a str,
    valid: bool,
    targets: Vec<TargetView>,
    advisories: Vec<AdvisoryView<'a>>,
}

/// Whole-project checks first, then each selected target, then advice.
///
/// Advisories never fail the command; any invalid target does.
#[instrument(skip_all, fields(target = ?args.target))]
pub fn execute(args: ValidateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let project = load_project(args.project, &config)?;
    let projects = project_service();
    projects.validate(&project)?;

    let service = GenerationService::new(generators::builtin(), Box::new(LocalFilesystem::new()));
    let checks = service.validate_targets(&project, &args.target.kinds());
    let advisories = projects.advisories(&project);

    let failed: Vec<String> = checks
        .iter()
        .filter(|(_, result)| result.is_err())
        .map(|(target, _)| target.to_string())
        .collect();

    if output.is_json() {
        let view = ReportView {
            project: &project.name,
            valid: failed.is_empty(),
            targets: checks
                .iter()
                .map(|(target, result)| TargetView {
                    target: target.to_string(),
                    valid: result.is_ok(),
                    errors: result.as_ref().err().map(messages).unwrap_or_default(),
                })
                .collect(),
            advisories: advisories
                .iter()
                .map(|a| AdvisoryView {
                    kind: a.kind.as_str(),
                    message: &a.message,
                })
                .collect(),
        };
        output.json(&view)?;
    } else {
        output.success("Project configuration is valid")?;
        output.print(&format!(
            "Project: {} ({})",
            project.name, project.project_type
        ))?;
        output.print(&format!(
            "Services: {} ({} enabled)",
            project.services.len(),
            project.enabled_services().count()
        ))?;
        output.print("")?;

        for (target, result) in &checks {
            match result {
                Ok(()) => output.success(&format!("{} configuration is valid", target.display_name()))?,
                Err(errors) => {
                    output.error(&format!("{} validation failed:", target.display_name()))?;
                    for message in messages(errors) {
                        output.error(&format!("  - {message}"))?;
                    }
                }
            }
        }

        print_advisories(&advisories, &output)?;
    }

    if failed.is_empty() {
        Ok(())
    } else {
        warn!(targets = ?failed, "Target validation failed");
        Err(CliError::TargetsInvalid { targets: failed })
    }
}

fn messages(errors: &ValidationErrors) -> Vec<String> {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect()
}

fn print_advisories(advisories: &[Advisory], output: &OutputManager) -> CliResult<()> {
    output.print("")?;
    if advisories.is_empty() {
        output.info("No recommendations")?;
        return Ok(());
    }

    output.header("Recommendations:")?;
    for advisory in advisories {
        match advisory.kind {
            AdvisoryKind::Warning => output.warning(&advisory.message)?,
            AdvisoryKind::Security => output.warning(&format!("Security: {}", advisory.message))?,
        }
    }
    Ok(())
}
