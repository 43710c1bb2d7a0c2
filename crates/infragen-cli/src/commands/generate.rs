//! `infragen generate`: render deployment artifacts for a project.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument};

use infragen_adapters::{LocalFilesystem, generators};
use infragen_core::application::{GenerationReport, GenerationService, TargetOutcome};

use crate::{
    cli::GenerateArgs,
    commands::{load_project, project_service},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// JSON view of one target's outcome.
#[derive(Debug, Serialize)]
struct OutcomeView {
    target: String,
    success: bool,
    files: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl OutcomeView {
    fn new(outcome: &TargetOutcome, root: &Path) -> Self {
        Self {
            target: outcome.target.to_string(),
            success: outcome.is_success(),
            files: outcome.files().iter().map(|f| root.join(f.path())).collect(),
            error: outcome.error().map(ToString::to_string),
        }
    }
}

/// Load, check and render the project.
///
/// Targets are independent: every requested target is attempted and a
/// failing one only fails the command after the others have been written.
#[instrument(skip_all, fields(target = ?args.target, dry_run = args.dry_run))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let project = load_project(args.project, &config)?;
    project_service().validate(&project)?;

    let targets = args.target.kinds();
    let root = args
        .output
        .unwrap_or_else(|| config.output.directory.clone());

    let service = GenerationService::new(generators::builtin(), Box::new(LocalFilesystem::new()));
    let report = if args.dry_run {
        service.render(&project, &targets)
    } else {
        service.generate(&project, &targets, &root)
    };

    info!(
        project = %project.name,
        files = report.file_count(),
        complete = report.is_complete(),
        "Generation finished"
    );

    if output.is_json() {
        let views: Vec<_> = report
            .outcomes
            .iter()
            .map(|o| OutcomeView::new(o, &root))
            .collect();
        output.json(&views)?;
    } else {
        print_report(&report, &root, args.dry_run, &project.name, &output)?;
    }

    Ok(report.ensure_complete()?)
}

fn print_report(
    report: &GenerationReport,
    root: &Path,
    dry_run: bool,
    project: &str,
    output: &OutputManager,
) -> CliResult<()> {
    for outcome in &report.outcomes {
        match outcome.error() {
            None => {
                for file in outcome.files() {
                    let path = root.join(file.path());
                    if dry_run {
                        output.print(&format!(
                            "Would generate: {} ({} bytes)",
                            path.display(),
                            file.size()
                        ))?;
                    } else {
                        output.print(&format!("Generated: {}", path.display()))?;
                    }
                }
            }
            Some(err) => {
                output.error(&format!("{} generation failed:", outcome.target))?;
                for line in err.to_string().lines() {
                    output.error(&format!("  {line}"))?;
                }
            }
        }
    }

    let verb = if dry_run { "Would generate" } else { "Generated" };
    let summary = format!(
        "{verb} {} files for project '{project}'",
        report.file_count()
    );
    if report.is_complete() {
        output.success(&summary)?;
    } else {
        output.warning(&summary)?;
    }
    Ok(())
}
