//! Implementation of the `infragen list` command.

use std::collections::BTreeMap;

use serde_json::json;

use infragen_core::domain::{Preset, ProjectConfig};

use crate::{
    cli::{ListArgs, ListFormat, ListKind},
    commands::{load_project, preset_service},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

const RULE_WIDTH: usize = 50;

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match args.what {
        ListKind::Presets => list_presets(args.category.as_deref(), args.format, &config, &output),
        ListKind::Categories => list_categories(args.format, &config, &output),
        ListKind::Project => {
            let project = load_project(args.project, &config)?;
            show_project(&project, args.format, &output)
        }
    }
}

fn list_presets(
    category: Option<&str>,
    format: ListFormat,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let service = preset_service(config)?;
    let presets = match category {
        Some(c) => service.list_by_category(c)?,
        None => service.list()?,
    };

    match format {
        ListFormat::Json => output.json(&presets)?,

        ListFormat::List => {
            for preset in &presets {
                println!("{}", preset.id);
            }
        }

        ListFormat::Table => {
            if presets.is_empty() {
                match category {
                    Some(c) => output.info(&format!("No presets in category '{c}'"))?,
                    None => output.info("No presets available")?,
                }
                return Ok(());
            }

            output.header("Available Project Presets:")?;
            output.print(&"=".repeat(RULE_WIDTH))?;

            let grouped = group_by_category(&presets);
            for (name, members) in &grouped {
                output.print("")?;
                output.header(&format!("{name}:"))?;
                for preset in members {
                    output.print(&format!("  {:<14} - {}", preset.id, preset.description))?;
                    if !preset.tags.is_empty() {
                        output.print(&format!("  {:<14}   Tags: {}", "", preset.tags.join(", ")))?;
                    }
                }
            }

            output.print("")?;
            output.print(&format!(
                "Total: {} presets across {} categories",
                presets.len(),
                grouped.len()
            ))?;
            output.print("Create a project with: infragen init <preset> --name <name>")?;
        }
    }

    Ok(())
}

fn list_categories(format: ListFormat, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let categories = preset_service(config)?.categories()?;

    match format {
        ListFormat::Json => {
            let doc: Vec<_> = categories
                .iter()
                .map(|c| json!({ "name": c.name, "presets": c.presets }))
                .collect();
            output.json(&doc)?;
        }

        ListFormat::List => {
            for category in &categories {
                println!("{}", category.name);
            }
        }

        ListFormat::Table => {
            output.header("Preset Categories:")?;
            output.print(&"=".repeat(RULE_WIDTH))?;
            for category in &categories {
                output.print(&format!(
                    "  {:<20} ({} presets)",
                    category.name, category.presets
                ))?;
            }
        }
    }

    Ok(())
}

fn show_project(project: &ProjectConfig, format: ListFormat, output: &OutputManager) -> CliResult<()> {
    match format {
        ListFormat::Json => output.json(project)?,

        ListFormat::List => {
            for service in &project.services {
                println!("{}", service.name);
            }
        }

        ListFormat::Table => {
            output.header("Project Information:")?;
            output.print(&"=".repeat(RULE_WIDTH))?;
            output.print(&format!("Name:        {}", project.name))?;
            output.print(&format!("Type:        {}", project.project_type))?;
            if let Some(description) = &project.description {
                output.print(&format!("Description: {description}"))?;
            }
            if let Some(environment) = &project.environment {
                output.print(&format!("Environment: {environment}"))?;
            }
            if let Some(version) = &project.version {
                output.print(&format!("Version:     {version}"))?;
            }
            output.print(&format!(
                "Created:     {}",
                project.created_at.format("%Y-%m-%d %H:%M:%S")
            ))?;
            output.print(&format!(
                "Updated:     {}",
                project.updated_at.format("%Y-%m-%d %H:%M:%S")
            ))?;

            output.print("")?;
            output.header(&format!("Services ({}):", project.services.len()))?;
            for service in &project.services {
                let status = if service.enabled { "Enabled" } else { "Disabled" };
                let image = if service.image.is_empty() {
                    "-"
                } else {
                    service.image.as_str()
                };
                output.print(&format!(
                    "  {:<16} {:<12} {:<22} {status}",
                    service.name, service.service_type, image
                ))?;
            }

            if !project.variables.is_empty() {
                output.print("")?;
                output.header("Variables:")?;
                for (key, value) in &project.variables {
                    output.print(&format!("  {key} = {value}"))?;
                }
            }
        }
    }

    Ok(())
}

/// Category name to its presets; categories sort by name, presets keep
/// catalog order.
fn group_by_category(presets: &[Preset]) -> BTreeMap<&str, Vec<&Preset>> {
    let mut grouped: BTreeMap<&str, Vec<&Preset>> = BTreeMap::new();
    for preset in presets {
        grouped.entry(preset.category.as_str()).or_default().push(preset);
    }
    grouped
}
