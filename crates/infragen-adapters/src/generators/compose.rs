//! Docker Compose renderer.
//!
//! Produces `docker-compose.yml` and, when any value belongs outside the
//! manifest, a `.env` file. The manifest is written line by line so its
//! layout is exactly what a person would write by hand.

use std::fmt::{self, Write as _};

use tracing::{debug, instrument};

use infragen_core::{
    application::{ApplicationError, ports::Generator},
    domain::{GeneratedFile, ProjectConfig, ServiceConfig, TargetKind, advisory},
    error::InfraGenResult,
};

use super::yaml::quote_if_needed;

pub const COMPOSE_FILE: &str = "docker-compose.yml";
pub const ENV_FILE: &str = ".env";

/// Renders the container-orchestration target.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComposeGenerator;

impl ComposeGenerator {
    pub fn new() -> Self {
        Self
    }

    /// The `docker-compose.yml` document.
    pub fn manifest(&self, config: &ProjectConfig) -> Result<String, fmt::Error> {
        let mut out = String::from("services:\n");

        for service in config.enabled_services() {
            write_service(&mut out, service)?;
            out.push('\n');
        }

        // Every declaration is listed, across all services.
        let named: Vec<&str> = config
            .services
            .iter()
            .flat_map(|s| s.volumes.iter())
            .filter(|v| v.is_named())
            .map(|v| v.source.as_str())
            .collect();

        if !named.is_empty() {
            out.push_str("volumes:\n");
            for name in named {
                writeln!(out, "  {}:", quote_if_needed(name))?;
            }
        }

        Ok(out)
    }

    /// The `.env` document, or `None` when nothing qualifies.
    ///
    /// Project variables come first, then each service's secret-looking
    /// entries prefixed with the upper-cased service name.
    pub fn env_file(&self, config: &ProjectConfig) -> Option<String> {
        let mut lines: Vec<String> = config
            .variables
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();

        for service in &config.services {
            let prefix = service.name.to_uppercase();
            lines.extend(
                service
                    .environment
                    .iter()
                    .filter(|(k, _)| advisory::is_secret_env_key(k))
                    .map(|(k, v)| format!("{prefix}_{k}={v}")),
            );
        }

        if lines.is_empty() {
            return None;
        }

        let mut out = lines.join("\n");
        out.push('\n');
        Some(out)
    }
}

fn write_service(out: &mut String, service: &ServiceConfig) -> fmt::Result {
    writeln!(out, "  {}:", quote_if_needed(&service.name))?;

    if service.has_image() {
        writeln!(out, "    image: {}", quote_if_needed(&service.image))?;
    }

    if !service.ports.is_empty() {
        out.push_str("    ports:\n");
        for port in &service.ports {
            write!(out, "      - \"{port}\"")?;
            if let Some(protocol) = port.protocol.as_deref().filter(|p| !p.is_empty()) {
                write!(out, " # {protocol}")?;
            }
            out.push('\n');
        }
    }

    if !service.volumes.is_empty() {
        out.push_str("    volumes:\n");
        for volume in &service.volumes {
            let suffix = if volume.read_only { ":ro" } else { "" };
            let entry = format!("{volume}{suffix}");
            writeln!(out, "      - {}", quote_if_needed(&entry))?;
        }
    }

    if !service.environment.is_empty() {
        out.push_str("    environment:\n");
        for (key, value) in &service.environment {
            writeln!(
                out,
                "      {}: {}",
                quote_if_needed(key),
                quote_if_needed(value)
            )?;
        }
    }

    if !service.depends_on.is_empty() {
        out.push_str("    depends_on:\n");
        for dep in &service.depends_on {
            writeln!(out, "      - {}", quote_if_needed(dep))?;
        }
    }

    Ok(())
}

impl Generator for ComposeGenerator {
    fn target(&self) -> TargetKind {
        TargetKind::Docker
    }

    #[instrument(skip_all, fields(project = %config.name))]
    fn generate(&self, config: &ProjectConfig) -> InfraGenResult<Vec<GeneratedFile>> {
        self.validate(config)?;

        let manifest = self
            .manifest(config)
            .map_err(|e| ApplicationError::RenderingFailed {
                target: TargetKind::Docker,
                reason: format!("failed to write compose manifest: {e}"),
            })?;

        let mut files = vec![GeneratedFile::new(COMPOSE_FILE, manifest, TargetKind::Docker)];
        if let Some(env) = self.env_file(config) {
            files.push(GeneratedFile::new(ENV_FILE, env, TargetKind::Docker));
        }

        debug!(files = files.len(), "Compose files rendered");
        Ok(files)
    }
}
