//! Domain value objects: ProjectType, TargetKind, VolumeKind.
//!
//! # Design
//!
//! These are pure value types — `Copy`, equality-by-value, no identity.
//! This file's only job is to define the types, their string
//! representations, and their `FromStr` parsers.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── ProjectType ───────────────────────────────────────────────────────────────

/// The archetype of a project, derived from the preset it was created from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    #[default]
    WebApp,
    Microservice,
    Database,
    Ml,
    Infrastructure,
}

impl ProjectType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WebApp => "web-app",
            Self::Microservice => "microservice",
            Self::Database => "database",
            Self::Ml => "ml",
            Self::Infrastructure => "infrastructure",
        }
    }

    /// Fixed preset-id → project-type lookup.
    ///
    /// Unknown ids fall back to [`ProjectType::WebApp`]; this never fails.
    pub fn from_preset_id(preset_id: &str) -> Self {
        match preset_id {
            "web-app" => Self::WebApp,
            "microservice" => Self::Microservice,
            "database" => Self::Database,
            "ml" => Self::Ml,
            "infrastructure" => Self::Infrastructure,
            _ => Self::default(),
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "web-app" | "webapp" | "web" => Ok(Self::WebApp),
            "microservice" | "microservices" => Ok(Self::Microservice),
            "database" | "db" => Ok(Self::Database),
            "ml" | "machine-learning" => Ok(Self::Ml),
            "infrastructure" | "infra" => Ok(Self::Infrastructure),
            other => Err(DomainError::UnknownProjectType(other.to_string())),
        }
    }
}

// ── TargetKind ────────────────────────────────────────────────────────────────

/// One of the three infrastructure ecosystems artifacts are generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// Container-orchestration manifests (docker compose).
    Docker,
    /// Configuration-management playbooks (ansible).
    Ansible,
    /// Declarative-infrastructure definitions (terraform).
    Terraform,
}

impl TargetKind {
    /// Every target, in canonical generation order.
    pub const ALL: [TargetKind; 3] = [Self::Docker, Self::Ansible, Self::Terraform];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Docker => "docker",
            Self::Ansible => "ansible",
            Self::Terraform => "terraform",
        }
    }

    /// Human-facing name of the ecosystem.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Docker => "Docker Compose",
            Self::Ansible => "Ansible",
            Self::Terraform => "Terraform",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "docker" | "compose" | "docker-compose" => Ok(Self::Docker),
            "ansible" => Ok(Self::Ansible),
            "terraform" | "tf" => Ok(Self::Terraform),
            other => Err(DomainError::UnknownTarget(other.to_string())),
        }
    }
}

// ── VolumeKind ────────────────────────────────────────────────────────────────

/// How a volume mapping is backed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeKind {
    /// Engine-managed named volume; declared in the manifest's top-level section.
    Volume,
    /// Host path bind mount.
    Bind,
}

impl VolumeKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Volume => "volume",
            Self::Bind => "bind",
        }
    }
}

impl fmt::Display for VolumeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
