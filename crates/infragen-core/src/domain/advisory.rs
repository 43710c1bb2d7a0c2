//! Non-fatal recommendations about a project.
//!
//! Advisories never fail a command. They are shown alongside validation
//! results so the user can tighten a configuration before deploying it.

use std::fmt;

use crate::domain::entities::ProjectConfig;

/// Substrings marking a service environment key as a secret.
const SECRET_ENV_MARKERS: [&str; 4] = ["PASSWORD", "SECRET", "KEY", "TOKEN"];

/// Substrings that make a variable name security-relevant.
const SENSITIVE_MARKERS: [&str; 5] = ["password", "secret", "key", "token", "auth"];

/// `true` if an environment key holds a credential and belongs in `.env`.
pub fn is_secret_env_key(key: &str) -> bool {
    let upper = key.to_uppercase();
    SECRET_ENV_MARKERS.iter().any(|m| upper.contains(m))
}

/// `true` if a variable name looks security-relevant.
pub fn is_sensitive_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    SENSITIVE_MARKERS.iter().any(|m| lower.contains(m))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisoryKind {
    Warning,
    Security,
}

impl AdvisoryKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Security => "security",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory {
    pub kind: AdvisoryKind,
    pub message: String,
}

impl Advisory {
    fn warning(message: String) -> Self {
        Self {
            kind: AdvisoryKind::Warning,
            message,
        }
    }

    fn security(message: String) -> Self {
        Self {
            kind: AdvisoryKind::Security,
            message,
        }
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.message)
    }
}

/// Compute every advisory for `config`: warnings first, then security notes.
pub fn review(config: &ProjectConfig) -> Vec<Advisory> {
    let mut out = Vec::new();

    for service in &config.services {
        if service.enabled && !service.has_image() {
            out.push(Advisory::warning(format!(
                "service '{}' has no image specified",
                service.name
            )));
        }
        if service.service_type == "frontend" && service.ports.is_empty() {
            out.push(Advisory::warning(format!(
                "frontend service '{}' has no ports exposed",
                service.name
            )));
        }
        if service.service_type == "database" && service.volumes.is_empty() {
            out.push(Advisory::warning(format!(
                "database service '{}' has no persistent volumes",
                service.name
            )));
        }
    }

    for key in config.variables.keys() {
        if is_sensitive_name(key) {
            out.push(Advisory::security(format!(
                "variable '{key}' may contain sensitive data; consider a secret manager"
            )));
        }
    }

    for service in &config.services {
        for key in service.environment.keys() {
            if is_sensitive_name(key) {
                out.push(Advisory::security(format!(
                    "service '{}' environment variable '{key}' may contain sensitive data",
                    service.name
                )));
            }
        }
    }

    out
}
