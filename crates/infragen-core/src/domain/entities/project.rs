//! The project description every generator consumes.
//!
//! Field names follow the persisted document exactly (`type`,
//! `depends_on`, `read_only`, `created_at`, ...). Key→value maps are
//! `BTreeMap`s so that every renderer sees keys in lexicographic order.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ProjectType, VolumeKind};

/// One deployable project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default)]
    pub services: Vec<ServiceConfig>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectConfig {
    /// A fresh, empty project stamped with the current instant.
    pub fn new(name: impl Into<String>, project_type: ProjectType) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            project_type,
            description: None,
            version: None,
            environment: None,
            services: Vec::new(),
            variables: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Services that will actually be rendered, in input order.
    pub fn enabled_services(&self) -> impl Iterator<Item = &ServiceConfig> {
        self.services.iter().filter(|s| s.enabled)
    }

    pub fn service(&self, name: &str) -> Option<&ServiceConfig> {
        self.services.iter().find(|s| s.name == name)
    }

    /// Environment label, or the empty string when unset.
    pub fn environment_label(&self) -> &str {
        self.environment.as_deref().unwrap_or("")
    }

    /// Mark the project as modified now.
    pub fn touch(&mut self) {
        let now = Utc::now();
        if now > self.updated_at {
            self.updated_at = now;
        }
    }
}

/// One deployable unit inside a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub service_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<PortConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<VolumeConfig>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    #[serde(default)]
    pub enabled: bool,
}

impl ServiceConfig {
    /// An enabled service with no image, ports, volumes or environment.
    pub fn new(name: impl Into<String>, service_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            service_type: service_type.into(),
            image: String::new(),
            ports: Vec::new(),
            volumes: Vec::new(),
            environment: BTreeMap::new(),
            depends_on: Vec::new(),
            enabled: true,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_port(mut self, port: PortConfig) -> Self {
        self.ports.push(port);
        self
    }

    pub fn with_volume(mut self, volume: VolumeConfig) -> Self {
        self.volumes.push(volume);
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(key.into(), value.into());
        self
    }

    pub fn depending_on(mut self, service: impl Into<String>) -> Self {
        self.depends_on.push(service.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }

    /// The first declared container port, if any.
    pub fn primary_port(&self) -> Option<u16> {
        self.ports.first().map(|p| p.container)
    }

    /// Case-insensitive substring match of the service type against any of
    /// `needles`.
    pub fn type_matches(&self, needles: &[&str]) -> bool {
        let haystack = self.service_type.to_lowercase();
        needles
            .iter()
            .any(|n| haystack.contains(&n.to_lowercase()))
    }
}

/// A port mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<u16>,
    pub container: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

impl PortConfig {
    pub fn container(port: u16) -> Self {
        Self {
            host: None,
            container: port,
            protocol: None,
        }
    }

    pub fn mapped(host: u16, container: u16) -> Self {
        Self {
            host: Some(host),
            container,
            protocol: None,
        }
    }

    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }
}

/// `host:container` when a host port is set, `container` otherwise.
impl fmt::Display for PortConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.host {
            Some(host) => write!(f, "{}:{}", host, self.container),
            None => write!(f, "{}", self.container),
        }
    }
}

/// A mount mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeConfig {
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub read_only: bool,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<VolumeKind>,
}

impl VolumeConfig {
    /// A read-write named volume.
    pub fn named(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            read_only: false,
            kind: Some(VolumeKind::Volume),
        }
    }

    /// A read-write host bind mount.
    pub fn bind(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            read_only: false,
            kind: Some(VolumeKind::Bind),
        }
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn is_named(&self) -> bool {
        self.kind == Some(VolumeKind::Volume)
    }

    /// Sources not rooted at `/` are relative paths or volume names.
    pub fn is_relative(&self) -> bool {
        !self.source.is_empty() && !self.source.starts_with('/')
    }
}

/// `source:target`, without the read-only suffix.
impl fmt::Display for VolumeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_display_combines_host_and_container() {
        assert_eq!(PortConfig::mapped(8080, 80).to_string(), "8080:80");
        assert_eq!(PortConfig::container(5432).to_string(), "5432");
    }

    #[test]
    fn volume_relative_detection() {
        assert!(VolumeConfig::named("db_data", "/var/lib/data").is_relative());
        assert!(VolumeConfig::bind("./conf", "/etc/conf").is_relative());
        assert!(!VolumeConfig::bind("/srv/conf", "/etc/conf").is_relative());
        assert!(!VolumeConfig::bind("", "/etc/conf").is_relative());
    }

    #[test]
    fn type_matching_is_case_insensitive_substring() {
        let svc = ServiceConfig::new("edge", "Nginx-Proxy");
        assert!(svc.type_matches(&["web", "nginx"]));
        assert!(!svc.type_matches(&["database"]));
    }

    #[test]
    fn enabled_services_preserve_order() {
        let mut cfg = ProjectConfig::new("demo", ProjectType::WebApp);
        cfg.services = vec![
            ServiceConfig::new("a", "web"),
            ServiceConfig::new("b", "web").disabled(),
            ServiceConfig::new("c", "web"),
        ];
        let names: Vec<_> = cfg.enabled_services().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn new_project_has_equal_timestamps() {
        let cfg = ProjectConfig::new("demo", ProjectType::Ml);
        assert_eq!(cfg.created_at, cfg.updated_at);
    }

    #[test]
    fn touch_never_moves_backwards() {
        let mut cfg = ProjectConfig::new("demo", ProjectType::Ml);
        let before = cfg.updated_at;
        cfg.touch();
        assert!(cfg.updated_at >= before);
        assert_eq!(cfg.created_at, before);
    }
}
