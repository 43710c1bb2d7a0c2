use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::entities::project::{PortConfig, ServiceConfig, VolumeConfig};

/// A catalog template from which a project is instantiated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub services: Vec<PresetService>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

fn default_category() -> String {
    "General".into()
}

impl Preset {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category: category.into(),
            services: Vec::new(),
            variables: BTreeMap::new(),
            tags: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_service(mut self, service: PresetService) -> Self {
        self.services.push(service);
        self
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }
}

/// A service template inside a preset.
///
/// `optional` services are instantiated disabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetService {
    pub name: String,
    #[serde(rename = "type")]
    pub service_type: String,
    #[serde(default)]
    pub description: String,
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
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
}

impl PresetService {
    pub fn new(name: impl Into<String>, service_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            service_type: service_type.into(),
            description: String::new(),
            image: String::new(),
            ports: Vec::new(),
            volumes: Vec::new(),
            environment: BTreeMap::new(),
            depends_on: Vec::new(),
            optional: false,
        }
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
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

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Instantiate as a project service.
    ///
    /// `optional` inverts into `enabled`; the environment map is copied.
    pub fn to_service(&self) -> ServiceConfig {
        ServiceConfig {
            name: self.name.clone(),
            service_type: self.service_type.clone(),
            image: self.image.clone(),
            ports: self.ports.clone(),
            volumes: self.volumes.clone(),
            environment: self.environment.clone(),
            depends_on: self.depends_on.clone(),
            enabled: !self.optional,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_service_is_disabled_when_instantiated() {
        let svc = PresetService::new("mysql", "database").optional().to_service();
        assert!(!svc.enabled);

        let svc = PresetService::new("postgres", "database").to_service();
        assert!(svc.enabled);
    }

    #[test]
    fn instantiation_copies_environment_and_dependencies() {
        let preset_svc = PresetService::new("api", "api")
            .with_env("NODE_ENV", "development")
            .depending_on("database");
        let svc = preset_svc.to_service();

        assert_eq!(svc.environment, preset_svc.environment);
        assert_eq!(svc.depends_on, vec!["database".to_string()]);
    }
}
