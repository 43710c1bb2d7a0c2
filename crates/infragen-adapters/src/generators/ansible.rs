//! Ansible renderer.
//!
//! Builds the playbook and inventory as typed documents and serialises
//! them with `serde_yaml`. `requirements.yml` is only written when
//! collections have been declared.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer, ser::SerializeMap};
use tracing::{debug, instrument};

use infragen_core::{
    application::{ApplicationError, ports::Generator},
    domain::{GeneratedFile, ProjectConfig, ServiceConfig, TargetKind},
    error::InfraGenResult,
};

pub const PLAYBOOK_FILE: &str = "playbook.yml";
pub const INVENTORY_FILE: &str = "inventory.yml";
pub const REQUIREMENTS_FILE: &str = "requirements.yml";

const WEB_TYPES: [&str; 3] = ["web", "frontend", "nginx"];
const DATABASE_TYPES: [&str; 4] = ["database", "postgres", "mysql", "mongo"];
const DEPLOY_DIR: &str = "/opt/{{ project_name }}";

/// A scalar, list or flag in a vars block or module arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum VarValue {
    Text(String),
    List(Vec<String>),
    Flag(bool),
}

impl From<&str> for VarValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for VarValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for VarValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

/// One playbook task: a name and a single module invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub name: String,
    pub module: &'static str,
    pub args: Vec<(&'static str, VarValue)>,
}

impl Task {
    fn new(name: impl Into<String>, module: &'static str) -> Self {
        Self {
            name: name.into(),
            module,
            args: Vec::new(),
        }
    }

    fn arg(mut self, key: &'static str, value: impl Into<VarValue>) -> Self {
        self.args.push((key, value.into()));
        self
    }
}

/// Serialises as `{name: ..., <module>: {<args>}}`.
impl Serialize for Task {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Args<'a>(&'a [(&'static str, VarValue)]);

        impl Serialize for Args<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for (key, value) in self.0 {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry(self.module, &Args(&self.args))?;
        map.end()
    }
}

#[derive(Debug, Serialize)]
struct Play {
    name: String,
    hosts: &'static str,
    #[serde(rename = "become")]
    escalate: bool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    vars: BTreeMap<String, VarValue>,
    tasks: Vec<Task>,
}

#[derive(Debug, Serialize)]
struct Inventory {
    all: InventoryGroup,
}

#[derive(Debug, Serialize)]
struct InventoryGroup {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    children: BTreeMap<&'static str, HostGroup>,
    vars: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
struct HostGroup {
    hosts: BTreeMap<&'static str, HostVars>,
}

#[derive(Debug, Serialize)]
struct HostVars {
    ansible_host: String,
    ansible_user: String,
}

impl HostGroup {
    fn single(host: &'static str, address_var: &str) -> Self {
        Self {
            hosts: BTreeMap::from([(
                host,
                HostVars {
                    ansible_host: format!("{{{{ {address_var} | default('127.0.0.1') }}}}"),
                    ansible_user: "{{ ansible_user | default('ubuntu') }}".into(),
                },
            )]),
        }
    }
}

#[derive(Debug, Serialize)]
struct Requirements<'a> {
    collections: Vec<CollectionRef<'a>>,
}

#[derive(Debug, Serialize)]
struct CollectionRef<'a> {
    name: &'a str,
}

/// Renders the configuration-management target.
#[derive(Debug, Clone, Default)]
pub struct AnsibleGenerator {
    collections: Vec<String>,
}

impl AnsibleGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare Galaxy collections; `requirements.yml` is written iff any are set.
    pub fn with_collections<I, S>(mut self, collections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.collections.extend(collections.into_iter().map(Into::into));
        self
    }

    /// Derived playbook variables: project variables verbatim, then four
    /// facts per service keyed by its underscored name.
    pub fn vars(&self, config: &ProjectConfig) -> BTreeMap<String, VarValue> {
        let mut vars: BTreeMap<String, VarValue> = config
            .variables
            .iter()
            .map(|(k, v)| (k.clone(), VarValue::Text(v.clone())))
            .collect();

        for service in &config.services {
            let prefix = service.name.replace('-', "_");
            vars.insert(format!("{prefix}_image"), service.image.as_str().into());
            vars.insert(
                format!("{prefix}_ports"),
                VarValue::List(service.ports.iter().map(ToString::to_string).collect()),
            );
            vars.insert(
                format!("{prefix}_volumes"),
                VarValue::List(service.volumes.iter().map(ToString::to_string).collect()),
            );
            vars.insert(format!("{prefix}_enabled"), service.enabled.into());
        }

        vars
    }

    /// The fixed setup tasks, per-service tasks, then the deploy tasks.
    pub fn tasks(&self, config: &ProjectConfig) -> Vec<Task> {
        let mut tasks = vec![
            Task::new("Update package cache", "apt").arg("update_cache", true),
            Task::new("Install Docker", "package")
                .arg("name", "docker.io")
                .arg("state", "present"),
            Task::new("Start and enable Docker service", "systemd")
                .arg("name", "docker")
                .arg("state", "started")
                .arg("enabled", true),
        ];

        for service in config.enabled_services() {
            tasks.extend(service_tasks(service));
        }

        tasks.push(
            Task::new("Create deployment directory", "file")
                .arg("path", DEPLOY_DIR)
                .arg("state", "directory"),
        );
        tasks.push(
            Task::new("Deploy services with Docker Compose", "docker_compose")
                .arg("project_src", DEPLOY_DIR)
                .arg("state", "present"),
        );

        tasks
    }

    pub fn playbook(&self, config: &ProjectConfig) -> Result<String, serde_yaml::Error> {
        let play = Play {
            name: format!("Deploy {}", config.name),
            hosts: "all",
            escalate: true,
            vars: self.vars(config),
            tasks: self.tasks(config),
        };

        let body = serde_yaml::to_string(&[play])?;
        Ok(format!("---\n{body}"))
    }

    pub fn inventory(&self, config: &ProjectConfig) -> Result<String, serde_yaml::Error> {
        let mut children = BTreeMap::new();
        if config.services.iter().any(|s| s.type_matches(&WEB_TYPES)) {
            children.insert("webservers", HostGroup::single("webserver1", "webserver_ip"));
        }
        if config.services.iter().any(|s| s.type_matches(&DATABASE_TYPES)) {
            children.insert("databases", HostGroup::single("database1", "database_ip"));
        }

        let mut vars = BTreeMap::from([
            ("project_name".to_string(), config.name.clone()),
            (
                "environment".to_string(),
                config.environment_label().to_string(),
            ),
        ]);
        vars.extend(config.variables.clone());

        serde_yaml::to_string(&Inventory {
            all: InventoryGroup { children, vars },
        })
    }

    pub fn requirements(&self) -> Result<Option<String>, serde_yaml::Error> {
        if self.collections.is_empty() {
            return Ok(None);
        }

        let doc = Requirements {
            collections: self
                .collections
                .iter()
                .map(|name| CollectionRef { name })
                .collect(),
        };
        serde_yaml::to_string(&doc).map(|body| Some(format!("---\n{body}")))
    }
}

fn service_tasks(service: &ServiceConfig) -> Vec<Task> {
    let mut tasks: Vec<Task> = service
        .volumes
        .iter()
        .filter(|v| v.is_relative())
        .map(|v| {
            Task::new(format!("Create directory for {} volume", v.source), "file")
                .arg("path", v.source.as_str())
                .arg("state", "directory")
        })
        .collect();

    if service.has_image() {
        tasks.push(
            Task::new(format!("Pull {} Docker image", service.name), "docker_image")
                .arg("name", service.image.as_str())
                .arg("source", "pull"),
        );
    }

    tasks
}

fn rendering_failed(document: &str, e: serde_yaml::Error) -> ApplicationError {
    ApplicationError::RenderingFailed {
        target: TargetKind::Ansible,
        reason: format!("failed to serialise {document}: {e}"),
    }
}

impl Generator for AnsibleGenerator {
    fn target(&self) -> TargetKind {
        TargetKind::Ansible
    }

    #[instrument(skip_all, fields(project = %config.name))]
    fn generate(&self, config: &ProjectConfig) -> InfraGenResult<Vec<GeneratedFile>> {
        self.validate(config)?;

        let playbook = self
            .playbook(config)
            .map_err(|e| rendering_failed(PLAYBOOK_FILE, e))?;
        let inventory = self
            .inventory(config)
            .map_err(|e| rendering_failed(INVENTORY_FILE, e))?;

        let mut files = vec![
            GeneratedFile::new(PLAYBOOK_FILE, playbook, TargetKind::Ansible),
            GeneratedFile::new(INVENTORY_FILE, inventory, TargetKind::Ansible),
        ];

        if let Some(requirements) = self
            .requirements()
            .map_err(|e| rendering_failed(REQUIREMENTS_FILE, e))?
        {
            files.push(GeneratedFile::new(
                REQUIREMENTS_FILE,
                requirements,
                TargetKind::Ansible,
            ));
        }

        debug!(files = files.len(), "Ansible files rendered");
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use infragen_core::domain::{PortConfig, ProjectType, VolumeConfig};
    use serde_yaml::Value;

    fn project(services: Vec<ServiceConfig>) -> ProjectConfig {
        let mut cfg = ProjectConfig::new("shop", ProjectType::WebApp);
        cfg.environment = Some("staging".into());
        cfg.services = services;
        cfg
    }

    fn task_names(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn tasks_wrap_services_in_fixed_prefix_and_suffix() {
        let cfg = project(vec![
            ServiceConfig::new("db", "database")
                .with_image("postgres:15")
                .with_volume(VolumeConfig::named("db_data", "/var/lib/postgresql/data"))
                .with_volume(VolumeConfig::bind("/srv/backup", "/backup")),
            ServiceConfig::new("worker", "worker"),
            ServiceConfig::new("cache", "cache").with_image("redis:7").disabled(),
        ]);

        let tasks = AnsibleGenerator::new().tasks(&cfg);
        assert_eq!(
            task_names(&tasks),
            vec![
                "Update package cache",
                "Install Docker",
                "Start and enable Docker service",
                "Create directory for db_data volume",
                "Pull db Docker image",
                "Create deployment directory",
                "Deploy services with Docker Compose",
            ]
        );
        assert_eq!(tasks[4].module, "docker_image");
    }

    #[test]
    fn vars_derive_service_facts_with_underscored_prefix() {
        let mut cfg = project(vec![
            ServiceConfig::new("api-gateway", "gateway")
                .with_image("nginx:alpine")
                .with_port(PortConfig::mapped(8080, 80))
                .with_volume(VolumeConfig::bind("./conf", "/etc/nginx/conf.d"))
                .disabled(),
        ]);
        cfg.variables.insert("domain".into(), "example.com".into());

        let vars = AnsibleGenerator::new().vars(&cfg);
        assert_eq!(vars["domain"], VarValue::Text("example.com".into()));
        assert_eq!(vars["api_gateway_image"], VarValue::Text("nginx:alpine".into()));
        assert_eq!(vars["api_gateway_ports"], VarValue::List(vec!["8080:80".into()]));
        assert_eq!(
            vars["api_gateway_volumes"],
            VarValue::List(vec!["./conf:/etc/nginx/conf.d".into()])
        );
        assert_eq!(vars["api_gateway_enabled"], VarValue::Flag(false));
    }

    #[test]
    fn playbook_is_a_single_privileged_play() {
        let cfg = project(vec![ServiceConfig::new("web", "frontend").with_image("nginx")]);

        let playbook = AnsibleGenerator::new().playbook(&cfg).unwrap();
        assert!(playbook.starts_with("---\n"));

        let doc: Value = serde_yaml::from_str(&playbook).unwrap();
        let plays = doc.as_sequence().unwrap();
        assert_eq!(plays.len(), 1);
        let play = &plays[0];
        assert_eq!(play["name"], Value::from("Deploy shop"));
        assert_eq!(play["hosts"], Value::from("all"));
        assert_eq!(play["become"], Value::from(true));
        assert_eq!(play["vars"]["web_image"], Value::from("nginx"));
        assert_eq!(play["tasks"][0]["apt"]["update_cache"], Value::from(true));
        assert_eq!(
            play["tasks"][5]["docker_compose"]["project_src"],
            Value::from("/opt/{{ project_name }}")
        );
    }

    #[test]
    fn inventory_groups_follow_service_types() {
        let cfg = project(vec![
            ServiceConfig::new("ui", "frontend"),
            ServiceConfig::new("db", "database"),
        ]);
        let doc: Value =
            serde_yaml::from_str(&AnsibleGenerator::new().inventory(&cfg).unwrap()).unwrap();

        let children = &doc["all"]["children"];
        assert_eq!(
            children["webservers"]["hosts"]["webserver1"]["ansible_host"],
            Value::from("{{ webserver_ip | default('127.0.0.1') }}")
        );
        assert_eq!(
            children["databases"]["hosts"]["database1"]["ansible_user"],
            Value::from("{{ ansible_user | default('ubuntu') }}")
        );
        assert_eq!(doc["all"]["vars"]["project_name"], Value::from("shop"));
        assert_eq!(doc["all"]["vars"]["environment"], Value::from("staging"));
    }

    #[test]
    fn inventory_without_matching_types_has_no_groups() {
        let cfg = project(vec![ServiceConfig::new("q", "queue")]);
        let doc: Value =
            serde_yaml::from_str(&AnsibleGenerator::new().inventory(&cfg).unwrap()).unwrap();

        assert!(doc["all"].get("children").is_none());
    }

    #[test]
    fn requirements_only_when_collections_declared() {
        let cfg = project(vec![ServiceConfig::new("web", "frontend")]);

        let files = AnsibleGenerator::new().generate(&cfg).unwrap();
        let paths: Vec<_> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec![PLAYBOOK_FILE, INVENTORY_FILE]);

        let files = AnsibleGenerator::new()
            .with_collections(["community.docker"])
            .generate(&cfg)
            .unwrap();
        assert_eq!(files.len(), 3);
        assert!(files[2].content.contains("community.docker"));
    }
}
