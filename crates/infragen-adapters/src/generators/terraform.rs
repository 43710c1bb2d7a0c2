//! Terraform renderer (AWS provider).
//!
//! One EC2 instance per enabled service, each running its container via
//! `user_data`, behind a shared security group.

use std::collections::{HashMap, HashSet};
use std::fmt::{self, Write as _};

use tracing::{debug, instrument};

use infragen_core::{
    application::{ApplicationError, ports::Generator},
    domain::{
        DomainValidator, GeneratedFile, PortConfig, ProjectConfig, ServiceConfig, TargetKind,
        ValidationErrors,
    },
    error::InfraGenResult,
};

pub const MAIN_FILE: &str = "main.tf";
pub const VARIABLES_FILE: &str = "variables.tf";
pub const OUTPUTS_FILE: &str = "outputs.tf";
pub const PROVIDER_FILE: &str = "provider.tf";

const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_INSTANCE_TYPE: &str = "t3.micro";
const DEFAULT_ENVIRONMENT: &str = "development";
const UBUNTU_OWNER: &str = "099720109477";
const PROVIDER_BLOCK: &str = r#"terraform {
  required_version = ">= 1.3"

  required_providers {
    aws = {
      source  = "hashicorp/aws"
      version = "~> 5.0"
    }
  }
}

provider "aws" {
  region = var.aws_region
}
"#;
const UBUNTU_IMAGE_FILTER: &str = "ubuntu/images/hvm-ssd/ubuntu-jammy-22.04-amd64-server-*";

/// A Terraform identifier for `name`: anything outside `[A-Za-z0-9_]`
/// becomes `_`, and a leading digit gets an `svc_` prefix.
pub fn identifier(name: &str) -> String {
    let ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        format!("svc_{ident}")
    } else {
        ident
    }
}

/// Enabled services whose names map onto an identifier already taken by an
/// earlier enabled service. Their resources would be declared twice.
fn check_identifiers(config: &ProjectConfig, errors: &mut ValidationErrors) {
    let mut taken: HashMap<String, &str> = HashMap::new();
    for (i, service) in config.services.iter().enumerate() {
        if !service.enabled || service.name.is_empty() {
            continue;
        }
        let ident = identifier(&service.name);
        match taken.get(ident.as_str()) {
            Some(first) => errors.add(
                format!("services[{i}].name"),
                format!("conflicts with '{first}' as Terraform identifier '{ident}'"),
                &service.name,
            ),
            None => {
                taken.insert(ident, &service.name);
            }
        }
    }
}

/// `value` as a quoted HCL string literal.
pub fn string_literal(value: &str) -> String {
    format!("\"{}\"", escape_template(value).replace('"', "\\\""))
}

/// Escape template sequences and backslashes so `value` is taken literally.
fn escape_template(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace("${", "$${")
        .replace("%{", "%%{")
        .replace('\n', "\\n")
}

/// The port a service publishes on its host.
fn published(port: &PortConfig) -> u16 {
    port.host.unwrap_or(port.container)
}

fn ingress_protocol(port: &PortConfig) -> &'static str {
    match port.protocol.as_deref() {
        Some(p) if p.eq_ignore_ascii_case("udp") => "udp",
        _ => "tcp",
    }
}

/// Renders the declarative-infrastructure target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerraformGenerator;

impl TerraformGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn provider(&self) -> String {
        PROVIDER_BLOCK.to_string()
    }

    pub fn variables(&self, config: &ProjectConfig) -> Result<String, fmt::Error> {
        let mut out = String::new();

        let environment = config
            .environment
            .as_deref()
            .filter(|e| !e.is_empty())
            .unwrap_or(DEFAULT_ENVIRONMENT);

        write_variable(&mut out, "project_name", "Project name", &config.name)?;
        write_variable(&mut out, "environment", "Deployment environment", environment)?;
        write_variable(&mut out, "aws_region", "AWS region", DEFAULT_REGION)?;
        write_variable(
            &mut out,
            "instance_type",
            "EC2 instance type for every service",
            DEFAULT_INSTANCE_TYPE,
        )?;

        for service in config.enabled_services() {
            write_variable(
                &mut out,
                &format!("{}_image", identifier(&service.name)),
                &format!("Container image for {}", service.name),
                &service.image,
            )?;
        }

        Ok(out)
    }

    pub fn main(&self, config: &ProjectConfig) -> Result<String, fmt::Error> {
        let mut out = String::new();

        writeln!(out, "data \"aws_ami\" \"ubuntu\" {{")?;
        writeln!(out, "  most_recent = true")?;
        writeln!(out, "  owners      = [\"{UBUNTU_OWNER}\"]")?;
        writeln!(out)?;
        writeln!(out, "  filter {{")?;
        writeln!(out, "    name   = \"name\"")?;
        writeln!(out, "    values = [\"{UBUNTU_IMAGE_FILTER}\"]")?;
        writeln!(out, "  }}")?;
        writeln!(out, "}}")?;
        writeln!(out)?;

        self.write_security_group(&mut out, config)?;

        for service in config.enabled_services() {
            writeln!(out)?;
            write_instance(&mut out, service)?;
        }

        Ok(out)
    }

    pub fn outputs(&self, config: &ProjectConfig) -> Result<String, fmt::Error> {
        let mut out = String::new();

        for service in config.enabled_services() {
            let ident = identifier(&service.name);
            if !out.is_empty() {
                writeln!(out)?;
            }
            writeln!(out, "output \"{ident}_public_ip\" {{")?;
            writeln!(
                out,
                "  description = {}",
                string_literal(&format!("Public IP of the {} instance", service.name))
            )?;
            writeln!(out, "  value       = aws_instance.{ident}.public_ip")?;
            writeln!(out, "}}")?;

            if let Some(port) = service.primary_port() {
                writeln!(out)?;
                writeln!(out, "output \"{ident}_url\" {{")?;
                writeln!(
                    out,
                    "  description = {}",
                    string_literal(&format!("URL of the {} service", service.name))
                )?;
                writeln!(
                    out,
                    "  value       = \"http://${{aws_instance.{ident}.public_ip}}:{port}\""
                )?;
                writeln!(out, "}}")?;
            }
        }

        Ok(out)
    }

    fn write_security_group(&self, out: &mut String, config: &ProjectConfig) -> fmt::Result {
        writeln!(out, "resource \"aws_security_group\" \"services\" {{")?;
        writeln!(out, "  name        = \"${{var.project_name}}-${{var.environment}}\"")?;
        writeln!(
            out,
            "  description = {}",
            string_literal(&format!("Published ports of {}", config.name))
        )?;

        let mut seen = HashSet::new();
        for port in config.enabled_services().flat_map(|s| s.ports.iter()) {
            let (number, protocol) = (published(port), ingress_protocol(port));
            if !seen.insert((number, protocol)) {
                continue;
            }
            writeln!(out)?;
            writeln!(out, "  ingress {{")?;
            writeln!(out, "    from_port   = {number}")?;
            writeln!(out, "    to_port     = {number}")?;
            writeln!(out, "    protocol    = \"{protocol}\"")?;
            writeln!(out, "    cidr_blocks = [\"0.0.0.0/0\"]")?;
            writeln!(out, "  }}")?;
        }

        writeln!(out)?;
        writeln!(out, "  egress {{")?;
        writeln!(out, "    from_port   = 0")?;
        writeln!(out, "    to_port     = 0")?;
        writeln!(out, "    protocol    = \"-1\"")?;
        writeln!(out, "    cidr_blocks = [\"0.0.0.0/0\"]")?;
        writeln!(out, "  }}")?;
        writeln!(out, "}}")
    }
}

fn write_variable(out: &mut String, name: &str, description: &str, default: &str) -> fmt::Result {
    if !out.is_empty() {
        writeln!(out)?;
    }
    writeln!(out, "variable \"{name}\" {{")?;
    writeln!(out, "  description = {}", string_literal(description))?;
    writeln!(out, "  type        = string")?;
    writeln!(out, "  default     = {}", string_literal(default))?;
    writeln!(out, "}}")
}

fn write_instance(out: &mut String, service: &ServiceConfig) -> fmt::Result {
    let ident = identifier(&service.name);

    writeln!(out, "resource \"aws_instance\" \"{ident}\" {{")?;
    writeln!(out, "  ami                    = data.aws_ami.ubuntu.id")?;
    writeln!(out, "  instance_type          = var.instance_type")?;
    writeln!(
        out,
        "  vpc_security_group_ids = [aws_security_group.services.id]"
    )?;
    writeln!(out)?;
    writeln!(out, "  user_data = <<-EOT")?;
    writeln!(out, "    #!/bin/bash")?;
    writeln!(out, "    apt-get update -y")?;
    writeln!(out, "    apt-get install -y docker.io")?;
    writeln!(out, "    systemctl enable --now docker")?;
    let run = docker_run(service, &ident);
    if service.has_image() {
        writeln!(out, "    {run}")?;
    } else {
        // No default image: start the container only once one is supplied.
        writeln!(out, "    [ -n \"${{var.{ident}_image}}\" ] && {run}")?;
    }
    writeln!(out, "  EOT")?;
    writeln!(out)?;
    writeln!(out, "  tags = {{")?;
    writeln!(
        out,
        "    Name        = \"${{var.project_name}}-{}\"",
        escape_template(&service.name).replace('"', "\\\"")
    )?;
    writeln!(out, "    Project     = var.project_name")?;
    writeln!(out, "    Environment = var.environment")?;
    writeln!(out, "    Service     = {}", string_literal(&service.name))?;
    writeln!(out, "  }}")?;
    writeln!(out, "}}")
}

/// The `docker run` line for a service, safe inside a heredoc.
fn docker_run(service: &ServiceConfig, ident: &str) -> String {
    let mut cmd = format!(
        "docker run -d --name {} --restart unless-stopped",
        shell_quote(&service.name)
    );
    for port in &service.ports {
        cmd.push_str(&format!(" -p {}:{}", published(port), port.container));
    }
    for (key, value) in &service.environment {
        cmd.push_str(&format!(" -e {}", shell_quote(&format!("{key}={value}"))));
    }
    cmd.push_str(&format!(" ${{var.{ident}_image}}"));
    escape_heredoc_literals(&cmd, ident)
}

/// Single-quote `value` for the shell unless it is plainly safe.
fn shell_quote(value: &str) -> String {
    let safe = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_.:/=".contains(c));
    if safe {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}

/// Escape template sequences in user-supplied text while keeping the
/// trailing image interpolation live.
fn escape_heredoc_literals(cmd: &str, ident: &str) -> String {
    let interpolation = format!("${{var.{ident}_image}}");
    match cmd.strip_suffix(&interpolation) {
        Some(head) => format!(
            "{}{interpolation}",
            head.replace("${", "$${")
                .replace("%{", "%%{")
                .replace('\n', " ")
        ),
        None => cmd.to_string(),
    }
}

impl Generator for TerraformGenerator {
    fn target(&self) -> TargetKind {
        TargetKind::Terraform
    }

    fn validate(&self, config: &ProjectConfig) -> Result<(), ValidationErrors> {
        let mut errors = DomainValidator::validate_for_generation(config)
            .err()
            .unwrap_or_default();
        check_identifiers(config, &mut errors);
        errors.into_result()
    }

    #[instrument(skip_all, fields(project = %config.name))]
    fn generate(&self, config: &ProjectConfig) -> InfraGenResult<Vec<GeneratedFile>> {
        self.validate(config)?;

        let failed = |document: &str, e: fmt::Error| ApplicationError::RenderingFailed {
            target: TargetKind::Terraform,
            reason: format!("failed to write {document}: {e}"),
        };

        let main = self.main(config).map_err(|e| failed(MAIN_FILE, e))?;
        let variables = self
            .variables(config)
            .map_err(|e| failed(VARIABLES_FILE, e))?;
        let outputs = self.outputs(config).map_err(|e| failed(OUTPUTS_FILE, e))?;

        let files = vec![
            GeneratedFile::new(MAIN_FILE, main, TargetKind::Terraform),
            GeneratedFile::new(VARIABLES_FILE, variables, TargetKind::Terraform),
            GeneratedFile::new(OUTPUTS_FILE, outputs, TargetKind::Terraform),
            GeneratedFile::new(PROVIDER_FILE, self.provider(), TargetKind::Terraform),
        ];

        debug!(files = files.len(), "Terraform files rendered");
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use infragen_core::domain::ProjectType;

    fn project(services: Vec<ServiceConfig>) -> ProjectConfig {
        let mut cfg = ProjectConfig::new("blog", ProjectType::WebApp);
        cfg.environment = Some("production".into());
        cfg.services = services;
        cfg
    }

    #[test]
    fn identifiers_are_sanitised() {
        assert_eq!(identifier("api-gateway"), "api_gateway");
        assert_eq!(identifier("web.v2"), "web_v2");
        assert_eq!(identifier("3scale"), "svc_3scale");
        assert_eq!(identifier("db_1"), "db_1");
    }

    #[test]
    fn string_literals_escape_interpolation() {
        assert_eq!(string_literal("a\"b"), "\"a\\\"b\"");
        assert_eq!(string_literal("${x} %{y}"), "\"$${x} %%{y}\"");
        assert_eq!(string_literal("a\\b\nc"), "\"a\\\\b\\nc\"");
    }

    #[test]
    fn renders_one_instance_per_enabled_service() {
        let cfg = project(vec![
            ServiceConfig::new("web", "frontend")
                .with_image("nginx:alpine")
                .with_port(PortConfig::mapped(8080, 80)),
            ServiceConfig::new("api-v2", "api")
                .with_image("node:18-alpine")
                .with_port(PortConfig::container(80))
                .with_env("NODE_ENV", "production"),
            ServiceConfig::new("batch", "worker").disabled(),
        ]);

        let main = TerraformGenerator::new().main(&cfg).unwrap();
        assert!(main.contains("resource \"aws_instance\" \"web\" {"));
        assert!(main.contains("resource \"aws_instance\" \"api_v2\" {"));
        assert!(!main.contains("\"batch\""));
        assert!(main.contains(
            "docker run -d --name web --restart unless-stopped -p 8080:80 ${var.web_image}"
        ));
        assert!(main.contains("-p 80:80 -e NODE_ENV=production ${var.api_v2_image}"));
        assert_eq!(main.matches("from_port   = 8080").count(), 1);
        assert_eq!(main.matches("from_port   = 80\n").count(), 1);
    }

    #[test]
    fn user_data_keeps_untrusted_values_literal() {
        let cfg = project(vec![
            ServiceConfig::new("app", "api")
                .with_image("app:1")
                .with_env("GREETING", "it's ${HOME}"),
        ]);

        let main = TerraformGenerator::new().main(&cfg).unwrap();
        assert!(main.contains(r"-e 'GREETING=it'\''s $${HOME}' ${var.app_image}"));
    }

    #[test]
    fn variables_declare_defaults_and_images() {
        let cfg = project(vec![
            ServiceConfig::new("web", "frontend").with_image("nginx:alpine"),
        ]);

        let vars = TerraformGenerator::new().variables(&cfg).unwrap();
        for name in ["project_name", "environment", "aws_region", "instance_type", "web_image"] {
            assert!(vars.contains(&format!("variable \"{name}\" {{")), "{name}");
        }
        assert!(vars.contains("default     = \"blog\""));
        assert!(vars.contains("default     = \"production\""));
        assert!(vars.contains("default     = \"us-east-1\""));
        assert!(vars.contains("default     = \"t3.micro\""));
        assert!(vars.contains("default     = \"nginx:alpine\""));
    }

    #[test]
    fn outputs_expose_url_on_primary_port() {
        let cfg = project(vec![
            ServiceConfig::new("api", "api")
                .with_port(PortConfig::mapped(9000, 8080))
                .with_port(PortConfig::container(9090)),
            ServiceConfig::new("worker", "worker"),
        ]);

        let outputs = TerraformGenerator::new().outputs(&cfg).unwrap();
        assert!(outputs.contains("value       = \"http://${aws_instance.api.public_ip}:8080\""));
        assert!(outputs.contains("output \"worker_public_ip\" {"));
        assert!(!outputs.contains("worker_url"));
    }

    #[test]
    fn colliding_identifiers_fail_validation() {
        let cfg = project(vec![
            ServiceConfig::new("api-v2", "api").with_image("a:1"),
            ServiceConfig::new("api_v2", "api").with_image("b:1"),
            ServiceConfig::new("api.v2", "api").with_image("c:1"),
            ServiceConfig::new("3scale", "api").with_image("d:1"),
            ServiceConfig::new("svc_3scale", "api").with_image("e:1"),
        ]);

        let errors = TerraformGenerator::new().validate(&cfg).unwrap_err();
        let found: Vec<_> = errors.iter().map(|e| (e.field.as_str(), e.message.as_str())).collect();
        assert_eq!(
            found,
            [
                (
                    "services[1].name",
                    "conflicts with 'api-v2' as Terraform identifier 'api_v2'"
                ),
                (
                    "services[2].name",
                    "conflicts with 'api-v2' as Terraform identifier 'api_v2'"
                ),
                (
                    "services[4].name",
                    "conflicts with '3scale' as Terraform identifier 'svc_3scale'"
                ),
            ]
        );

        let err = TerraformGenerator::new().generate(&cfg).unwrap_err();
        assert_eq!(err.validation_errors().map(|e| e.len()), Some(3));
    }

    #[test]
    fn collision_errors_accumulate_with_the_minimum() {
        let mut cfg = project(vec![
            ServiceConfig::new("web-1", "frontend"),
            ServiceConfig::new("web_1", "frontend"),
        ]);
        cfg.name = String::new();

        let errors = TerraformGenerator::new().validate(&cfg).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains_field("name"));
        assert!(errors.contains_field("services[1].name"));
    }

    #[test]
    fn disabled_services_do_not_collide() {
        let cfg = project(vec![
            ServiceConfig::new("api-v2", "api"),
            ServiceConfig::new("api_v2", "api").disabled(),
        ]);

        assert!(TerraformGenerator::new().validate(&cfg).is_ok());
    }

    #[test]
    fn service_without_image_waits_for_one() {
        let cfg = project(vec![ServiceConfig::new("worker", "worker")]);

        let main = TerraformGenerator::new().main(&cfg).unwrap();
        assert!(main.contains(
            "    [ -n \"${var.worker_image}\" ] && docker run -d --name worker --restart unless-stopped ${var.worker_image}\n"
        ));

        let with_image = project(vec![ServiceConfig::new("web", "frontend").with_image("nginx:alpine")]);
        let main = TerraformGenerator::new().main(&with_image).unwrap();
        assert!(!main.contains("[ -n"));
    }

    #[test]
    fn generate_emits_four_documents() {
        let cfg = project(vec![ServiceConfig::new("web", "frontend")]);
        let files = TerraformGenerator::new().generate(&cfg).unwrap();

        let paths: Vec<_> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec![MAIN_FILE, VARIABLES_FILE, OUTPUTS_FILE, PROVIDER_FILE]);
        assert!(files[3].content.contains("source  = \"hashicorp/aws\""));
        assert!(files[3].content.contains("region = var.aws_region"));
    }
}
