//! Target renderers and the target → renderer switch table.

mod ansible;
mod compose;
mod terraform;
mod yaml;

use infragen_core::{
    application::ports::Generator,
    domain::{GeneratedFile, ProjectConfig, TargetKind, ValidationErrors},
    error::InfraGenResult,
};

pub use ansible::{AnsibleGenerator, Task, VarValue};
pub use compose::ComposeGenerator;
pub use terraform::TerraformGenerator;

/// Output file names, per target.
pub mod files {
    pub use super::ansible::{INVENTORY_FILE, PLAYBOOK_FILE, REQUIREMENTS_FILE};
    pub use super::compose::{COMPOSE_FILE, ENV_FILE};
    pub use super::terraform::{MAIN_FILE, OUTPUTS_FILE, PROVIDER_FILE, VARIABLES_FILE};
}

/// One renderer per target, selected by [`TargetKind`].
#[derive(Debug, Clone)]
pub enum TargetGenerator {
    Docker(ComposeGenerator),
    Ansible(AnsibleGenerator),
    Terraform(TerraformGenerator),
}

impl TargetGenerator {
    pub fn for_target(target: TargetKind) -> Self {
        match target {
            TargetKind::Docker => Self::Docker(ComposeGenerator::new()),
            TargetKind::Ansible => Self::Ansible(AnsibleGenerator::new()),
            TargetKind::Terraform => Self::Terraform(TerraformGenerator::new()),
        }
    }

    fn inner(&self) -> &dyn Generator {
        match self {
            Self::Docker(g) => g,
            Self::Ansible(g) => g,
            Self::Terraform(g) => g,
        }
    }
}

impl Generator for TargetGenerator {
    fn target(&self) -> TargetKind {
        self.inner().target()
    }

    fn validate(&self, config: &ProjectConfig) -> Result<(), ValidationErrors> {
        self.inner().validate(config)
    }

    fn generate(&self, config: &ProjectConfig) -> InfraGenResult<Vec<GeneratedFile>> {
        self.inner().generate(config)
    }
}

/// Every built-in generator, in [`TargetKind::ALL`] order.
pub fn builtin() -> Vec<Box<dyn Generator>> {
    TargetKind::ALL
        .into_iter()
        .map(|t| Box::new(TargetGenerator::for_target(t)) as Box<dyn Generator>)
        .collect()
}
