//! Project Service - whole-project checks and persistence.

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::{
    application::{ApplicationError, ports::ProjectStore},
    domain::{Advisory, DomainValidator, ProjectConfig, advisory},
    error::InfraGenResult,
};

/// Default name of the project document.
pub const PROJECT_FILE: &str = "infra-gen.yml";

pub struct ProjectService {
    store: Box<dyn ProjectStore>,
}

impl ProjectService {
    pub fn new(store: Box<dyn ProjectStore>) -> Self {
        Self { store }
    }

    /// Whole-project validation: the generation minimum plus unique
    /// service names and resolvable dependencies.
    pub fn validate(&self, config: &ProjectConfig) -> InfraGenResult<()> {
        DomainValidator::validate_project(config)?;
        Ok(())
    }

    /// Non-fatal recommendations for `config`.
    pub fn advisories(&self, config: &ProjectConfig) -> Vec<Advisory> {
        advisory::review(config)
    }

    /// Persist `config`, refusing to replace an existing document unless
    /// `overwrite` is set.
    #[instrument(skip(self, config), fields(project = %config.name, path = %path.display()))]
    pub fn save(&self, config: &ProjectConfig, path: &Path, overwrite: bool) -> InfraGenResult<()> {
        if !overwrite && self.store.exists(path) {
            return Err(ApplicationError::ProjectExists {
                path: path.to_path_buf(),
            }
            .into());
        }
        self.store.save(config, path)?;
        info!("Project saved");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn load(&self, path: &Path) -> InfraGenResult<ProjectConfig> {
        if !self.store.exists(path) {
            return Err(ApplicationError::ProjectNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        let config = self.store.load(path)?;
        debug!(project = %config.name, services = config.services.len(), "Project loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::application::ports::MockProjectStore;
    use crate::domain::{ProjectType, ServiceConfig};
    use crate::error::{ErrorCategory, InfraGenError};

    fn demo() -> ProjectConfig {
        let mut cfg = ProjectConfig::new("demo", ProjectType::WebApp);
        cfg.services = vec![ServiceConfig::new("web", "frontend")];
        cfg
    }

    #[test]
    fn save_refuses_to_overwrite_without_flag() {
        let mut store = MockProjectStore::new();
        store.expect_exists().return_const(true);
        store.expect_save().never();
        let service = ProjectService::new(Box::new(store));

        let err = service
            .save(&demo(), Path::new("infra-gen.yml"), false)
            .unwrap_err();
        assert!(matches!(
            err,
            InfraGenError::Application(ApplicationError::ProjectExists { .. })
        ));
    }

    #[test]
    fn save_with_overwrite_skips_existence_check() {
        let mut store = MockProjectStore::new();
        store.expect_exists().never();
        store.expect_save().times(1).returning(|_, _| Ok(()));
        let service = ProjectService::new(Box::new(store));

        service
            .save(&demo(), Path::new("infra-gen.yml"), true)
            .unwrap();
    }

    #[test]
    fn load_reports_missing_document_as_not_found() {
        let mut store = MockProjectStore::new();
        store.expect_exists().return_const(false);
        let service = ProjectService::new(Box::new(store));

        let err = service.load(&PathBuf::from("missing.yml")).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn validate_rejects_duplicate_names() {
        let service = ProjectService::new(Box::new(MockProjectStore::new()));
        let mut cfg = demo();
        cfg.services.push(ServiceConfig::new("web", "frontend"));

        let err = service.validate(&cfg).unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert!(errors.iter().any(|e| e.message.contains("duplicate service name: web")));
    }
}
