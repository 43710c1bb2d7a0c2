//! Core domain layer for infragen.
//!
//! Pure data and rules: the project model, the preset model, validation
//! and advisories. No I/O, no logging, no rendering. Everything that
//! touches the outside world goes through the ports in
//! [`crate::application::ports`].

pub mod advisory;
pub mod entities;
pub mod error;
pub mod validation;
pub mod value_objects;

pub use advisory::{Advisory, AdvisoryKind};
pub use entities::{
    GeneratedFile, PortConfig, Preset, PresetService, ProjectConfig, RelativePath, ServiceConfig,
    VolumeConfig,
};
pub use error::{DomainError, ErrorCategory};
pub use validation::{DomainValidator, ValidationError, ValidationErrors};
pub use value_objects::{ProjectType, TargetKind, VolumeKind};

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn target_kind_parses_aliases() {
        assert_eq!(TargetKind::from_str("compose").unwrap(), TargetKind::Docker);
        assert_eq!(
            TargetKind::from_str("docker-compose").unwrap(),
            TargetKind::Docker
        );
        assert_eq!(TargetKind::from_str("TF").unwrap(), TargetKind::Terraform);
        assert!(matches!(
            TargetKind::from_str("kubernetes"),
            Err(DomainError::UnknownTarget(_))
        ));
    }

    #[test]
    fn project_type_lookup_falls_back_to_web_app() {
        assert_eq!(ProjectType::from_preset_id("ml"), ProjectType::Ml);
        assert_eq!(
            ProjectType::from_preset_id("something-else"),
            ProjectType::WebApp
        );
    }

    #[test]
    fn project_type_round_trips_through_display() {
        for ty in [
            ProjectType::WebApp,
            ProjectType::Microservice,
            ProjectType::Database,
            ProjectType::Ml,
            ProjectType::Infrastructure,
        ] {
            assert_eq!(ProjectType::from_str(&ty.to_string()).unwrap(), ty);
        }
    }

    #[test]
    fn validation_errors_lift_into_domain_error() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "project name is required", "");
        let err: DomainError = errors.into();

        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.to_string().starts_with("1 validation error(s):"));
    }

    #[test]
    fn unknown_preset_is_not_found() {
        let err = DomainError::PresetNotFound { id: "nope".into() };
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.suggestions().iter().any(|s| s.contains("list presets")));
    }
}
