//! Validation substrate.
//!
//! A validation pass never stops at the first problem: every rule is
//! checked and every violation is pushed onto a [`ValidationErrors`]
//! accumulator owned by that pass. The accumulator is threaded through the
//! rule functions by `&mut` and handed back to the caller at the end.

use std::collections::HashSet;
use std::fmt;

use crate::domain::entities::{Preset, ProjectConfig};
use crate::domain::error::DomainError;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Path of the offending field, e.g. `services[2].name`.
    pub field: String,
    pub message: String,
    /// Display form of the offending value.
    pub value: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "validation error on field '{}': {}",
            self.field, self.message
        )
    }
}

impl std::error::Error for ValidationError {}

/// Ordered, non-fatal collection of validation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure. Order of insertion is preserved.
    pub fn add(
        &mut self,
        field: impl Into<String>,
        message: impl Into<String>,
        value: impl fmt::Display,
    ) {
        self.0.push(ValidationError {
            field: field.into(),
            message: message.into(),
            value: value.to_string(),
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// `true` if any recorded failure is on `field`.
    pub fn contains_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Close the pass: `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.has_errors() { Err(self) } else { Ok(()) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("no validation errors");
        }
        write!(f, "{} validation error(s):", self.0.len())?;
        for (i, err) in self.0.iter().enumerate() {
            write!(f, "\n{}. {}", i + 1, err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Centralized domain validation.
///
/// All validation rules live here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    /// The minimum every generator requires before rendering.
    pub fn validate_for_generation(config: &ProjectConfig) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_minimum(config, &mut errors);
        errors.into_result()
    }

    /// Whole-project validation: the generation minimum plus
    /// cross-service consistency.
    pub fn validate_project(config: &ProjectConfig) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_minimum(config, &mut errors);
        check_unique_service_names(config, &mut errors);
        check_dependencies(config, &mut errors);
        errors.into_result()
    }

    pub fn validate_preset(preset: &Preset) -> Result<(), DomainError> {
        let invalid = |reason: String| DomainError::InvalidPreset {
            id: preset.id.clone(),
            reason,
        };

        if preset.id.trim().is_empty() {
            return Err(invalid("preset id is required".into()));
        }
        if preset.name.trim().is_empty() {
            return Err(invalid("preset name is required".into()));
        }

        let mut seen = HashSet::new();
        for service in &preset.services {
            if service.name.is_empty() || service.service_type.is_empty() {
                return Err(invalid("every service needs a name and a type".into()));
            }
            if !seen.insert(service.name.as_str()) {
                return Err(invalid(format!("duplicate service name: {}", service.name)));
            }
        }

        Ok(())
    }
}

fn check_minimum(config: &ProjectConfig, errors: &mut ValidationErrors) {
    if config.name.is_empty() {
        errors.add("name", "project name is required", &config.name);
    }

    if config.services.is_empty() {
        errors.add(
            "services",
            "at least one service is required",
            config.services.len(),
        );
    }

    for (i, service) in config.services.iter().enumerate() {
        if service.name.is_empty() {
            errors.add(
                format!("services[{i}].name"),
                "service name is required",
                &service.name,
            );
        }
        if service.service_type.is_empty() {
            errors.add(
                format!("services[{i}].type"),
                "service type is required",
                &service.service_type,
            );
        }
    }
}

fn check_unique_service_names(config: &ProjectConfig, errors: &mut ValidationErrors) {
    let mut seen = HashSet::new();
    for service in &config.services {
        // Missing names are already reported by the minimum rules.
        if service.name.is_empty() {
            continue;
        }
        if !seen.insert(service.name.as_str()) {
            errors.add(
                "services",
                format!("duplicate service name: {}", service.name),
                &service.name,
            );
        }
    }
}

fn check_dependencies(config: &ProjectConfig, errors: &mut ValidationErrors) {
    let names: HashSet<&str> = config.services.iter().map(|s| s.name.as_str()).collect();

    for (i, service) in config.services.iter().enumerate() {
        for dep in &service.depends_on {
            if !names.contains(dep.as_str()) {
                errors.add(
                    format!("services[{i}].depends_on"),
                    format!("unknown dependency: {dep}"),
                    dep,
                );
            }
        }
    }
}
