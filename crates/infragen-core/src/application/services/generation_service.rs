//! Generation Service - main application orchestrator.
//!
//! This service coordinates the generation workflow:
//! 1. Pick the generator registered for each requested target
//! 2. Validate and render the project per target
//! 3. Write each target's files under an output root
//!
//! Targets are independent. A failure in one target is recorded against
//! it and the remaining targets still run.

use std::path::Path;

use tracing::{error, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, Generator},
    },
    domain::{GeneratedFile, ProjectConfig, TargetKind, ValidationErrors},
    error::{InfraGenError, InfraGenResult},
};

/// The result of one target within a generation request.
#[derive(Debug, Clone)]
pub struct TargetOutcome {
    pub target: TargetKind,
    pub result: InfraGenResult<Vec<GeneratedFile>>,
}

impl TargetOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Files produced for this target; empty on failure.
    pub fn files(&self) -> &[GeneratedFile] {
        match &self.result {
            Ok(files) => files,
            Err(_) => &[],
        }
    }

    pub fn error(&self) -> Option<&InfraGenError> {
        self.result.as_ref().err()
    }
}

/// Per-target outcomes, in request order.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub outcomes: Vec<TargetOutcome>,
}

impl GenerationReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &TargetOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &TargetOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(TargetOutcome::is_success)
    }

    pub fn file_count(&self) -> usize {
        self.outcomes.iter().map(|o| o.files().len()).sum()
    }

    /// `Err(GenerationIncomplete)` if any target failed.
    pub fn ensure_complete(&self) -> InfraGenResult<()> {
        let failed = self.failed().count();
        if failed == 0 {
            Ok(())
        } else {
            Err(ApplicationError::GenerationIncomplete {
                failed,
                total: self.outcomes.len(),
            }
            .into())
        }
    }
}

/// Main generation service.
pub struct GenerationService {
    generators: Vec<Box<dyn Generator>>,
    filesystem: Box<dyn Filesystem>,
}

impl GenerationService {
    /// Create a generation service with the given generators and filesystem.
    ///
    /// When two generators report the same target, the first one wins.
    pub fn new(generators: Vec<Box<dyn Generator>>, filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            generators,
            filesystem,
        }
    }

    /// Targets with a registered generator, in registration order.
    pub fn targets(&self) -> Vec<TargetKind> {
        self.generators.iter().map(|g| g.target()).collect()
    }

    /// Run each target's generation-minimum validation.
    pub fn validate_targets(
        &self,
        config: &ProjectConfig,
        targets: &[TargetKind],
    ) -> Vec<(TargetKind, Result<(), ValidationErrors>)> {
        targets
            .iter()
            .filter_map(|&target| {
                self.generator(target)
                    .map(|g| (target, g.validate(config)))
            })
            .collect()
    }

    /// Render every requested target without touching the filesystem.
    #[instrument(skip_all, fields(project = %config.name, targets = targets.len()))]
    pub fn render(&self, config: &ProjectConfig, targets: &[TargetKind]) -> GenerationReport {
        let outcomes = targets
            .iter()
            .map(|&target| {
                let result = match self.generator(target) {
                    Some(generator) => generator.generate(config),
                    None => Err(ApplicationError::RenderingFailed {
                        target,
                        reason: "no generator registered".into(),
                    }
                    .into()),
                };

                match &result {
                    Ok(files) => info!(kind = %target, files = files.len(), "Target rendered"),
                    Err(e) => warn!(kind = %target, error = %e, "Target failed"),
                }

                TargetOutcome { target, result }
            })
            .collect();

        GenerationReport { outcomes }
    }

    /// Render every requested target and write the files under
    /// `output_root`. Targets whose files cannot be written are marked
    /// failed; the others are unaffected.
    #[instrument(skip_all, fields(project = %config.name, output = %output_root.display()))]
    pub fn generate(
        &self,
        config: &ProjectConfig,
        targets: &[TargetKind],
        output_root: &Path,
    ) -> GenerationReport {
        let mut report = self.render(config, targets);

        for outcome in &mut report.outcomes {
            let Ok(files) = &outcome.result else {
                continue;
            };
            if let Err(e) = self.write_files(output_root, files) {
                error!(kind = %outcome.target, error = %e, "Writing target files failed");
                outcome.result = Err(e);
            }
        }

        info!(
            written = report.file_count(),
            failed = report.failed().count(),
            "Generation finished"
        );
        report
    }

    fn generator(&self, target: TargetKind) -> Option<&dyn Generator> {
        self.generators
            .iter()
            .find(|g| g.target() == target)
            .map(|g| g.as_ref())
    }

    fn write_files(&self, root: &Path, files: &[GeneratedFile]) -> InfraGenResult<()> {
        self.filesystem.create_dir_all(root)?;

        for file in files {
            let path = root.join(file.path());
            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(&path, &file.content)?;
        }

        Ok(())
    }
}
