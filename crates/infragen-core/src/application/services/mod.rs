//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "bootstrap a project" or "generate targets".

pub mod generation_service;
pub mod preset_service;
pub mod project_service;

pub use generation_service::{GenerationReport, GenerationService, TargetOutcome};
pub use preset_service::{CategorySummary, PresetService};
pub use project_service::{PROJECT_FILE, ProjectService};
