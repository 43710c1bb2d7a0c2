//! Infrastructure adapters for infragen.
//!
//! This crate implements the ports defined in `infragen-core::application::ports`.
//! Renderers are pure; persistence, preset loading and file writing are the
//! only places that touch the disk.

pub mod builtin_presets;
pub mod catalog;
pub mod filesystem;
pub mod generators;
pub mod preset_loader;
pub mod project_store;

// Re-export commonly used adapters
pub use catalog::InMemoryCatalog;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use generators::{AnsibleGenerator, ComposeGenerator, TargetGenerator, TerraformGenerator};
pub use preset_loader::FilesystemPresetLoader;
pub use project_store::{MemoryProjectStore, YamlProjectStore};
