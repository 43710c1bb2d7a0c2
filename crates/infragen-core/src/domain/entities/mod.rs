pub mod common;
pub mod generated_file;
pub mod preset;
pub mod project;

pub use common::RelativePath;
pub use generated_file::GeneratedFile;
pub use preset::{Preset, PresetService};
pub use project::{PortConfig, ProjectConfig, ServiceConfig, VolumeConfig};
