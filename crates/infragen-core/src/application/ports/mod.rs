//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `infragen-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Generator`: renders a project for one target
//!   - `PresetCatalog`: preset lookup
//!   - `ProjectStore`: project document persistence
//!   - `Filesystem`: writing generated files
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{Filesystem, Generator, PresetCatalog, ProjectStore};

#[cfg(test)]
pub use output::{MockFilesystem, MockGenerator, MockPresetCatalog, MockProjectStore};
