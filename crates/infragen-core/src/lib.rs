//! infragen Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for infragen, a
//! generator that turns one target-agnostic project description into
//! Docker Compose, Ansible and Terraform artifacts.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           infragen-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (PresetService, ProjectService,         │
//! │  GenerationService)                     │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Generator, PresetCatalog, ProjectStore,│
//! │  Filesystem)                            │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    infragen-adapters (Infrastructure)   │
//! │ (renderers, catalog, YAML store, fs)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ProjectConfig, Preset, validation)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use infragen_core::prelude::*;
//!
//! // 1. Bootstrap a project from a preset
//! let presets = PresetService::new(catalog);
//! let config = presets.create_project("web-app", "blog", "development")?;
//!
//! // 2. Render and write every target (with injected adapters)
//! let service = GenerationService::new(generators, filesystem);
//! let report = service.generate(&config, &TargetKind::ALL, "./out".as_ref());
//! report.ensure_complete()?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerationReport, GenerationService, PresetService, ProjectService, TargetOutcome,
        ports::{Filesystem, Generator, PresetCatalog, ProjectStore},
    };
    pub use crate::domain::{
        GeneratedFile, PortConfig, Preset, ProjectConfig, ProjectType, ServiceConfig, TargetKind,
        ValidationErrors, VolumeConfig,
    };
    pub use crate::error::{InfraGenError, InfraGenResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
