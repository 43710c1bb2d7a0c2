//! Preset catalog adapters.

mod memory;

pub use memory::InMemoryCatalog;
