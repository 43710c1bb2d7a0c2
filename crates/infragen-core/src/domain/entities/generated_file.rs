use std::path::Path;

use crate::domain::{entities::common::RelativePath, value_objects::TargetKind};

/// Encoding label attached to every rendered artifact.
pub const UTF8: &str = "utf-8";

/// One rendered artifact, owned by the caller.
///
/// This is the output of a generator. It contains no business logic,
/// only data; writing it anywhere is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: RelativePath,
    pub content: String,
    pub target: TargetKind,
    pub encoding: &'static str,
}

impl GeneratedFile {
    pub fn new(path: impl Into<RelativePath>, content: String, target: TargetKind) -> Self {
        Self {
            path: path.into(),
            content,
            target,
            encoding: UTF8,
        }
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}
