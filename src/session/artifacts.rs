//! Screenshot artifact sink
//!
//! The registry hands image bytes to a sink and gets back a path; storage
//! failures are the caller's to absorb.

use crate::Result;
use std::path::{Path, PathBuf};

/// Accepts named image artifacts and returns where they were stored
pub trait ArtifactSink: Send + Sync {
    fn store(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// Filesystem sink writing artifacts under one directory
#[derive(Debug, Clone)]
pub struct FsArtifactSink {
    dir: PathBuf,
}

impl FsArtifactSink {
    /// Create a sink rooted at `dir`; the directory is created on first use
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtifactSink for FsArtifactSink {
    fn store(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        std::fs::write(&path, bytes)?;
        Ok(path)
    }
}
