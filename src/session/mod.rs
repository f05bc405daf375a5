//! Per-worker session lifecycle
//!
//! One browser-control handle per concurrent worker, with best-effort
//! cleanup and screenshot capture tied to session state.

pub mod artifacts;
pub mod registry;

pub use artifacts::{ArtifactSink, FsArtifactSink};
pub use registry::{Session, SessionRegistry, SessionState};
