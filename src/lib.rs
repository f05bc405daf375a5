//! Helmsman: browser-automation execution core
//!
//! This library provides the execution core for parallel, isolated UI test
//! runs: per-worker session lifecycle, declarative locator resolution and a
//! condition-polling wait engine, composed into page-level interactions.

pub mod error;
pub mod config;
pub mod logging;

pub mod driver;
pub mod locator;
pub mod wait;
pub mod session;
pub mod page;
pub mod harness;

// Re-exports
pub use error::{Error, Result};

/// Helmsman library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
