//! Condition-polling wait engine
//!
//! A single bounded poll loop bridges asynchronous UI rendering with
//! synchronous assertions; named conditions are thin probes built on top
//! of it.

pub mod conditions;
pub mod engine;

pub use engine::{PollState, WaitEngine, DEFAULT_POLL_INTERVAL};
