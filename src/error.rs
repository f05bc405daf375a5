//! Unified error types for Helmsman

use std::time::Duration;
use thiserror::Error;

/// Unified Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for Helmsman
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Session creation failed. Fatal to the scenario, never retried.
    #[error("Session initialization failed: {0}")]
    SessionInit(String),

    /// An element operation was invoked without an active session
    #[error("No active session for worker '{0}'")]
    NoActiveSession(String),

    /// No locator record exists for the page
    #[error("Locator source not found for page '{0}'")]
    LocatorSourceNotFound(String),

    /// Locator record exists but could not be parsed
    #[error("Malformed locator source for page '{page}': {detail}")]
    LocatorParse { page: String, detail: String },

    /// Element name missing from a page's locator set
    #[error("Locator '{element}' not found in page '{page}'")]
    LocatorNotFound { page: String, element: String },

    /// Unrecognized locator strategy type
    #[error("Unsupported locator type: {0}")]
    UnsupportedStrategy(String),

    /// A wait condition did not become satisfied before its deadline
    #[error("Timed out after {timeout_ms}ms waiting for {what} (last observed: {last})")]
    WaitTimeout {
        what: String,
        timeout_ms: u64,
        last: String,
    },

    /// Underlying browser-control handle failure
    #[error("Driver error: {0}")]
    Driver(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new session initialization error
    pub fn session_init<S: Into<String>>(msg: S) -> Self {
        Error::SessionInit(msg.into())
    }

    /// Create a new no-active-session error
    pub fn no_active_session<S: Into<String>>(worker: S) -> Self {
        Error::NoActiveSession(worker.into())
    }

    /// Create a new locator parse error
    pub fn locator_parse<P: Into<String>, D: Into<String>>(page: P, detail: D) -> Self {
        Error::LocatorParse {
            page: page.into(),
            detail: detail.into(),
        }
    }

    /// Create a new locator not found error
    pub fn locator_not_found<P: Into<String>, E: Into<String>>(page: P, element: E) -> Self {
        Error::LocatorNotFound {
            page: page.into(),
            element: element.into(),
        }
    }

    /// Create a new wait timeout error
    pub fn wait_timeout<W: Into<String>, L: Into<String>>(
        what: W,
        timeout: Duration,
        last: L,
    ) -> Self {
        Error::WaitTimeout {
            what: what.into(),
            timeout_ms: timeout.as_millis() as u64,
            last: last.into(),
        }
    }

    /// Create a new driver error
    pub fn driver<S: Into<String>>(msg: S) -> Self {
        Error::Driver(msg.into())
    }

    /// Create a new configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Error::Configuration(msg.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Error::Internal(msg.into())
    }
}
