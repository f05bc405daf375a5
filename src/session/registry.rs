//! Session registry
//!
//! Owns one browser-control handle per worker. Every operation on a slot is
//! confined to its owning worker; only the registry's own bookkeeping is
//! shared, behind a single lock. Lock guards are always dropped before a
//! handle is awaited.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::driver::profile::BrowserProfile;
use crate::driver::traits::{DriverFactory, DriverHandle};
use crate::session::artifacts::ArtifactSink;
use crate::{Error, Result};

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Active,
    Terminated,
}

/// One worker's browser-control session
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub worker_id: String,
    pub handle: Arc<dyn DriverHandle>,
    pub created_at: DateTime<Utc>,
    pub state: SessionState,
}

/// Per-worker session registry
pub struct SessionRegistry {
    slots: RwLock<HashMap<String, Session>>,
    factory: Arc<dyn DriverFactory>,
    artifacts: Arc<dyn ArtifactSink>,
    implicit_wait: Duration,
    page_load_timeout: Duration,
    window_width: u32,
    window_height: u32,
}

impl SessionRegistry {
    /// Create a registry over the given driver factory and artifact sink
    pub fn new(
        factory: Arc<dyn DriverFactory>,
        artifacts: Arc<dyn ArtifactSink>,
        config: &Config,
    ) -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            factory,
            artifacts,
            implicit_wait: config.implicit_wait(),
            page_load_timeout: config.page_load_timeout(),
            window_width: config.window_width,
            window_height: config.window_height,
        }
    }

    /// Create a session for `worker_id`, replacing any existing one.
    ///
    /// An existing session is terminated first; this is a recovery path for
    /// callers re-initializing between scenarios, not an error. Creation
    /// failure is fatal to the scenario and is not retried.
    pub async fn initialize(&self, worker_id: &str, profile: &BrowserProfile) -> Result<()> {
        let existing = self
            .slots
            .write()
            .map_err(|e| Error::internal(format!("Lock error: {}", e)))?
            .remove(worker_id);
        // Lock guard dropped here

        if let Some(session) = existing {
            warn!(
                "Worker '{}' already owns session {}; terminating it before creating a new one",
                worker_id, session.id
            );
            Self::shutdown(session).await;
        }

        let handle = self.factory.create(profile).await.map_err(|e| match e {
            Error::SessionInit(_) => e,
            other => Error::session_init(other.to_string()),
        })?;

        let mut session = Session {
            id: uuid::Uuid::new_v4().to_string(),
            worker_id: worker_id.to_string(),
            handle: handle.clone(),
            created_at: Utc::now(),
            state: SessionState::Uninitialized,
        };

        // Default timeouts and window geometry; a handle that cannot be
        // configured is as unusable as one that never started, and must not
        // outlive the failed initialization.
        if let Err(e) = self.configure(&handle).await {
            if let Err(quit_err) = handle.quit().await {
                error!("Error quitting unconfigured session: {}", quit_err);
            }
            return Err(Error::session_init(format!(
                "failed to configure session: {}",
                e
            )));
        }

        session.state = SessionState::Active;
        info!("Session {} initialized for worker '{}'", session.id, worker_id);

        self.slots
            .write()
            .map_err(|e| Error::internal(format!("Lock error: {}", e)))?
            .insert(worker_id.to_string(), session);

        Ok(())
    }

    /// The calling worker's active handle. Never creates one.
    pub fn current(&self, worker_id: &str) -> Result<Arc<dyn DriverHandle>> {
        self.slots
            .read()
            .map_err(|e| Error::internal(format!("Lock error: {}", e)))?
            .get(worker_id)
            .map(|session| session.handle.clone())
            .ok_or_else(|| Error::no_active_session(worker_id))
    }

    /// Snapshot of the worker's session, if one exists
    pub fn session(&self, worker_id: &str) -> Option<Session> {
        self.slots
            .read()
            .ok()
            .and_then(|slots| slots.get(worker_id).cloned())
    }

    /// Non-failing existence probe
    pub fn has_session(&self, worker_id: &str) -> bool {
        self.slots
            .read()
            .map(|slots| slots.contains_key(worker_id))
            .unwrap_or(false)
    }

    /// Number of live sessions across all workers
    pub fn session_count(&self) -> usize {
        self.slots.read().map(|slots| slots.len()).unwrap_or(0)
    }

    /// Tear down the worker's session, best-effort.
    ///
    /// Close failures are logged and absorbed; cleanup never throws past
    /// this boundary. Idempotent: a worker without a session is a no-op.
    pub async fn terminate(&self, worker_id: &str) {
        let existing = match self.slots.write() {
            Ok(mut slots) => slots.remove(worker_id),
            Err(e) => {
                error!("Lock error during terminate: {}", e);
                return;
            }
        };
        // Lock guard dropped here

        match existing {
            Some(session) => Self::shutdown(session).await,
            None => debug!("No session to terminate for worker '{}'", worker_id),
        }
    }

    /// Tear down every worker's session, best-effort
    pub async fn terminate_all(&self) {
        let drained: Vec<Session> = match self.slots.write() {
            Ok(mut slots) => slots.drain().map(|(_, session)| session).collect(),
            Err(e) => {
                error!("Lock error during terminate_all: {}", e);
                return;
            }
        };

        for session in drained {
            Self::shutdown(session).await;
        }
    }

    /// Capture a screenshot for the worker, if it has a session.
    ///
    /// Returns the artifact path, or `None` without a session or when any
    /// step of the capture fails; failures are logged, never propagated.
    pub async fn capture_screenshot(&self, worker_id: &str, label: &str) -> Option<PathBuf> {
        let handle = match self.current(worker_id) {
            Ok(handle) => handle,
            Err(_) => {
                debug!(
                    "No active session for worker '{}'; skipping screenshot",
                    worker_id
                );
                return None;
            }
        };

        let bytes = match handle.screenshot().await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("Failed to take screenshot: {}", e);
                return None;
            }
        };

        let file_name = format!("{}_{}.png", label, Utc::now().format("%Y%m%d_%H%M%S"));
        match self.artifacts.store(&file_name, &bytes) {
            Ok(path) => {
                info!("Screenshot saved: {}", path.display());
                Some(path)
            }
            Err(e) => {
                error!("Failed to store screenshot: {}", e);
                None
            }
        }
    }

    async fn configure(&self, handle: &Arc<dyn DriverHandle>) -> Result<()> {
        handle
            .set_timeouts(self.implicit_wait, self.page_load_timeout)
            .await?;
        handle
            .set_window_size(self.window_width, self.window_height)
            .await?;
        Ok(())
    }

    async fn shutdown(mut session: Session) {
        session.state = SessionState::Terminated;
        match session.handle.quit().await {
            Ok(()) => info!(
                "Session {} for worker '{}' quit successfully",
                session.id, session.worker_id
            ),
            Err(e) => error!("Error quitting session {}: {}", session.id, e),
        }
    }
}
