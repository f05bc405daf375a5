//! Generic condition-polling primitive

use crate::config::Config;
use crate::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

/// Sleep between polls when nothing else is configured
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// One observation of a polled condition
#[derive(Debug)]
pub enum PollState<T> {
    /// Condition satisfied, carrying its value
    Ready(T),
    /// Not yet; carries a description of the observed state for diagnostics
    Pending(String),
}

/// Bounded sleep-and-retry condition polling
///
/// All waits in the core flow through [`WaitEngine::poll_until`]; the
/// engine owns the default timeout and poll interval, callers may override
/// the timeout per wait.
#[derive(Debug, Clone)]
pub struct WaitEngine {
    default_timeout: Duration,
    poll_interval: Duration,
}

impl WaitEngine {
    /// Create an engine with explicit defaults
    pub fn new(default_timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            default_timeout,
            poll_interval,
        }
    }

    /// Engine defaults taken from configuration (explicit wait + poll interval)
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.explicit_wait(), config.poll_interval())
    }

    /// Configured fallback timeout for waits without an override
    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Repeatedly evaluate `probe` until it is satisfied or `timeout` elapses.
    ///
    /// The probe is evaluated once immediately and then after each poll
    /// interval. The deadline is exclusive: a probe is never started at or
    /// after it, so a timeout exactly equal to k·interval observes k probes
    /// after the initial one and then times out. On expiry the error carries
    /// the last observed state.
    pub async fn poll_until<T, F, Fut>(
        &self,
        what: &str,
        timeout: Option<Duration>,
        probe: F,
    ) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<PollState<T>>>,
    {
        let timeout = timeout.unwrap_or(self.default_timeout);
        self.poll_inner(what, timeout, self.poll_interval, probe).await
    }

    /// Poll an arbitrary caller-defined predicate that needs no handle access.
    ///
    /// Escape hatch for synchronizing on external resources; identical
    /// timeout semantics to [`WaitEngine::poll_until`].
    pub async fn poll_custom<F>(
        &self,
        what: &str,
        timeout: Option<Duration>,
        poll_interval: Option<Duration>,
        mut predicate: F,
    ) -> Result<()>
    where
        F: FnMut() -> bool,
    {
        let timeout = timeout.unwrap_or(self.default_timeout);
        let interval = poll_interval.unwrap_or(self.poll_interval);
        self.poll_inner(what, timeout, interval, move || {
            let satisfied = predicate();
            async move {
                if satisfied {
                    Ok(PollState::Ready(()))
                } else {
                    Ok(PollState::Pending("predicate still false".to_string()))
                }
            }
        })
        .await
    }

    async fn poll_inner<T, F, Fut>(
        &self,
        what: &str,
        timeout: Duration,
        interval: Duration,
        mut probe: F,
    ) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<PollState<T>>>,
    {
        let start = Instant::now();
        let mut last = "not yet evaluated".to_string();

        loop {
            match probe().await? {
                PollState::Ready(value) => {
                    debug!("Condition satisfied after {:?}: {}", start.elapsed(), what);
                    return Ok(value);
                }
                PollState::Pending(state) => last = state,
            }

            sleep(interval).await;

            if start.elapsed() >= timeout {
                warn!(
                    "Timed out after {:?} waiting for {} (last observed: {})",
                    timeout, what, last
                );
                return Err(Error::wait_timeout(what, timeout, last));
            }
        }
    }
}
