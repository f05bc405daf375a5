//! Scenario lifecycle glue
//!
//! Wires configuration, driver factory, locator store and session registry
//! together and scopes a session to each scenario: initialize at start,
//! capture-on-failure and teardown at the end.

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::Config;
use crate::driver::profile::BrowserProfile;
use crate::driver::traits::DriverFactory;
use crate::locator::{FileLocatorSource, LocatorStore};
use crate::page::PageActions;
use crate::session::{FsArtifactSink, SessionRegistry};
use crate::wait::WaitEngine;
use crate::Result;

/// Composition root for scenario execution
#[derive(Clone)]
pub struct TestHarness {
    config: Arc<Config>,
    registry: Arc<SessionRegistry>,
    locators: Arc<LocatorStore>,
}

impl TestHarness {
    /// Build a harness with the default file-backed locator source and
    /// filesystem screenshot sink from configuration
    pub fn new(config: Config, factory: Arc<dyn DriverFactory>) -> Self {
        let artifacts = Arc::new(FsArtifactSink::new(&config.screenshot_dir));
        let registry = Arc::new(SessionRegistry::new(factory, artifacts, &config));
        let locators = Arc::new(LocatorStore::new(Arc::new(FileLocatorSource::new(
            &config.locators_dir,
        ))));
        Self {
            config: Arc::new(config),
            registry,
            locators,
        }
    }

    /// Build a harness from pre-wired parts
    pub fn from_parts(
        config: Config,
        registry: Arc<SessionRegistry>,
        locators: Arc<LocatorStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            registry,
            locators,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> Arc<SessionRegistry> {
        self.registry.clone()
    }

    pub fn locators(&self) -> Arc<LocatorStore> {
        self.locators.clone()
    }

    /// Page-level interactions bound to one worker
    pub fn pages(&self, worker_id: &str) -> PageActions {
        PageActions::new(
            worker_id,
            self.registry.clone(),
            self.locators.clone(),
            WaitEngine::from_config(&self.config),
            &self.config,
        )
    }

    /// Begin a scenario for a worker.
    ///
    /// UI scenarios get a fresh session; API-only scenarios skip browser
    /// startup entirely.
    pub async fn start_scenario(&self, worker_id: &str, name: &str, ui: bool) -> Result<()> {
        info!("[TEST START] {}", name);
        if ui {
            let profile = BrowserProfile::from_config(&self.config)?;
            self.registry.initialize(worker_id, &profile).await?;
        }
        Ok(())
    }

    /// End a scenario for a worker.
    ///
    /// On failure a screenshot is captured (best-effort, when enabled)
    /// before the session is torn down; teardown itself never fails.
    /// Returns the failure screenshot path when one was written.
    pub async fn finish_scenario(
        &self,
        worker_id: &str,
        name: &str,
        failure: Option<&str>,
    ) -> Option<PathBuf> {
        let mut artifact = None;

        if let Some(message) = failure {
            error!("Scenario failed: {}", message);
            if self.config.screenshot_on_failure && self.registry.has_session(worker_id) {
                let label = format!("FAILED_{}", name.replace(' ', "_"));
                artifact = self.registry.capture_screenshot(worker_id, &label).await;
            }
        }

        self.registry.terminate(worker_id).await;

        let outcome = if failure.is_none() { "PASSED" } else { "FAILED" };
        info!("[TEST END] {} - {}", name, outcome);
        artifact
    }

    /// Tear down every remaining session at the end of a run
    pub async fn shutdown(&self) {
        info!("=== Test Run Completed ===");
        self.registry.terminate_all().await;
    }
}
