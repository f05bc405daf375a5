//! Common test utilities
//!
//! Shared fixtures for the integration tests: a temp-backed locator source,
//! a scripted driver factory and a fully wired harness.

use std::sync::Arc;

use helmsman::config::Config;
use helmsman::driver::mock::{MockDriver, MockDriverFactory};
use helmsman::harness::TestHarness;
use helmsman::locator::{FileLocatorSource, LocatorStore};
use helmsman::session::{FsArtifactSink, SessionRegistry};

/// A wired-up execution core over temp directories and a mock driver
pub struct TestWorld {
    pub harness: TestHarness,
    pub factory: Arc<MockDriverFactory>,
    pub driver: Arc<MockDriver>,
    root: tempfile::TempDir,
}

impl TestWorld {
    /// Build a world whose next session uses the given prepared driver
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("temp dir");
        std::fs::create_dir_all(root.path().join("locators")).expect("locators dir");

        let config = Config {
            locators_dir: root.path().join("locators").display().to_string(),
            screenshot_dir: root.path().join("screenshots").display().to_string(),
            ..Config::default()
        };

        let driver = MockDriver::new();
        let factory = Arc::new(MockDriverFactory::with_driver(driver.clone()));

        let registry = Arc::new(SessionRegistry::new(
            factory.clone(),
            Arc::new(FsArtifactSink::new(root.path().join("screenshots"))),
            &config,
        ));
        let locators = Arc::new(LocatorStore::new(Arc::new(FileLocatorSource::new(
            root.path().join("locators"),
        ))));

        Self {
            harness: TestHarness::from_parts(config, registry, locators),
            factory,
            driver,
            root,
        }
    }

    /// Write one page's locator record into the source directory
    pub fn write_locators(&self, page: &str, json: &str) {
        std::fs::write(
            self.root.path().join("locators").join(format!("{}.json", page)),
            json,
        )
        .expect("write locator record");
    }
}
