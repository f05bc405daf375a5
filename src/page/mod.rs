//! Page-level element interactions
//!
//! [`PageActions`] composes the session registry, locator store and wait
//! engine into the operations step definitions call: resolve a symbolic
//! (page, element) name, wait for the right condition, act on the target.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Config;
use crate::driver::traits::DriverHandle;
use crate::locator::{LocatorStore, Strategy};
use crate::session::SessionRegistry;
use crate::wait::WaitEngine;
use crate::{Error, Result};

/// Element operations for one worker's scenario
///
/// Bound to a single worker at construction; every operation resolves the
/// worker's current handle first, so calling without an active session
/// fails with [`Error::NoActiveSession`] before any lookup happens.
pub struct PageActions {
    worker_id: String,
    registry: Arc<SessionRegistry>,
    locators: Arc<LocatorStore>,
    waits: WaitEngine,
    base_url: String,
    page_load_timeout: Duration,
}

impl PageActions {
    pub fn new(
        worker_id: &str,
        registry: Arc<SessionRegistry>,
        locators: Arc<LocatorStore>,
        waits: WaitEngine,
        config: &Config,
    ) -> Self {
        Self {
            worker_id: worker_id.to_string(),
            registry,
            locators,
            waits,
            base_url: config.base_url.clone(),
            page_load_timeout: config.page_load_timeout(),
        }
    }

    /// The wait engine backing this facade, for caller-defined waits
    pub fn waits(&self) -> &WaitEngine {
        &self.waits
    }

    /// The worker's current handle
    pub fn handle(&self) -> Result<Arc<dyn DriverHandle>> {
        self.registry.current(&self.worker_id)
    }

    /// Click an element once it is clickable
    pub async fn click(&self, page: &str, element: &str) -> Result<()> {
        debug!("Clicking element: {}.{}", page, element);
        let handle = self.handle()?;
        let (strategy, timeout) = self.resolve(page, element)?;
        let target = self.waits.clickable(&handle, &strategy, timeout).await?;
        target.click().await.map_err(|e| annotate(e, page, element))
    }

    /// Clear an element and type text into it once it is visible.
    ///
    /// Waits for visibility, not clickability: a field need not be enabled
    /// to be clearable.
    pub async fn type_text(&self, page: &str, element: &str, text: &str) -> Result<()> {
        debug!("Typing '{}' into element: {}.{}", text, page, element);
        let handle = self.handle()?;
        let (strategy, timeout) = self.resolve(page, element)?;
        let target = self.waits.visible(&handle, &strategy, timeout).await?;
        target.clear().await.map_err(|e| annotate(e, page, element))?;
        target
            .send_keys(text)
            .await
            .map_err(|e| annotate(e, page, element))
    }

    /// Visible text of an element
    pub async fn text(&self, page: &str, element: &str) -> Result<String> {
        let handle = self.handle()?;
        let (strategy, timeout) = self.resolve(page, element)?;
        let target = self.waits.visible(&handle, &strategy, timeout).await?;
        target.text().await.map_err(|e| annotate(e, page, element))
    }

    /// Attribute value of an element
    pub async fn attribute(&self, page: &str, element: &str, name: &str) -> Result<Option<String>> {
        let handle = self.handle()?;
        let (strategy, timeout) = self.resolve(page, element)?;
        let target = self.waits.visible(&handle, &strategy, timeout).await?;
        target
            .attribute(name)
            .await
            .map_err(|e| annotate(e, page, element))
    }

    /// Visibility probe for boolean assertions.
    ///
    /// Swallows lookup and timeout failures and returns `false`; the other
    /// facade operations propagate those as errors.
    pub async fn is_displayed(&self, page: &str, element: &str) -> bool {
        let handle = match self.handle() {
            Ok(handle) => handle,
            Err(_) => return false,
        };
        let (strategy, timeout) = match self.resolve(page, element) {
            Ok(resolved) => resolved,
            Err(_) => return false,
        };
        self.waits.visible(&handle, &strategy, timeout).await.is_ok()
    }

    /// Immediate existence probe, without waiting
    pub async fn element_exists(&self, page: &str, element: &str) -> bool {
        let probe = async {
            let handle = self.handle()?;
            let (strategy, _) = self.resolve(page, element)?;
            handle.find_element(&strategy).await
        };
        matches!(probe.await, Ok(Some(_)))
    }

    /// Navigate to a page's configured URL and wait for it to load.
    ///
    /// A page record without a URL is a no-op.
    pub async fn open(&self, page: &str) -> Result<()> {
        let handle = self.handle()?;
        let set = self.locators.page_locators(page)?;

        if let Some(path) = set.page_url.as_deref() {
            let url = join_url(&self.base_url, path);
            handle.navigate(&url).await?;
            self.waits
                .page_ready(&handle, Some(self.page_load_timeout))
                .await?;
            info!("Navigated to page: {}", page);
        }

        Ok(())
    }

    /// Current URL of the worker's session
    pub async fn current_url(&self) -> Result<String> {
        self.handle()?.current_url().await
    }

    /// Current title of the worker's session
    pub async fn title(&self) -> Result<String> {
        self.handle()?.title().await
    }

    fn resolve(&self, page: &str, element: &str) -> Result<(Strategy, Option<Duration>)> {
        let definition = self.locators.locator(page, element)?;
        let timeout = definition.timeout.map(Duration::from_millis);
        let strategy = Strategy::from_definition(&definition)?;
        Ok((strategy, timeout))
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

fn annotate(error: Error, page: &str, element: &str) -> Error {
    match error {
        Error::Driver(detail) => Error::Driver(format!("{}.{}: {}", page, element, detail)),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::mock::{MockDriver, MockDriverFactory, MockElement};
    use crate::driver::profile::BrowserProfile;
    use crate::driver::traits::ElementHandle;
    use crate::locator::FileLocatorSource;
    use crate::session::FsArtifactSink;

    struct Fixture {
        pages: PageActions,
        driver: Arc<MockDriver>,
        locators: Arc<LocatorStore>,
        _dirs: (tempfile::TempDir, tempfile::TempDir),
    }

    const LOGIN_PAGE: &str = r##"{
        "pageName": "LoginPage",
        "pageUrl": "/login",
        "locators": {
            "loginButton": { "type": "css", "value": "#login" },
            "username": { "type": "id", "value": "username" },
            "banner": { "type": "css", "value": ".banner", "timeout": 1000 }
        }
    }"##;

    async fn fixture(with_session: bool) -> Fixture {
        let locator_dir = tempfile::tempdir().unwrap();
        std::fs::write(locator_dir.path().join("LoginPage.json"), LOGIN_PAGE).unwrap();

        let shot_dir = tempfile::tempdir().unwrap();
        let driver = MockDriver::new();
        let factory = MockDriverFactory::with_driver(driver.clone());
        let config = Config::default();

        let registry = Arc::new(SessionRegistry::new(
            Arc::new(factory),
            Arc::new(FsArtifactSink::new(shot_dir.path())),
            &config,
        ));
        if with_session {
            registry
                .initialize("w1", &BrowserProfile::default())
                .await
                .unwrap();
        }

        let locators = Arc::new(LocatorStore::new(Arc::new(FileLocatorSource::new(
            locator_dir.path(),
        ))));
        let pages = PageActions::new(
            "w1",
            registry,
            locators.clone(),
            WaitEngine::from_config(&config),
            &config,
        );

        Fixture {
            pages,
            driver,
            locators,
            _dirs: (locator_dir, shot_dir),
        }
    }

    #[tokio::test]
    async fn test_click_resolves_and_clicks() {
        let fixture = fixture(true).await;
        let strategy = Strategy::Css("#login".into());
        fixture.driver.register(strategy.clone(), MockElement::visible());

        fixture.pages.click("LoginPage", "loginButton").await.unwrap();

        assert_eq!(fixture.driver.element(&strategy).unwrap().click_count(), 1);
        assert_eq!(fixture.driver.resolved_strategies(), vec![strategy]);
    }

    #[tokio::test]
    async fn test_click_without_session_touches_nothing() {
        let fixture = fixture(false).await;

        let result = fixture.pages.click("LoginPage", "loginButton").await;
        assert!(matches!(result, Err(Error::NoActiveSession(_))));

        // No wait was attempted and no locator record was loaded
        assert!(fixture.driver.resolved_strategies().is_empty());
        assert_eq!(fixture.locators.cached_pages(), 0);
    }

    #[tokio::test]
    async fn test_type_text_clears_then_sends() {
        let fixture = fixture(true).await;
        let strategy = Strategy::Id("username".into());
        let field = MockElement::visible();
        field.send_keys("stale").await.unwrap();
        fixture.driver.register(strategy.clone(), field.clone());

        fixture
            .pages
            .type_text("LoginPage", "username", "alice")
            .await
            .unwrap();

        assert_eq!(field.clear_count(), 1);
        assert_eq!(field.value(), "alice");
    }

    #[tokio::test]
    async fn test_text_reads_visible_element() {
        let fixture = fixture(true).await;
        let strategy = Strategy::Css("#login".into());
        let element = MockElement::visible();
        element.set_text("Sign in");
        fixture.driver.register(strategy, element);

        let text = fixture.pages.text("LoginPage", "loginButton").await.unwrap();
        assert_eq!(text, "Sign in");
    }

    #[tokio::test(start_paused = true)]
    async fn test_definition_timeout_override_bounds_the_wait() {
        let fixture = fixture(true).await;
        // "banner" carries a 1000ms override; leave the element absent
        let result = fixture.pages.click("LoginPage", "banner").await;

        assert!(matches!(
            result,
            Err(Error::WaitTimeout { timeout_ms: 1000, .. })
        ));
    }

    #[tokio::test]
    async fn test_is_displayed_swallows_unknown_element() {
        let fixture = fixture(true).await;
        assert!(!fixture.pages.is_displayed("LoginPage", "noSuchElement").await);
    }

    #[tokio::test]
    async fn test_is_displayed_true_for_visible_element() {
        let fixture = fixture(true).await;
        fixture
            .driver
            .register(Strategy::Css("#login".into()), MockElement::visible());
        assert!(fixture.pages.is_displayed("LoginPage", "loginButton").await);
    }

    #[tokio::test]
    async fn test_element_exists_probes_without_waiting() {
        let fixture = fixture(true).await;
        assert!(!fixture.pages.element_exists("LoginPage", "loginButton").await);

        fixture
            .driver
            .register(Strategy::Css("#login".into()), MockElement::hidden());
        assert!(fixture.pages.element_exists("LoginPage", "loginButton").await);
    }

    #[tokio::test]
    async fn test_open_navigates_and_waits_for_load() {
        let fixture = fixture(true).await;
        fixture.pages.open("LoginPage").await.unwrap();

        assert_eq!(
            fixture.driver.navigations(),
            vec!["http://localhost:8080/login"]
        );
    }

    #[tokio::test]
    async fn test_driver_error_is_annotated_with_element_context() {
        let fixture = fixture(true).await;
        let strategy = Strategy::Css("#login".into());
        let element = MockElement::visible();
        element.fail_next_click();
        fixture.driver.register(strategy, element);

        let result = fixture.pages.click("LoginPage", "loginButton").await;
        match result {
            Err(Error::Driver(detail)) => {
                assert!(detail.contains("LoginPage.loginButton"), "got: {}", detail)
            }
            other => panic!("expected Driver error, got {:?}", other),
        }
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://localhost:8080/", "/login"),
            "http://localhost:8080/login"
        );
        assert_eq!(
            join_url("http://localhost:8080", "/login"),
            "http://localhost:8080/login"
        );
    }
}
