//! Mock driver implementation for testing
//!
//! A scripted browser-control handle: tests register elements per lookup
//! strategy, mutate their visibility/text at runtime, and assert on every
//! recorded resolution and action afterwards.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::driver::profile::BrowserProfile;
use crate::driver::traits::{DriverFactory, DriverHandle, ElementHandle};
use crate::locator::Strategy;
use crate::{Error, Result};

/// Scripted DOM element
#[derive(Debug, Default)]
pub struct MockElement {
    displayed: AtomicBool,
    enabled: AtomicBool,
    selected: AtomicBool,
    /// Reports hidden for this many visibility probes before `displayed`
    /// takes effect; lets tests script elements that appear after a delay.
    hidden_probes: AtomicUsize,
    text: Mutex<String>,
    value: Mutex<String>,
    attributes: Mutex<HashMap<String, String>>,
    clicks: AtomicUsize,
    clears: AtomicUsize,
    keys: Mutex<Vec<String>>,
    fail_click: AtomicBool,
}

impl MockElement {
    /// A visible, enabled element
    pub fn visible() -> Arc<Self> {
        let element = Self::default();
        element.displayed.store(true, Ordering::SeqCst);
        element.enabled.store(true, Ordering::SeqCst);
        Arc::new(element)
    }

    /// An element present in the DOM but not rendered
    pub fn hidden() -> Arc<Self> {
        let element = Self::default();
        element.enabled.store(true, Ordering::SeqCst);
        Arc::new(element)
    }

    /// A visible but disabled element
    pub fn disabled() -> Arc<Self> {
        let element = Self::default();
        element.displayed.store(true, Ordering::SeqCst);
        Arc::new(element)
    }

    pub fn set_displayed(&self, displayed: bool) {
        self.displayed.store(displayed, Ordering::SeqCst);
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn set_selected(&self, selected: bool) {
        self.selected.store(selected, Ordering::SeqCst);
    }

    /// Report hidden for the first `probes` visibility checks
    pub fn hidden_for_probes(&self, probes: usize) {
        self.hidden_probes.store(probes, Ordering::SeqCst);
    }

    pub fn set_text(&self, text: &str) {
        *self.text.lock().unwrap() = text.to_string();
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        self.attributes
            .lock()
            .unwrap()
            .insert(name.to_string(), value.to_string());
    }

    /// Make the next click fail with a driver error
    pub fn fail_next_click(&self) {
        self.fail_click.store(true, Ordering::SeqCst);
    }

    pub fn click_count(&self) -> usize {
        self.clicks.load(Ordering::SeqCst)
    }

    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }

    /// Every string sent via `send_keys`, in order
    pub fn keys_sent(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }

    /// Current input value (cleared by `clear`, appended by `send_keys`)
    pub fn value(&self) -> String {
        self.value.lock().unwrap().clone()
    }
}

#[async_trait]
impl ElementHandle for MockElement {
    async fn click(&self) -> Result<()> {
        if self.fail_click.swap(false, Ordering::SeqCst) {
            return Err(Error::driver("element click intercepted"));
        }
        self.clicks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        self.value.lock().unwrap().clear();
        Ok(())
    }

    async fn send_keys(&self, text: &str) -> Result<()> {
        self.keys.lock().unwrap().push(text.to_string());
        self.value.lock().unwrap().push_str(text);
        Ok(())
    }

    async fn text(&self) -> Result<String> {
        Ok(self.text.lock().unwrap().clone())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        Ok(self.attributes.lock().unwrap().get(name).cloned())
    }

    async fn is_displayed(&self) -> Result<bool> {
        let remaining = self.hidden_probes.load(Ordering::SeqCst);
        if remaining > 0 {
            self.hidden_probes.store(remaining - 1, Ordering::SeqCst);
            return Ok(false);
        }
        Ok(self.displayed.load(Ordering::SeqCst))
    }

    async fn is_enabled(&self) -> Result<bool> {
        Ok(self.enabled.load(Ordering::SeqCst))
    }

    async fn is_selected(&self) -> Result<bool> {
        Ok(self.selected.load(Ordering::SeqCst))
    }
}

/// Scripted browser-control handle
#[derive(Debug)]
pub struct MockDriver {
    id: String,
    url: Mutex<String>,
    title: Mutex<String>,
    ready_state: Mutex<String>,
    alert: Mutex<Option<String>>,
    frames: Mutex<HashSet<String>>,
    current_frame: Mutex<Option<String>>,
    elements: Mutex<HashMap<String, Arc<MockElement>>>,
    resolved: Mutex<Vec<Strategy>>,
    navigations: Mutex<Vec<String>>,
    timeouts: Mutex<Option<(Duration, Duration)>>,
    window_size: Mutex<Option<(u32, u32)>>,
    screenshot_bytes: Mutex<Vec<u8>>,
    fail_screenshot: AtomicBool,
    fail_quit: AtomicBool,
    quit_count: AtomicUsize,
    active: AtomicBool,
}

impl MockDriver {
    /// Create a blank mock driver on `about:blank`
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            id: uuid::Uuid::new_v4().to_string(),
            url: Mutex::new("about:blank".to_string()),
            title: Mutex::new(String::new()),
            ready_state: Mutex::new("complete".to_string()),
            alert: Mutex::new(None),
            frames: Mutex::new(HashSet::new()),
            current_frame: Mutex::new(None),
            elements: Mutex::new(HashMap::new()),
            resolved: Mutex::new(Vec::new()),
            navigations: Mutex::new(Vec::new()),
            timeouts: Mutex::new(None),
            window_size: Mutex::new(None),
            // A 1x1 PNG stand-in
            screenshot_bytes: Mutex::new(vec![0x89, b'P', b'N', b'G']),
            fail_screenshot: AtomicBool::new(false),
            fail_quit: AtomicBool::new(false),
            quit_count: AtomicUsize::new(0),
            active: AtomicBool::new(true),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Register an element reachable through `strategy`
    pub fn register(&self, strategy: Strategy, element: Arc<MockElement>) {
        self.elements
            .lock()
            .unwrap()
            .insert(strategy.to_string(), element);
    }

    /// Element previously registered for `strategy`
    pub fn element(&self, strategy: &Strategy) -> Option<Arc<MockElement>> {
        self.elements.lock().unwrap().get(&strategy.to_string()).cloned()
    }

    pub fn set_url(&self, url: &str) {
        *self.url.lock().unwrap() = url.to_string();
    }

    pub fn set_title(&self, title: &str) {
        *self.title.lock().unwrap() = title.to_string();
    }

    pub fn set_ready_state(&self, state: &str) {
        *self.ready_state.lock().unwrap() = state.to_string();
    }

    pub fn open_alert(&self, text: &str) {
        *self.alert.lock().unwrap() = Some(text.to_string());
    }

    /// Make a frame reachable through `strategy`
    pub fn add_frame(&self, strategy: &Strategy) {
        self.frames.lock().unwrap().insert(strategy.to_string());
    }

    /// Frame the driver last switched into, if any
    pub fn current_frame(&self) -> Option<String> {
        self.current_frame.lock().unwrap().clone()
    }

    /// Every strategy the core asked this handle to resolve, in order
    pub fn resolved_strategies(&self) -> Vec<Strategy> {
        self.resolved.lock().unwrap().clone()
    }

    /// Every URL navigated to, in order
    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }

    /// Timeouts applied through `set_timeouts`
    pub fn applied_timeouts(&self) -> Option<(Duration, Duration)> {
        *self.timeouts.lock().unwrap()
    }

    /// Geometry applied through `set_window_size`
    pub fn applied_window_size(&self) -> Option<(u32, u32)> {
        *self.window_size.lock().unwrap()
    }

    pub fn fail_screenshot(&self) {
        self.fail_screenshot.store(true, Ordering::SeqCst);
    }

    pub fn fail_quit(&self) {
        self.fail_quit.store(true, Ordering::SeqCst);
    }

    pub fn quit_count(&self) -> usize {
        self.quit_count.load(Ordering::SeqCst)
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn ensure_active(&self) -> Result<()> {
        if !self.active.load(Ordering::SeqCst) {
            return Err(Error::driver("session already terminated"));
        }
        Ok(())
    }
}

#[async_trait]
impl DriverHandle for MockDriver {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.ensure_active()?;
        self.navigations.lock().unwrap().push(url.to_string());
        *self.url.lock().unwrap() = url.to_string();
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        self.ensure_active()?;
        Ok(self.url.lock().unwrap().clone())
    }

    async fn title(&self) -> Result<String> {
        self.ensure_active()?;
        Ok(self.title.lock().unwrap().clone())
    }

    async fn ready_state(&self) -> Result<String> {
        self.ensure_active()?;
        Ok(self.ready_state.lock().unwrap().clone())
    }

    async fn find_element(&self, strategy: &Strategy) -> Result<Option<Arc<dyn ElementHandle>>> {
        self.ensure_active()?;
        self.resolved.lock().unwrap().push(strategy.clone());
        Ok(self
            .elements
            .lock()
            .unwrap()
            .get(&strategy.to_string())
            .cloned()
            .map(|e| e as Arc<dyn ElementHandle>))
    }

    async fn alert_text(&self) -> Result<Option<String>> {
        self.ensure_active()?;
        Ok(self.alert.lock().unwrap().clone())
    }

    async fn switch_to_frame(&self, strategy: &Strategy) -> Result<bool> {
        self.ensure_active()?;
        let key = strategy.to_string();
        if self.frames.lock().unwrap().contains(&key) {
            *self.current_frame.lock().unwrap() = Some(key);
            return Ok(true);
        }
        Ok(false)
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        self.ensure_active()?;
        if self.fail_screenshot.load(Ordering::SeqCst) {
            return Err(Error::driver("screenshot capture failed"));
        }
        Ok(self.screenshot_bytes.lock().unwrap().clone())
    }

    async fn set_timeouts(&self, implicit: Duration, page_load: Duration) -> Result<()> {
        self.ensure_active()?;
        *self.timeouts.lock().unwrap() = Some((implicit, page_load));
        Ok(())
    }

    async fn set_window_size(&self, width: u32, height: u32) -> Result<()> {
        self.ensure_active()?;
        *self.window_size.lock().unwrap() = Some((width, height));
        Ok(())
    }

    async fn quit(&self) -> Result<()> {
        self.quit_count.fetch_add(1, Ordering::SeqCst);
        self.active.store(false, Ordering::SeqCst);
        if self.fail_quit.load(Ordering::SeqCst) {
            return Err(Error::driver("browser process did not exit cleanly"));
        }
        Ok(())
    }
}

/// Scripted driver factory
///
/// Hands out pre-seeded handles in order, then blank ones; keeps every
/// created handle (and the profile it was created with) for inspection.
#[derive(Default)]
pub struct MockDriverFactory {
    queued: Mutex<VecDeque<Arc<MockDriver>>>,
    created: Mutex<Vec<Arc<MockDriver>>>,
    profiles: Mutex<Vec<BrowserProfile>>,
    fail: AtomicBool,
}

impl MockDriverFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A factory whose next creation returns the given prepared handle
    pub fn with_driver(driver: Arc<MockDriver>) -> Self {
        let factory = Self::default();
        factory.queue(driver);
        factory
    }

    /// A factory that always fails, as when the browser binary is missing
    pub fn failing() -> Self {
        let factory = Self::default();
        factory.fail.store(true, Ordering::SeqCst);
        factory
    }

    /// Queue a prepared handle for the next creation
    pub fn queue(&self, driver: Arc<MockDriver>) {
        self.queued.lock().unwrap().push_back(driver);
    }

    /// Every handle this factory has created, in order
    pub fn created(&self) -> Vec<Arc<MockDriver>> {
        self.created.lock().unwrap().clone()
    }

    /// Every profile this factory was asked to launch, in order
    pub fn profiles(&self) -> Vec<BrowserProfile> {
        self.profiles.lock().unwrap().clone()
    }
}

#[async_trait]
impl DriverFactory for MockDriverFactory {
    async fn create(&self, profile: &BrowserProfile) -> Result<Arc<dyn DriverHandle>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::session_init(
                "browser binary missing or not executable",
            ));
        }

        self.profiles.lock().unwrap().push(profile.clone());

        let driver = self
            .queued
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(MockDriver::new);
        self.created.lock().unwrap().push(driver.clone());
        Ok(driver as Arc<dyn DriverHandle>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_element_lookup_is_recorded() {
        let driver = MockDriver::new();
        let strategy = Strategy::Css("#login".into());
        driver.register(strategy.clone(), MockElement::visible());

        let found = driver.find_element(&strategy).await.unwrap();
        assert!(found.is_some());
        assert!(driver
            .find_element(&Strategy::Id("missing".into()))
            .await
            .unwrap()
            .is_none());

        let resolved = driver.resolved_strategies();
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0], strategy);
    }

    #[tokio::test]
    async fn test_element_actions_are_recorded() {
        let element = MockElement::visible();
        element.click().await.unwrap();
        element.send_keys("abc").await.unwrap();
        element.send_keys("def").await.unwrap();
        element.clear().await.unwrap();
        element.send_keys("xyz").await.unwrap();

        assert_eq!(element.click_count(), 1);
        assert_eq!(element.keys_sent(), vec!["abc", "def", "xyz"]);
        assert_eq!(element.value(), "xyz");
    }

    #[tokio::test]
    async fn test_hidden_probe_countdown() {
        let element = MockElement::visible();
        element.hidden_for_probes(2);

        assert!(!element.is_displayed().await.unwrap());
        assert!(!element.is_displayed().await.unwrap());
        assert!(element.is_displayed().await.unwrap());
    }

    #[tokio::test]
    async fn test_quit_deactivates_handle() {
        let driver = MockDriver::new();
        driver.quit().await.unwrap();

        assert!(!driver.is_active());
        assert_eq!(driver.quit_count(), 1);
        assert!(driver.current_url().await.is_err());
    }

    #[tokio::test]
    async fn test_factory_queue_and_failure() {
        let prepared = MockDriver::new();
        let factory = MockDriverFactory::with_driver(prepared.clone());

        factory.create(&BrowserProfile::default()).await.unwrap();
        // Queue exhausted: a fresh handle is created
        factory.create(&BrowserProfile::default()).await.unwrap();

        let created = factory.created();
        assert_eq!(created.len(), 2);
        assert_eq!(created[0].id(), prepared.id());
        assert_ne!(created[1].id(), prepared.id());

        let failing = MockDriverFactory::failing();
        let result = failing.create(&BrowserProfile::default()).await;
        assert!(matches!(result, Err(Error::SessionInit(_))));
    }

    #[tokio::test]
    async fn test_frame_switch() {
        let driver = MockDriver::new();
        let frame = Strategy::Id("payment-frame".into());

        assert!(!driver.switch_to_frame(&frame).await.unwrap());
        driver.add_frame(&frame);
        assert!(driver.switch_to_frame(&frame).await.unwrap());
        assert_eq!(driver.current_frame(), Some(frame.to_string()));
    }
}
