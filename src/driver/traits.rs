//! Driver abstraction traits
//!
//! These interfaces are the seam between the execution core and whatever
//! browser-control transport backs it. The core never sees past them.

use crate::driver::profile::BrowserProfile;
use crate::locator::Strategy;
use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Creates live browser-control handles
///
/// External collaborator: failure here means the browser could not be
/// started at all and is fatal to the scenario.
#[async_trait]
pub trait DriverFactory: Send + Sync {
    /// Launch a browser for the given profile and return its handle
    async fn create(&self, profile: &BrowserProfile) -> Result<Arc<dyn DriverHandle>>;
}

/// Opaque reference to a live browser-control session
#[async_trait]
pub trait DriverHandle: Send + Sync + std::fmt::Debug {
    /// Navigate to a URL
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Current page URL
    async fn current_url(&self) -> Result<String>;

    /// Current page title
    async fn title(&self) -> Result<String>;

    /// Document readiness signal ("loading", "interactive", "complete")
    async fn ready_state(&self) -> Result<String>;

    /// Look up a single element; `None` when nothing matches
    async fn find_element(&self, strategy: &Strategy) -> Result<Option<Arc<dyn ElementHandle>>>;

    /// Text of the open alert, if one is present
    async fn alert_text(&self) -> Result<Option<String>>;

    /// Switch into the frame matched by `strategy`; `false` when the frame
    /// is not (yet) available
    async fn switch_to_frame(&self, strategy: &Strategy) -> Result<bool>;

    /// Capture a PNG screenshot of the current viewport
    async fn screenshot(&self) -> Result<Vec<u8>>;

    /// Apply default lookup and page-load timeouts
    async fn set_timeouts(&self, implicit: Duration, page_load: Duration) -> Result<()>;

    /// Resize the browser window
    async fn set_window_size(&self, width: u32, height: u32) -> Result<()>;

    /// Shut the browser down
    async fn quit(&self) -> Result<()>;
}

/// Reference to a DOM element resolved through a [`DriverHandle`]
#[async_trait]
pub trait ElementHandle: Send + Sync + std::fmt::Debug {
    /// Click the element
    async fn click(&self) -> Result<()>;

    /// Clear the element's value
    async fn clear(&self) -> Result<()>;

    /// Send keystrokes to the element
    async fn send_keys(&self, text: &str) -> Result<()>;

    /// Visible text content
    async fn text(&self) -> Result<String>;

    /// Attribute value, if the attribute is set
    async fn attribute(&self, name: &str) -> Result<Option<String>>;

    /// Whether the element is rendered visible
    async fn is_displayed(&self) -> Result<bool>;

    /// Whether the element is enabled
    async fn is_enabled(&self) -> Result<bool>;

    /// Whether the element is selected/checked
    async fn is_selected(&self) -> Result<bool>;
}
