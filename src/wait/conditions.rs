//! Named wait conditions
//!
//! Each condition is a pure probe over the current handle state, built on
//! [`WaitEngine::poll_until`]; all share its timeout and failure contract.

use crate::driver::traits::{DriverHandle, ElementHandle};
use crate::locator::Strategy;
use crate::wait::engine::{PollState, WaitEngine};
use crate::Result;
use std::sync::Arc;
use std::time::Duration;

impl WaitEngine {
    /// Wait for the element to be present and visible
    pub async fn visible(
        &self,
        handle: &Arc<dyn DriverHandle>,
        strategy: &Strategy,
        timeout: Option<Duration>,
    ) -> Result<Arc<dyn ElementHandle>> {
        let what = format!("element {} to be visible", strategy);
        let handle = handle.clone();
        let strategy = strategy.clone();
        self.poll_until(&what, timeout, move || {
            let handle = handle.clone();
            let strategy = strategy.clone();
            async move {
                match handle.find_element(&strategy).await? {
                    Some(element) => {
                        if element.is_displayed().await? {
                            Ok(PollState::Ready(element))
                        } else {
                            Ok(PollState::Pending("present but not visible".to_string()))
                        }
                    }
                    None => Ok(PollState::Pending("not present".to_string())),
                }
            }
        })
        .await
    }

    /// Wait for the element to be visible and enabled
    pub async fn clickable(
        &self,
        handle: &Arc<dyn DriverHandle>,
        strategy: &Strategy,
        timeout: Option<Duration>,
    ) -> Result<Arc<dyn ElementHandle>> {
        let what = format!("element {} to be clickable", strategy);
        let handle = handle.clone();
        let strategy = strategy.clone();
        self.poll_until(&what, timeout, move || {
            let handle = handle.clone();
            let strategy = strategy.clone();
            async move {
                match handle.find_element(&strategy).await? {
                    Some(element) => {
                        if !element.is_displayed().await? {
                            return Ok(PollState::Pending("present but not visible".to_string()));
                        }
                        if !element.is_enabled().await? {
                            return Ok(PollState::Pending("visible but disabled".to_string()));
                        }
                        Ok(PollState::Ready(element))
                    }
                    None => Ok(PollState::Pending("not present".to_string())),
                }
            }
        })
        .await
    }

    /// Wait for the element to be invisible or absent
    pub async fn invisible(
        &self,
        handle: &Arc<dyn DriverHandle>,
        strategy: &Strategy,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let what = format!("element {} to be invisible or absent", strategy);
        let handle = handle.clone();
        let strategy = strategy.clone();
        self.poll_until(&what, timeout, move || {
            let handle = handle.clone();
            let strategy = strategy.clone();
            async move {
                match handle.find_element(&strategy).await? {
                    Some(element) => {
                        if element.is_displayed().await? {
                            Ok(PollState::Pending("still visible".to_string()))
                        } else {
                            Ok(PollState::Ready(()))
                        }
                    }
                    None => Ok(PollState::Ready(())),
                }
            }
        })
        .await
    }

    /// Wait for the element's text to contain `needle`
    pub async fn text_contains(
        &self,
        handle: &Arc<dyn DriverHandle>,
        strategy: &Strategy,
        needle: &str,
        timeout: Option<Duration>,
    ) -> Result<Arc<dyn ElementHandle>> {
        let what = format!("element {} text to contain '{}'", strategy, needle);
        let handle = handle.clone();
        let strategy = strategy.clone();
        let needle = needle.to_string();
        self.poll_until(&what, timeout, move || {
            let handle = handle.clone();
            let strategy = strategy.clone();
            let needle = needle.clone();
            async move {
                match handle.find_element(&strategy).await? {
                    Some(element) => {
                        let text = element.text().await?;
                        if text.contains(&needle) {
                            Ok(PollState::Ready(element))
                        } else {
                            Ok(PollState::Pending(format!("text is '{}'", text)))
                        }
                    }
                    None => Ok(PollState::Pending("not present".to_string())),
                }
            }
        })
        .await
    }

    /// Wait for the current URL to contain `needle`; returns the URL
    pub async fn url_contains(
        &self,
        handle: &Arc<dyn DriverHandle>,
        needle: &str,
        timeout: Option<Duration>,
    ) -> Result<String> {
        let what = format!("url to contain '{}'", needle);
        let handle = handle.clone();
        let needle = needle.to_string();
        self.poll_until(&what, timeout, move || {
            let handle = handle.clone();
            let needle = needle.clone();
            async move {
                let url = handle.current_url().await?;
                if url.contains(&needle) {
                    Ok(PollState::Ready(url))
                } else {
                    Ok(PollState::Pending(format!("url is '{}'", url)))
                }
            }
        })
        .await
    }

    /// Wait for the page title to contain `needle`; returns the title
    pub async fn title_contains(
        &self,
        handle: &Arc<dyn DriverHandle>,
        needle: &str,
        timeout: Option<Duration>,
    ) -> Result<String> {
        let what = format!("title to contain '{}'", needle);
        let handle = handle.clone();
        let needle = needle.to_string();
        self.poll_until(&what, timeout, move || {
            let handle = handle.clone();
            let needle = needle.clone();
            async move {
                let title = handle.title().await?;
                if title.contains(&needle) {
                    Ok(PollState::Ready(title))
                } else {
                    Ok(PollState::Pending(format!("title is '{}'", title)))
                }
            }
        })
        .await
    }

    /// Wait for an alert to open; returns its text
    pub async fn alert_present(
        &self,
        handle: &Arc<dyn DriverHandle>,
        timeout: Option<Duration>,
    ) -> Result<String> {
        let handle = handle.clone();
        self.poll_until("alert to be present", timeout, move || {
            let handle = handle.clone();
            async move {
                match handle.alert_text().await? {
                    Some(text) => Ok(PollState::Ready(text)),
                    None => Ok(PollState::Pending("no alert open".to_string())),
                }
            }
        })
        .await
    }

    /// Wait for the frame to become available and switch into it
    pub async fn frame_available(
        &self,
        handle: &Arc<dyn DriverHandle>,
        strategy: &Strategy,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let what = format!("frame {} to be available", strategy);
        let handle = handle.clone();
        let strategy = strategy.clone();
        self.poll_until(&what, timeout, move || {
            let handle = handle.clone();
            let strategy = strategy.clone();
            async move {
                if handle.switch_to_frame(&strategy).await? {
                    Ok(PollState::Ready(()))
                } else {
                    Ok(PollState::Pending("frame not available".to_string()))
                }
            }
        })
        .await
    }

    /// Wait for the document readiness signal to report "complete"
    pub async fn page_ready(
        &self,
        handle: &Arc<dyn DriverHandle>,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let handle = handle.clone();
        self.poll_until("page to finish loading", timeout, move || {
            let handle = handle.clone();
            async move {
                let state = handle.ready_state().await?;
                if state == "complete" {
                    Ok(PollState::Ready(()))
                } else {
                    Ok(PollState::Pending(format!("readyState is '{}'", state)))
                }
            }
        })
        .await
    }
}
