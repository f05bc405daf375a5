//! Configuration management for Helmsman

use crate::{Error, Result};
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Execution-core configuration
///
/// Priority: environment variables > TOML file > defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Browser to launch (chrome, firefox, edge, safari)
    pub browser: String,

    /// Run the browser without a visible window
    pub headless: bool,

    /// Base URL of the application under test
    pub base_url: String,

    /// Browser window width
    pub window_width: u32,

    /// Browser window height
    pub window_height: u32,

    /// Implicit element-lookup timeout in seconds
    pub implicit_wait_secs: u64,

    /// Explicit condition-wait timeout in seconds
    pub explicit_wait_secs: u64,

    /// Page-load timeout in seconds
    pub page_load_timeout_secs: u64,

    /// Sleep between condition polls in milliseconds
    pub poll_interval_ms: u64,

    /// Directory holding one locator file per page
    pub locators_dir: String,

    /// Directory where screenshot artifacts are written
    pub screenshot_dir: String,

    /// Capture a screenshot when a scenario fails
    pub screenshot_on_failure: bool,

    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser: "chrome".to_string(),
            headless: true,
            base_url: "http://localhost:8080".to_string(),
            window_width: 1920,
            window_height: 1080,
            implicit_wait_secs: 10,
            explicit_wait_secs: 30,
            page_load_timeout_secs: 60,
            poll_interval_ms: 500,
            locators_dir: "locators".to_string(),
            screenshot_dir: "reports/screenshots".to_string(),
            screenshot_on_failure: true,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(browser) = env::var("HELMSMAN_BROWSER") {
            config.browser = browser;
        }

        if let Ok(headless) = env::var("HELMSMAN_HEADLESS") {
            config.headless = headless
                .parse()
                .map_err(|_| Error::configuration("Invalid HELMSMAN_HEADLESS"))?;
        }

        if let Ok(base_url) = env::var("HELMSMAN_BASE_URL") {
            config.base_url = base_url;
        }

        if let Ok(width) = env::var("HELMSMAN_WINDOW_WIDTH") {
            config.window_width = width
                .parse()
                .map_err(|_| Error::configuration("Invalid HELMSMAN_WINDOW_WIDTH"))?;
        }

        if let Ok(height) = env::var("HELMSMAN_WINDOW_HEIGHT") {
            config.window_height = height
                .parse()
                .map_err(|_| Error::configuration("Invalid HELMSMAN_WINDOW_HEIGHT"))?;
        }

        if let Ok(implicit) = env::var("HELMSMAN_IMPLICIT_WAIT") {
            config.implicit_wait_secs = implicit
                .parse()
                .map_err(|_| Error::configuration("Invalid HELMSMAN_IMPLICIT_WAIT"))?;
        }

        if let Ok(explicit) = env::var("HELMSMAN_EXPLICIT_WAIT") {
            config.explicit_wait_secs = explicit
                .parse()
                .map_err(|_| Error::configuration("Invalid HELMSMAN_EXPLICIT_WAIT"))?;
        }

        if let Ok(page_load) = env::var("HELMSMAN_PAGE_LOAD_TIMEOUT") {
            config.page_load_timeout_secs = page_load
                .parse()
                .map_err(|_| Error::configuration("Invalid HELMSMAN_PAGE_LOAD_TIMEOUT"))?;
        }

        if let Ok(poll) = env::var("HELMSMAN_POLL_INTERVAL_MS") {
            config.poll_interval_ms = poll
                .parse()
                .map_err(|_| Error::configuration("Invalid HELMSMAN_POLL_INTERVAL_MS"))?;
        }

        if let Ok(locators_dir) = env::var("HELMSMAN_LOCATORS_DIR") {
            config.locators_dir = locators_dir;
        }

        if let Ok(screenshot_dir) = env::var("HELMSMAN_SCREENSHOT_DIR") {
            config.screenshot_dir = screenshot_dir;
        }

        if let Ok(on_failure) = env::var("HELMSMAN_SCREENSHOT_ON_FAILURE") {
            config.screenshot_on_failure = on_failure
                .parse()
                .map_err(|_| Error::configuration("Invalid HELMSMAN_SCREENSHOT_ON_FAILURE"))?;
        }

        if let Ok(log_level) = env::var("HELMSMAN_LOG_LEVEL") {
            config.log_level = log_level;
        }

        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::configuration(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::configuration(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Implicit element-lookup timeout
    pub fn implicit_wait(&self) -> Duration {
        Duration::from_secs(self.implicit_wait_secs)
    }

    /// Explicit condition-wait timeout
    pub fn explicit_wait(&self) -> Duration {
        Duration::from_secs(self.explicit_wait_secs)
    }

    /// Page-load timeout
    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }

    /// Sleep between condition polls
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.browser, "chrome");
        assert_eq!(config.explicit_wait(), Duration::from_secs(30));
        assert_eq!(config.poll_interval(), Duration::from_millis(500));
        assert!(config.screenshot_on_failure);
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
            browser = "firefox"
            headless = false
            explicit_wait_secs = 5
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.browser, "firefox");
        assert!(!config.headless);
        assert_eq!(config.explicit_wait_secs, 5);
        // Unspecified keys fall back to defaults
        assert_eq!(config.page_load_timeout_secs, 60);
    }

    #[test]
    fn test_from_file_missing() {
        let result = Config::from_file("/nonexistent/helmsman.toml");
        assert!(matches!(result, Err(Error::Configuration(_))));
    }
}
