//! Browser launch profiles
//!
//! A profile describes what to launch; [`BrowserProfile::launch_args`]
//! synthesizes the per-browser command-line flags a factory passes through
//! to the binary.

use crate::config::Config;
use crate::{Error, Result};

/// Supported browsers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserKind {
    Chrome,
    Firefox,
    Edge,
    Safari,
}

impl BrowserKind {
    /// Parse a browser name, case-insensitively
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "chrome" => Ok(BrowserKind::Chrome),
            "firefox" => Ok(BrowserKind::Firefox),
            "edge" => Ok(BrowserKind::Edge),
            "safari" => Ok(BrowserKind::Safari),
            other => Err(Error::configuration(format!(
                "Browser '{}' is not supported",
                other
            ))),
        }
    }
}

/// Launch profile handed to the driver-creation collaborator
#[derive(Debug, Clone)]
pub struct BrowserProfile {
    pub kind: BrowserKind,
    pub headless: bool,
    pub window_width: u32,
    pub window_height: u32,
}

impl BrowserProfile {
    /// Build a profile from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            kind: BrowserKind::parse(&config.browser)?,
            headless: config.headless,
            window_width: config.window_width,
            window_height: config.window_height,
        })
    }

    /// Command-line flags for this profile's browser
    pub fn launch_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        match self.kind {
            BrowserKind::Chrome => {
                if self.headless {
                    args.push("--headless=new".to_string());
                }
                args.push("--no-sandbox".to_string());
                args.push("--disable-dev-shm-usage".to_string());
                args.push("--disable-gpu".to_string());
                args.push("--disable-extensions".to_string());
                args.push(format!(
                    "--window-size={},{}",
                    self.window_width, self.window_height
                ));
                args.push("--remote-allow-origins=*".to_string());
            }
            BrowserKind::Firefox => {
                if self.headless {
                    args.push("--headless".to_string());
                }
                args.push(format!("--width={}", self.window_width));
                args.push(format!("--height={}", self.window_height));
            }
            BrowserKind::Edge => {
                if self.headless {
                    args.push("--headless=new".to_string());
                }
                args.push("--no-sandbox".to_string());
                args.push("--disable-dev-shm-usage".to_string());
                args.push(format!(
                    "--window-size={},{}",
                    self.window_width, self.window_height
                ));
            }
            // Safari has no headless mode and takes no geometry flags
            BrowserKind::Safari => {}
        }

        args
    }
}

impl Default for BrowserProfile {
    fn default() -> Self {
        Self {
            kind: BrowserKind::Chrome,
            headless: true,
            window_width: 1920,
            window_height: 1080,
        }
    }
}
