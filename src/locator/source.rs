//! Locator source-of-truth
//!
//! One record per page name. The storage medium is a collaborator detail;
//! the file-backed source reads `{dir}/{page}.json`.

use crate::locator::model::PageLocatorSet;
use crate::{Error, Result};
use std::path::PathBuf;
use tracing::debug;

/// Record-by-name lookup over the externally defined locator records
pub trait LocatorSource: Send + Sync {
    /// Load and parse the record for `page_name`.
    ///
    /// Fails with [`Error::LocatorSourceNotFound`] when no record exists and
    /// [`Error::LocatorParse`] when the record is malformed.
    fn load(&self, page_name: &str) -> Result<PageLocatorSet>;
}

/// File-backed locator source: one JSON file per page
#[derive(Debug, Clone)]
pub struct FileLocatorSource {
    dir: PathBuf,
}

impl FileLocatorSource {
    /// Create a source rooted at `dir`
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    fn record_path(&self, page_name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", page_name))
    }
}

impl LocatorSource for FileLocatorSource {
    fn load(&self, page_name: &str) -> Result<PageLocatorSet> {
        let path = self.record_path(page_name);

        if !path.exists() {
            return Err(Error::LocatorSourceNotFound(page_name.to_string()));
        }

        let json = std::fs::read_to_string(&path)
            .map_err(|e| Error::locator_parse(page_name, e.to_string()))?;

        let set: PageLocatorSet = serde_json::from_str(&json)
            .map_err(|e| Error::locator_parse(page_name, e.to_string()))?;

        // A definition without a selector value can never resolve; reject
        // the record up front instead of failing on first use.
        for (element, definition) in &set.locators {
            if definition.value.trim().is_empty() {
                return Err(Error::locator_parse(
                    page_name,
                    format!("locator '{}' has an empty value", element),
                ));
            }
        }

        debug!("Loaded locators for page: {}", page_name);
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_record(dir: &std::path::Path, page: &str, json: &str) {
        std::fs::write(dir.join(format!("{}.json", page)), json).unwrap();
    }

    #[test]
    fn test_load_record() {
        let dir = tempfile::tempdir().unwrap();
        write_record(
            dir.path(),
            "LoginPage",
            r##"{"pageName":"LoginPage","locators":{"loginButton":{"type":"css","value":"#login"}}}"##,
        );

        let source = FileLocatorSource::new(dir.path());
        let set = source.load("LoginPage").unwrap();
        assert_eq!(set.page_name, "LoginPage");
        assert_eq!(set.locator("loginButton").unwrap().value, "#login");
    }

    #[test]
    fn test_missing_record() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileLocatorSource::new(dir.path());

        let result = source.load("NoSuchPage");
        assert!(matches!(result, Err(Error::LocatorSourceNotFound(page)) if page == "NoSuchPage"));
    }

    #[test]
    fn test_malformed_record() {
        let dir = tempfile::tempdir().unwrap();
        write_record(dir.path(), "BrokenPage", "{ not json");

        let source = FileLocatorSource::new(dir.path());
        let result = source.load("BrokenPage");
        assert!(matches!(result, Err(Error::LocatorParse { page, .. }) if page == "BrokenPage"));
    }

    #[test]
    fn test_empty_value_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_record(
            dir.path(),
            "HomePage",
            r#"{"pageName":"HomePage","locators":{"logo":{"type":"id","value":"  "}}}"#,
        );

        let source = FileLocatorSource::new(dir.path());
        let result = source.load("HomePage");
        assert!(matches!(result, Err(Error::LocatorParse { .. })));
    }
}
