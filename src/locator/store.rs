//! Locator store
//!
//! Caches page locator sets for the process lifetime and resolves symbolic
//! (page, element) names to executable strategies.

use crate::locator::model::{LocatorDefinition, PageLocatorSet, Strategy};
use crate::locator::source::LocatorSource;
use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Caching front of the locator source
///
/// The cache is append-only and guarded by a single lock; invalidation
/// replaces entries atomically, so readers never observe a partially
/// updated set.
pub struct LocatorStore {
    source: Arc<dyn LocatorSource>,
    cache: RwLock<HashMap<String, Arc<PageLocatorSet>>>,
}

impl LocatorStore {
    /// Create a store over the given source
    pub fn new(source: Arc<dyn LocatorSource>) -> Self {
        Self {
            source,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Cached locator set for a page, loading it on first access
    pub fn page_locators(&self, page_name: &str) -> Result<Arc<PageLocatorSet>> {
        if let Some(cached) = self
            .cache
            .read()
            .map_err(|e| Error::internal(format!("Lock error: {}", e)))?
            .get(page_name)
            .cloned()
        {
            return Ok(cached);
        }

        // Load under the write lock so a page record is read exactly once
        // and an insert is never observed half-done.
        let mut cache = self
            .cache
            .write()
            .map_err(|e| Error::internal(format!("Lock error: {}", e)))?;

        if let Some(cached) = cache.get(page_name) {
            return Ok(cached.clone());
        }

        let set = Arc::new(self.source.load(page_name)?);
        cache.insert(page_name.to_string(), set.clone());
        Ok(set)
    }

    /// Definition for a specific element on a page
    pub fn locator(&self, page_name: &str, element_name: &str) -> Result<LocatorDefinition> {
        let set = self.page_locators(page_name)?;
        set.locator(element_name)
            .cloned()
            .ok_or_else(|| Error::locator_not_found(page_name, element_name))
    }

    /// Executable strategy for a specific element on a page
    pub fn strategy(&self, page_name: &str, element_name: &str) -> Result<Strategy> {
        let definition = self.locator(page_name, element_name)?;
        Strategy::from_definition(&definition)
    }

    /// Drop every cached entry; subsequent reads reload from the source
    pub fn clear_cache(&self) -> Result<()> {
        self.cache
            .write()
            .map_err(|e| Error::internal(format!("Lock error: {}", e)))?
            .clear();
        debug!("Locator cache cleared");
        Ok(())
    }

    /// Reload one page's locators from the source
    pub fn reload_page(&self, page_name: &str) -> Result<Arc<PageLocatorSet>> {
        let mut cache = self
            .cache
            .write()
            .map_err(|e| Error::internal(format!("Lock error: {}", e)))?;

        cache.remove(page_name);
        let set = Arc::new(self.source.load(page_name)?);
        cache.insert(page_name.to_string(), set.clone());
        debug!("Reloaded locators for page: {}", page_name);
        Ok(set)
    }

    /// Number of cached page sets
    pub fn cached_pages(&self) -> usize {
        self.cache.read().map(|c| c.len()).unwrap_or(0)
    }
}
