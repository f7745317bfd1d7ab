//! Latest-forecast cache shared between the refresh schedule and readers.

use crate::error::Result;
use crate::forecast::ForecastDocument;
use std::sync::{Arc, RwLock};

/// Holds the most recently fetched forecast.
pub trait ForecastCache {
    fn get(&self) -> Option<ForecastDocument>;
    fn set(&self, document: ForecastDocument);
}

/// In-memory cache. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    latest: Arc<RwLock<Option<ForecastDocument>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ForecastCache for MemoryCache {
    fn get(&self) -> Option<ForecastDocument> {
        // a writer that panicked mid-set leaves the previous forecast in place
        let guard = self.latest.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.clone()
    }

    fn set(&self, document: ForecastDocument) {
        let mut guard = self.latest.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(document);
    }
}

/// Store `document` only if its risk levels are valid.
///
/// A rejected document leaves the previously cached forecast in place.
pub fn store_validated<C: ForecastCache>(cache: &C, document: ForecastDocument) -> Result<()> {
    document.validate()?;
    cache.set(document);
    Ok(())
}
