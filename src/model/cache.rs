//! Load-once classifier handle, reused for every analysis in the process.

use super::{load_classifier, Classifier, ModelError};
use std::path::Path;
use std::sync::{Arc, OnceLock};

pub struct ModelCache {
    cell: OnceLock<Arc<dyn Classifier>>,
}

impl ModelCache {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Process-wide instance
    pub fn shared() -> &'static ModelCache {
        static SHARED: ModelCache = ModelCache::new();
        &SHARED
    }

    /// Return the cached classifier, loading it from `path` on first use.
    /// A failed load leaves the cache empty. Later calls ignore `path` once loaded.
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<dyn Classifier>, ModelError> {
        if let Some(c) = self.cell.get() {
            return Ok(Arc::clone(c));
        }
        let loaded = load_classifier(path)?;
        Ok(Arc::clone(self.cell.get_or_init(|| loaded)))
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl Default for ModelCache {
    fn default() -> Self {
        Self::new()
    }
}
