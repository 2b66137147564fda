//! Cache configuration.

/// Runtime switches for the collection cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// When false, every `load()` goes straight to the store and nothing is
    /// retained. Invalidation becomes a no-op.
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl CacheConfig {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
