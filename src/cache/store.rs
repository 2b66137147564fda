//! Cache storage.
//!
//! [`ListCache`] holds the latest fetched collection for one key and
//! coalesces concurrent cold loads into a single store fetch.
//! [`CollectionCaches`] aggregates one cache per cached entity kind and is
//! injected wherever invalidation is needed — there is no process-global
//! cache, so tests instantiate isolated copies.

use std::future::Future;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use metrics::counter;
use tokio::sync::Mutex as AsyncMutex;
use tracing::debug;

use crate::domain::entities::{CaseStudyRecord, ProjectRecord};

use super::config::CacheConfig;
use super::keys::CollectionKey;
use super::lock::{rw_read, rw_write};

const SOURCE: &str = "cache::store";

/// Cached collection for a single [`CollectionKey`].
pub struct ListCache<T> {
    key: CollectionKey,
    enabled: bool,
    slot: RwLock<Option<Arc<Vec<T>>>>,
    // Bumped on every invalidation; a fetch only installs its result if no
    // invalidation happened while it was in flight.
    generation: AtomicU64,
    // Serializes cold fetches so concurrent loads share one round-trip.
    fetch_gate: AsyncMutex<()>,
}

impl<T> ListCache<T> {
    pub fn new(key: CollectionKey, config: &CacheConfig) -> Self {
        Self {
            key,
            enabled: config.is_enabled(),
            slot: RwLock::new(None),
            generation: AtomicU64::new(0),
            fetch_gate: AsyncMutex::new(()),
        }
    }

    /// The cached collection, if any, without triggering a fetch.
    pub fn peek(&self) -> Option<Arc<Vec<T>>> {
        rw_read(&self.slot, SOURCE, "peek").clone()
    }

    /// True while no data is available and a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.peek().is_none() && self.fetch_gate.try_lock().is_err()
    }

    /// Drop the cached collection; the next `load()` re-fetches.
    pub fn invalidate(&self) {
        if !self.enabled {
            return;
        }
        self.generation.fetch_add(1, Ordering::SeqCst);
        *rw_write(&self.slot, SOURCE, "invalidate") = None;
        counter!("prospecta_cache_invalidate_total", "collection" => self.key.as_str())
            .increment(1);
    }

    /// Return the cached collection, fetching it once if absent.
    ///
    /// Callers that arrive while a fetch is in flight wait on the gate and
    /// are served from the slot the first caller filled — the store sees
    /// exactly one request no matter how many loads race. Fetch errors
    /// propagate to every caller that ran the fetch; nothing is cached on
    /// failure and no retry is attempted here.
    pub async fn load<F, Fut, E>(&self, fetch: F) -> Result<Arc<Vec<T>>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, E>>,
    {
        if !self.enabled {
            return Ok(Arc::new(fetch().await?));
        }

        if let Some(rows) = self.peek() {
            counter!("prospecta_cache_hit_total", "collection" => self.key.as_str()).increment(1);
            return Ok(rows);
        }

        let _gate = self.fetch_gate.lock().await;

        // A caller that held the gate first may have filled the slot.
        if let Some(rows) = self.peek() {
            counter!("prospecta_cache_coalesced_total", "collection" => self.key.as_str())
                .increment(1);
            return Ok(rows);
        }

        counter!("prospecta_cache_miss_total", "collection" => self.key.as_str()).increment(1);
        let generation = self.generation.load(Ordering::SeqCst);
        let rows = Arc::new(fetch().await?);

        if self.generation.load(Ordering::SeqCst) == generation {
            *rw_write(&self.slot, SOURCE, "load.install") = Some(rows.clone());
        } else {
            // Invalidated while fetching: the result may predate the write
            // that caused the invalidation, so serve it once but do not
            // install it.
            debug!(
                collection = self.key.as_str(),
                "fetch result superseded by invalidation"
            );
        }

        Ok(rows)
    }
}

/// One cache per cached entity kind.
pub struct CollectionCaches {
    projects: ListCache<ProjectRecord>,
    case_studies: ListCache<CaseStudyRecord>,
}

impl CollectionCaches {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            projects: ListCache::new(CollectionKey::Projects, config),
            case_studies: ListCache::new(CollectionKey::CaseStudies, config),
        }
    }

    pub fn projects(&self) -> &ListCache<ProjectRecord> {
        &self.projects
    }

    pub fn case_studies(&self) -> &ListCache<CaseStudyRecord> {
        &self.case_studies
    }

    pub fn invalidate(&self, key: CollectionKey) {
        match key {
            CollectionKey::Projects => self.projects.invalidate(),
            CollectionKey::CaseStudies => self.case_studies.invalidate(),
        }
    }

    pub fn is_loading(&self, key: CollectionKey) -> bool {
        match key {
            CollectionKey::Projects => self.projects.is_loading(),
            CollectionKey::CaseStudies => self.case_studies.is_loading(),
        }
    }

    /// Drop all cached collections.
    pub fn clear(&self) {
        self.projects.invalidate();
        self.case_studies.invalidate();
    }
}

impl Default for CollectionCaches {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}
