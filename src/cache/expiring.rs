//! Expiring Cache Module
//!
//! Shared cache handle: a single mutex over the store plus the background
//! reaper bound to the cache's lifetime.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::{CacheStats, CacheStore};
use crate::error::{PokedexError, Result};
use crate::tasks::spawn_reaper;

/// Handle to the running reaper task.
#[derive(Debug)]
struct Reaper {
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

// == Cache ==
/// In-memory byte cache whose entries are purged once they reach the TTL.
///
/// `add` and `get` are synchronous and hold the lock only for the map
/// operation. Expiry is done by a background task sweeping once per TTL, so
/// an entry can still be read for up to one extra interval after it expires.
///
/// Call [`Cache::stop`] to shut the reaper down cleanly. Dropping the cache
/// without stopping it aborts the reaper.
///
/// # Example
/// ```ignore
/// let cache = Cache::new(Duration::from_secs(60))?;
/// cache.add(url, body);
/// if let Some(body) = cache.get(&url) { /* reuse */ }
/// cache.stop().await;
/// ```
#[derive(Debug)]
pub struct Cache {
    store: Arc<Mutex<CacheStore>>,
    reaper: Option<Reaper>,
}

impl Cache {
    // == Constructor ==
    /// Creates an empty cache and starts its reaper with `ttl` as the sweep
    /// interval.
    ///
    /// A zero TTL is rejected with [`PokedexError::InvalidTtl`] rather than
    /// treated as "cache nothing".
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub fn new(ttl: Duration) -> Result<Self> {
        if ttl.is_zero() {
            return Err(PokedexError::InvalidTtl(ttl));
        }

        let store = Arc::new(Mutex::new(CacheStore::new(ttl)));
        let (shutdown, rx) = oneshot::channel();
        let handle = spawn_reaper(store.clone(), ttl, rx);
        debug!(?ttl, "Cache created");

        Ok(Self {
            store,
            reaper: Some(Reaper { shutdown, handle }),
        })
    }

    // == Add ==
    /// Inserts or replaces the value stored under `key`.
    pub fn add(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.lock().add(key.into(), value.into());
    }

    // == Get ==
    /// Returns the value stored under `key`, if any.
    ///
    /// Does not check freshness; see the type-level docs.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.lock().get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    /// Returns the stored keys in arbitrary order.
    pub fn keys(&self) -> Vec<String> {
        self.lock().keys()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn ttl(&self) -> Duration {
        self.lock().ttl()
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    // == Stop ==
    /// Signals the reaper to exit and waits for it to finish.
    ///
    /// Entries stay readable through any other reference to the store, but
    /// nothing will expire them afterwards. Consumes the cache.
    pub async fn stop(mut self) {
        let Some(reaper) = self.reaper.take() else {
            return;
        };

        // The reaper may already be gone if it was aborted; ignore send errors.
        let _ = reaper.shutdown.send(());
        match reaper.handle.await {
            Ok(()) => info!("Cache reaper stopped"),
            Err(err) => warn!(%err, "Cache reaper ended abnormally"),
        }
    }

    /// The store lock. A panic while holding it cannot leave the map
    /// half-written, so a poisoned lock is recovered rather than propagated.
    fn lock(&self) -> MutexGuard<'_, CacheStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Cache {
    fn drop(&mut self) {
        if let Some(reaper) = self.reaper.take() {
            debug!("Cache dropped without stop, aborting reaper");
            reaper.handle.abort();
        }
    }
}
