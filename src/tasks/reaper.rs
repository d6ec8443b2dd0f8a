//! TTL Reaper Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that sweeps expired entries every `interval`.
///
/// Each sweep takes the store lock, removes every entry whose age is at
/// least the store TTL, and releases the lock before waiting for the next
/// tick. The lock is never held across an await point.
///
/// The task exits when `shutdown` fires or its sender is dropped. The
/// returned handle can also be aborted directly.
///
/// # Panics
/// Panics if `interval` is zero or if called outside a tokio runtime.
pub fn spawn_reaper(
    store: Arc<Mutex<CacheStore>>,
    interval: Duration,
    mut shutdown: oneshot::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(?interval, "Starting TTL reaper task");

        let mut ticker = time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = &mut shutdown => {
                    info!("TTL reaper received shutdown signal");
                    break;
                }
            }

            let (removed, remaining) = {
                let mut guard = store.lock().unwrap_or_else(PoisonError::into_inner);
                let removed = guard.reap_expired(Instant::now());
                (removed, guard.len())
            };

            if removed > 0 {
                info!(removed, remaining, "TTL reaper: removed expired entries");
            } else {
                debug!(remaining, "TTL reaper: no expired entries found");
            }
        }
    })
}
