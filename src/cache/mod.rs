//! Cache Module
//!
//! Provides an in-memory byte cache with background TTL expiration.

mod entry;
mod expiring;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use expiring::Cache;
pub use stats::CacheStats;
pub use store::CacheStore;
