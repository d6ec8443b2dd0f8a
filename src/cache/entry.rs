//! Cache Entry Module
//!
//! Defines the structure for individual cache entries.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A stored payload plus the instant it was added.
///
/// Entries are never mutated; a repeated add replaces the whole entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload
    pub value: Vec<u8>,
    /// When the entry was added
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(value: Vec<u8>) -> Self {
        Self {
            value,
            created_at: Instant::now(),
        }
    }

    // == Age ==
    /// Time elapsed between creation and `now`, zero if `now` is earlier.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Expired ==
    /// Checks whether the entry has lived for at least `ttl` at `now`.
    ///
    /// Boundary condition: an entry whose age equals the TTL is expired.
    pub fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        self.age(now) >= ttl
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_entry_fresh_on_creation() {
        let entry = CacheEntry::new(vec![1, 2, 3]);

        assert_eq!(entry.value, vec![1, 2, 3]);
        assert_eq!(entry.age(Instant::now()), Duration::ZERO);
        assert!(!entry.is_expired(Duration::from_secs(1), Instant::now()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_ages_with_clock() {
        let entry = CacheEntry::new(b"pikachu".to_vec());

        tokio::time::advance(Duration::from_millis(250)).await;

        assert_eq!(entry.age(Instant::now()), Duration::from_millis(250));
        assert!(!entry.is_expired(Duration::from_millis(300), Instant::now()));
        assert!(entry.is_expired(Duration::from_millis(200), Instant::now()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new(Vec::new());
        let ttl = Duration::from_millis(100);

        tokio::time::advance(ttl).await;

        assert!(
            entry.is_expired(ttl, Instant::now()),
            "Entry should be expired exactly at its TTL"
        );
    }

    #[test]
    fn test_age_saturates_for_earlier_instant() {
        let earlier = Instant::now();
        let entry = CacheEntry::new(Vec::new());

        assert_eq!(entry.age(earlier), Duration::ZERO);
    }
}
