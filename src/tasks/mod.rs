//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of a cache.
//!
//! # Tasks
//! - TTL Reaper: Removes expired cache entries once per TTL interval

mod reaper;

pub use reaper::spawn_reaper;
