//! Pokedex - A PokeAPI REPL with an expiring response cache
//!
//! Catalog responses are cached by URL in memory and purged by a background
//! reaper once they reach the configured TTL.

pub mod cache;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod repl;
pub mod session;
pub mod tasks;

pub use cache::Cache;
pub use client::PokeApiClient;
pub use config::Config;
pub use error::{PokedexError, Result};
pub use repl::Repl;
pub use session::Session;
