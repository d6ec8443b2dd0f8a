//! Catalog API client
//!
//! Fetch layer that consults the expiring cache before going to the network.

mod pokeapi;

pub use pokeapi::PokeApiClient;
