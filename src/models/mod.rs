//! Catalog models
//!
//! Subsets of the PokeAPI JSON documents the REPL reads. Unknown fields are
//! ignored.

pub mod location;
pub mod pokemon;

// Re-export commonly used types
pub use location::{LocationArea, LocationAreaPage, NamedResource, PokemonEncounter};
pub use pokemon::{Pokemon, PokemonStat, PokemonType};
