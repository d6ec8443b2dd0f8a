//! Location area documents

use serde::{Deserialize, Serialize};

/// `{ name, url }` reference used throughout the catalog API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// One page of `GET /location-area`.
///
/// `next` and `previous` are null at the ends of the listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationAreaPage {
    #[serde(default)]
    pub count: u32,
    pub next: Option<String>,
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

/// `GET /location-area/{name}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationArea {
    pub name: String,
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonEncounter {
    pub pokemon: NamedResource,
}
