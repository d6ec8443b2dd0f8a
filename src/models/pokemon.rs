//! Pokemon documents

use serde::{Deserialize, Serialize};

use super::NamedResource;

/// `GET /pokemon/{name}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pokemon {
    pub name: String,
    /// Null for some alternate forms
    #[serde(default)]
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    #[serde(default)]
    pub types: Vec<PokemonType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonStat {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonType {
    #[serde(default)]
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}
