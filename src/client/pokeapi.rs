//! HTTP client for the PokeAPI catalog.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::cache::Cache;
use crate::error::{PokedexError, Result};
use crate::models::{LocationArea, LocationAreaPage, Pokemon};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Cache-aside client for the catalog API.
///
/// Every request URL doubles as its cache key. The client does not own the
/// cache; callers pass it in so its lifetime and shutdown stay with them.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: reqwest::Client,
    /// API root without trailing slash, e.g. `https://pokeapi.co/api/v2`
    base_url: String,
}

impl PokeApiClient {
    /// Creates a client for the API rooted at `base_url`, normally
    /// `Config::api_base_url`.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// First page of the location area listing.
    pub fn location_areas_url(&self) -> String {
        format!("{}/location-area", self.base_url)
    }

    pub fn location_area_url(&self, name: &str) -> String {
        format!("{}/location-area/{}", self.base_url, name)
    }

    pub fn pokemon_url(&self, name: &str) -> String {
        format!("{}/pokemon/{}", self.base_url, name)
    }

    // == Fetch ==
    /// Returns the body at `url`, from `cache` when present.
    ///
    /// On a miss the body is downloaded and stored under `url`. Non-success
    /// responses are returned as [`PokedexError::Status`] and never cached.
    pub async fn fetch(&self, url: &str, cache: &Cache) -> Result<Vec<u8>> {
        // Hits are not re-added, so reads never extend an entry past its TTL.
        if let Some(body) = cache.get(url) {
            debug!(url, "Cache hit");
            return Ok(body);
        }
        debug!(url, "Cache miss, fetching");

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            warn!(url, %status, "Catalog request failed");
            return Err(PokedexError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = resp.bytes().await?.to_vec();
        cache.add(url, body.clone());
        Ok(body)
    }

    /// Fetches `url` through the cache and decodes it as JSON.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str, cache: &Cache) -> Result<T> {
        let body = self.fetch(url, cache).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn location_area_page(&self, url: &str, cache: &Cache) -> Result<LocationAreaPage> {
        self.fetch_json(url, cache).await
    }

    pub async fn location_area(&self, name: &str, cache: &Cache) -> Result<LocationArea> {
        self.fetch_json(&self.location_area_url(name), cache).await
    }

    pub async fn pokemon(&self, name: &str, cache: &Cache) -> Result<Pokemon> {
        self.fetch_json(&self.pokemon_url(name), cache).await
    }
}
