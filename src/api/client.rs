//! PokeAPI Client
//!
//! Thin HTTP client that fetches and decodes PokeAPI resources.

use std::time::Duration;

use reqwest::{header::USER_AGENT, Client, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::types::{LocationArea, LocationAreaPage, Pokemon};
use crate::config::{normalize_base_url, Config};
use crate::error::{PokedexError, Result};

const CLIENT_USER_AGENT: &str = concat!("pokedex/", env!("CARGO_PKG_VERSION"));

// == PokeAPI Client ==
/// HTTP client bound to one PokeAPI base URL.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    client: Client,
    base_url: Url,
}

impl PokeApiClient {
    /// Creates a client for `base_url` with a per-request timeout.
    ///
    /// # Errors
    /// `PokedexError::InvalidUrl` if `base_url` is not a hierarchical URL.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(&normalize_base_url(base_url))
            .map_err(|e| PokedexError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(PokedexError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(PokedexError::Http)?;

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_base_url, config.http_timeout())
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    // == Resource URLs ==
    /// URL of the first location-area listing page.
    pub fn location_areas_url(&self) -> String {
        format!("{}location-area/", self.base_url)
    }

    pub fn location_area_url(&self, name: &str) -> String {
        self.resource_url("location-area", name)
    }

    pub fn pokemon_url(&self, name: &str) -> String {
        self.resource_url("pokemon", name)
    }

    /// Appends `collection/name` to the base URL.
    ///
    /// `name` is a single percent-encoded path segment, so `/`, `?` and `#`
    /// in user input cannot reach another path or add a query.
    fn resource_url(&self, collection: &str, name: &str) -> String {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base URL can take path segments
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(collection).push(name);
        }
        url.into()
    }

    // == Requests ==
    /// Fetches a location-area listing page.
    ///
    /// `page_url` is a `next`/`previous` link from an earlier page; `None`
    /// fetches the first page.
    pub async fn location_areas(&self, page_url: Option<&str>) -> Result<LocationAreaPage> {
        match page_url {
            Some(url) => self.get_json(url).await,
            None => self.get_json(&self.location_areas_url()).await,
        }
    }

    pub async fn location_area(&self, name: &str) -> Result<LocationArea> {
        self.get_json(&self.location_area_url(name)).await
    }

    pub async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        self.get_json(&self.pokemon_url(name)).await
    }

    /// GETs `url` and decodes the JSON body.
    ///
    /// Any non-2xx status becomes `PokedexError::Status` carrying the body.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(PokedexError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}
