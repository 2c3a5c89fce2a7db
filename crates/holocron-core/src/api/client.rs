//! API client for the Star Wars API.
//!
//! Typed wrappers over the three endpoints the catalog needs: the paginated
//! `people` listing, a single person, and a species looked up by URL.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::models::{CharacterRecord, Page, Species};
use crate::reference::{ResourceKind, ResourceRef};

use super::{ApiError, HttpTransport, Transport};

/// API client for SWAPI.
/// Clone is cheap - the transport is shared behind an `Arc`.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl ApiClient {
    /// Create a client talking HTTP to `base_url` (e.g. `https://swapi.dev/api`).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self::with_transport(Arc::new(HttpTransport::new()?), base_url))
    }

    pub fn with_transport(transport: Arc<dyn Transport>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            transport,
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// First page of the character listing.
    pub fn people_url(&self) -> String {
        format!("{}/{}/", self.base_url, ResourceKind::People)
    }

    pub fn person_url(&self, id: u32) -> String {
        ResourceRef::new(ResourceKind::People, id).url(&self.base_url)
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let value = self.transport.get_json(url).await?;
        serde_json::from_value(value)
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
            .with_context(|| format!("Unexpected response shape from {}", url))
    }

    // ===== Data Fetching Methods =====

    /// Fetch one page of the character listing. `url` is either `people_url()`
    /// or a `next` link from a previous page.
    pub async fn fetch_people_page(&self, url: &str) -> Result<Page<CharacterRecord>> {
        let page: Page<CharacterRecord> = self.get(url).await?;
        debug!(
            url = url,
            results = page.results.len(),
            has_next = page.next.is_some(),
            "Fetched people page"
        );
        Ok(page)
    }

    /// Fetch a single character by id
    pub async fn fetch_character(&self, id: u32) -> Result<CharacterRecord> {
        let url = self.person_url(id);
        self.get(&url)
            .await
            .with_context(|| format!("Failed to fetch character {}", id))
    }

    /// Fetch a species by the absolute URL found in a character's `species` list
    pub async fn fetch_species(&self, url: &str) -> Result<Species> {
        self.get(url)
            .await
            .with_context(|| format!("Failed to fetch species {}", url))
    }
}
