//! Full character catalog assembly.
//!
//! The upstream listing is paginated: each page carries a `next` link until
//! the last one. `CatalogFetcher::load` serves the cached catalog while it is
//! fresh and otherwise walks every page in order, concatenates the results,
//! and stores them with a new timestamp.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError};
use crate::cache::manager::format_age;
use crate::cache::{CacheManager, Clock, SystemClock};
use crate::models::CharacterRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    Cache,
    Network,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    pub characters: Vec<CharacterRecord>,
    pub captured_at: DateTime<Utc>,
    pub source: CatalogSource,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn age_display(&self, now: DateTime<Utc>) -> String {
        format_age((now - self.captured_at).num_minutes())
    }
}

pub struct CatalogFetcher {
    client: ApiClient,
    cache: CacheManager,
    clock: Arc<dyn Clock>,
}

impl CatalogFetcher {
    pub fn new(client: ApiClient, cache: CacheManager) -> Self {
        Self {
            client,
            cache,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn cache(&self) -> &CacheManager {
        &self.cache
    }

    /// Cached catalog if fresh, otherwise a full refetch.
    pub async fn load(&self) -> Result<Catalog> {
        let now = self.clock.now();

        match self.cache.load_catalog(now) {
            Ok(Some(cached)) => {
                return Ok(Catalog {
                    characters: cached.characters,
                    captured_at: cached.captured_at,
                    source: CatalogSource::Cache,
                });
            }
            Ok(None) => {}
            Err(e) => {
                // Unreadable cache = treat as missing
                warn!(error = %e, "Failed to read catalog cache");
            }
        }

        self.fetch_and_store(now).await
    }

    /// Ignore any cached copy and fetch every page again.
    pub async fn refresh(&self) -> Result<Catalog> {
        let now = self.clock.now();
        self.fetch_and_store(now).await
    }

    async fn fetch_and_store(&self, now: DateTime<Utc>) -> Result<Catalog> {
        let characters = fetch_all_pages(&self.client, &self.client.people_url()).await?;

        if let Err(e) = self.cache.save_catalog(&characters, now) {
            warn!(error = %e, "Failed to save catalog to cache");
        }

        info!(count = characters.len(), "Fetched character catalog");
        Ok(Catalog {
            characters,
            captured_at: now,
            source: CatalogSource::Network,
        })
    }
}

/// Follow `next` links from `start_url` until the last page and concatenate
/// every page's results in arrival order.
///
/// Pages are requested one at a time. The first failure aborts the walk and
/// nothing collected so far is returned.
pub async fn fetch_all_pages(client: &ApiClient, start_url: &str) -> Result<Vec<CharacterRecord>> {
    let mut characters = Vec::new();
    let mut visited = HashSet::new();
    let mut next_page = Some(start_url.to_string());
    let mut page_number = 0usize;

    while let Some(url) = next_page {
        if !visited.insert(url.clone()) {
            return Err(ApiError::InvalidResponse(format!(
                "Pagination loops back to {}",
                url
            ))
            .into());
        }

        page_number += 1;
        let page = client
            .fetch_people_page(&url)
            .await
            .with_context(|| format!("Failed to fetch character page {}", page_number))?;

        debug!(page = page_number, results = page.results.len(), "Appending page");
        characters.extend(page.results);
        next_page = page.next;
    }

    Ok(characters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use crate::test_support::StubTransport;
    use chrono::{Duration, TimeZone};
    use serde_json::{json, Value};
    use std::sync::Mutex;

    const BASE: &str = "https://swapi.test/api";
    const PAGE_1: &str = "https://swapi.test/api/people/";
    const PAGE_2: &str = "https://swapi.test/api/people/?page=2";
    const PAGE_3: &str = "https://swapi.test/api/people/?page=3";

    struct FixedClock(Mutex<DateTime<Utc>>);

    impl FixedClock {
        fn new(now: DateTime<Utc>) -> Self {
            Self(Mutex::new(now))
        }

        fn advance(&self, by: Duration) {
            let mut now = self.0.lock().unwrap();
            *now += by;
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    fn person(id: u32, name: &str) -> Value {
        json!({
            "name": name,
            "height": "172",
            "mass": "77",
            "species": [],
            "films": [],
            "url": format!("https://swapi.test/api/people/{}/", id),
        })
    }

    fn three_pages() -> StubTransport {
        StubTransport::new()
            .with_json(
                PAGE_1,
                json!({"count": 5, "next": PAGE_2, "previous": null,
                       "results": [person(1, "Luke Skywalker"), person(2, "C-3PO")]}),
            )
            .with_json(
                PAGE_2,
                json!({"count": 5, "next": PAGE_3, "previous": PAGE_1,
                       "results": [person(3, "R2-D2"), person(4, "Darth Vader")]}),
            )
            .with_json(
                PAGE_3,
                json!({"count": 5, "next": null, "previous": PAGE_2,
                       "results": [person(5, "Leia Organa")]}),
            )
    }

    fn fetcher(transport: Arc<StubTransport>, clock: Arc<FixedClock>) -> CatalogFetcher {
        let client = ApiClient::with_transport(transport, BASE);
        CatalogFetcher::new(client, CacheManager::new(MemoryStore::new())).with_clock(clock)
    }

    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 4, 12, 0, 0).unwrap()
    }

    fn names(characters: &[CharacterRecord]) -> Vec<&str> {
        characters.iter().map(|c| c.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_pages_are_concatenated_in_order() {
        let transport = Arc::new(three_pages());
        let client = ApiClient::with_transport(transport.clone(), BASE);

        let characters = fetch_all_pages(&client, PAGE_1).await.unwrap();

        assert_eq!(
            names(&characters),
            vec!["Luke Skywalker", "C-3PO", "R2-D2", "Darth Vader", "Leia Organa"]
        );
        assert_eq!(transport.calls(), vec![PAGE_1, PAGE_2, PAGE_3]);
    }

    #[tokio::test]
    async fn test_load_serves_cache_within_24_hours() {
        let transport = Arc::new(three_pages());
        let clock = Arc::new(FixedClock::new(epoch()));
        let fetcher = fetcher(transport.clone(), clock.clone());

        let first = fetcher.load().await.unwrap();
        assert_eq!(first.source, CatalogSource::Network);
        assert_eq!(first.len(), 5);
        assert_eq!(transport.call_count(), 3);

        clock.advance(Duration::hours(23));
        let second = fetcher.load().await.unwrap();

        assert_eq!(second.source, CatalogSource::Cache);
        assert_eq!(second.characters, first.characters);
        assert_eq!(transport.call_count(), 3);
    }

    #[tokio::test]
    async fn test_second_load_at_fixed_time_hits_cache() {
        let transport = Arc::new(three_pages());
        let clock = Arc::new(FixedClock::new(epoch()));
        let fetcher = fetcher(transport.clone(), clock);

        let first = fetcher.load().await.unwrap();
        let second = fetcher.load().await.unwrap();

        assert_eq!(first.source, CatalogSource::Network);
        assert_eq!(second.source, CatalogSource::Cache);
        assert_eq!(second.captured_at.timestamp_millis(), epoch().timestamp_millis());
        assert_eq!(transport.call_count(), 3);
    }

    #[tokio::test]
    async fn test_load_refetches_after_24_hours() {
        let transport = Arc::new(three_pages());
        let clock = Arc::new(FixedClock::new(epoch()));
        let fetcher = fetcher(transport.clone(), clock.clone());

        fetcher.load().await.unwrap();
        clock.advance(Duration::hours(24));
        let reloaded = fetcher.load().await.unwrap();

        assert_eq!(reloaded.source, CatalogSource::Network);
        assert_eq!(transport.call_count(), 6);
    }

    #[tokio::test]
    async fn test_failed_page_aborts_and_caches_nothing() {
        let transport = Arc::new(three_pages().with_failure(PAGE_2));
        let clock = Arc::new(FixedClock::new(epoch()));
        let fetcher = fetcher(transport.clone(), clock.clone());

        let err = fetcher.load().await.unwrap_err();
        assert!(matches!(err.downcast_ref::<ApiError>(), Some(ApiError::ServerError(_))));
        assert_eq!(transport.calls(), vec![PAGE_1, PAGE_2]);

        assert!(fetcher.cache().load_catalog(clock.now()).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_refresh_bypasses_fresh_cache() {
        let transport = Arc::new(three_pages());
        let clock = Arc::new(FixedClock::new(epoch()));
        let fetcher = fetcher(transport.clone(), clock);

        fetcher.load().await.unwrap();
        let refreshed = fetcher.refresh().await.unwrap();

        assert_eq!(refreshed.source, CatalogSource::Network);
        assert_eq!(transport.call_count(), 6);
    }

    #[tokio::test]
    async fn test_pagination_cycle_is_rejected() {
        let transport = Arc::new(StubTransport::new().with_json(
            PAGE_1,
            json!({"next": PAGE_1, "results": [person(1, "Luke Skywalker")]}),
        ));
        let client = ApiClient::with_transport(transport.clone(), BASE);

        let err = fetch_all_pages(&client, PAGE_1).await.unwrap_err();

        assert!(matches!(err.downcast_ref::<ApiError>(), Some(ApiError::InvalidResponse(_))));
        assert_eq!(transport.call_count(), 1);
    }
}
