use anyhow::{Context, Result};
use chrono::{DateTime, Duration, TimeZone, Utc};
use tracing::{debug, warn};

use crate::models::CharacterRecord;

use super::KvStore;

/// Key holding the serialized character array.
pub const CATALOG_KEY: &str = "cachedCharacters";

/// Key holding the capture time in milliseconds since the Unix epoch.
pub const TIMESTAMP_KEY: &str = "cachedTimestamp";

/// The catalog is served from cache for 24 hours after capture.
pub const CATALOG_TTL_HOURS: i64 = 24;

pub fn catalog_ttl() -> Duration {
    Duration::hours(CATALOG_TTL_HOURS)
}

/// Human-readable age: "just now", "5m ago", "3h ago", "2d ago".
pub fn format_age(minutes: i64) -> String {
    if minutes < 1 {
        // Also covers clock skew
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 1440 {
        let hours = minutes / 60;
        let remaining_mins = minutes % 60;
        if remaining_mins >= 30 {
            // Round up: 1h 30m+ becomes 2h
            format!("{}h ago", hours + 1)
        } else {
            format!("{}h ago", hours)
        }
    } else {
        let days = minutes / 1440;
        let remaining_hours = (minutes % 1440) / 60;
        if remaining_hours >= 12 {
            format!("{}d ago", days + 1)
        } else {
            format!("{}d ago", days)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CachedCatalog {
    pub characters: Vec<CharacterRecord>,
    pub captured_at: DateTime<Utc>,
}

impl CachedCatalog {
    pub fn age_minutes(&self, now: DateTime<Utc>) -> i64 {
        (now - self.captured_at).num_minutes()
    }

    pub fn age_display(&self, now: DateTime<Utc>) -> String {
        format_age(self.age_minutes(now))
    }

    /// Valid only while `now - captured_at < 24h`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.captured_at >= catalog_ttl()
    }
}

/// Reads and writes the character catalog through a `KvStore`.
pub struct CacheManager {
    store: Box<dyn KvStore>,
}

impl CacheManager {
    pub fn new(store: impl KvStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Return the stored catalog if it is present and still fresh at `now`.
    ///
    /// An expired catalog is removed from the store. So is a half-written or
    /// undecodable one, which then reads as a miss.
    pub fn load_catalog(&self, now: DateTime<Utc>) -> Result<Option<CachedCatalog>> {
        let characters = self.store.get(CATALOG_KEY)?;
        let timestamp = self.store.get(TIMESTAMP_KEY)?;

        let (characters, timestamp) = match (characters, timestamp) {
            (Some(characters), Some(timestamp)) => (characters, timestamp),
            (None, None) => {
                debug!("No cached catalog");
                return Ok(None);
            }
            _ => {
                warn!("Cached catalog is incomplete, discarding");
                self.clear()?;
                return Ok(None);
            }
        };

        let cached = match Self::decode(&characters, &timestamp) {
            Ok(cached) => cached,
            Err(e) => {
                warn!(error = %e, "Cached catalog is unreadable, discarding");
                self.clear()?;
                return Ok(None);
            }
        };

        if cached.is_expired(now) {
            debug!(captured_at = %cached.captured_at, "Cached catalog expired, discarding");
            self.clear()?;
            return Ok(None);
        }

        debug!(
            count = cached.characters.len(),
            age = %cached.age_display(now),
            "Using cached catalog"
        );
        Ok(Some(cached))
    }

    /// Store `characters` as captured at `now`.
    ///
    /// Both keys are written without a store-level expiry. Freshness is
    /// decided only by `load_catalog` against the caller's `now`.
    pub fn save_catalog(&self, characters: &[CharacterRecord], now: DateTime<Utc>) -> Result<()> {
        let json = serde_json::to_string(characters).context("Failed to serialize catalog")?;

        self.store.set(CATALOG_KEY, &json, None)?;
        self.store
            .set(TIMESTAMP_KEY, &now.timestamp_millis().to_string(), None)?;

        debug!(count = characters.len(), "Saved catalog to cache");
        Ok(())
    }

    /// Remove both catalog keys.
    pub fn clear(&self) -> Result<()> {
        self.store.remove(CATALOG_KEY)?;
        self.store.remove(TIMESTAMP_KEY)?;
        Ok(())
    }

    fn decode(characters: &str, timestamp: &str) -> Result<CachedCatalog> {
        let millis: i64 = timestamp
            .trim()
            .parse()
            .with_context(|| format!("Invalid cache timestamp: {}", timestamp))?;
        let captured_at = Utc
            .timestamp_millis_opt(millis)
            .single()
            .with_context(|| format!("Cache timestamp out of range: {}", millis))?;
        let characters: Vec<CharacterRecord> =
            serde_json::from_str(characters).context("Failed to parse cached characters")?;

        Ok(CachedCatalog {
            characters,
            captured_at,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
