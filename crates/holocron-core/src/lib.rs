//! Holocron core library.
//!
//! Fetches the Star Wars character catalog from SWAPI, keeps a local copy
//! with a 24 hour expiry, and derives display fields for each character.
//!
//! - `api`: HTTP transport seam and the SWAPI client
//! - `cache`: key/value store trait and the catalog cache manager
//! - `catalog`: paginated roster fetch with cache-first loading
//! - `detail`: single character lookup plus species name
//! - `format`: pure record-to-display-fields formatter
//! - `reference`: typed parser for SWAPI resource URLs
//! - `search`: case-insensitive name filter

pub mod api;
pub mod cache;
pub mod catalog;
pub mod detail;
pub mod format;
pub mod models;
pub mod reference;
pub mod search;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::{ApiClient, ApiError, HttpTransport, Transport};
pub use cache::{CacheManager, Clock, FileStore, KvStore, MemoryStore, SystemClock};
pub use catalog::{Catalog, CatalogFetcher, CatalogSource};
pub use detail::{CharacterDetail, DetailFetcher, SpeciesName};
pub use format::{format_character, DisplayFields};
pub use models::{CharacterRecord, Page, Species};
pub use reference::{ParseError, ResourceKind, ResourceRef};
pub use search::filter_by_name;

/// Default SWAPI root. Every endpoint hangs off this prefix.
pub const DEFAULT_BASE_URL: &str = "https://swapi.dev/api";
