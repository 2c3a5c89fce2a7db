//! Local caching module for offline data access.
//!
//! `KvStore` is the persisted key/value interface (`get`/`set`/`remove`
//! with an optional expiry). `FileStore` keeps one JSON file per key and
//! `MemoryStore` lives only for the process.
//!
//! `CacheManager` stores the character catalog on top of a store under two
//! keys, the serialized records and a capture timestamp, and considers it
//! expired 24 hours after capture.

pub mod clock;
pub mod manager;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use manager::{CacheManager, CachedCatalog};
pub use store::{FileStore, KvStore, MemoryStore};
