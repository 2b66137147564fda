//! Prospecta collection cache.
//!
//! Holds one cached collection per entity kind, keyed by a fixed
//! [`CollectionKey`]. Reads are served from the cache when present;
//! concurrent cold reads are coalesced into a single store fetch. Writes
//! never touch cached data directly — they invalidate the key and let the
//! next read re-fetch.
//!
//! ## Configuration
//!
//! Cache behavior is controlled via `prospecta.toml`:
//!
//! ```toml
//! [cache]
//! enabled = true
//! ```

mod config;
mod keys;
pub(crate) mod lock;
mod store;

pub use config::CacheConfig;
pub use keys::CollectionKey;
pub use store::{CollectionCaches, ListCache};
