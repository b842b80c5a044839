//! Filter state for one domain, with country-derived defaults and
//! persisted presets.
//!
//! The store is an explicit object owned by the caller. Persistence goes
//! through a [`KeyValueStore`] and is best-effort: storage failures and
//! corrupted records are logged and treated as "no data".

mod kv;
mod sqlite;
mod store;
mod types;

pub use kv::{KeyValueStore, MemoryKvStore, StorageError};
pub use sqlite::SqliteKvStore;
pub use store::FilterStore;
pub use types::{Destination, FiltersPatch, Preset, TripFilters};
