pub mod aggregate;
pub mod classify;
pub mod config;
pub mod defaults;
pub mod filters;
pub mod group;
pub mod listing;
pub mod logging;
pub mod metrics;
pub mod query;
pub mod source;
pub mod testing;
pub mod text;

pub use aggregate::{sort_items, Aggregator};
pub use classify::{Category, Disposition, ProCategory};
pub use config::{
    load_config, load_config_from_str, validate_config, AggregatorConfig, Config, ConfigError,
    FiltersConfig, LoggingConfig, StorageConfig, TripApiConfig,
};
pub use filters::{
    Destination, FilterStore, FiltersPatch, KeyValueStore, MemoryKvStore, Preset, SqliteKvStore,
    StorageError, TripFilters,
};
pub use group::{group_items, GroupKey, GroupMode, Section};
pub use listing::{
    AllItem, AllQuery, Kind, Paged, Professional, Property, SortOrder, Trip, UNKNOWN_TOTAL,
};
pub use logging::init_logging;
pub use query::{Normalizer, RawQuery};
pub use source::{
    HttpTripApi, InMemoryProfessionalStore, InMemoryPropertyStore, ProfessionalStore,
    PropertyStore, SourceError, TripApi, TripQuery,
};
