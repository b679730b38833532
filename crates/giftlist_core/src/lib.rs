//! Core domain logic for the gift registry.
//! This crate is the single source of truth for registry invariants.

pub mod config;
pub mod logging;
pub mod medium;
pub mod model;
pub mod store;

pub use config::{load_config, ConfigError, LogConfig, MediumConfig, RegistryConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use medium::{
    open_medium, CsvMedium, MediumError, MediumResult, MemoryMedium, RawRow, RowMedium, RowTable,
    SheetsMedium, EXPECTED_COLUMNS,
};
pub use model::gift::{
    parse_gift_category, parse_gift_status, supported_category_names, GiftCategory, GiftId,
    GiftRecord, GiftStatus, GiftValidationError,
};
pub use store::{GiftRegistryStore, StoreError, StoreResult, DEFAULT_CACHE_TTL};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
