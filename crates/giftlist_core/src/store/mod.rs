//! Typed registry store and its listing cache.
//!
//! # Responsibility
//! - Own the list/add business rules on top of the raw medium layer.
//!
//! # Invariants
//! - All schema and record validation lives here, not in the media.

mod cache;
pub mod gift_store;

pub use cache::DEFAULT_CACHE_TTL;
pub use gift_store::{GiftRegistryStore, StoreError, StoreResult};
