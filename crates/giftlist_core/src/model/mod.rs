//! Domain model for gift-claim records.
//!
//! # Responsibility
//! - Define the canonical typed shape shared by every backing medium.
//! - Keep validation rules at the construction boundary.
//!
//! # Invariants
//! - Every record is identified by a stable non-nil `GiftId`.
//! - Records are append-only: created once, never mutated or deleted.

pub mod gift;
