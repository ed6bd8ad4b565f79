//! In-memory timeline of daily entries.
//!
//! # Responsibility
//! - Own the ordered, date-keyed entry sequence and its upsert contract.
//! - Encode and decode the JSON array snapshot used by persistence.
//!
//! # Invariants
//! - At most one entry per date; sequence sorted ascending by date.

pub mod entry_store;
