//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the load/save contract the journal service persists through.
//! - Isolate SQLite and file layout details from the service layer.
//!
//! # Invariants
//! - Repositories store already-normalized entries and re-normalize on read.

pub mod entry_repo;
