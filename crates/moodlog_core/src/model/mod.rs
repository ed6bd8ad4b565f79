//! Journal domain model.
//!
//! # Responsibility
//! - Define the canonical per-day record shared by every view.
//!
//! # Invariants
//! - Every domain value is keyed by its local calendar date.
//! - Values are normalized on construction; there is no invalid state.

pub mod entry;
