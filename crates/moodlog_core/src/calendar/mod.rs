//! Local-calendar arithmetic for timeline navigation.
//!
//! # Responsibility
//! - Derive today, edit windows and week/month/year date ranges.
//!
//! # Invariants
//! - A "day" is the host's local calendar day, never UTC.

pub mod window;
