//! Derived summaries over an entry snapshot.
//!
//! # Responsibility
//! - Reduce a month's hues to representative color families.
//! - Count emoji usage and co-occurrence across the timeline.
//!
//! # Invariants
//! - Pure functions over borrowed snapshots; nothing is cached or mutated.

pub mod emoji_stats;
pub mod hue_cluster;
