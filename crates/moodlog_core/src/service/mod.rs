//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store snapshots, calendar rules and repositories into
//!   use-case level APIs.
//! - Keep UI/CLI layers decoupled from storage details.

pub mod journal_service;
