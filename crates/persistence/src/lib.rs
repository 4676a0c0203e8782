//! Persistence layer for the event signup backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Pluggable registration storage backends

pub mod db;
pub mod entities;
pub mod stores;
