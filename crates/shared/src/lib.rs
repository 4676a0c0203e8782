//! Shared utilities for the event signup backend.
//!
//! This crate provides common functionality used across all other crates:
//! - CSV encoding and decoding for registration exports
//! - Common validation logic

pub mod csv;
pub mod validation;
