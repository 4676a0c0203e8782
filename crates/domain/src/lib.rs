//! Domain layer for the event signup backend.
//!
//! This crate contains:
//! - Domain models (registration records, affiliation and attendance enums)
//! - The registration validator service
//! - Domain error types

pub mod models;
pub mod services;
