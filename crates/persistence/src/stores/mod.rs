//! Pluggable registration storage backends.
//!
//! Both backends implement the same append-only contract; which one a
//! deployment uses is decided by configuration, not by code paths.

pub mod csv_file;
pub mod postgres;

pub use csv_file::CsvFileStore;
pub use postgres::PostgresStore;

use async_trait::async_trait;
use domain::models::RegistrationRecord;
use thiserror::Error;

/// Storage backend failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Csv(#[from] shared::csv::CsvError),
}

/// Snapshot of the stored collection.
#[derive(Debug, Clone)]
pub struct StoreStatus {
    /// Whether the backend is initialized and reachable.
    pub ready: bool,
    /// The stored header line, when one exists.
    pub header: Option<String>,
    /// Number of accepted registrations.
    pub registration_count: u64,
}

/// Append-only storage for accepted registrations.
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Prepares the backend for writes. Idempotent.
    async fn ensure_ready(&self) -> Result<(), StoreError>;

    /// Durably appends one accepted registration.
    async fn append(&self, record: &RegistrationRecord) -> Result<(), StoreError>;

    /// Returns all registrations, most recent first.
    async fn list(&self) -> Result<Vec<RegistrationRecord>, StoreError>;

    /// Reports readiness and how many registrations the backend holds.
    async fn status(&self) -> Result<StoreStatus, StoreError>;

    /// Discards the whole collection and reinitializes empty storage.
    async fn reset(&self) -> Result<(), StoreError>;
}
