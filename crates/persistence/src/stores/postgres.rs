//! PostgreSQL storage backend.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::warn;

use domain::models::{RegistrationRecord, CSV_HEADER};
use shared::csv;

use crate::entities::RegistrationEntity;

use super::{RegistrationStore, StoreError, StoreStatus};

/// Database-backed registration store.
///
/// Schema is managed by the migrations in `src/migrations`, which the
/// binary applies at startup.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationStore for PostgresStore {
    async fn ensure_ready(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn append(&self, record: &RegistrationRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO registrations
                (first_name, last_name, email, affiliation, net_id,
                 graduation_year, program, attendance, questions, submitted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(&record.email)
        .bind(record.affiliation_type.as_str())
        .bind(&record.net_id)
        .bind(&record.graduation_year)
        .bind(&record.program)
        .bind(record.attendance.as_str())
        .bind(&record.questions)
        .bind(record.timestamp)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<RegistrationRecord>, StoreError> {
        let entities = sqlx::query_as::<_, RegistrationEntity>(
            r#"
            SELECT id, first_name, last_name, email, affiliation, net_id,
                   graduation_year, program, attendance, questions, submitted_at
            FROM registrations
            ORDER BY submitted_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut records = Vec::with_capacity(entities.len());
        for entity in entities {
            match RegistrationRecord::try_from(entity) {
                Ok(record) => records.push(record),
                Err(reason) => warn!("skipping unreadable registration row: {reason}"),
            }
        }
        Ok(records)
    }

    async fn status(&self) -> Result<StoreStatus, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM registrations")
            .fetch_one(&self.pool)
            .await?;

        Ok(StoreStatus {
            ready: true,
            header: Some(csv::encode_row(CSV_HEADER)),
            registration_count: count as u64,
        })
    }

    async fn reset(&self) -> Result<(), StoreError> {
        sqlx::query("TRUNCATE registrations")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
