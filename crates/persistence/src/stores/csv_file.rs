//! CSV file storage backend.
//!
//! The whole collection lives in a single append-only UTF-8 file: the first
//! line is the fixed column header, every accepted registration is one
//! encoded row terminated by `\n`.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::warn;

use domain::models::{RegistrationRecord, CSV_HEADER};
use shared::csv;

use super::{RegistrationStore, StoreError, StoreStatus};

/// File-backed registration store.
#[derive(Debug, Clone)]
pub struct CsvFileStore {
    path: PathBuf,
}

impl CsvFileStore {
    /// Creates a store writing to the given file path.
    ///
    /// The path comes from configuration; nothing is touched on disk until
    /// [`RegistrationStore::ensure_ready`] runs.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the data directory and writes the header line if the file
    /// does not exist yet.
    async fn initialize_file(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        if fs::try_exists(&self.path).await? {
            return Ok(());
        }
        let mut line = csv::encode_row(CSV_HEADER);
        line.push('\n');
        fs::write(&self.path, line).await?;
        Ok(())
    }

    async fn append_line(&self, line: &str) -> Result<(), StoreError> {
        let mut file = fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl RegistrationStore for CsvFileStore {
    async fn ensure_ready(&self) -> Result<(), StoreError> {
        self.initialize_file().await
    }

    async fn append(&self, record: &RegistrationRecord) -> Result<(), StoreError> {
        // The file may have been removed since startup.
        self.initialize_file().await?;

        let mut line = csv::encode_row(record.csv_fields());
        line.push('\n');

        if let Err(err) = self.append_line(&line).await {
            warn!("registration append failed, retrying once: {err}");
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent).await?;
            }
            self.append_line(&line).await?;
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<RegistrationRecord>, StoreError> {
        if !fs::try_exists(&self.path).await? {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).await?;
        let rows = csv::decode_document(&content)?;

        let mut records = Vec::new();
        for row in rows.into_iter().skip(1) {
            match RegistrationRecord::from_csv_fields(&row) {
                Ok(record) => records.push(record),
                Err(reason) => warn!("skipping unreadable registration row: {reason}"),
            }
        }
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(records)
    }

    async fn status(&self) -> Result<StoreStatus, StoreError> {
        if !fs::try_exists(&self.path).await? {
            return Ok(StoreStatus {
                ready: false,
                header: None,
                registration_count: 0,
            });
        }
        let content = fs::read_to_string(&self.path).await?;
        let header = csv::header(&content)?.to_string();
        let count = csv::count_rows(&content)? as u64;
        Ok(StoreStatus {
            ready: true,
            header: Some(header),
            registration_count: count,
        })
    }

    async fn reset(&self) -> Result<(), StoreError> {
        if fs::try_exists(&self.path).await? {
            fs::remove_file(&self.path).await?;
        }
        self.initialize_file().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use domain::models::{Affiliation, Attendance};
    use shared::csv::CsvError;

    fn record(first_name: &str, questions: Option<&str>) -> RegistrationRecord {
        RegistrationRecord {
            first_name: first_name.to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@x.com".to_string(),
            affiliation_type: Affiliation::Alumni,
            net_id: Some("al123".to_string()),
            graduation_year: Some("1843".to_string()),
            program: None,
            attendance: Attendance::Yes,
            questions: questions.map(String::from),
            timestamp: Utc::now(),
        }
    }

    fn store_in(dir: &tempfile::TempDir) -> CsvFileStore {
        CsvFileStore::new(dir.path().join("data").join("registrations.csv"))
    }

    #[tokio::test]
    async fn test_ensure_ready_creates_header_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.ensure_ready().await.unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            content,
            "First Name,Last Name,Email,Affiliation,NetID,Graduation Year,Program,Attendance,Questions,Timestamp\n"
        );
    }

    #[tokio::test]
    async fn test_ensure_ready_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.ensure_ready().await.unwrap();
        store.append(&record("Ada", None)).await.unwrap();
        store.ensure_ready().await.unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(content.matches("First Name").count(), 1);
        assert_eq!(store.status().await.unwrap().registration_count, 1);
    }

    #[tokio::test]
    async fn test_append_never_duplicates_header() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.ensure_ready().await.unwrap();

        for i in 0..3 {
            store.append(&record(&format!("Person{i}"), None)).await.unwrap();
        }

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(content.matches("First Name").count(), 1);
        assert!(content.starts_with("First Name,"));
        assert_eq!(store.status().await.unwrap().registration_count, 3);
    }

    #[tokio::test]
    async fn test_append_creates_file_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.append(&record("Ada", None)).await.unwrap();

        let status = store.status().await.unwrap();
        assert!(status.ready);
        assert_eq!(status.registration_count, 1);
    }

    #[tokio::test]
    async fn test_list_round_trips_structural_characters() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.ensure_ready().await.unwrap();

        let tricky = record("Ada", Some("He said, \"hi\"\nbye"));
        store.append(&tricky).await.unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].questions.as_deref(), Some("He said, \"hi\"\nbye"));
        assert_eq!(listed[0].first_name, "Ada");
    }

    #[tokio::test]
    async fn test_list_orders_most_recent_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.ensure_ready().await.unwrap();

        let mut older = record("Older", None);
        older.timestamp = Utc::now() - Duration::hours(2);
        let mut newer = record("Newer", None);
        newer.timestamp = Utc::now();

        store.append(&older).await.unwrap();
        store.append(&newer).await.unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed[0].first_name, "Newer");
        assert_eq!(listed[1].first_name, "Older");
    }

    #[tokio::test]
    async fn test_list_skips_unreadable_rows() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.ensure_ready().await.unwrap();
        store.append(&record("Ada", None)).await.unwrap();

        // Hand-edited garbage row.
        tokio::fs::OpenOptions::new()
            .append(true)
            .open(store.path())
            .await
            .unwrap()
            .write_all(b"not,a,valid,row\n")
            .await
            .unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].first_name, "Ada");
    }

    #[tokio::test]
    async fn test_status_missing_file_not_ready() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let status = store.status().await.unwrap();
        assert!(!status.ready);
        assert_eq!(status.header, None);
        assert_eq!(status.registration_count, 0);
    }

    #[tokio::test]
    async fn test_status_empty_file_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "").unwrap();

        let err = store.status().await.unwrap_err();
        assert!(matches!(err, StoreError::Csv(CsvError::MalformedDocument)));
    }

    #[tokio::test]
    async fn test_reset_discards_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.ensure_ready().await.unwrap();
        store.append(&record("Ada", None)).await.unwrap();

        store.reset().await.unwrap();

        let status = store.status().await.unwrap();
        assert!(status.ready);
        assert_eq!(status.registration_count, 0);
        assert!(store.list().await.unwrap().is_empty());
    }
}
