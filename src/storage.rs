use crate::errors::AppError;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::error;

pub const MOOD_RECORD: &str = "moodTrackerData";
pub const NOTES_RECORD: &str = "moodTrackerNotes";

/// Named string records, one JSON file per record inside a directory.
#[derive(Debug, Clone)]
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn record_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    pub async fn ensure_dir(&self) -> Result<(), std::io::Error> {
        fs::create_dir_all(&self.dir).await
    }

    /// Returns `None` for a missing record. Read failures are logged and
    /// treated the same way.
    pub async fn read_record(&self, name: &str) -> Option<Vec<u8>> {
        let path = self.record_path(name);
        match fs::read(&path).await {
            Ok(bytes) => Some(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                error!("failed to read record {}: {err}", path.display());
                None
            }
        }
    }

    pub async fn write_record(&self, name: &str, payload: &[u8]) -> Result<(), AppError> {
        fs::write(self.record_path(name), payload)
            .await
            .map_err(AppError::internal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unique_dir(tag: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("mood_store_{tag}_{}_{nanos}", std::process::id()))
    }

    #[tokio::test]
    async fn missing_record_reads_as_none() {
        let store = RecordStore::new(unique_dir("missing"));
        assert!(store.read_record(MOOD_RECORD).await.is_none());
    }

    #[tokio::test]
    async fn written_record_reads_back() {
        let store = RecordStore::new(unique_dir("write"));
        store.ensure_dir().await.unwrap();
        store.write_record(NOTES_RECORD, b"{\"a\":1}").await.unwrap();

        let bytes = store.read_record(NOTES_RECORD).await.expect("record");
        assert_eq!(bytes, b"{\"a\":1}");
        assert!(store.record_path(NOTES_RECORD).ends_with("moodTrackerNotes.json"));
    }

    #[tokio::test]
    async fn write_into_missing_dir_fails() {
        let store = RecordStore::new(unique_dir("nodir"));
        assert!(store.write_record(MOOD_RECORD, b"{}").await.is_err());
    }
}
