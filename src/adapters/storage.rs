use crate::config::toml_config::StorageConfig;
use crate::core::{read_record, write_record, RecordLabels, RecordStore};
use crate::domain::client::Client;
use crate::utils::error::{LendingError, Result};
use crate::utils::validation::validate_identifier;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// One text file per client, `<records_dir>/<client_id>.<extension>`.
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    base_path: PathBuf,
    extension: String,
    labels: &'static RecordLabels,
}

impl FileRecordStore {
    pub fn new(
        base_path: impl Into<PathBuf>,
        extension: impl Into<String>,
        labels: &'static RecordLabels,
    ) -> Self {
        Self {
            base_path: base_path.into(),
            extension: extension.into(),
            labels,
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(
            &config.records_dir,
            config.extension.clone(),
            RecordLabels::select(config.preserve_legacy_labels),
        )
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn record_path(&self, client_id: &str) -> Result<PathBuf> {
        validate_identifier("client id", client_id)?;
        Ok(self
            .base_path
            .join(format!("{}.{}", client_id, self.extension)))
    }
}

impl RecordStore for FileRecordStore {
    fn load(&self, client_id: &str) -> Result<Client> {
        let path = self.record_path(client_id)?;
        tracing::debug!("Reading client record from {}", path.display());

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(LendingError::NotFoundError {
                    client_id: client_id.to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        read_record(client_id, &text)
    }

    fn save(&self, client: &Client) -> Result<()> {
        let path = self.record_path(client.client_id())?;
        let text = write_record(client, self.labels)?;

        // Created lazily; the first save of a fresh install makes the folder.
        fs::create_dir_all(&self.base_path)?;
        fs::write(&path, text)?;

        tracing::info!(
            client_id = %client.client_id(),
            loans = client.loans().len(),
            "Saved client record to {}",
            path.display()
        );
        Ok(())
    }

    fn exists(&self, client_id: &str) -> Result<bool> {
        Ok(self.record_path(client_id)?.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::labels::{ENGLISH_LABELS, LEGACY_LABELS};
    use crate::domain::client::tests::{sample_application, sample_profile};
    use tempfile::TempDir;

    #[test]
    fn test_save_creates_directory_lazily() {
        let temp_dir = TempDir::new().unwrap();
        let records = temp_dir.path().join("clientes");
        let store = FileRecordStore::new(&records, "txt", &LEGACY_LABELS);
        assert!(!records.exists());

        let client = Client::register("C-1", sample_profile()).unwrap();
        store.save(&client).unwrap();

        assert!(records.join("C-1.txt").is_file());
        assert!(store.exists("C-1").unwrap());
        assert!(!store.exists("C-2").unwrap());
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileRecordStore::new(temp_dir.path(), "txt", &LEGACY_LABELS);
        let err = store.load("nobody").unwrap_err();
        assert!(matches!(
            err,
            LendingError::NotFoundError { ref client_id } if client_id == "nobody"
        ));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_save_overwrites_whole_record() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileRecordStore::new(temp_dir.path(), "rec", &ENGLISH_LABELS);

        let mut client = Client::register("C-1", sample_profile()).unwrap();
        client.issue_loan(sample_application("L-1", 1000.0)).unwrap();
        client.issue_loan(sample_application("L-2", 2000.0)).unwrap();
        store.save(&client).unwrap();

        let shorter = Client::register("C-1", sample_profile()).unwrap();
        store.save(&shorter).unwrap();

        assert!(store.load("C-1").unwrap().loans().is_empty());
    }

    #[test]
    fn test_rejects_path_like_identifiers() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileRecordStore::new(temp_dir.path(), "txt", &LEGACY_LABELS);
        assert!(matches!(
            store.load("../secret"),
            Err(LendingError::ValidationError { .. })
        ));
    }
}
