use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::errors::CoreError;
use crate::models::account::Account;
use crate::models::journal::JournalSnapshot;
use crate::models::trade::Trade;
use crate::models::transaction::Transaction;
use super::traits::RecordSource;

/// Reads a journal snapshot from a JSON document on disk (native only).
///
/// The file is re-read on every fetch, so edits made by another process show up
/// on the next refresh.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<JournalSnapshot, CoreError> {
        let bytes = std::fs::read(&self.path)?;
        serde_json::from_slice(&bytes).map_err(|e| {
            CoreError::Deserialization(format!(
                "Failed to parse journal file {}: {e}",
                self.path.display()
            ))
        })
    }
}

/// Write `snapshot` as pretty JSON, in the format [`JsonFileSource`] reads.
pub fn write_snapshot(path: impl AsRef<Path>, snapshot: &JournalSnapshot) -> Result<(), CoreError> {
    let json = serde_json::to_string_pretty(snapshot)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize journal: {e}")))?;
    std::fs::write(path, json)?;
    Ok(())
}

#[async_trait]
impl RecordSource for JsonFileSource {
    fn name(&self) -> &str {
        "JsonFile"
    }

    async fn fetch_accounts(&self) -> Result<Vec<Account>, CoreError> {
        Ok(self.load()?.accounts)
    }

    async fn fetch_trades(&self) -> Result<Vec<Trade>, CoreError> {
        Ok(self.load()?.trades)
    }

    async fn fetch_transactions(&self) -> Result<Vec<Transaction>, CoreError> {
        Ok(self.load()?.transactions)
    }

    async fn fetch_snapshot(&self) -> Result<JournalSnapshot, CoreError> {
        self.load()
    }
}
