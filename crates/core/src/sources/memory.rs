use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::account::Account;
use crate::models::journal::JournalSnapshot;
use crate::models::trade::Trade;
use crate::models::transaction::Transaction;
use super::traits::RecordSource;

/// Serves a fixed snapshot from memory. Useful offline and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordSource {
    snapshot: JournalSnapshot,
}

impl MemoryRecordSource {
    pub fn new(snapshot: JournalSnapshot) -> Self {
        Self { snapshot }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl RecordSource for MemoryRecordSource {
    fn name(&self) -> &str {
        "Memory"
    }

    async fn fetch_accounts(&self) -> Result<Vec<Account>, CoreError> {
        Ok(self.snapshot.accounts.clone())
    }

    async fn fetch_trades(&self) -> Result<Vec<Trade>, CoreError> {
        Ok(self.snapshot.trades.clone())
    }

    async fn fetch_transactions(&self) -> Result<Vec<Transaction>, CoreError> {
        Ok(self.snapshot.transactions.clone())
    }

    async fn fetch_snapshot(&self) -> Result<JournalSnapshot, CoreError> {
        Ok(self.snapshot.clone())
    }
}
