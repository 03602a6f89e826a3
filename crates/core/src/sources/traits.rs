use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::account::Account;
use crate::models::journal::JournalSnapshot;
use crate::models::trade::Trade;
use crate::models::transaction::Transaction;

/// Capability that delivers the journal's record collections.
///
/// The record store (a managed document database, a file, a test fixture)
/// sits behind this trait and is handed to whatever orchestrates the
/// calculators. Nothing in the crate reaches a store through global state.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait RecordSource: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    async fn fetch_accounts(&self) -> Result<Vec<Account>, CoreError>;

    async fn fetch_trades(&self) -> Result<Vec<Trade>, CoreError>;

    async fn fetch_transactions(&self) -> Result<Vec<Transaction>, CoreError>;

    /// Fetch all three collections. Fails if any one of them fails.
    async fn fetch_snapshot(&self) -> Result<JournalSnapshot, CoreError> {
        let accounts = self.fetch_accounts().await?;
        let trades = self.fetch_trades().await?;
        let transactions = self.fetch_transactions().await?;
        Ok(JournalSnapshot::new(accounts, trades, transactions))
    }
}
