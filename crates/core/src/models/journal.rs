use serde::{Deserialize, Serialize};

use super::account::Account;
use super::trade::Trade;
use super::transaction::Transaction;

/// The three record collections, exactly as a record source delivers them.
///
/// Order is preserved as received; calculators that group or tie-break
/// (pair breakdown, per-day sums) depend on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalSnapshot {
    #[serde(default)]
    pub accounts: Vec<Account>,

    #[serde(default)]
    pub trades: Vec<Trade>,

    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl JournalSnapshot {
    pub fn new(accounts: Vec<Account>, trades: Vec<Trade>, transactions: Vec<Transaction>) -> Self {
        Self {
            accounts,
            trades,
            transactions,
        }
    }

    pub fn account(&self, account_id: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == account_id)
    }

    pub fn trade(&self, trade_id: &str) -> Option<&Trade> {
        self.trades.iter().find(|t| t.id == trade_id)
    }

    /// Trades owned by `account_id`. The yielded references borrow from the
    /// snapshot only, so they outlive the id.
    pub fn trades_for<'a, 'b>(&'a self, account_id: &'b str) -> impl Iterator<Item = &'a Trade> + 'b
    where
        'a: 'b,
    {
        self.trades.iter().filter(move |t| t.account_id == account_id)
    }

    pub fn transactions_for<'a, 'b>(
        &'a self,
        account_id: &'b str,
    ) -> impl Iterator<Item = &'a Transaction> + 'b
    where
        'a: 'b,
    {
        self.transactions
            .iter()
            .filter(move |t| t.account_id == account_id)
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty() && self.trades.is_empty() && self.transactions.is_empty()
    }
}

/// What an account cascade delete removed.
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeSummary {
    pub account: Account,
    pub trades_removed: usize,
    pub transactions_removed: usize,
}
