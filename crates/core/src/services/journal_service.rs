use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::account::{Account, AccountDraft};
use crate::models::journal::{CascadeSummary, JournalSnapshot};
use crate::models::sync::SyncState;
use crate::models::trade::{Trade, TradeDraft};
use crate::models::transaction::{Transaction, TransactionKind};

/// Smallest deposit or withdrawal that can be recorded.
pub const MIN_TRANSACTION_AMOUNT: f64 = 0.01;

/// The write path: builds records from user input, validates them, and keeps
/// the snapshot consistent (cascade deletes, pending records).
///
/// Pure business logic: no I/O, no API calls.
pub struct JournalService;

impl JournalService {
    pub fn new() -> Self {
        Self
    }

    // ── Accounts ────────────────────────────────────────────────────

    /// Create an account from a draft. Returns the new account's id.
    pub fn add_account(
        &self,
        journal: &mut JournalSnapshot,
        draft: AccountDraft,
        sync: SyncState,
    ) -> Result<String, CoreError> {
        let name = Self::validate_account_draft(&draft)?;
        let account = Account {
            id: Uuid::new_v4().to_string(),
            name,
            kind: draft.kind,
            initial_balance: draft.initial_balance,
            sync,
        };
        let id = account.id.clone();
        info!(account = %id, kind = %account.kind, %sync, "account created");
        journal.accounts.push(account);
        Ok(id)
    }

    /// Replace name, category and initial balance of an existing account.
    pub fn update_account(
        &self,
        journal: &mut JournalSnapshot,
        account_id: &str,
        draft: AccountDraft,
    ) -> Result<(), CoreError> {
        let name = Self::validate_account_draft(&draft)?;
        let account = journal
            .accounts
            .iter_mut()
            .find(|a| a.id == account_id)
            .ok_or_else(|| CoreError::AccountNotFound(account_id.to_string()))?;
        account.name = name;
        account.kind = draft.kind;
        account.initial_balance = draft.initial_balance;
        Ok(())
    }

    /// Delete an account together with every trade and transaction it owns.
    ///
    /// All-or-nothing: if the account does not exist nothing is removed.
    pub fn delete_account(
        &self,
        journal: &mut JournalSnapshot,
        account_id: &str,
    ) -> Result<CascadeSummary, CoreError> {
        let idx = journal
            .accounts
            .iter()
            .position(|a| a.id == account_id)
            .ok_or_else(|| CoreError::AccountNotFound(account_id.to_string()))?;

        let account = journal.accounts.remove(idx);

        let trades_before = journal.trades.len();
        journal.trades.retain(|t| t.account_id != account_id);
        let trades_removed = trades_before - journal.trades.len();

        let transactions_before = journal.transactions.len();
        journal.transactions.retain(|t| t.account_id != account_id);
        let transactions_removed = transactions_before - journal.transactions.len();

        info!(
            account = %account.id,
            trades_removed,
            transactions_removed,
            "account deleted with its records"
        );
        Ok(CascadeSummary {
            account,
            trades_removed,
            transactions_removed,
        })
    }

    // ── Trades ──────────────────────────────────────────────────────

    /// Log a new trade. Returns the new trade's id.
    pub fn add_trade(
        &self,
        journal: &mut JournalSnapshot,
        draft: TradeDraft,
        sync: SyncState,
    ) -> Result<String, CoreError> {
        let trade = self.build_trade(journal, Uuid::new_v4().to_string(), draft, sync)?;
        let id = trade.id.clone();
        info!(
            trade = %id,
            account = %trade.account_id,
            pair = %trade.pair,
            status = %trade.status(),
            "trade logged"
        );
        journal.trades.push(trade);
        Ok(id)
    }

    /// Replace every user-editable field of a trade.
    ///
    /// The id and sync state are kept; net profit and status follow the new
    /// profit and commission automatically.
    pub fn update_trade(
        &self,
        journal: &mut JournalSnapshot,
        trade_id: &str,
        draft: TradeDraft,
    ) -> Result<(), CoreError> {
        let idx = journal
            .trades
            .iter()
            .position(|t| t.id == trade_id)
            .ok_or_else(|| CoreError::TradeNotFound(trade_id.to_string()))?;

        let sync = journal.trades[idx].sync;
        let updated = self.build_trade(journal, trade_id.to_string(), draft, sync)?;
        journal.trades[idx] = updated;
        Ok(())
    }

    /// Remove a trade and hand it back.
    pub fn delete_trade(
        &self,
        journal: &mut JournalSnapshot,
        trade_id: &str,
    ) -> Result<Trade, CoreError> {
        let idx = journal
            .trades
            .iter()
            .position(|t| t.id == trade_id)
            .ok_or_else(|| CoreError::TradeNotFound(trade_id.to_string()))?;
        Ok(journal.trades.remove(idx))
    }

    // ── Transactions ────────────────────────────────────────────────

    /// Record a deposit or withdrawal. Returns the new transaction's id.
    pub fn record_transaction(
        &self,
        journal: &mut JournalSnapshot,
        account_id: &str,
        kind: TransactionKind,
        amount: f64,
        date: DateTime<Utc>,
    ) -> Result<String, CoreError> {
        if journal.account(account_id).is_none() {
            return Err(CoreError::AccountNotFound(account_id.to_string()));
        }
        if !amount.is_finite() || amount < MIN_TRANSACTION_AMOUNT {
            return Err(CoreError::ValidationError(format!(
                "{kind} amount must be at least {MIN_TRANSACTION_AMOUNT}, got {amount}"
            )));
        }

        let tx = Transaction::new(Uuid::new_v4().to_string(), account_id, kind, amount, date);
        let id = tx.id.clone();
        info!(transaction = %id, account = %account_id, %kind, amount, "transaction recorded");
        journal.transactions.push(tx);
        Ok(id)
    }

    // ── Pending records ─────────────────────────────────────────────

    /// Mark a pending account as acknowledged by the store.
    pub fn confirm_account(&self, journal: &mut JournalSnapshot, account_id: &str) -> Result<(), CoreError> {
        let account = journal
            .accounts
            .iter_mut()
            .find(|a| a.id == account_id)
            .ok_or_else(|| CoreError::AccountNotFound(account_id.to_string()))?;
        account.sync = SyncState::Confirmed;
        Ok(())
    }

    /// Mark a pending trade as acknowledged by the store.
    pub fn confirm_trade(&self, journal: &mut JournalSnapshot, trade_id: &str) -> Result<(), CoreError> {
        let trade = journal
            .trades
            .iter_mut()
            .find(|t| t.id == trade_id)
            .ok_or_else(|| CoreError::TradeNotFound(trade_id.to_string()))?;
        trade.sync = SyncState::Confirmed;
        Ok(())
    }

    /// Drop a pending account after its write failed. Confirmed accounts must be
    /// removed with [`JournalService::delete_account`] instead.
    pub fn discard_pending_account(
        &self,
        journal: &mut JournalSnapshot,
        account_id: &str,
    ) -> Result<Account, CoreError> {
        let idx = journal
            .accounts
            .iter()
            .position(|a| a.id == account_id)
            .ok_or_else(|| CoreError::AccountNotFound(account_id.to_string()))?;
        if !journal.accounts[idx].is_pending() {
            return Err(CoreError::ValidationError(format!(
                "Account {account_id} is confirmed and cannot be discarded"
            )));
        }
        Ok(journal.accounts.remove(idx))
    }

    /// Drop a pending trade after its write failed.
    pub fn discard_pending_trade(
        &self,
        journal: &mut JournalSnapshot,
        trade_id: &str,
    ) -> Result<Trade, CoreError> {
        let idx = journal
            .trades
            .iter()
            .position(|t| t.id == trade_id)
            .ok_or_else(|| CoreError::TradeNotFound(trade_id.to_string()))?;
        if !journal.trades[idx].is_pending() {
            return Err(CoreError::ValidationError(format!(
                "Trade {trade_id} is confirmed and cannot be discarded"
            )));
        }
        Ok(journal.trades.remove(idx))
    }

    // ── Validation ──────────────────────────────────────────────────

    /// Validate an account draft and return its trimmed name.
    ///
    /// Rules:
    /// - Name must not be blank
    /// - Initial balance must be a finite, non-negative number
    fn validate_account_draft(draft: &AccountDraft) -> Result<String, CoreError> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(CoreError::ValidationError("Account name is required".into()));
        }
        if !draft.initial_balance.is_finite() || draft.initial_balance < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Initial balance must be a non-negative number, got {}",
                draft.initial_balance
            )));
        }
        Ok(name.to_string())
    }

    /// Turn a draft into a trade, normalizing and validating its fields.
    ///
    /// Rules:
    /// - The owning account must exist
    /// - Pair must not be blank; it is trimmed and uppercased
    /// - Profit must be finite; commission finite and non-negative
    /// - Blank notes become `None`; a missing emotion becomes `Neutral`
    fn build_trade(
        &self,
        journal: &JournalSnapshot,
        id: String,
        draft: TradeDraft,
        sync: SyncState,
    ) -> Result<Trade, CoreError> {
        if journal.account(&draft.account_id).is_none() {
            return Err(CoreError::AccountNotFound(draft.account_id));
        }
        let pair = draft.pair.trim().to_uppercase();
        if pair.is_empty() {
            return Err(CoreError::ValidationError("Pair is required".into()));
        }
        if !draft.profit.is_finite() {
            return Err(CoreError::ValidationError(format!(
                "Profit must be a finite number, got {}",
                draft.profit
            )));
        }
        if !draft.commission.is_finite() || draft.commission < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Commission must be a non-negative number, got {}",
                draft.commission
            )));
        }

        Ok(Trade {
            id,
            account_id: draft.account_id,
            pair,
            open_time: draft.open_time,
            direction: draft.direction,
            profit: draft.profit,
            commission: draft.commission,
            reward_ratio: non_blank(draft.reward_ratio),
            conclusion: non_blank(draft.conclusion),
            emotion: draft.emotion.unwrap_or_default(),
            remark: non_blank(draft.remark),
            sync,
        })
    }
}

impl Default for JournalService {
    fn default() -> Self {
        Self::new()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
