pub mod display;
pub mod errors;
pub mod models;
pub mod services;
pub mod sources;

use chrono::{DateTime, NaiveDate, Utc};
use display::{AccountCardView, TradeRow};
use models::{
    account::{Account, AccountDraft},
    analytics::{AccountProfit, LedgerStats, PairBucket, PerformanceStats},
    calendar::{CalendarWindow, MonthCalendar},
    journal::{CascadeSummary, JournalSnapshot},
    settings::{Settings, WeekStart, MAX_UTC_OFFSET_MINUTES},
    sync::SyncState,
    trade::{Trade, TradeDraft},
    transaction::{Transaction, TransactionKind},
};
use services::{
    bucket_service::BucketService, journal_service::JournalService,
    ledger_service::LedgerService, performance_service::PerformanceService,
};
use sources::traits::RecordSource;
use tracing::{info, warn};

use errors::CoreError;

/// Main entry point for the trading journal core library.
/// Holds the current record snapshot, display settings, and all services.
///
/// Derived statistics are never cached: every query recomputes from the
/// snapshot, so a refresh from the record source is immediately visible.
#[must_use]
pub struct TradingJournal {
    snapshot: JournalSnapshot,
    settings: Settings,
    journal_service: JournalService,
    ledger_service: LedgerService,
    performance_service: PerformanceService,
    bucket_service: BucketService,
}

impl std::fmt::Debug for TradingJournal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradingJournal")
            .field("accounts", &self.snapshot.accounts.len())
            .field("trades", &self.snapshot.trades.len())
            .field("transactions", &self.snapshot.transactions.len())
            .field("settings", &self.settings)
            .finish()
    }
}

impl TradingJournal {
    /// Create an empty journal with default settings.
    pub fn create_new() -> Self {
        Self::build(JournalSnapshot::default(), Settings::default())
    }

    /// Start from records that were already loaded.
    pub fn from_snapshot(snapshot: JournalSnapshot) -> Self {
        Self::build(snapshot, Settings::default())
    }

    /// Start from records and explicit settings.
    ///
    /// An out-of-range UTC offset (e.g. from a hand-edited settings document) is
    /// reset to 0 so local dates stay well defined.
    pub fn with_settings(snapshot: JournalSnapshot, mut settings: Settings) -> Self {
        if !settings.has_valid_offset() {
            warn!(
                utc_offset_minutes = settings.utc_offset_minutes,
                "UTC offset out of range, resetting to 0"
            );
            settings.utc_offset_minutes = 0;
        }
        Self::build(snapshot, settings)
    }

    /// Load the current records from a record source.
    pub async fn load_from(source: &dyn RecordSource) -> Result<Self, CoreError> {
        let snapshot = source.fetch_snapshot().await?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Replace the local snapshot with the source's current records.
    ///
    /// Call this whenever the store reports a change. Local pending records are
    /// replaced along with everything else; on failure the old snapshot is kept.
    pub async fn refresh_from(&mut self, source: &dyn RecordSource) -> Result<(), CoreError> {
        match source.fetch_snapshot().await {
            Ok(snapshot) => {
                info!(
                    source = source.name(),
                    accounts = snapshot.accounts.len(),
                    trades = snapshot.trades.len(),
                    transactions = snapshot.transactions.len(),
                    "journal refreshed"
                );
                self.snapshot = snapshot;
                Ok(())
            }
            Err(e) => {
                warn!(source = source.name(), error = %e, "journal refresh failed");
                Err(e)
            }
        }
    }

    /// Replace the snapshot with records delivered by a push notification.
    pub fn apply_snapshot(&mut self, snapshot: JournalSnapshot) {
        self.snapshot = snapshot;
    }

    #[must_use]
    pub fn snapshot(&self) -> &JournalSnapshot {
        &self.snapshot
    }

    // ── Accounts ────────────────────────────────────────────────────

    /// Create a confirmed account. Returns its id.
    pub fn add_account(&mut self, draft: AccountDraft) -> Result<String, CoreError> {
        self.journal_service
            .add_account(&mut self.snapshot, draft, SyncState::Confirmed)
    }

    /// Create an account that is shown before the store confirms it.
    pub fn stage_account(&mut self, draft: AccountDraft) -> Result<String, CoreError> {
        self.journal_service
            .add_account(&mut self.snapshot, draft, SyncState::Pending)
    }

    pub fn confirm_account(&mut self, account_id: &str) -> Result<(), CoreError> {
        self.journal_service
            .confirm_account(&mut self.snapshot, account_id)
    }

    /// Remove a pending account whose write failed.
    pub fn discard_pending_account(&mut self, account_id: &str) -> Result<Account, CoreError> {
        self.journal_service
            .discard_pending_account(&mut self.snapshot, account_id)
    }

    pub fn update_account(&mut self, account_id: &str, draft: AccountDraft) -> Result<(), CoreError> {
        self.journal_service
            .update_account(&mut self.snapshot, account_id, draft)
    }

    /// Delete an account and all of its trades and transactions at once.
    pub fn delete_account(&mut self, account_id: &str) -> Result<CascadeSummary, CoreError> {
        self.journal_service
            .delete_account(&mut self.snapshot, account_id)
    }

    #[must_use]
    pub fn get_account(&self, account_id: &str) -> Option<&Account> {
        self.snapshot.account(account_id)
    }

    #[must_use]
    pub fn accounts(&self) -> &[Account] {
        &self.snapshot.accounts
    }

    /// Display name of an account, if it exists.
    #[must_use]
    pub fn account_name(&self, account_id: &str) -> Option<&str> {
        self.snapshot.account(account_id).map(|a| a.name.as_str())
    }

    // ── Trades ──────────────────────────────────────────────────────

    /// Log a confirmed trade. Returns its id.
    pub fn add_trade(&mut self, draft: TradeDraft) -> Result<String, CoreError> {
        self.journal_service
            .add_trade(&mut self.snapshot, draft, SyncState::Confirmed)
    }

    /// Log a trade that is shown before the store confirms it.
    pub fn stage_trade(&mut self, draft: TradeDraft) -> Result<String, CoreError> {
        self.journal_service
            .add_trade(&mut self.snapshot, draft, SyncState::Pending)
    }

    pub fn confirm_trade(&mut self, trade_id: &str) -> Result<(), CoreError> {
        self.journal_service.confirm_trade(&mut self.snapshot, trade_id)
    }

    /// Remove a pending trade whose write failed.
    pub fn discard_pending_trade(&mut self, trade_id: &str) -> Result<Trade, CoreError> {
        self.journal_service
            .discard_pending_trade(&mut self.snapshot, trade_id)
    }

    pub fn update_trade(&mut self, trade_id: &str, draft: TradeDraft) -> Result<(), CoreError> {
        self.journal_service
            .update_trade(&mut self.snapshot, trade_id, draft)
    }

    pub fn delete_trade(&mut self, trade_id: &str) -> Result<Trade, CoreError> {
        self.journal_service.delete_trade(&mut self.snapshot, trade_id)
    }

    #[must_use]
    pub fn get_trade(&self, trade_id: &str) -> Option<&Trade> {
        self.snapshot.trade(trade_id)
    }

    /// All trades, newest first. Trades opened at the same instant keep their order.
    #[must_use]
    pub fn trades(&self) -> Vec<&Trade> {
        let mut trades: Vec<&Trade> = self.snapshot.trades.iter().collect();
        trades.sort_by(|a, b| b.open_time.cmp(&a.open_time));
        trades
    }

    /// Trades of one account, newest first.
    #[must_use]
    pub fn trades_for_account(&self, account_id: &str) -> Vec<&Trade> {
        let mut trades: Vec<&Trade> = self.snapshot.trades_for(account_id).collect();
        trades.sort_by(|a, b| b.open_time.cmp(&a.open_time));
        trades
    }

    /// Trades opened within a local date range (inclusive), newest first.
    #[must_use]
    pub fn trades_in_range(&self, from: NaiveDate, to: NaiveDate) -> Vec<&Trade> {
        let tz = self.settings.timezone();
        let mut trades: Vec<&Trade> = self
            .snapshot
            .trades
            .iter()
            .filter(|t| {
                let date = t.open_time.with_timezone(&tz).date_naive();
                date >= from && date <= to
            })
            .collect();
        trades.sort_by(|a, b| b.open_time.cmp(&a.open_time));
        trades
    }

    #[must_use]
    pub fn trade_count(&self) -> usize {
        self.snapshot.trades.len()
    }

    // ── Transactions ────────────────────────────────────────────────

    pub fn deposit(
        &mut self,
        account_id: &str,
        amount: f64,
        date: DateTime<Utc>,
    ) -> Result<String, CoreError> {
        self.record_transaction(account_id, TransactionKind::Deposit, amount, date)
    }

    pub fn withdraw(
        &mut self,
        account_id: &str,
        amount: f64,
        date: DateTime<Utc>,
    ) -> Result<String, CoreError> {
        self.record_transaction(account_id, TransactionKind::Withdrawal, amount, date)
    }

    pub fn record_transaction(
        &mut self,
        account_id: &str,
        kind: TransactionKind,
        amount: f64,
        date: DateTime<Utc>,
    ) -> Result<String, CoreError> {
        self.journal_service
            .record_transaction(&mut self.snapshot, account_id, kind, amount, date)
    }

    /// Transactions of one account, newest first.
    #[must_use]
    pub fn transactions_for_account(&self, account_id: &str) -> Vec<&Transaction> {
        let mut txs: Vec<&Transaction> = self.snapshot.transactions_for(account_id).collect();
        txs.sort_by(|a, b| b.date.cmp(&a.date));
        txs
    }

    // ── Analytics ───────────────────────────────────────────────────

    /// Ledger of one account.
    ///
    /// `Ok(None)` while the account is pending: its card shows placeholders.
    pub fn account_ledger(&self, account_id: &str) -> Result<Option<LedgerStats>, CoreError> {
        let account = self
            .snapshot
            .account(account_id)
            .ok_or_else(|| CoreError::AccountNotFound(account_id.to_string()))?;
        if account.is_pending() {
            return Ok(None);
        }
        Ok(Some(self.ledger_service.compute_ledger(
            account,
            self.snapshot.trades_for(account_id),
            self.snapshot.transactions_for(account_id),
        )))
    }

    /// Card view models for every account, in account order.
    #[must_use]
    pub fn account_cards(&self) -> Vec<AccountCardView> {
        self.snapshot
            .accounts
            .iter()
            .map(|account| {
                let stats = if account.is_pending() {
                    None
                } else {
                    Some(self.ledger_service.compute_ledger(
                        account,
                        self.snapshot.trades_for(&account.id),
                        self.snapshot.transactions_for(&account.id),
                    ))
                };
                AccountCardView::build(account, stats.as_ref(), &self.settings.currency)
            })
            .collect()
    }

    /// Net profit per account for the comparison chart.
    #[must_use]
    pub fn account_profits(&self) -> Vec<AccountProfit> {
        self.ledger_service
            .account_profits(&self.snapshot.accounts, &self.snapshot.trades)
    }

    /// Statistics across every trade, or `None` if nothing has been logged.
    #[must_use]
    pub fn performance(&self) -> Option<PerformanceStats> {
        self.performance_service
            .compute_performance(&self.snapshot.trades)
    }

    /// Statistics across one account's trades.
    #[must_use]
    pub fn account_performance(&self, account_id: &str) -> Option<PerformanceStats> {
        self.performance_service
            .compute_performance(self.snapshot.trades_for(account_id))
    }

    /// Net profit per pair, most profitable first.
    #[must_use]
    pub fn pair_breakdown(&self) -> Vec<PairBucket> {
        self.bucket_service.pair_breakdown(&self.snapshot.trades)
    }

    /// Daily profit calendar for a month, in the configured time zone and week start.
    pub fn month_calendar(&self, year: i32, month: u32) -> Result<MonthCalendar, CoreError> {
        let window = CalendarWindow::month(year, month)?;
        Ok(self.calendar_for(window))
    }

    /// Daily profit calendar for the month containing `today`.
    pub fn current_month_calendar(&self, today: NaiveDate) -> Result<MonthCalendar, CoreError> {
        let window = CalendarWindow::containing(today)?;
        Ok(self.calendar_for(window))
    }

    /// Daily buckets for an arbitrary inclusive window.
    #[must_use]
    pub fn calendar_for(&self, window: CalendarWindow) -> MonthCalendar {
        let tz = self.settings.timezone();
        self.bucket_service.daily_calendar(
            &self.snapshot.trades,
            window,
            self.settings.week_start,
            &tz,
        )
    }

    /// Rows of the trade journal table, newest first.
    #[must_use]
    pub fn journal_rows(&self) -> Vec<TradeRow> {
        let tz = self.settings.timezone();
        self.trades()
            .into_iter()
            .map(|t| {
                TradeRow::build(
                    t,
                    self.account_name(&t.account_id),
                    &self.settings.currency,
                    &tz,
                )
            })
            .collect()
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn get_settings(&self) -> &Settings {
        &self.settings
    }

    /// Set the display currency (e.g., "USD", "EUR").
    /// Currency code must be a 3-letter alphabetic string.
    pub fn set_currency(&mut self, currency: &str) -> Result<(), CoreError> {
        let trimmed = currency.trim().to_uppercase();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CoreError::ValidationError(format!(
                "Invalid currency code '{currency}': must be exactly 3 ASCII letters (e.g., USD, EUR)"
            )));
        }
        self.settings.currency = trimmed;
        Ok(())
    }

    pub fn set_week_start(&mut self, week_start: WeekStart) {
        self.settings.week_start = week_start;
    }

    /// Set the user's offset from UTC, used to place trades on local days.
    pub fn set_utc_offset_minutes(&mut self, minutes: i32) -> Result<(), CoreError> {
        if minutes.unsigned_abs() > MAX_UTC_OFFSET_MINUTES.unsigned_abs() {
            return Err(CoreError::ValidationError(format!(
                "UTC offset of {minutes} minutes is outside ±{MAX_UTC_OFFSET_MINUTES}"
            )));
        }
        self.settings.utc_offset_minutes = minutes;
        Ok(())
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// Export the whole snapshot as a JSON string.
    pub fn export_to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.snapshot)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize journal: {e}")))
    }

    /// Replace the snapshot with one parsed from JSON.
    /// Returns the number of trades imported.
    pub fn import_from_json(&mut self, json: &str) -> Result<usize, CoreError> {
        let snapshot: JournalSnapshot = serde_json::from_str(json)?;
        let count = snapshot.trades.len();
        self.snapshot = snapshot;
        Ok(count)
    }

    /// Export all trades as CSV, including the derived net profit and status.
    /// Columns: id, account, pair, open_time, direction, profit, commission,
    /// net_profit, status, emotion, reward_ratio, conclusion, remark
    #[must_use]
    pub fn export_trades_to_csv(&self) -> String {
        let mut csv = String::from(
            "id,account,pair,open_time,direction,profit,commission,net_profit,status,emotion,reward_ratio,conclusion,remark\n",
        );
        for trade in &self.snapshot.trades {
            let account = self
                .account_name(&trade.account_id)
                .unwrap_or(display::UNKNOWN_ACCOUNT);
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{},{},{},{},{},{}\n",
                trade.id,
                csv_escape(account),
                csv_escape(&trade.pair),
                trade.open_time.to_rfc3339(),
                trade.direction,
                trade.profit,
                trade.commission,
                trade.net_profit(),
                trade.status(),
                trade.emotion,
                csv_escape(trade.reward_ratio.as_deref().unwrap_or("")),
                csv_escape(trade.conclusion.as_deref().unwrap_or("")),
                csv_escape(trade.remark.as_deref().unwrap_or("")),
            ));
        }
        csv
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(snapshot: JournalSnapshot, settings: Settings) -> Self {
        Self {
            snapshot,
            settings,
            journal_service: JournalService::new(),
            ledger_service: LedgerService::new(),
            performance_service: PerformanceService::new(),
            bucket_service: BucketService::new(),
        }
    }
}

/// Quote a CSV field if it contains a comma, quote or newline.
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
