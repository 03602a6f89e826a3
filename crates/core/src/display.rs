//! Formatting of derived numbers into display strings.
//!
//! Everything here is presentation-ready but renderer-agnostic: the frontend
//! decides colors from [`ProfitTone`], not from raw numbers.

use chrono::TimeZone;
use serde::Serialize;

use crate::models::account::{Account, AccountKind};
use crate::models::analytics::LedgerStats;
use crate::models::calendar::DayBucket;
use crate::models::sync::SyncState;
use crate::models::trade::{Direction, Trade, TradeStatus};

/// Label shown for a trade whose account no longer exists.
pub const UNKNOWN_ACCOUNT: &str = "Unknown";

/// Sign of a value as the UI colors it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ProfitTone {
    Positive,
    Negative,
    /// Exactly zero
    Neutral,
    /// Nothing to show (e.g., a day without trades)
    NoData,
}

impl ProfitTone {
    pub fn of(value: f64) -> Self {
        if value > 0.0 {
            ProfitTone::Positive
        } else if value < 0.0 {
            ProfitTone::Negative
        } else {
            ProfitTone::Neutral
        }
    }

    /// Tone of a calendar day: `NoData` without trades, even though a break-even
    /// day and an empty day both sum to zero.
    pub fn of_day(day: &DayBucket) -> Self {
        match day.profit {
            Some(profit) => Self::of(profit),
            None => ProfitTone::NoData,
        }
    }
}

/// Format a money amount with two decimals and thousands separators.
///
/// `format_currency(-1234.5, "USD")` → `"-$1,234.50"`. Currencies without a
/// known symbol are prefixed with their code: `"CHF 12.00"`.
pub fn format_currency(amount: f64, currency: &str) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let digits = group_thousands(int_part);

    let negative = amount < 0.0 && fixed != "0.00";
    let sign = if negative { "-" } else { "" };

    match currency_symbol(currency) {
        Some(symbol) => format!("{sign}{symbol}{digits}.{frac_part}"),
        None => format!("{sign}{} {digits}.{frac_part}", currency.to_uppercase()),
    }
}

/// Format a percentage with two decimals: `33.333…` → `"33.33%"`.
pub fn format_percent(rate: f64) -> String {
    format!("{rate:.2}%")
}

fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency.to_uppercase().as_str() {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        _ => None,
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Everything an account card displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountCardView {
    pub account_id: String,
    pub name: String,
    pub kind: AccountKind,
    pub initial_balance: String,
    pub current_balance: String,
    pub total_profit: String,
    pub win_rate: String,
    pub total_trades: usize,
    pub win_trades: usize,
    pub loss_trades: usize,
    pub pairs_traded: usize,
    pub balance_tone: ProfitTone,
    pub profit_tone: ProfitTone,
    /// The account is not yet confirmed; stats are placeholders
    pub is_loading: bool,
}

impl AccountCardView {
    /// Build the card. `stats` is `None` while the account is pending, in which
    /// case the card shows the initial balance and zeros.
    pub fn build(account: &Account, stats: Option<&LedgerStats>, currency: &str) -> Self {
        let initial_balance = format_currency(account.initial_balance, currency);
        match stats {
            Some(stats) => Self {
                account_id: account.id.clone(),
                name: account.name.clone(),
                kind: account.kind,
                initial_balance,
                current_balance: format_currency(stats.current_balance, currency),
                total_profit: format_currency(stats.total_profit, currency),
                win_rate: format_percent(stats.win_rate),
                total_trades: stats.total_trades,
                win_trades: stats.win_trades,
                loss_trades: stats.loss_trades,
                pairs_traded: stats.pairs_traded,
                balance_tone: if stats.current_balance >= account.initial_balance {
                    ProfitTone::Positive
                } else {
                    ProfitTone::Negative
                },
                profit_tone: if stats.total_profit >= 0.0 {
                    ProfitTone::Positive
                } else {
                    ProfitTone::Negative
                },
                is_loading: false,
            },
            None => Self {
                account_id: account.id.clone(),
                name: account.name.clone(),
                kind: account.kind,
                current_balance: initial_balance.clone(),
                initial_balance,
                total_profit: format_currency(0.0, currency),
                win_rate: format_percent(0.0),
                total_trades: 0,
                win_trades: 0,
                loss_trades: 0,
                pairs_traded: 0,
                balance_tone: ProfitTone::NoData,
                profit_tone: ProfitTone::NoData,
                is_loading: true,
            },
        }
    }
}

/// One row of the trade journal table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRow {
    pub trade_id: String,
    /// Local open date, e.g. "Oct 17, 2026"
    pub date: String,
    pub pair: String,
    pub account: String,
    pub direction: Direction,
    pub net_profit: String,
    pub profit_tone: ProfitTone,
    pub status: TradeStatus,
    pub sync: SyncState,
}

impl TradeRow {
    pub fn build<Tz: TimeZone>(
        trade: &Trade,
        account_name: Option<&str>,
        currency: &str,
        tz: &Tz,
    ) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let net_profit = trade.net_profit();
        Self {
            trade_id: trade.id.clone(),
            date: trade.open_time.with_timezone(tz).format("%b %-d, %Y").to_string(),
            pair: trade.pair.clone(),
            account: account_name.unwrap_or(UNKNOWN_ACCOUNT).to_string(),
            direction: trade.direction,
            net_profit: format_currency(net_profit, currency),
            profit_tone: ProfitTone::of(net_profit),
            status: trade.status(),
            sync: trade.sync,
        }
    }
}
