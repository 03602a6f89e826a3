use serde::{Deserialize, Serialize};

/// Derived financial summary of one account.
///
/// Always present: an account with no activity yields zero counts and
/// `current_balance == initial_balance`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerStats {
    /// Sum of net profit over the account's trades
    pub total_profit: f64,

    /// Sum of all deposits
    pub total_deposits: f64,

    /// Sum of all withdrawals
    pub total_withdrawals: f64,

    /// initial_balance + total_profit + total_deposits - total_withdrawals
    pub current_balance: f64,

    pub total_trades: usize,

    /// Trades with strictly positive net profit
    pub win_trades: usize,

    /// total_trades - win_trades (break-even trades land here)
    pub loss_trades: usize,

    /// Percentage in [0, 100]; 0 when there are no trades
    pub win_rate: f64,

    /// Number of distinct pair symbols (case-sensitive)
    pub pairs_traded: usize,
}

/// Portfolio-level statistics across every supplied trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceStats {
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,

    /// winning_trades / total_trades × 100
    pub win_rate: f64,

    /// Sum of net profit
    pub total_profit: f64,

    /// total_profit / total_trades
    pub average_profit: f64,
}

/// Profit aggregated over all trades of one pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairBucket {
    pub pair: String,
    pub profit: f64,
    pub trades: usize,
}

/// Total net profit of one account, for the account comparison chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountProfit {
    pub account_id: String,
    pub name: String,
    pub profit: f64,
}
