use tracing::debug;

use crate::models::analytics::PerformanceStats;
use crate::models::trade::Trade;

/// Portfolio-wide win/loss statistics over a flat collection of trades.
pub struct PerformanceService;

impl PerformanceService {
    pub fn new() -> Self {
        Self
    }

    /// Returns `None` for an empty collection so callers can render an empty
    /// state instead of a row of zeros.
    pub fn compute_performance<'a, T>(&self, trades: T) -> Option<PerformanceStats>
    where
        T: IntoIterator<Item = &'a Trade>,
    {
        let mut total_trades = 0usize;
        let mut winning_trades = 0usize;
        let mut total_profit = 0.0;

        for trade in trades {
            total_trades += 1;
            if trade.is_win() {
                winning_trades += 1;
            }
            total_profit += trade.net_profit();
        }

        if total_trades == 0 {
            return None;
        }

        let stats = PerformanceStats {
            total_trades,
            winning_trades,
            losing_trades: total_trades - winning_trades,
            win_rate: (winning_trades as f64 / total_trades as f64) * 100.0,
            total_profit,
            average_profit: total_profit / total_trades as f64,
        };
        debug!(trades = total_trades, win_rate = stats.win_rate, "performance computed");
        Some(stats)
    }
}

impl Default for PerformanceService {
    fn default() -> Self {
        Self::new()
    }
}
