use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::models::account::Account;
use crate::models::analytics::{AccountProfit, LedgerStats};
use crate::models::trade::Trade;
use crate::models::transaction::{Transaction, TransactionKind};

/// Computes the ledger of a single account: balance, profit, win rate.
///
/// Pure business logic with no I/O and no state. The caller passes only the account's
/// own trades and transactions; nothing is filtered by account id in here.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Derive the ledger of `account` from its trades and transactions.
    ///
    /// Empty inputs are not an error: they yield zero counts, a zero win rate and
    /// `current_balance == account.initial_balance`.
    pub fn compute_ledger<'a, T, X>(&self, account: &Account, trades: T, transactions: X) -> LedgerStats
    where
        T: IntoIterator<Item = &'a Trade>,
        X: IntoIterator<Item = &'a Transaction>,
    {
        let mut total_profit = 0.0;
        let mut total_trades = 0;
        let mut win_trades = 0;
        let mut pairs: HashSet<&str> = HashSet::new();

        for trade in trades {
            total_profit += trade.net_profit();
            total_trades += 1;
            if trade.is_win() {
                win_trades += 1;
            }
            pairs.insert(trade.pair.as_str());
        }

        let mut total_deposits = 0.0;
        let mut total_withdrawals = 0.0;
        for tx in transactions {
            match tx.kind {
                TransactionKind::Deposit => total_deposits += tx.amount,
                TransactionKind::Withdrawal => total_withdrawals += tx.amount,
            }
        }

        let current_balance =
            account.initial_balance + total_profit + total_deposits - total_withdrawals;
        let win_rate = if total_trades > 0 {
            (win_trades as f64 / total_trades as f64) * 100.0
        } else {
            0.0
        };

        let stats = LedgerStats {
            total_profit,
            total_deposits,
            total_withdrawals,
            current_balance,
            total_trades,
            win_trades,
            loss_trades: total_trades - win_trades,
            win_rate,
            pairs_traded: pairs.len(),
        };
        debug!(
            account = %account.id,
            trades = stats.total_trades,
            balance = stats.current_balance,
            "ledger computed"
        );
        stats
    }

    /// Total net profit per account, in the order the accounts are given.
    ///
    /// Trades pointing at an account that is not in `accounts` are skipped.
    pub fn account_profits<'a, T>(&self, accounts: &[Account], trades: T) -> Vec<AccountProfit>
    where
        T: IntoIterator<Item = &'a Trade>,
    {
        let mut profit_by_account: HashMap<&str, f64> = accounts
            .iter()
            .map(|a| (a.id.as_str(), 0.0))
            .collect();

        let mut dangling = 0usize;
        for trade in trades {
            match profit_by_account.get_mut(trade.account_id.as_str()) {
                Some(profit) => *profit += trade.net_profit(),
                None => dangling += 1,
            }
        }
        if dangling > 0 {
            warn!(trades = dangling, "skipped trades referencing unknown accounts");
        }

        accounts
            .iter()
            .map(|a| AccountProfit {
                account_id: a.id.clone(),
                name: a.name.clone(),
                profit: profit_by_account.get(a.id.as_str()).copied().unwrap_or(0.0),
            })
            .collect()
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
