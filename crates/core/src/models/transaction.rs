use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of money moving in or out of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Deposit => write!(f, "Deposit"),
            TransactionKind::Withdrawal => write!(f, "Withdrawal"),
        }
    }
}

/// A deposit or withdrawal. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,

    /// Owning account
    pub account_id: String,

    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Always positive; the kind carries the sign
    pub amount: f64,

    pub date: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        account_id: impl Into<String>,
        kind: TransactionKind,
        amount: f64,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            account_id: account_id.into(),
            kind,
            amount,
            date,
        }
    }
}
