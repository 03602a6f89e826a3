use serde::{Deserialize, Serialize};

use super::sync::SyncState;

/// Category of a trading account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountKind {
    /// Paper / simulated money
    Demo,
    /// Live funded account
    Real,
    /// Prop-firm evaluation account
    Challenge,
}

impl std::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountKind::Demo => write!(f, "Demo"),
            AccountKind::Real => write!(f, "Real"),
            AccountKind::Challenge => write!(f, "Challenge"),
        }
    }
}

/// A trading account. Owns zero or more trades and transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Opaque identifier assigned by the record store (or a UUID for local records)
    pub id: String,

    /// Display name
    pub name: String,

    /// Demo, Real or Challenge
    #[serde(rename = "type")]
    pub kind: AccountKind,

    /// Balance the account started with (never negative)
    pub initial_balance: f64,

    /// Local-only marker; confirmed records carry no field in their document
    #[serde(default, skip_serializing_if = "SyncState::is_confirmed")]
    pub sync: SyncState,
}

impl Account {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: AccountKind,
        initial_balance: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            initial_balance,
            sync: SyncState::Confirmed,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.sync.is_pending()
    }
}

/// User input for creating or editing an account.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountDraft {
    pub name: String,
    pub kind: AccountKind,
    pub initial_balance: f64,
}

impl AccountDraft {
    pub fn new(name: impl Into<String>, kind: AccountKind, initial_balance: f64) -> Self {
        Self {
            name: name.into(),
            kind,
            initial_balance,
        }
    }
}
