use serde::{Deserialize, Serialize};

/// Whether a record has been acknowledged by the record store.
///
/// `Pending` records are created locally and displayed before the store confirms
/// the write. They are never distinguished by their id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyncState {
    #[default]
    Confirmed,
    Pending,
}

impl SyncState {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, SyncState::Confirmed)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, SyncState::Pending)
    }
}

impl std::fmt::Display for SyncState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncState::Confirmed => write!(f, "Confirmed"),
            SyncState::Pending => write!(f, "Pending"),
        }
    }
}
