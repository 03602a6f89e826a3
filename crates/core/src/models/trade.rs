use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::sync::SyncState;

/// Side of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Long,
    Short,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Long => write!(f, "Long"),
            Direction::Short => write!(f, "Short"),
        }
    }
}

/// Outcome of a trade, derived from its net profit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeStatus {
    Win,
    Loss,
}

impl TradeStatus {
    /// The one place that decides what a winning trade is.
    ///
    /// Only a strictly positive net profit wins; break-even counts as a loss.
    pub fn from_net_profit(net_profit: f64) -> Self {
        if net_profit > 0.0 {
            TradeStatus::Win
        } else {
            TradeStatus::Loss
        }
    }

    pub fn is_win(&self) -> bool {
        matches!(self, TradeStatus::Win)
    }
}

impl std::fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeStatus::Win => write!(f, "Win"),
            TradeStatus::Loss => write!(f, "Loss"),
        }
    }
}

/// How the trader felt when taking the trade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Emotion {
    Calm,
    Fear,
    Greed,
    #[default]
    Neutral,
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Emotion::Calm => write!(f, "Calm"),
            Emotion::Fear => write!(f, "Fear"),
            Emotion::Greed => write!(f, "Greed"),
            Emotion::Neutral => write!(f, "Neutral"),
        }
    }
}

/// A single logged trade.
///
/// **Important**: net profit and status are not stored. They are always derived
/// from `profit` and `commission`, so an edit can never leave them stale.
/// Documents read from a record store may carry `netProfit`/`status`; those values
/// are ignored and recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "TradeDocument", from = "TradeDocument")]
pub struct Trade {
    pub id: String,

    /// Owning account
    pub account_id: String,

    /// Traded symbol, uppercased by the write path (e.g., "EUR/USD")
    pub pair: String,

    /// When the position was opened
    pub open_time: DateTime<Utc>,

    pub direction: Direction,

    /// Gross profit (signed)
    pub profit: f64,

    /// Fees paid (never negative)
    pub commission: f64,

    /// Free-form reward ratio label (e.g., "1:3")
    pub reward_ratio: Option<String>,

    pub conclusion: Option<String>,

    pub emotion: Emotion,

    pub remark: Option<String>,

    pub sync: SyncState,
}

impl Trade {
    /// Gross profit minus commission.
    pub fn net_profit(&self) -> f64 {
        self.profit - self.commission
    }

    pub fn status(&self) -> TradeStatus {
        TradeStatus::from_net_profit(self.net_profit())
    }

    pub fn is_win(&self) -> bool {
        self.status().is_win()
    }

    pub fn is_pending(&self) -> bool {
        self.sync.is_pending()
    }
}

/// User input for logging or editing a trade.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeDraft {
    pub account_id: String,
    pub pair: String,
    pub open_time: DateTime<Utc>,
    pub direction: Direction,
    pub profit: f64,
    pub commission: f64,
    pub reward_ratio: Option<String>,
    pub conclusion: Option<String>,
    pub emotion: Option<Emotion>,
    pub remark: Option<String>,
}

impl TradeDraft {
    /// A draft with no commission, notes or emotion.
    pub fn new(
        account_id: impl Into<String>,
        pair: impl Into<String>,
        open_time: DateTime<Utc>,
        direction: Direction,
        profit: f64,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            pair: pair.into(),
            open_time,
            direction,
            profit,
            commission: 0.0,
            reward_ratio: None,
            conclusion: None,
            emotion: None,
            remark: None,
        }
    }

    pub fn with_commission(mut self, commission: f64) -> Self {
        self.commission = commission;
        self
    }

    pub fn with_emotion(mut self, emotion: Emotion) -> Self {
        self.emotion = Some(emotion);
        self
    }

    pub fn with_notes(
        mut self,
        reward_ratio: Option<String>,
        conclusion: Option<String>,
        remark: Option<String>,
    ) -> Self {
        self.reward_ratio = reward_ratio;
        self.conclusion = conclusion;
        self.remark = remark;
        self
    }
}

// ── Store document shape ────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TradeDocument {
    id: String,
    account_id: String,
    pair: String,
    open_time: DateTime<Utc>,
    direction: Direction,
    profit: f64,
    #[serde(default)]
    commission: f64,
    #[serde(default)]
    net_profit: Option<f64>,
    #[serde(default)]
    status: Option<TradeStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reward_ratio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    conclusion: Option<String>,
    #[serde(default)]
    emotion: Emotion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    remark: Option<String>,
    #[serde(default, skip_serializing_if = "SyncState::is_confirmed")]
    sync: SyncState,
}

impl From<Trade> for TradeDocument {
    fn from(trade: Trade) -> Self {
        let net_profit = trade.net_profit();
        Self {
            net_profit: Some(net_profit),
            status: Some(TradeStatus::from_net_profit(net_profit)),
            id: trade.id,
            account_id: trade.account_id,
            pair: trade.pair,
            open_time: trade.open_time,
            direction: trade.direction,
            profit: trade.profit,
            commission: trade.commission,
            reward_ratio: trade.reward_ratio,
            conclusion: trade.conclusion,
            emotion: trade.emotion,
            remark: trade.remark,
            sync: trade.sync,
        }
    }
}

impl From<TradeDocument> for Trade {
    fn from(doc: TradeDocument) -> Self {
        // net_profit and status are dropped on purpose: they are recomputed.
        Self {
            id: doc.id,
            account_id: doc.account_id,
            pair: doc.pair,
            open_time: doc.open_time,
            direction: doc.direction,
            profit: doc.profit,
            commission: doc.commission,
            reward_ratio: doc.reward_ratio,
            conclusion: doc.conclusion,
            emotion: doc.emotion,
            remark: doc.remark,
            sync: doc.sync,
        }
    }
}
