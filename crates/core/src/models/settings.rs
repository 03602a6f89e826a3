use chrono::{FixedOffset, Offset, Utc, Weekday};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Largest UTC offset accepted for the local calendar (±14 hours).
pub const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// Which weekday occupies column 0 of the calendar grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// Zero-based grid column of `weekday` under this convention.
    pub fn column(&self, weekday: Weekday) -> usize {
        match self {
            WeekStart::Sunday => weekday.num_days_from_sunday() as usize,
            WeekStart::Monday => weekday.num_days_from_monday() as usize,
        }
    }
}

impl std::fmt::Display for WeekStart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeekStart::Sunday => write!(f, "Sunday"),
            WeekStart::Monday => write!(f, "Monday"),
        }
    }
}

/// User-configurable display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// The currency all amounts are displayed in (e.g., "USD", "EUR").
    pub currency: String,

    /// First column of the calendar grid.
    #[serde(default)]
    pub week_start: WeekStart,

    /// Offset of the user's local time from UTC, in minutes.
    /// Trades are placed on calendar days by their local open date.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl Settings {
    /// The local time zone as a fixed offset. Out-of-range values fall back to UTC.
    pub fn timezone(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60)).unwrap_or_else(|| {
            warn!(
                utc_offset_minutes = self.utc_offset_minutes,
                "UTC offset out of range, using UTC"
            );
            Utc.fix()
        })
    }

    /// Whether `utc_offset_minutes` is within ±[`MAX_UTC_OFFSET_MINUTES`].
    pub fn has_valid_offset(&self) -> bool {
        self.utc_offset_minutes.unsigned_abs() <= MAX_UTC_OFFSET_MINUTES.unsigned_abs()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            week_start: WeekStart::Sunday,
            utc_offset_minutes: 0,
        }
    }
}
