use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::settings::WeekStart;
use crate::errors::CoreError;

/// Maximum calendar window length in days (10 years).
pub const MAX_CALENDAR_RANGE_DAYS: i64 = 3650;

/// An inclusive range of calendar days to bucket trades into.
///
/// Deserialized windows go through [`CalendarWindow::new`], so a stored window
/// is held to the same bounds as one built in code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WindowBounds")]
pub struct CalendarWindow {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct WindowBounds {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<WindowBounds> for CalendarWindow {
    type Error = CoreError;

    fn try_from(bounds: WindowBounds) -> Result<Self, Self::Error> {
        CalendarWindow::new(bounds.start, bounds.end)
    }
}

impl CalendarWindow {
    /// An arbitrary inclusive window. `start` must not be after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        if start > end {
            return Err(CoreError::ValidationError(format!(
                "Calendar start ({start}) must not be after end ({end})"
            )));
        }
        let range_days = (end - start).num_days();
        if range_days > MAX_CALENDAR_RANGE_DAYS {
            return Err(CoreError::ValidationError(format!(
                "Calendar range of {range_days} days exceeds maximum of {MAX_CALENDAR_RANGE_DAYS} days (10 years)"
            )));
        }
        Ok(Self { start, end })
    }

    /// The whole calendar month `month` (1-12) of `year`.
    pub fn month(year: i32, month: u32) -> Result<Self, CoreError> {
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            CoreError::ValidationError(format!("Invalid calendar month {year}-{month:02}"))
        })?;
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(|| {
                CoreError::ValidationError(format!("Calendar month {year}-{month:02} is out of range"))
            })?;
        Ok(Self { start, end })
    }

    /// The calendar month that contains `date`.
    pub fn containing(date: NaiveDate) -> Result<Self, CoreError> {
        Self::month(date.year(), date.month())
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the window (both ends included).
    pub fn len(&self) -> usize {
        ((self.end - self.start).num_days() + 1) as usize
    }

    /// A valid window always holds at least one day.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Every day of the window in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(self.len())
    }

    /// Position of `date` inside the window, if it falls inside.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        if self.contains(date) {
            Some((date - self.start).num_days() as usize)
        } else {
            None
        }
    }
}

/// Trades of a single calendar day.
///
/// `profit` is `None` when no trade was opened that day, and `Some` (possibly
/// `Some(0.0)`) otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub profit: Option<f64>,
    pub trade_count: usize,
    pub long_trades: usize,
    pub short_trades: usize,
}

impl DayBucket {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            profit: None,
            trade_count: 0,
            long_trades: 0,
            short_trades: 0,
        }
    }

    pub fn has_trades(&self) -> bool {
        self.trade_count > 0
    }
}

/// One slot of the seven-column calendar grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalendarCell<'a> {
    /// Placeholder before the first day of the window
    Blank,
    Day(&'a DayBucket),
}

/// Daily buckets for a window, plus the padding that aligns the first day
/// with its weekday column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthCalendar {
    pub window: CalendarWindow,
    pub week_start: WeekStart,

    /// Empty cells before the first day
    pub leading_blanks: usize,

    /// Exactly one bucket per day of the window, ascending
    pub days: Vec<DayBucket>,
}

impl MonthCalendar {
    /// Padding followed by every day, ready to lay out left-to-right.
    pub fn cells(&self) -> Vec<CalendarCell<'_>> {
        std::iter::repeat(CalendarCell::Blank)
            .take(self.leading_blanks)
            .chain(self.days.iter().map(CalendarCell::Day))
            .collect()
    }

    /// Cells split into rows of seven. The last row may be shorter.
    pub fn weeks(&self) -> Vec<Vec<CalendarCell<'_>>> {
        self.cells().chunks(7).map(|week| week.to_vec()).collect()
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayBucket> {
        self.window.index_of(date).and_then(|idx| self.days.get(idx))
    }

    pub fn trading_days(&self) -> usize {
        self.days.iter().filter(|d| d.has_trades()).count()
    }
}
