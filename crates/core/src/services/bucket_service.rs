use chrono::{Datelike, TimeZone};
use std::collections::HashMap;
use tracing::debug;

use crate::models::analytics::PairBucket;
use crate::models::calendar::{CalendarWindow, DayBucket, MonthCalendar};
use crate::models::settings::WeekStart;
use crate::models::trade::{Direction, Trade};

/// Groups trades into chart-ready buckets: one per calendar day, or one per pair.
///
/// The core computes all the numbers; the frontend only renders.
pub struct BucketService;

impl BucketService {
    pub fn new() -> Self {
        Self
    }

    /// Bucket trades by the local calendar day they were opened on.
    ///
    /// Every day of `window` gets a bucket, with or without trades. Trades are
    /// assigned by converting their open time into `tz` and taking the date, so a
    /// trade at 23:30 UTC lands on the next day for a UTC+1 user.
    ///
    /// `leading_blanks` is the grid column of the window's first day, so that
    /// day 1 sits under the right weekday header.
    pub fn daily_calendar<'a, T, Tz>(
        &self,
        trades: T,
        window: CalendarWindow,
        week_start: WeekStart,
        tz: &Tz,
    ) -> MonthCalendar
    where
        T: IntoIterator<Item = &'a Trade>,
        Tz: TimeZone,
    {
        let mut days: Vec<DayBucket> = window.days().map(DayBucket::empty).collect();
        let mut profits = vec![0.0; days.len()];

        for trade in trades {
            let local_date = trade.open_time.with_timezone(tz).date_naive();
            let idx = match window.index_of(local_date) {
                Some(idx) => idx,
                None => continue,
            };
            if let Some(bucket) = days.get_mut(idx) {
                bucket.trade_count += 1;
                match trade.direction {
                    Direction::Long => bucket.long_trades += 1,
                    Direction::Short => bucket.short_trades += 1,
                }
                profits[idx] += trade.net_profit();
            }
        }

        // A day without trades keeps `None`; break-even days become Some(0.0).
        for (bucket, profit) in days.iter_mut().zip(profits) {
            if bucket.has_trades() {
                bucket.profit = Some(profit);
            }
        }

        let leading_blanks = week_start.column(window.start().weekday());
        debug!(
            start = %window.start(),
            end = %window.end(),
            leading_blanks,
            "daily calendar computed"
        );

        MonthCalendar {
            window,
            week_start,
            leading_blanks,
            days,
        }
    }

    /// Net profit and trade count per pair, most profitable first.
    ///
    /// Pairs are matched exactly (no case folding). Pairs with equal profit keep
    /// the order in which they first appear in `trades`.
    pub fn pair_breakdown<'a, T>(&self, trades: T) -> Vec<PairBucket>
    where
        T: IntoIterator<Item = &'a Trade>,
    {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut buckets: Vec<PairBucket> = Vec::new();

        for trade in trades {
            let idx = *index.entry(trade.pair.as_str()).or_insert_with(|| {
                buckets.push(PairBucket {
                    pair: trade.pair.clone(),
                    profit: 0.0,
                    trades: 0,
                });
                buckets.len() - 1
            });
            let bucket = &mut buckets[idx];
            bucket.profit += trade.net_profit();
            bucket.trades += 1;
        }

        // sort_by is stable: ties stay in first-seen order
        buckets.sort_by(|a, b| {
            b.profit
                .partial_cmp(&a.profit)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        buckets
    }
}

impl Default for BucketService {
    fn default() -> Self {
        Self::new()
    }
}
