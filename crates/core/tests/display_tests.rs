use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
use trading_journal_core::display::{
    format_currency, format_percent, AccountCardView, ProfitTone, TradeRow, UNKNOWN_ACCOUNT,
};
use trading_journal_core::models::account::{Account, AccountKind};
use trading_journal_core::models::analytics::LedgerStats;
use trading_journal_core::models::calendar::DayBucket;
use trading_journal_core::models::sync::SyncState;
use trading_journal_core::models::trade::{Direction, Emotion, Trade, TradeStatus};

fn trade(profit: f64) -> Trade {
    Trade {
        id: "t1".into(),
        account_id: "acc".into(),
        pair: "EUR/USD".into(),
        open_time: Utc.with_ymd_and_hms(2026, 10, 17, 22, 15, 0).unwrap(),
        direction: Direction::Short,
        profit,
        commission: 0.0,
        reward_ratio: None,
        conclusion: None,
        emotion: Emotion::Neutral,
        remark: None,
        sync: SyncState::Confirmed,
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Number formatting
// ═══════════════════════════════════════════════════════════════════

mod formatting {
    use super::*;

    #[test]
    fn currency_symbols() {
        assert_eq!(format_currency(1234.5, "USD"), "$1,234.50");
        assert_eq!(format_currency(-1234.5, "USD"), "-$1,234.50");
        assert_eq!(format_currency(12.0, "eur"), "€12.00");
        assert_eq!(format_currency(0.5, "GBP"), "£0.50");
    }

    #[test]
    fn unknown_currency_uses_code() {
        assert_eq!(format_currency(12.0, "CHF"), "CHF 12.00");
        assert_eq!(format_currency(-3.0, "pln"), "-PLN 3.00");
    }

    #[test]
    fn thousands_separators() {
        assert_eq!(format_currency(1_000_000.0, "USD"), "$1,000,000.00");
        assert_eq!(format_currency(999.999, "USD"), "$1,000.00");
        assert_eq!(format_currency(100.0, "USD"), "$100.00");
    }

    #[test]
    fn negative_rounding_to_zero_has_no_sign() {
        assert_eq!(format_currency(-0.001, "USD"), "$0.00");
        assert_eq!(format_currency(0.0, "USD"), "$0.00");
    }

    #[test]
    fn percent() {
        assert_eq!(format_percent(100.0 / 3.0), "33.33%");
        assert_eq!(format_percent(0.0), "0.00%");
        assert_eq!(format_percent(100.0), "100.00%");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Tones
// ═══════════════════════════════════════════════════════════════════

mod tones {
    use super::*;

    #[test]
    fn sign_of_value() {
        assert_eq!(ProfitTone::of(5.0), ProfitTone::Positive);
        assert_eq!(ProfitTone::of(-5.0), ProfitTone::Negative);
        assert_eq!(ProfitTone::of(0.0), ProfitTone::Neutral);
    }

    #[test]
    fn empty_day_has_no_data() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
        let empty = DayBucket::empty(date);
        assert_eq!(ProfitTone::of_day(&empty), ProfitTone::NoData);

        let break_even = DayBucket {
            profit: Some(0.0),
            trade_count: 2,
            ..DayBucket::empty(date)
        };
        assert_eq!(ProfitTone::of_day(&break_even), ProfitTone::Neutral);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  View models
// ═══════════════════════════════════════════════════════════════════

mod views {
    use super::*;

    #[test]
    fn account_card_with_stats() {
        let account = Account::new("acc", "Main", AccountKind::Real, 1000.0);
        let stats = LedgerStats {
            total_profit: -50.0,
            current_balance: 950.0,
            total_trades: 3,
            win_trades: 1,
            loss_trades: 2,
            win_rate: 100.0 / 3.0,
            pairs_traded: 2,
            ..LedgerStats::default()
        };
        let card = AccountCardView::build(&account, Some(&stats), "USD");
        assert_eq!(card.initial_balance, "$1,000.00");
        assert_eq!(card.current_balance, "$950.00");
        assert_eq!(card.total_profit, "-$50.00");
        assert_eq!(card.win_rate, "33.33%");
        assert_eq!(card.balance_tone, ProfitTone::Negative);
        assert_eq!(card.profit_tone, ProfitTone::Negative);
        assert!(!card.is_loading);
    }

    #[test]
    fn account_card_break_even_is_positive() {
        let account = Account::new("acc", "Main", AccountKind::Demo, 100.0);
        let stats = LedgerStats {
            current_balance: 100.0,
            ..LedgerStats::default()
        };
        let card = AccountCardView::build(&account, Some(&stats), "USD");
        assert_eq!(card.balance_tone, ProfitTone::Positive);
        assert_eq!(card.profit_tone, ProfitTone::Positive);
    }

    #[test]
    fn pending_account_card_shows_placeholders() {
        let mut account = Account::new("acc", "New", AccountKind::Challenge, 25_000.0);
        account.sync = SyncState::Pending;
        let card = AccountCardView::build(&account, None, "EUR");
        assert!(card.is_loading);
        assert_eq!(card.current_balance, "€25,000.00");
        assert_eq!(card.current_balance, card.initial_balance);
        assert_eq!(card.total_profit, "€0.00");
        assert_eq!(card.win_rate, "0.00%");
        assert_eq!(card.profit_tone, ProfitTone::NoData);
    }

    #[test]
    fn trade_row_uses_local_date() {
        let t = trade(42.0);
        let utc_row = TradeRow::build(&t, Some("Main"), "USD", &Utc);
        assert_eq!(utc_row.date, "Oct 17, 2026");

        let plus_three = FixedOffset::east_opt(3 * 3600).unwrap();
        let local_row = TradeRow::build(&t, Some("Main"), "USD", &plus_three);
        assert_eq!(local_row.date, "Oct 18, 2026");
        assert_eq!(local_row.net_profit, "$42.00");
        assert_eq!(local_row.status, TradeStatus::Win);
        assert_eq!(local_row.profit_tone, ProfitTone::Positive);
    }

    #[test]
    fn trade_row_without_account() {
        let row = TradeRow::build(&trade(0.0), None, "USD", &Utc);
        assert_eq!(row.account, UNKNOWN_ACCOUNT);
        assert_eq!(row.status, TradeStatus::Loss);
        assert_eq!(row.profit_tone, ProfitTone::Neutral);
    }
}
