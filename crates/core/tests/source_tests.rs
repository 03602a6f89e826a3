// ═══════════════════════════════════════════════════════════════════
// Record Source Tests: Memory, JsonFile, Http, and failing sources
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use trading_journal_core::errors::CoreError;
use trading_journal_core::models::account::{Account, AccountKind};
use trading_journal_core::models::journal::JournalSnapshot;
use trading_journal_core::models::sync::SyncState;
use trading_journal_core::models::trade::{Direction, Emotion, Trade, TradeStatus};
use trading_journal_core::models::transaction::{Transaction, TransactionKind};
use trading_journal_core::sources::http::HttpRecordSource;
use trading_journal_core::sources::json_file::{write_snapshot, JsonFileSource};
use trading_journal_core::sources::memory::MemoryRecordSource;
use trading_journal_core::sources::traits::RecordSource;
use trading_journal_core::TradingJournal;

// ═══════════════════════════════════════════════════════════════════
// Test Helpers
// ═══════════════════════════════════════════════════════════════════

fn sample_snapshot() -> JournalSnapshot {
    JournalSnapshot::new(
        vec![Account::new("acc-1", "Main", AccountKind::Real, 1000.0)],
        vec![Trade {
            id: "t-1".into(),
            account_id: "acc-1".into(),
            pair: "EUR/USD".into(),
            open_time: Utc.with_ymd_and_hms(2026, 10, 5, 9, 0, 0).unwrap(),
            direction: Direction::Long,
            profit: 120.0,
            commission: 20.0,
            reward_ratio: Some("1:2".into()),
            conclusion: None,
            emotion: Emotion::Calm,
            remark: None,
            sync: SyncState::Confirmed,
        }],
        vec![Transaction::new(
            "tx-1",
            "acc-1",
            TransactionKind::Deposit,
            500.0,
            Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap(),
        )],
    )
}

/// A source whose trade collection is always unavailable.
struct FailingTradesSource;

#[async_trait]
impl RecordSource for FailingTradesSource {
    fn name(&self) -> &str {
        "Failing"
    }

    async fn fetch_accounts(&self) -> Result<Vec<Account>, CoreError> {
        Ok(vec![Account::new("acc-x", "X", AccountKind::Demo, 0.0)])
    }

    async fn fetch_trades(&self) -> Result<Vec<Trade>, CoreError> {
        Err(CoreError::Source {
            source_name: "Failing".into(),
            message: "trades unavailable".into(),
        })
    }

    async fn fetch_transactions(&self) -> Result<Vec<Transaction>, CoreError> {
        Ok(Vec::new())
    }
}

// ═══════════════════════════════════════════════════════════════════
// Default fetch_snapshot
// ═══════════════════════════════════════════════════════════════════

mod default_snapshot {
    use super::*;

    #[tokio::test]
    async fn fails_if_any_collection_fails() {
        let err = FailingTradesSource.fetch_snapshot().await.unwrap_err();
        assert!(matches!(err, CoreError::Source { .. }));
        assert!(err.to_string().contains("trades unavailable"));
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_records() {
        let mut journal = TradingJournal::from_snapshot(sample_snapshot());
        assert!(journal.refresh_from(&FailingTradesSource).await.is_err());
        assert_eq!(journal.snapshot(), &sample_snapshot());
    }
}

// ═══════════════════════════════════════════════════════════════════
// MemoryRecordSource
// ═══════════════════════════════════════════════════════════════════

mod memory {
    use super::*;

    #[tokio::test]
    async fn serves_its_snapshot() {
        let source = MemoryRecordSource::new(sample_snapshot());
        assert_eq!(source.name(), "Memory");
        assert_eq!(source.fetch_accounts().await.unwrap().len(), 1);
        assert_eq!(source.fetch_trades().await.unwrap()[0].net_profit(), 100.0);
        assert_eq!(source.fetch_snapshot().await.unwrap(), sample_snapshot());
    }

    #[tokio::test]
    async fn load_from_memory() {
        let journal = TradingJournal::load_from(&MemoryRecordSource::new(sample_snapshot()))
            .await
            .unwrap();
        assert_eq!(journal.trade_count(), 1);
        let ledger = journal.account_ledger("acc-1").unwrap().unwrap();
        assert_eq!(ledger.current_balance, 1600.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// JsonFileSource
// ═══════════════════════════════════════════════════════════════════

mod json_file {
    use super::*;

    #[tokio::test]
    async fn reads_written_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.json");
        write_snapshot(&path, &sample_snapshot()).unwrap();

        let source = JsonFileSource::new(&path);
        assert_eq!(source.path(), path.as_path());
        assert_eq!(source.fetch_snapshot().await.unwrap(), sample_snapshot());
    }

    #[tokio::test]
    async fn rereads_file_on_every_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.json");
        write_snapshot(&path, &JournalSnapshot::default()).unwrap();
        let source = JsonFileSource::new(&path);
        assert!(source.fetch_trades().await.unwrap().is_empty());

        write_snapshot(&path, &sample_snapshot()).unwrap();
        assert_eq!(source.fetch_trades().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn stale_derived_fields_are_recomputed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.json");
        std::fs::write(
            &path,
            r#"{
                "accounts": [{"id": "a", "name": "A", "type": "Demo", "initialBalance": 0}],
                "trades": [{
                    "id": "t", "accountId": "a", "pair": "EUR/USD",
                    "openTime": "2026-10-05T09:00:00Z", "direction": "Long",
                    "profit": 10, "commission": 15, "netProfit": 10, "status": "Win"
                }]
            }"#,
        )
        .unwrap();

        let trades = JsonFileSource::new(&path).fetch_trades().await.unwrap();
        assert_eq!(trades[0].net_profit(), -5.0);
        assert_eq!(trades[0].status(), TradeStatus::Loss);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonFileSource::new(dir.path().join("absent.json"));
        assert!(matches!(
            source.fetch_snapshot().await,
            Err(CoreError::FileIO(_))
        ));
    }

    #[tokio::test]
    async fn malformed_file_is_deserialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = JsonFileSource::new(&path).fetch_snapshot().await.unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
        assert!(err.to_string().contains("broken.json"));
    }

    #[tokio::test]
    async fn refresh_replaces_pending_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.json");
        write_snapshot(&path, &sample_snapshot()).unwrap();

        let mut journal = TradingJournal::create_new();
        journal
            .stage_account(trading_journal_core::models::account::AccountDraft::new(
                "Pending",
                AccountKind::Demo,
                0.0,
            ))
            .unwrap();
        journal.refresh_from(&JsonFileSource::new(&path)).await.unwrap();

        assert_eq!(journal.accounts().len(), 1);
        assert_eq!(journal.accounts()[0].id, "acc-1");
    }
}

// ═══════════════════════════════════════════════════════════════════
// HttpRecordSource
// ═══════════════════════════════════════════════════════════════════

mod http {
    use super::*;

    #[test]
    fn collection_urls() {
        let source = HttpRecordSource::new("https://journal.example.com/api/");
        assert_eq!(source.name(), "Http");
        assert_eq!(
            source.collection_url("trades"),
            "https://journal.example.com/api/trades"
        );
        assert_eq!(
            source.with_token("abc").collection_url("accounts"),
            "https://journal.example.com/api/accounts"
        );
    }

    #[tokio::test]
    async fn unreachable_gateway_is_network_error() {
        // Port 9 (discard) on localhost is not expected to accept HTTP
        let source = HttpRecordSource::new("http://127.0.0.1:9");
        assert!(matches!(
            source.fetch_accounts().await,
            Err(CoreError::Network(_))
        ));
    }
}
