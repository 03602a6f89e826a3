pub mod bucket_service;
pub mod journal_service;
pub mod ledger_service;
pub mod performance_service;
