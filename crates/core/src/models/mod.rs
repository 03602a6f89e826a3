pub mod account;
pub mod analytics;
pub mod calendar;
pub mod journal;
pub mod settings;
pub mod sync;
pub mod trade;
pub mod transaction;
