use thiserror::Error;

/// Unified error type for the entire trading-journal-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// The calculators themselves never fail; errors come from the write path,
/// calendar windows, settings and record sources.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Trade not found: {0}")]
    TradeNotFound(String),

    // ── Record Sources ──────────────────────────────────────────────
    #[error("Record source error ({source_name}): {message}")]
    Source {
        source_name: String,
        message: String,
    },

    #[error("Not authorized by record source: {0}")]
    Unauthorized(String),

    #[error("Network error: {0}")]
    Network(String),

    // ── Serialization ───────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── File I/O (native only) ──────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Access tokens may be passed as query parameters; never echo them back.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
