//! Unified error type for RPS Escrow.

use rps_escrow_engine::EngineError;
use rps_escrow_ledger::LedgerError;
use rps_escrow_protocol::ProtocolError;
use rps_escrow_service::ServiceError;

/// Top-level error that wraps all crate-specific errors.
///
/// `#[from]` on each variant lets `?` lift sub-crate errors into it.
#[derive(Debug, thiserror::Error)]
pub enum RpsEscrowError {
    /// Encoding or decoding a message failed.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The ledger refused a transfer.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A game operation was rejected.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The engine actor is gone.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// A configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file is not valid JSON for [`AppConfig`](crate::AppConfig).
    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
