//! Error types for the protocol layer.
//!
//! Each crate in RPS Escrow defines its own error enum. A `ProtocolError`
//! always means the problem is in serialization or message shape, never
//! in escrow rules or ledger movements.

/// Failure to turn a message into bytes or back.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// A value could not be written out.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Bytes did not parse into the requested type.
    ///
    /// Usual causes: malformed JSON, missing required fields, an unknown
    /// `type` tag, or a move name outside the known set.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// Well-formed, but the message breaks a protocol rule.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
