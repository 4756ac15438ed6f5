//! Byte encoding for transactions, receipts and events.
//!
//! The engine never sees bytes. Whatever sits in front of it decodes
//! incoming [`Transaction`]s with a [`Codec`] and encodes the receipts it
//! gets back. [`JsonCodec`] is the only implementation; JSON keeps the
//! receipt history readable when auditing payouts.

use serde::{de::DeserializeOwned, Serialize};

use crate::{ProtocolError, Transaction};

/// Converts protocol values to bytes and back.
///
/// `Send + Sync + 'static` so one codec can be shared by every task
/// that submits transactions.
pub trait Codec: Send + Sync + 'static {
    /// Writes `value` out as bytes.
    ///
    /// # Errors
    /// `ProtocolError::Encode` when the value can't be represented.
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError>;

    /// Reads a `T` back from `data`.
    ///
    /// # Errors
    /// `ProtocolError::Decode` when `data` is not a valid `T`.
    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError>;

    /// Decodes a [`Transaction`] and applies the protocol-level checks
    /// that serde alone can't express.
    ///
    /// # Errors
    /// Returns `ProtocolError::InvalidMessage` when a call that never
    /// carries funds (`SetMove`, `MyGames`) arrives with a non-zero value
    /// attached, on top of the decode errors of [`Codec::decode`].
    fn decode_transaction(
        &self,
        data: &[u8],
    ) -> Result<Transaction, ProtocolError> {
        let tx: Transaction = self.decode(data)?;
        if tx.value > 0 && !tx.call.is_payable() {
            return Err(ProtocolError::InvalidMessage(format!(
                "{} does not accept value (got {})",
                tx.call.name(),
                tx.value
            )));
        }
        Ok(tx)
    }
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// This is behind the `json` feature flag (enabled by default).
///
/// ## Example
///
/// ```rust
/// use rps_escrow_protocol::{AccountId, Call, Codec, JsonCodec, Transaction};
///
/// let codec = JsonCodec;
///
/// let tx = Transaction {
///     seq: 1,
///     sender: AccountId(1),
///     value: 10,
///     call: Call::Enroll { opponent: AccountId(2) },
/// };
///
/// let bytes = codec.encode(&tx).unwrap();
/// let decoded: Transaction = codec.decode(&bytes).unwrap();
/// assert_eq!(tx, decoded);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::{AccountId, Call, GameId, Move};

    #[test]
    fn test_decode_transaction_accepts_payable_call_with_value() {
        let raw = br#"{
            "seq": 3,
            "sender": 1,
            "value": 10,
            "call": { "type": "JoinGame", "game_id": 0 }
        }"#;
        let tx = JsonCodec.decode_transaction(raw).unwrap();
        assert_eq!(tx.sender, AccountId(1));
        assert_eq!(tx.call, Call::JoinGame { game_id: GameId(0) });
    }

    #[test]
    fn test_decode_transaction_rejects_value_on_set_move() {
        let tx = Transaction {
            seq: 1,
            sender: AccountId(1),
            value: 5,
            call: Call::SetMove {
                game_id: GameId(0),
                choice: Move::Rock,
            },
        };
        let bytes = JsonCodec.encode(&tx).unwrap();
        let err = JsonCodec.decode_transaction(&bytes).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidMessage(_)));
        assert!(err.to_string().contains("SetMove"));
    }

    #[test]
    fn test_decode_transaction_surfaces_decode_errors() {
        let err = JsonCodec.decode_transaction(b"not json").unwrap_err();
        assert!(matches!(err, ProtocolError::Decode(_)));
    }
}
