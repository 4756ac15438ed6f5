//! Wire protocol for RPS Escrow.
//!
//! This crate defines the "language" that callers and the engine speak:
//!
//! - **Types** ([`Game`], [`Transaction`], [`Receipt`], [`GameEvent`], etc.):
//!   the records and messages that cross the engine boundary.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how those messages
//!   are converted to/from bytes.
//! - **Errors** ([`ProtocolError`]): what can go wrong during
//!   encoding/decoding.
//!
//! # Architecture
//!
//! The protocol layer sits below every other crate. It doesn't know about
//! ledgers or escrow rules: it only describes data.
//!
//! ```text
//! Transaction (bytes) → Protocol (Call) → Engine (GameEngine) → Receipt
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    AccountId, Call, Game, GameEvent, GameId, GameState, Move, Outcome,
    Payout, Receipt, RejectReason, Response, Seat, Transaction, Winner,
};
