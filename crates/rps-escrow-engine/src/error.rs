//! Error types for the engine layer.

use rps_escrow_ledger::LedgerError;
use rps_escrow_protocol::{AccountId, GameId, GameState, RejectReason};

/// Why an engine operation was rejected.
///
/// Every variant means the same thing: the call had no effect. No game
/// record, escrow balance or ledger balance changed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The attached payment isn't the amount this call requires.
    #[error("invalid stake: expected {expected}, got {got}")]
    InvalidStake { expected: u64, got: u64 },

    /// No game has this identifier.
    #[error("game {0} not found")]
    GameNotFound(GameId),

    /// The game's state doesn't allow this operation.
    /// For example, joining a game that is already `Joined`.
    #[error("game {game_id} is {state}, cannot {operation}")]
    InvalidState {
        game_id: GameId,
        state: GameState,
        operation: &'static str,
    },

    /// The caller isn't the account this operation is reserved for.
    #[error("account {caller} may not {operation} game {game_id}")]
    Unauthorized {
        caller: AccountId,
        game_id: GameId,
        operation: &'static str,
    },

    /// The caller already filled their move slot in this game.
    #[error("account {caller} already moved in game {game_id}")]
    MoveAlreadySet { caller: AccountId, game_id: GameId },

    /// `Unset` was submitted as a move.
    #[error("invalid move: a move must be Rock, Paper or Scissors")]
    InvalidMove,

    /// Enrolling against oneself while the engine forbids it.
    #[error("account {0} cannot play against itself")]
    SelfPlay(AccountId),

    /// Value was attached to a call that takes none.
    #[error("{operation} does not accept value (got {value})")]
    NonPayable { operation: &'static str, value: u64 },

    /// The ledger refused to capture a payment or deliver a payout.
    #[error("transfer failed: {0}")]
    Transfer(#[from] LedgerError),
}

impl EngineError {
    /// The wire-level reason reported in a rejected receipt.
    pub fn reason(&self) -> RejectReason {
        match self {
            Self::InvalidStake { .. } => RejectReason::InvalidStake,
            Self::GameNotFound(_) => RejectReason::GameNotFound,
            Self::InvalidState { .. } => RejectReason::InvalidState,
            Self::Unauthorized { .. } => RejectReason::Unauthorized,
            Self::MoveAlreadySet { .. } => RejectReason::MoveAlreadySet,
            Self::InvalidMove => RejectReason::InvalidMove,
            Self::SelfPlay(_) => RejectReason::SelfPlay,
            Self::NonPayable { .. } => RejectReason::NonPayable,
            Self::Transfer(_) => RejectReason::TransferFailed,
        }
    }
}
