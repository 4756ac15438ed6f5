//! Core protocol types for RPS Escrow.
//!
//! Everything a caller submits ([`Transaction`]), everything the engine
//! answers ([`Receipt`]), and the game record itself ([`Game`]) lives here,
//! so that the engine, the actor and any external client agree on one
//! serialized shape.

use serde::{Deserialize, Serialize};

use std::fmt;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// An opaque account handle.
///
/// The engine never interprets the number inside: it only compares
/// handles for equality and uses them as map keys. Real deployments map
/// their own addresses onto this handle at the boundary.
///
/// `#[serde(transparent)]` serializes `AccountId(42)` as plain `42`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AccountId(pub u64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A-{}", self.0)
    }
}

/// A unique, never reused game identifier.
///
/// Identifiers are dense: the n-th enrolled game gets `GameId(n)`,
/// starting at zero.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GameId(pub u64);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Move
// ---------------------------------------------------------------------------

/// The content of a move slot.
///
/// `Unset` is part of the type because a game record carries two slots
/// that start out empty. Submitting `Unset` as a move is rejected by the
/// engine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "PascalCase")]
pub enum Move {
    #[default]
    Unset,
    Rock,
    Paper,
    Scissors,
}

impl Move {
    /// The three moves a player may actually submit.
    pub const PLAYABLE: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// Returns `true` once a player has filled this slot.
    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    /// Dominance relation: Rock beats Scissors, Scissors beats Paper,
    /// Paper beats Rock. `Unset` beats nothing and is beaten by nothing.
    pub fn beats(&self, other: &Move) -> bool {
        matches!(
            (self, other),
            (Move::Rock, Move::Scissors)
                | (Move::Scissors, Move::Paper)
                | (Move::Paper, Move::Rock)
        )
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => write!(f, "Unset"),
            Self::Rock => write!(f, "Rock"),
            Self::Paper => write!(f, "Paper"),
            Self::Scissors => write!(f, "Scissors"),
        }
    }
}

// ---------------------------------------------------------------------------
// GameState
// ---------------------------------------------------------------------------

/// The lifecycle state of a game.
///
/// Transitions are strictly ordered: no skipping, no regression:
///
/// ```text
/// Created → Joined → Finished
/// ```
///
/// - **Created**: `player1` enrolled and staked; waiting for the invited
///   `player2` to match the stake.
/// - **Joined**: both stakes are escrowed; moves are being collected.
/// - **Finished**: resolved and paid out. Terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Created,
    Joined,
    Finished,
}

impl GameState {
    /// Returns `true` if the invited player may still join.
    pub fn is_joinable(&self) -> bool {
        matches!(self, Self::Created)
    }

    /// Returns `true` if players may submit moves.
    pub fn accepts_moves(&self) -> bool {
        matches!(self, Self::Joined)
    }

    /// Returns `true` for the terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished)
    }

    /// Returns the state that follows this one, or `None` when terminal.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Created => Some(Self::Joined),
            Self::Joined => Some(Self::Finished),
            Self::Finished => None,
        }
    }

    /// Returns `true` if transitioning to `target` is valid.
    pub fn can_transition_to(self, target: Self) -> bool {
        self.next() == Some(target)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "Created"),
            Self::Joined => write!(f, "Joined"),
            Self::Finished => write!(f, "Finished"),
        }
    }
}

// ---------------------------------------------------------------------------
// Seats, winners and payouts
// ---------------------------------------------------------------------------

/// Which of the two player slots an account occupies in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    Player1,
    Player2,
}

/// The resolved result of a finished game.
///
/// Serialized internally tagged:
/// `{"type":"Player","account":7}` or `{"type":"Tie"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Winner {
    /// The named account took the whole pot.
    Player { account: AccountId },
    /// Equal moves: each player got their own stake back.
    Tie,
}

impl Winner {
    /// Returns the winning account, or `None` for a tie.
    pub fn account(&self) -> Option<AccountId> {
        match self {
            Self::Player { account } => Some(*account),
            Self::Tie => None,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player { account } => write!(f, "{account}"),
            Self::Tie => write!(f, "tie"),
        }
    }
}

/// One outbound transfer from escrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub recipient: AccountId,
    pub amount: u64,
}

// ---------------------------------------------------------------------------
// Game
// ---------------------------------------------------------------------------

/// A single rock-paper-scissors match and the funds escrowed for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    /// The enrolling account.
    pub player1: AccountId,
    /// The invited opponent. Fixed at enrollment, never changes.
    pub player2: AccountId,
    /// What each player deposits.
    pub stake: u64,
    /// Funds currently held for this game.
    pub escrow: u64,
    pub state: GameState,
    pub move1: Move,
    pub move2: Move,
    /// `None` until both moves are in.
    pub winner: Option<Winner>,
}

impl Game {
    /// Returns `true` if `account` occupies either seat.
    pub fn is_player(&self, account: AccountId) -> bool {
        self.player1 == account || self.player2 == account
    }

    /// Returns the account sitting in `seat`.
    pub fn player_at(&self, seat: Seat) -> AccountId {
        match seat {
            Seat::Player1 => self.player1,
            Seat::Player2 => self.player2,
        }
    }

    /// Returns the move recorded for `seat`.
    pub fn move_at(&self, seat: Seat) -> Move {
        match seat {
            Seat::Player1 => self.move1,
            Seat::Player2 => self.move2,
        }
    }

    /// Returns `true` once both slots are filled.
    pub fn both_moved(&self) -> bool {
        self.move1.is_set() && self.move2.is_set()
    }
}

// ---------------------------------------------------------------------------
// GameEvent: externally observable notifications
// ---------------------------------------------------------------------------

/// Notifications emitted by applied operations.
///
/// `#[serde(tag = "type")]` produces `{"type":"PlayerJoined", ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// `player1` enrolled and invited `player2`.
    GameCreated {
        game_id: GameId,
        player1: AccountId,
        player2: AccountId,
        stake: u64,
    },

    /// The invited player matched the stake.
    PlayerJoined {
        game_id: GameId,
        player2: AccountId,
    },

    /// A player filled their slot. The move itself is readable from the
    /// game record; the event only names who moved.
    MoveSubmitted {
        game_id: GameId,
        player: AccountId,
    },

    /// Both moves were in; the pot was settled.
    GameResolved {
        game_id: GameId,
        winner: Winner,
        payouts: Vec<Payout>,
    },
}

impl GameEvent {
    /// The game this event belongs to.
    pub fn game_id(&self) -> GameId {
        match self {
            Self::GameCreated { game_id, .. }
            | Self::PlayerJoined { game_id, .. }
            | Self::MoveSubmitted { game_id, .. }
            | Self::GameResolved { game_id, .. } => *game_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Call / Transaction: what callers submit
// ---------------------------------------------------------------------------

/// One of the four engine operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Call {
    /// Open a game against `opponent`. Payable: the stake.
    Enroll { opponent: AccountId },

    /// Accept an invitation. Payable: the game's stake.
    JoinGame { game_id: GameId },

    /// Fill the caller's move slot.
    SetMove { game_id: GameId, choice: Move },

    /// List every game the caller takes part in.
    MyGames,
}

impl Call {
    /// Returns `true` for calls that carry a payment.
    pub fn is_payable(&self) -> bool {
        matches!(self, Self::Enroll { .. } | Self::JoinGame { .. })
    }

    /// The operation name, as it appears in the `type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Enroll { .. } => "Enroll",
            Self::JoinGame { .. } => "JoinGame",
            Self::SetMove { .. } => "SetMove",
            Self::MyGames => "MyGames",
        }
    }
}

/// A signed-and-funded call, as the execution environment delivers it.
///
/// `value` is the payment attached to the call and defaults to zero when
/// absent from the JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Caller-side sequence number, echoed back in the receipt.
    pub seq: u64,
    /// The authenticated caller.
    pub sender: AccountId,
    #[serde(default)]
    pub value: u64,
    pub call: Call,
}

// ---------------------------------------------------------------------------
// Receipt: what the engine answers
// ---------------------------------------------------------------------------

/// The successful result of a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    Enrolled { game_id: GameId },
    Joined { game_id: GameId },
    /// First move of the game recorded; waiting for the other player.
    MoveRecorded { game_id: GameId },
    /// Second move recorded and the game settled.
    Resolved { game_id: GameId, winner: Winner },
    Games { games: Vec<Game> },
}

/// Why a call was rejected.
///
/// Serialized as a PascalCase string. [`RejectReason::code`] gives the
/// HTTP-style status used in logs and by thin HTTP front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    InvalidStake,
    GameNotFound,
    InvalidState,
    Unauthorized,
    MoveAlreadySet,
    InvalidMove,
    SelfPlay,
    NonPayable,
    TransferFailed,
}

impl RejectReason {
    /// HTTP-style status code for this rejection.
    pub fn code(&self) -> u16 {
        match self {
            Self::InvalidStake | Self::InvalidMove | Self::SelfPlay => 400,
            Self::NonPayable => 402,
            Self::Unauthorized => 403,
            Self::GameNotFound => 404,
            Self::InvalidState | Self::MoveAlreadySet => 409,
            Self::TransferFailed => 502,
        }
    }
}

/// Applied-or-rejected, with everything the caller needs to audit it.
///
/// Adjacently tagged:
/// `{"status":"Applied","detail":{"response":{..},"events":[..]}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail")]
pub enum Outcome {
    Applied {
        response: Response,
        events: Vec<GameEvent>,
    },
    Rejected {
        reason: RejectReason,
        message: String,
    },
}

/// The engine's answer to one [`Transaction`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// The `seq` of the transaction this receipt answers.
    pub seq: u64,
    pub outcome: Outcome,
}

impl Receipt {
    /// Returns `true` if the call took effect.
    pub fn is_applied(&self) -> bool {
        matches!(self.outcome, Outcome::Applied { .. })
    }

    /// The response of an applied call.
    pub fn response(&self) -> Option<&Response> {
        match &self.outcome {
            Outcome::Applied { response, .. } => Some(response),
            Outcome::Rejected { .. } => None,
        }
    }

    /// The rejection reason of a failed call.
    pub fn reason(&self) -> Option<RejectReason> {
        match &self.outcome {
            Outcome::Applied { .. } => None,
            Outcome::Rejected { reason, .. } => Some(*reason),
        }
    }

    /// Events emitted by the call (empty when rejected).
    pub fn events(&self) -> &[GameEvent] {
        match &self.outcome {
            Outcome::Applied { events, .. } => events,
            Outcome::Rejected { .. } => &[],
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! These tests pin the JSON shapes: a mismatch means external
    //! auditors and clients can no longer read our receipts.

    use super::*;

    fn sample_game() -> Game {
        Game {
            id: GameId(0),
            player1: AccountId(1),
            player2: AccountId(2),
            stake: 10,
            escrow: 20,
            state: GameState::Joined,
            move1: Move::Rock,
            move2: Move::Unset,
            winner: None,
        }
    }

    // =====================================================================
    // Identity types
    // =====================================================================

    #[test]
    fn test_account_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&AccountId(42)).unwrap();
        assert_eq!(json, "42");
        let back: AccountId = serde_json::from_str("42").unwrap();
        assert_eq!(back, AccountId(42));
    }

    #[test]
    fn test_id_display() {
        assert_eq!(AccountId(7).to_string(), "A-7");
        assert_eq!(GameId(3).to_string(), "G-3");
    }

    // =====================================================================
    // Move
    // =====================================================================

    #[test]
    fn test_move_default_is_unset() {
        assert_eq!(Move::default(), Move::Unset);
        assert!(!Move::Unset.is_set());
        assert!(Move::PLAYABLE.iter().all(Move::is_set));
    }

    #[test]
    fn test_move_dominance_table() {
        assert!(Move::Rock.beats(&Move::Scissors));
        assert!(Move::Scissors.beats(&Move::Paper));
        assert!(Move::Paper.beats(&Move::Rock));

        assert!(!Move::Scissors.beats(&Move::Rock));
        assert!(!Move::Paper.beats(&Move::Scissors));
        assert!(!Move::Rock.beats(&Move::Paper));
    }

    #[test]
    fn test_move_never_beats_itself_or_unset() {
        for m in Move::PLAYABLE {
            assert!(!m.beats(&m));
            assert!(!m.beats(&Move::Unset));
            assert!(!Move::Unset.beats(&m));
        }
    }

    #[test]
    fn test_move_serializes_as_pascal_case() {
        assert_eq!(serde_json::to_string(&Move::Scissors).unwrap(), "\"Scissors\"");
        let unknown: Result<Move, _> = serde_json::from_str("\"Lizard\"");
        assert!(unknown.is_err());
    }

    // =====================================================================
    // GameState
    // =====================================================================

    #[test]
    fn test_game_state_next_follows_strict_order() {
        assert_eq!(GameState::Created.next(), Some(GameState::Joined));
        assert_eq!(GameState::Joined.next(), Some(GameState::Finished));
        assert_eq!(GameState::Finished.next(), None);
    }

    #[test]
    fn test_game_state_can_transition_to() {
        assert!(GameState::Created.can_transition_to(GameState::Joined));
        assert!(!GameState::Created.can_transition_to(GameState::Finished));
        assert!(!GameState::Finished.can_transition_to(GameState::Created));
        assert!(!GameState::Joined.can_transition_to(GameState::Created));
    }

    #[test]
    fn test_game_state_predicates() {
        assert!(GameState::Created.is_joinable());
        assert!(!GameState::Joined.is_joinable());
        assert!(GameState::Joined.accepts_moves());
        assert!(!GameState::Finished.accepts_moves());
        assert!(GameState::Finished.is_terminal());
        assert_eq!(GameState::Joined.to_string(), "Joined");
    }

    // =====================================================================
    // Game
    // =====================================================================

    #[test]
    fn test_game_seat_accessors() {
        let game = sample_game();
        assert!(game.is_player(AccountId(1)));
        assert!(game.is_player(AccountId(2)));
        assert!(!game.is_player(AccountId(3)));
        assert_eq!(game.player_at(Seat::Player2), AccountId(2));
        assert_eq!(game.move_at(Seat::Player1), Move::Rock);
        assert!(!game.both_moved());
    }

    #[test]
    fn test_game_json_format() {
        let json = serde_json::to_value(sample_game()).unwrap();
        assert_eq!(json["id"], 0);
        assert_eq!(json["state"], "Joined");
        assert_eq!(json["move1"], "Rock");
        assert_eq!(json["move2"], "Unset");
        assert!(json["winner"].is_null());
    }

    // =====================================================================
    // Winner / events
    // =====================================================================

    #[test]
    fn test_winner_json_format() {
        let json = serde_json::to_value(Winner::Player { account: AccountId(9) }).unwrap();
        assert_eq!(json["type"], "Player");
        assert_eq!(json["account"], 9);

        let json = serde_json::to_value(Winner::Tie).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "Tie" }));
        assert_eq!(Winner::Tie.account(), None);
    }

    #[test]
    fn test_player_joined_event_json_format() {
        let event = GameEvent::PlayerJoined {
            game_id: GameId(4),
            player2: AccountId(2),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "PlayerJoined");
        assert_eq!(json["game_id"], 4);
        assert_eq!(json["player2"], 2);
        assert_eq!(event.game_id(), GameId(4));
    }

    #[test]
    fn test_game_resolved_event_carries_payouts() {
        let event = GameEvent::GameResolved {
            game_id: GameId(1),
            winner: Winner::Tie,
            payouts: vec![
                Payout { recipient: AccountId(1), amount: 10 },
                Payout { recipient: AccountId(2), amount: 10 },
            ],
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "GameResolved");
        assert_eq!(json["winner"]["type"], "Tie");
        assert_eq!(json["payouts"][1]["recipient"], 2);
        assert_eq!(json["payouts"][1]["amount"], 10);
    }

    // =====================================================================
    // Call / Transaction
    // =====================================================================

    #[test]
    fn test_call_set_move_json_format() {
        let call = Call::SetMove {
            game_id: GameId(2),
            choice: Move::Paper,
        };
        let json = serde_json::to_value(&call).unwrap();
        assert_eq!(json["type"], "SetMove");
        assert_eq!(json["game_id"], 2);
        assert_eq!(json["choice"], "Paper");
    }

    #[test]
    fn test_call_payability() {
        assert!(Call::Enroll { opponent: AccountId(2) }.is_payable());
        assert!(Call::JoinGame { game_id: GameId(0) }.is_payable());
        assert!(!Call::MyGames.is_payable());
        assert_eq!(Call::MyGames.name(), "MyGames");
    }

    #[test]
    fn test_transaction_value_defaults_when_missing() {
        let json = r#"{ "seq": 1, "sender": 5, "call": { "type": "MyGames" } }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.value, 0);
        assert_eq!(tx.sender, AccountId(5));
        assert_eq!(tx.call, Call::MyGames);
    }

    #[test]
    fn test_decode_unknown_call_type_returns_error() {
        let unknown = r#"{ "type": "Withdraw", "amount": 9000 }"#;
        let result: Result<Call, _> = serde_json::from_str(unknown);
        assert!(result.is_err());
    }

    // =====================================================================
    // Receipt
    // =====================================================================

    #[test]
    fn test_applied_receipt_json_format() {
        let receipt = Receipt {
            seq: 7,
            outcome: Outcome::Applied {
                response: Response::Enrolled { game_id: GameId(0) },
                events: vec![],
            },
        };
        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["seq"], 7);
        assert_eq!(json["outcome"]["status"], "Applied");
        assert_eq!(json["outcome"]["detail"]["response"]["type"], "Enrolled");
        assert!(receipt.is_applied());
        assert_eq!(receipt.reason(), None);
    }

    #[test]
    fn test_rejected_receipt_json_format() {
        let receipt = Receipt {
            seq: 8,
            outcome: Outcome::Rejected {
                reason: RejectReason::MoveAlreadySet,
                message: "move already set".into(),
            },
        };
        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["outcome"]["status"], "Rejected");
        assert_eq!(json["outcome"]["detail"]["reason"], "MoveAlreadySet");
        assert!(receipt.events().is_empty());
        assert!(receipt.response().is_none());
    }

    #[test]
    fn test_reject_reason_codes() {
        assert_eq!(RejectReason::GameNotFound.code(), 404);
        assert_eq!(RejectReason::Unauthorized.code(), 403);
        assert_eq!(RejectReason::InvalidState.code(), 409);
        assert_eq!(RejectReason::TransferFailed.code(), 502);
    }
}
