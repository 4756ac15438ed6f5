//! Pure game rules: who may move, who won, who gets paid.
//!
//! Nothing in here touches the ledger or mutates a game.

use rps_escrow_protocol::{AccountId, Game, Move, Payout, Seat, Winner};

use crate::EngineError;

/// Decides which slot `caller` fills next in `game`.
///
/// A caller holding both seats (self-play) fills `move1` first, then
/// `move2`.
///
/// # Errors
/// - [`EngineError::Unauthorized`]: `caller` holds neither seat
/// - [`EngineError::MoveAlreadySet`]: every seat `caller` holds is filled
pub fn seat_for_move(game: &Game, caller: AccountId) -> Result<Seat, EngineError> {
    if !game.is_player(caller) {
        return Err(EngineError::Unauthorized {
            caller,
            game_id: game.id,
            operation: "move in",
        });
    }

    [Seat::Player1, Seat::Player2]
        .into_iter()
        .find(|seat| game.player_at(*seat) == caller && !game.move_at(*seat).is_set())
        .ok_or(EngineError::MoveAlreadySet {
            caller,
            game_id: game.id,
        })
}

/// Applies the dominance relation to two submitted moves.
///
/// Returns `None` if either slot is still `Unset`.
pub fn resolve(game: &Game) -> Option<Winner> {
    if !game.both_moved() {
        return None;
    }
    let winner = if game.move1 == game.move2 {
        Winner::Tie
    } else if game.move1.beats(&game.move2) {
        Winner::Player { account: game.player1 }
    } else {
        Winner::Player { account: game.player2 }
    };
    Some(winner)
}

/// Splits the escrowed pot according to `winner`.
///
/// A decisive result sends the whole escrow to the winner; a tie sends each
/// player back their own stake.
pub fn payouts(game: &Game, winner: Winner) -> Vec<Payout> {
    match winner {
        Winner::Player { account } => vec![Payout {
            recipient: account,
            amount: game.escrow,
        }],
        Winner::Tie => vec![
            Payout {
                recipient: game.player1,
                amount: game.stake,
            },
            Payout {
                recipient: game.player2,
                amount: game.stake,
            },
        ],
    }
}

/// Validates a submitted move value.
///
/// # Errors
/// Returns [`EngineError::InvalidMove`] for `Unset`.
pub fn check_move(choice: Move) -> Result<Move, EngineError> {
    if choice.is_set() {
        Ok(choice)
    } else {
        Err(EngineError::InvalidMove)
    }
}
