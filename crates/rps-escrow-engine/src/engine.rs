//! The game engine: an arena of games, a per-account index, and the
//! ledger that holds their stakes.

use std::collections::HashMap;

use rps_escrow_ledger::Ledger;
use rps_escrow_protocol::{
    AccountId, Game, GameEvent, GameId, GameState, Move, Seat, Winner,
};

use crate::{rules, EngineConfig, EngineError, REQUIRED_STAKE};

/// Owns every game and the funds escrowed for them.
///
/// Every public mutator follows the same order:
///
/// 1. check every precondition, touching nothing;
/// 2. move funds in through the ledger (the first fallible side effect);
/// 3. mutate the game record.
///
/// Resolution inverts steps 2 and 3 for outbound funds: the game is marked
/// `Finished` before the payout is pushed, and restored from a snapshot if
/// the ledger refuses. Either way a rejected call leaves no trace.
pub struct GameEngine<L: Ledger> {
    config: EngineConfig,
    ledger: L,

    /// All games ever created. `GameId(n)` lives at index `n`.
    games: Vec<Game>,

    /// Maps each account to the games it takes part in, in creation order.
    /// Kept in sync with `games`.
    by_account: HashMap<AccountId, Vec<GameId>>,

    /// Notifications produced since the last [`take_events`](Self::take_events).
    events: Vec<GameEvent>,
}

impl<L: Ledger> GameEngine<L> {
    /// Creates an engine with no games, holding funds in `ledger`.
    pub fn new(config: EngineConfig, ledger: L) -> Self {
        Self {
            config,
            ledger,
            games: Vec::new(),
            by_account: HashMap::new(),
            events: Vec::new(),
        }
    }

    /// Opens a game from `caller` against `opponent`, capturing `value` as
    /// the caller's stake.
    ///
    /// # Errors
    /// - [`EngineError::InvalidStake`]: `value` isn't [`REQUIRED_STAKE`]
    /// - [`EngineError::SelfPlay`]: `caller == opponent` and the config
    ///   forbids it
    /// - [`EngineError::Transfer`]: the ledger couldn't collect the stake
    pub fn enroll(
        &mut self,
        caller: AccountId,
        opponent: AccountId,
        value: u64,
    ) -> Result<GameId, EngineError> {
        if value != REQUIRED_STAKE {
            return Err(EngineError::InvalidStake {
                expected: REQUIRED_STAKE,
                got: value,
            });
        }
        if caller == opponent && !self.config.allow_self_play {
            return Err(EngineError::SelfPlay(caller));
        }

        self.ledger.collect(caller, value)?;

        let game_id = GameId(self.games.len() as u64);
        self.games.push(Game {
            id: game_id,
            player1: caller,
            player2: opponent,
            stake: value,
            escrow: value,
            state: GameState::Created,
            move1: Move::Unset,
            move2: Move::Unset,
            winner: None,
        });
        self.by_account.entry(caller).or_default().push(game_id);
        if opponent != caller {
            self.by_account.entry(opponent).or_default().push(game_id);
        }

        self.events.push(GameEvent::GameCreated {
            game_id,
            player1: caller,
            player2: opponent,
            stake: value,
        });
        tracing::info!(
            %game_id,
            player1 = %caller,
            player2 = %opponent,
            stake = value,
            "game created"
        );

        Ok(game_id)
    }

    /// Accepts the invitation to `game_id`, matching its stake with `value`.
    ///
    /// # Errors
    /// Checked in this order:
    /// - [`EngineError::GameNotFound`]
    /// - [`EngineError::InvalidState`]: the game isn't `Created`
    /// - [`EngineError::Unauthorized`]: `caller` isn't the invited player
    /// - [`EngineError::InvalidStake`]: `value` doesn't match the stake
    /// - [`EngineError::Transfer`]: the ledger couldn't collect
    pub fn join_game(
        &mut self,
        caller: AccountId,
        game_id: GameId,
        value: u64,
    ) -> Result<(), EngineError> {
        let game = lookup_mut(&mut self.games, game_id)?;

        if !game.state.is_joinable() {
            return Err(EngineError::InvalidState {
                game_id,
                state: game.state,
                operation: "join",
            });
        }
        if caller != game.player2 {
            return Err(EngineError::Unauthorized {
                caller,
                game_id,
                operation: "join",
            });
        }
        if value != game.stake {
            return Err(EngineError::InvalidStake {
                expected: game.stake,
                got: value,
            });
        }
        self.ledger.collect(caller, value)?;

        game.escrow += value;
        game.state = GameState::Joined;
        let escrow = game.escrow;

        self.events.push(GameEvent::PlayerJoined {
            game_id,
            player2: caller,
        });
        tracing::info!(%game_id, player2 = %caller, escrow, "player joined");

        Ok(())
    }

    /// Records `caller`'s move in `game_id`. The second move resolves the
    /// game and pays out in the same call.
    ///
    /// Returns `Some(winner)` when this call settled the game, `None` when
    /// it was the first move.
    ///
    /// # Errors
    /// Checked in this order:
    /// - [`EngineError::GameNotFound`]
    /// - [`EngineError::InvalidState`]: the game isn't `Joined`
    /// - [`EngineError::Unauthorized`]: `caller` isn't a player
    /// - [`EngineError::MoveAlreadySet`]: `caller` already moved
    /// - [`EngineError::InvalidMove`]: `choice` is `Unset`
    /// - [`EngineError::Transfer`]: the payout was refused; the game is
    ///   left exactly as it was before the call
    pub fn set_move(
        &mut self,
        caller: AccountId,
        game_id: GameId,
        choice: Move,
    ) -> Result<Option<Winner>, EngineError> {
        let game = lookup_mut(&mut self.games, game_id)?;

        if !game.state.accepts_moves() {
            return Err(EngineError::InvalidState {
                game_id,
                state: game.state,
                operation: "move in",
            });
        }
        let seat = rules::seat_for_move(game, caller)?;
        let choice = rules::check_move(choice)?;

        let snapshot = game.clone();
        match seat {
            Seat::Player1 => game.move1 = choice,
            Seat::Player2 => game.move2 = choice,
        }

        let Some(winner) = rules::resolve(game) else {
            self.events.push(GameEvent::MoveSubmitted {
                game_id,
                player: caller,
            });
            tracing::debug!(%game_id, player = %caller, "first move recorded");
            return Ok(None);
        };

        // Effects before interaction: the game is Finished and its escrow
        // emptied before any value leaves custody.
        let payouts = rules::payouts(game, winner);
        let settled = game.escrow;
        game.state = GameState::Finished;
        game.escrow = 0;
        game.winner = Some(winner);

        if let Err(e) = self.ledger.disburse(&payouts) {
            *game = snapshot;
            tracing::warn!(
                %game_id,
                player = %caller,
                error = %e,
                "payout refused, move rolled back"
            );
            return Err(EngineError::Transfer(e));
        }

        self.events.push(GameEvent::MoveSubmitted {
            game_id,
            player: caller,
        });
        self.events.push(GameEvent::GameResolved {
            game_id,
            winner,
            payouts,
        });
        tracing::info!(%game_id, %winner, settled, "game resolved");

        Ok(Some(winner))
    }

    /// Every game `caller` takes part in, oldest first.
    pub fn my_games(&self, caller: AccountId) -> Vec<&Game> {
        self.by_account
            .get(&caller)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.games.get(id.0 as usize))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Looks up a single game.
    pub fn game(&self, game_id: GameId) -> Option<&Game> {
        self.games.get(usize::try_from(game_id.0).ok()?)
    }

    /// Number of games ever created.
    pub fn game_count(&self) -> usize {
        self.games.len()
    }

    /// Sum of every game's escrow. Always equal to the ledger's custody
    /// when the ledger is dedicated to this engine.
    pub fn escrow_total(&self) -> u64 {
        self.games.iter().map(|g| g.escrow).sum()
    }

    /// Drains the notifications produced since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// The engine's policy.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Read access to the ledger (balances, custody).
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Write access to the ledger, for hosts that fund accounts or flip
    /// payment acceptance outside of game operations.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }
}

fn lookup_mut(games: &mut [Game], game_id: GameId) -> Result<&mut Game, EngineError> {
    usize::try_from(game_id.0)
        .ok()
        .and_then(|idx| games.get_mut(idx))
        .ok_or(EngineError::GameNotFound(game_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rps_escrow_ledger::InMemoryLedger;

    const A: AccountId = AccountId(1);
    const B: AccountId = AccountId(2);

    fn engine() -> GameEngine<InMemoryLedger> {
        let mut ledger = InMemoryLedger::new();
        ledger.fund(A, 100).unwrap();
        ledger.fund(B, 100).unwrap();
        GameEngine::new(EngineConfig::default(), ledger)
    }

    #[test]
    fn test_first_game_id_is_zero() {
        let mut engine = engine();
        assert_eq!(engine.enroll(A, B, REQUIRED_STAKE), Ok(GameId(0)));
        assert_eq!(engine.enroll(A, B, REQUIRED_STAKE), Ok(GameId(1)));
        assert_eq!(engine.game_count(), 2);
    }

    #[test]
    fn test_lookup_of_huge_id_is_not_found() {
        let mut engine = engine();
        let err = engine.join_game(B, GameId(u64::MAX), REQUIRED_STAKE).unwrap_err();
        assert_eq!(err, EngineError::GameNotFound(GameId(u64::MAX)));
        assert!(engine.game(GameId(u64::MAX)).is_none());
    }

    #[test]
    fn test_take_events_drains() {
        let mut engine = engine();
        engine.enroll(A, B, REQUIRED_STAKE).unwrap();
        assert_eq!(engine.take_events().len(), 1);
        assert!(engine.take_events().is_empty());
    }

    #[test]
    fn test_rejected_calls_emit_no_events() {
        let mut engine = engine();
        let _ = engine.enroll(A, B, 1);
        let _ = engine.join_game(B, GameId(0), REQUIRED_STAKE);
        let _ = engine.set_move(A, GameId(0), Move::Rock);
        assert!(engine.take_events().is_empty());
    }
}
