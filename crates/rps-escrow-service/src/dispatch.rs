//! Applies transactions to an engine and writes the receipt.

use rps_escrow_engine::{EngineError, GameEngine};
use rps_escrow_ledger::Ledger;
use rps_escrow_protocol::{
    AccountId, Call, Outcome, Receipt, Response, Transaction,
};

/// Executes one transaction against `engine`.
///
/// Never fails: a rejected call is reported inside the receipt. Events
/// produced by an applied call are drained from the engine and returned
/// with it.
pub fn execute<L: Ledger>(
    engine: &mut GameEngine<L>,
    tx: Transaction,
) -> Receipt {
    let Transaction {
        seq,
        sender,
        value,
        call,
    } = tx;
    let operation = call.name();

    let result = apply(engine, sender, value, call);
    let events = engine.take_events();

    let outcome = match result {
        Ok(response) => Outcome::Applied { response, events },
        Err(e) => {
            tracing::debug!(
                seq,
                %sender,
                operation,
                reason = ?e.reason(),
                error = %e,
                "transaction rejected"
            );
            Outcome::Rejected {
                reason: e.reason(),
                message: e.to_string(),
            }
        }
    };

    Receipt { seq, outcome }
}

fn apply<L: Ledger>(
    engine: &mut GameEngine<L>,
    sender: AccountId,
    value: u64,
    call: Call,
) -> Result<Response, EngineError> {
    match call {
        Call::Enroll { opponent } => engine
            .enroll(sender, opponent, value)
            .map(|game_id| Response::Enrolled { game_id }),

        Call::JoinGame { game_id } => {
            engine.join_game(sender, game_id, value)?;
            Ok(Response::Joined { game_id })
        }

        Call::SetMove { game_id, choice } => {
            reject_value("SetMove", value)?;
            Ok(match engine.set_move(sender, game_id, choice)? {
                Some(winner) => Response::Resolved { game_id, winner },
                None => Response::MoveRecorded { game_id },
            })
        }

        Call::MyGames => {
            reject_value("MyGames", value)?;
            let games = engine.my_games(sender).into_iter().cloned().collect();
            Ok(Response::Games { games })
        }
    }
}

fn reject_value(operation: &'static str, value: u64) -> Result<(), EngineError> {
    if value > 0 {
        return Err(EngineError::NonPayable { operation, value });
    }
    Ok(())
}
