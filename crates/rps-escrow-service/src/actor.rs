//! Engine actor: a Tokio task that owns the [`GameEngine`] and its ledger.
//!
//! Every caller talks to the engine through one mpsc mailbox, so calls
//! are applied one at a time in arrival order. No two transactions ever
//! observe each other half-done.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use rps_escrow_engine::GameEngine;
use rps_escrow_ledger::Ledger;
use rps_escrow_protocol::{
    AccountId, Call, Game, GameEvent, GameId, Move, Receipt, Transaction,
};
use tokio::sync::{mpsc, oneshot};

use crate::{ServiceConfig, ServiceError, execute};

/// Channel sender for delivering engine events to a subscriber.
pub type EventSender = mpsc::UnboundedSender<GameEvent>;

/// Receiving half handed out by [`EngineHandle::subscribe`].
pub type EventReceiver = mpsc::UnboundedReceiver<GameEvent>;

/// Commands sent to the engine actor through its mailbox.
pub(crate) enum EngineCommand {
    /// Apply a transaction and reply with its receipt.
    Submit {
        tx: Transaction,
        reply: oneshot::Sender<Receipt>,
    },

    /// Register an event subscriber.
    Subscribe { sender: EventSender },

    /// Look up a single game.
    GetGame {
        game_id: GameId,
        reply: oneshot::Sender<Option<Game>>,
    },

    /// Read an account balance from the ledger.
    Balance {
        account: AccountId,
        reply: oneshot::Sender<u64>,
    },

    /// Read the ledger's custody and the engine's escrow total.
    Holdings { reply: oneshot::Sender<Holdings> },

    /// Stop the actor.
    Shutdown,
}

/// Funds held on behalf of games, as seen by the ledger and the engine.
///
/// The two always agree between transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Holdings {
    /// Funds the ledger holds in custody.
    pub custody: u64,
    /// Sum of every game's escrow.
    pub escrow: u64,
}

/// Handle to a running engine actor.
///
/// Cheap to clone. Clones share the mailbox and the sequence counter used
/// by the convenience methods.
#[derive(Clone)]
pub struct EngineHandle {
    sender: mpsc::Sender<EngineCommand>,
    seq: Arc<AtomicU64>,
}

impl EngineHandle {
    /// Submits a fully-formed transaction and waits for its receipt.
    pub async fn submit(&self, tx: Transaction) -> Result<Receipt, ServiceError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(EngineCommand::Submit {
                tx,
                reply: reply_tx,
            })
            .await
            .map_err(|_| ServiceError::Unavailable)?;
        reply_rx.await.map_err(|_| ServiceError::Unavailable)
    }

    /// Opens a game against `opponent`, attaching `value` as the stake.
    pub async fn enroll(
        &self,
        caller: AccountId,
        opponent: AccountId,
        value: u64,
    ) -> Result<Receipt, ServiceError> {
        self.call(caller, value, Call::Enroll { opponent }).await
    }

    /// Joins `game_id` as the invited opponent, attaching `value`.
    pub async fn join_game(
        &self,
        caller: AccountId,
        game_id: GameId,
        value: u64,
    ) -> Result<Receipt, ServiceError> {
        self.call(caller, value, Call::JoinGame { game_id }).await
    }

    /// Submits `caller`'s move for `game_id`.
    pub async fn set_move(
        &self,
        caller: AccountId,
        game_id: GameId,
        choice: Move,
    ) -> Result<Receipt, ServiceError> {
        self.call(caller, 0, Call::SetMove { game_id, choice }).await
    }

    /// Lists every game `caller` is a player in.
    pub async fn my_games(
        &self,
        caller: AccountId,
    ) -> Result<Receipt, ServiceError> {
        self.call(caller, 0, Call::MyGames).await
    }

    /// Returns a copy of one game, if it exists.
    pub async fn game(
        &self,
        game_id: GameId,
    ) -> Result<Option<Game>, ServiceError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(EngineCommand::GetGame {
                game_id,
                reply: reply_tx,
            })
            .await
            .map_err(|_| ServiceError::Unavailable)?;
        reply_rx.await.map_err(|_| ServiceError::Unavailable)
    }

    /// Returns `account`'s spendable balance.
    pub async fn balance(
        &self,
        account: AccountId,
    ) -> Result<u64, ServiceError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(EngineCommand::Balance {
                account,
                reply: reply_tx,
            })
            .await
            .map_err(|_| ServiceError::Unavailable)?;
        reply_rx.await.map_err(|_| ServiceError::Unavailable)
    }

    /// Returns custody and escrow totals, read in the same step.
    pub async fn holdings(&self) -> Result<Holdings, ServiceError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(EngineCommand::Holdings { reply: reply_tx })
            .await
            .map_err(|_| ServiceError::Unavailable)?;
        reply_rx.await.map_err(|_| ServiceError::Unavailable)
    }

    /// Subscribes to events of every transaction applied from now on.
    pub async fn subscribe(&self) -> Result<EventReceiver, ServiceError> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.sender
            .send(EngineCommand::Subscribe { sender: tx })
            .await
            .map_err(|_| ServiceError::Unavailable)?;
        Ok(rx)
    }

    /// Tells the actor to stop. Commands already queued ahead of this one
    /// are still applied.
    pub async fn shutdown(&self) -> Result<(), ServiceError> {
        self.sender
            .send(EngineCommand::Shutdown)
            .await
            .map_err(|_| ServiceError::Unavailable)
    }

    async fn call(
        &self,
        sender: AccountId,
        value: u64,
        call: Call,
    ) -> Result<Receipt, ServiceError> {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        self.submit(Transaction {
            seq,
            sender,
            value,
            call,
        })
        .await
    }
}

struct EngineActor<L: Ledger> {
    engine: GameEngine<L>,
    subscribers: Vec<EventSender>,
    receiver: mpsc::Receiver<EngineCommand>,
}

impl<L: Ledger> EngineActor<L> {
    async fn run(mut self) {
        tracing::info!(games = self.engine.game_count(), "engine actor started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                EngineCommand::Submit { tx, reply } => {
                    let receipt = execute(&mut self.engine, tx);
                    self.publish(receipt.events());
                    let _ = reply.send(receipt);
                }
                EngineCommand::Subscribe { sender } => {
                    self.subscribers.push(sender);
                    tracing::debug!(
                        subscribers = self.subscribers.len(),
                        "subscriber added"
                    );
                }
                EngineCommand::GetGame { game_id, reply } => {
                    let _ = reply.send(self.engine.game(game_id).cloned());
                }
                EngineCommand::Balance { account, reply } => {
                    let _ = reply.send(self.engine.ledger().balance(account));
                }
                EngineCommand::Holdings { reply } => {
                    let _ = reply.send(Holdings {
                        custody: self.engine.ledger().custody(),
                        escrow: self.engine.escrow_total(),
                    });
                }
                EngineCommand::Shutdown => {
                    tracing::info!("engine shutting down");
                    break;
                }
            }
        }

        tracing::info!(games = self.engine.game_count(), "engine actor stopped");
    }

    /// Fans events out to subscribers, dropping any whose receiver is gone.
    fn publish(&mut self, events: &[GameEvent]) {
        if events.is_empty() || self.subscribers.is_empty() {
            return;
        }
        self.subscribers.retain(|sub| {
            events.iter().all(|event| sub.send(event.clone()).is_ok())
        });
    }
}

/// Moves `engine` into its own task and returns a handle to it.
///
/// Must be called from within a Tokio runtime.
pub fn spawn_engine<L: Ledger>(
    engine: GameEngine<L>,
    config: ServiceConfig,
) -> EngineHandle {
    let (tx, rx) = mpsc::channel(config.channel_size.max(1));

    let actor = EngineActor {
        engine,
        subscribers: Vec::new(),
        receiver: rx,
    };

    tokio::spawn(actor.run());

    EngineHandle {
        sender: tx,
        seq: Arc::new(AtomicU64::new(0)),
    }
}
