//! # RPS Escrow
//!
//! Rock-paper-scissors between two named accounts, with both entry
//! stakes held in escrow until the game settles. The winner takes the
//! pot; a tie refunds each player.
//!
//! The pieces live in their own crates and are re-exported here:
//!
//! - [`protocol`]: ids, moves, games, transactions and receipts
//! - [`ledger`]: the funds backend the engine collects from and pays out of
//! - [`engine`]: the game state machine
//! - [`service`]: the actor that serializes every call
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rps_escrow::prelude::*;
//!
//! # async fn run() -> Result<(), RpsEscrowError> {
//! let mut ledger = InMemoryLedger::new();
//! ledger.fund(AccountId(1), 100)?;
//! ledger.fund(AccountId(2), 100)?;
//!
//! let handle = rps_escrow::launch(AppConfig::default(), ledger);
//! let receipt = handle.enroll(AccountId(1), AccountId(2), REQUIRED_STAKE).await?;
//! assert!(receipt.is_applied());
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
pub mod telemetry;

pub use config::AppConfig;
pub use error::RpsEscrowError;

pub use rps_escrow_engine as engine;
pub use rps_escrow_ledger as ledger;
pub use rps_escrow_protocol as protocol;
pub use rps_escrow_service as service;

use rps_escrow_engine::GameEngine;
use rps_escrow_ledger::Ledger;
use rps_escrow_service::{EngineHandle, spawn_engine};

/// Builds an engine over `ledger` and spawns its actor.
///
/// Must be called from within a Tokio runtime.
pub fn launch<L: Ledger>(config: AppConfig, ledger: L) -> EngineHandle {
    let AppConfig { engine, service } = config;
    tracing::info!(
        allow_self_play = engine.allow_self_play,
        channel_size = service.channel_size,
        "launching engine"
    );
    spawn_engine(GameEngine::new(engine, ledger), service)
}

/// Common imports.
pub mod prelude {
    pub use crate::{AppConfig, RpsEscrowError, launch};
    pub use rps_escrow_engine::{EngineConfig, EngineError, GameEngine, REQUIRED_STAKE};
    pub use rps_escrow_ledger::{InMemoryLedger, Ledger, LedgerError};
    pub use rps_escrow_protocol::{
        AccountId, Call, Codec, Game, GameEvent, GameId, GameState, JsonCodec,
        Move, Outcome, Payout, Receipt, RejectReason, Response, Transaction,
        Winner,
    };
    pub use rps_escrow_service::{
        EngineHandle, EventReceiver, Holdings, ServiceConfig, ServiceError,
        execute, spawn_engine,
    };
}
