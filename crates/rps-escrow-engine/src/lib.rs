//! The RPS Escrow game engine.
//!
//! A [`GameEngine`] owns every game record, custodies both players' stakes
//! through a [`Ledger`](rps_escrow_ledger::Ledger), and settles the pot the
//! moment the second move lands.
//!
//! # Key types
//!
//! - [`GameEngine`]: enroll / join / move / list, all-or-nothing
//! - [`EngineConfig`]: engine policy (self-play)
//! - [`EngineError`]: why an operation was rejected
//! - [`rules`]: the dominance relation and payout split
//!
//! The engine is synchronous and takes `&mut self` for every mutation;
//! serializing callers is the job of the layer above.

mod config;
mod engine;
mod error;
pub mod rules;

pub use config::{EngineConfig, REQUIRED_STAKE};
pub use engine::GameEngine;
pub use error::EngineError;
