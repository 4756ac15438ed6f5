//! Serialized execution for RPS Escrow.
//!
//! The engine itself is a plain `&mut self` state machine. This crate
//! turns it into the shared execution environment the games run on:
//!
//! - [`execute`]: apply one [`Transaction`](rps_escrow_protocol::Transaction)
//!   to an engine and produce its [`Receipt`](rps_escrow_protocol::Receipt)
//! - [`spawn_engine`]: move an engine into its own Tokio task (actor
//!   model) and get back an [`EngineHandle`]
//! - [`EngineHandle`]: cheap-to-clone handle; every call goes through
//!   the actor's mailbox, which puts all calls in one total order
//!
//! ```text
//! callers ──(mpsc)──→ engine actor ──→ GameEngine ──→ Ledger
//!    ↑                     │
//!    └──(oneshot receipt)──┤
//! subscribers ←──(events)──┘
//! ```

mod actor;
mod config;
mod dispatch;
mod error;

pub use actor::{EngineHandle, EventReceiver, EventSender, Holdings, spawn_engine};
pub use config::ServiceConfig;
pub use dispatch::execute;
pub use error::ServiceError;
