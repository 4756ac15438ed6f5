//! Value-transfer layer for RPS Escrow.
//!
//! Provides the [`Ledger`] trait that abstracts over whatever actually
//! moves funds (a chain's native balance, a token program, a bank core),
//! plus [`InMemoryLedger`] for tests, demos and single-process hosts.
//!
//! The engine holds funds in *custody*: an inbound payment is captured with
//! [`Ledger::collect`] and later pushed back out with [`Ledger::disburse`].

mod error;
mod memory;

pub use error::LedgerError;
pub use memory::InMemoryLedger;

use rps_escrow_protocol::{AccountId, Payout};

/// Moves value between accounts and the engine's custody.
///
/// Implementations must make each method all-or-nothing: on `Err`, no
/// balance anywhere may have changed.
pub trait Ledger: Send + 'static {
    /// Spendable balance of `account`.
    fn balance(&self, account: AccountId) -> u64;

    /// Total value currently held in custody.
    fn custody(&self) -> u64;

    /// Captures `amount` from `from` into custody.
    fn collect(
        &mut self,
        from: AccountId,
        amount: u64,
    ) -> Result<(), LedgerError>;

    /// Pushes every payout out of custody.
    ///
    /// Either every recipient is credited or none is.
    fn disburse(&mut self, payouts: &[Payout]) -> Result<(), LedgerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The engine is generic over `L: Ledger`; make sure the trait stays
    /// usable behind a `Box` as well.
    #[test]
    fn test_ledger_is_object_safe() {
        let mut ledger: Box<dyn Ledger> = Box::new(InMemoryLedger::new());
        assert_eq!(ledger.custody(), 0);
        assert!(ledger.disburse(&[]).is_ok());
    }
}
