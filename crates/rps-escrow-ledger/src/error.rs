//! Error types for the ledger layer.

use rps_escrow_protocol::AccountId;

/// Errors that can occur while moving value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// The payer doesn't hold enough to cover the payment.
    #[error("account {account} holds {available}, needs {needed}")]
    InsufficientFunds {
        account: AccountId,
        needed: u64,
        available: u64,
    },

    /// Custody holds less than the batch being disbursed. This means an
    /// accounting bug upstream; it is never a caller mistake.
    #[error("custody holds {available}, cannot disburse {needed}")]
    InsufficientCustody { needed: u64, available: u64 },

    /// The recipient can't accept funds right now (frozen, closed,
    /// rejecting contract, ...).
    #[error("account {0} refused the payment")]
    Refused(AccountId),

    /// A balance would exceed `u64::MAX`.
    #[error("balance overflow for account {0}")]
    Overflow(AccountId),
}
