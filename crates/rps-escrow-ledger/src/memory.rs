//! A process-local [`Ledger`] backed by a `HashMap`.
//!
//! # Concurrency note
//!
//! `InMemoryLedger` is NOT thread-safe by itself. It is owned by the
//! engine, which is owned by a single actor task; every mutation arrives
//! through that task's mailbox.

use std::collections::{HashMap, HashSet};

use rps_escrow_protocol::{AccountId, Payout};

use crate::{Ledger, LedgerError};

/// Account balances plus a custody pot, all in memory.
///
/// Accounts can be flagged to refuse incoming payments, which is how
/// tests and demos exercise the payout-failure path.
#[derive(Debug, Default, Clone)]
pub struct InMemoryLedger {
    balances: HashMap<AccountId, u64>,
    custody: u64,
    refusing: HashSet<AccountId>,
}

impl InMemoryLedger {
    /// Creates an empty ledger: no balances, empty custody.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `amount` to `account` out of thin air. Test and demo setup.
    ///
    /// # Errors
    /// Returns [`LedgerError::Overflow`] if the balance would wrap.
    pub fn fund(
        &mut self,
        account: AccountId,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let balance = self.balances.entry(account).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow(account))?;
        Ok(())
    }

    /// Makes every future payment to `account` fail with
    /// [`LedgerError::Refused`].
    pub fn refuse_payments(&mut self, account: AccountId) {
        self.refusing.insert(account);
    }

    /// Lifts a previous [`refuse_payments`](Self::refuse_payments).
    pub fn accept_payments(&mut self, account: AccountId) {
        self.refusing.remove(&account);
    }
}

impl Ledger for InMemoryLedger {
    fn balance(&self, account: AccountId) -> u64 {
        self.balances.get(&account).copied().unwrap_or(0)
    }

    fn custody(&self) -> u64 {
        self.custody
    }

    fn collect(
        &mut self,
        from: AccountId,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let available = self.balance(from);
        if available < amount {
            return Err(LedgerError::InsufficientFunds {
                account: from,
                needed: amount,
                available,
            });
        }
        let custody = self
            .custody
            .checked_add(amount)
            .ok_or(LedgerError::Overflow(from))?;

        self.balances.insert(from, available - amount);
        self.custody = custody;

        tracing::debug!(account = %from, amount, custody, "payment collected");
        Ok(())
    }

    fn disburse(&mut self, payouts: &[Payout]) -> Result<(), LedgerError> {
        // Stage every credit first so a failure halfway leaves no trace.
        let mut total: u64 = 0;
        let mut staged: HashMap<AccountId, u64> = HashMap::new();

        for payout in payouts {
            if self.refusing.contains(&payout.recipient) {
                tracing::warn!(
                    account = %payout.recipient,
                    amount = payout.amount,
                    "recipient refused payment"
                );
                return Err(LedgerError::Refused(payout.recipient));
            }
            total = total
                .checked_add(payout.amount)
                .ok_or(LedgerError::Overflow(payout.recipient))?;

            let current = match staged.get(&payout.recipient) {
                Some(v) => *v,
                None => self.balance(payout.recipient),
            };
            let credited = current
                .checked_add(payout.amount)
                .ok_or(LedgerError::Overflow(payout.recipient))?;
            staged.insert(payout.recipient, credited);
        }

        if total > self.custody {
            return Err(LedgerError::InsufficientCustody {
                needed: total,
                available: self.custody,
            });
        }

        self.custody -= total;
        self.balances.extend(staged);

        tracing::debug!(
            payouts = payouts.len(),
            total,
            custody = self.custody,
            "payouts disbursed"
        );
        Ok(())
    }
}
