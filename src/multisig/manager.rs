//! Multisig wallet manager
//!
//! Pairs a wallet with the invoker that carries out its approved
//! transactions, so callers don't have to thread the invoker through every
//! operation.

use crate::executor::{ExecutionOutcome, Invoker, Treasury};
use crate::multisig::error::MultisigResult;
use crate::multisig::owners::MultisigConfig;
use crate::multisig::transaction::TxId;
use crate::multisig::wallet::Wallet;
use serde::{Deserialize, Serialize};

/// Manager backed by the value-transfer treasury, as persisted by the CLI
pub type TreasuryManager = MultisigManager<Treasury>;

/// A wallet together with its execution environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultisigManager<I> {
    wallet: Wallet,
    invoker: I,
}

impl<I: Invoker> MultisigManager<I> {
    /// Create a manager for a new wallet
    pub fn new(config: MultisigConfig, invoker: I) -> MultisigResult<Self> {
        Ok(Self {
            wallet: Wallet::from_config(config)?,
            invoker,
        })
    }

    /// Propose a transaction without confirming it
    pub fn submit(
        &mut self,
        caller: &str,
        destination: &str,
        value: u64,
        payload: Vec<u8>,
    ) -> MultisigResult<TxId> {
        self.wallet.submit(caller, destination, value, payload)
    }

    /// Propose a transaction and confirm it as the submitter
    pub fn submit_and_confirm(
        &mut self,
        caller: &str,
        destination: &str,
        value: u64,
        payload: Vec<u8>,
    ) -> MultisigResult<(TxId, ExecutionOutcome)> {
        self.wallet
            .submit_and_confirm(caller, destination, value, payload, &mut self.invoker)
    }

    /// Confirm a pending transaction
    pub fn confirm(&mut self, caller: &str, id: TxId) -> MultisigResult<ExecutionOutcome> {
        self.wallet.confirm(caller, id, &mut self.invoker)
    }

    /// Withdraw a confirmation
    pub fn revoke(&mut self, caller: &str, id: TxId) -> MultisigResult<()> {
        self.wallet.revoke(caller, id)
    }

    /// Attempt execution of a transaction
    pub fn execute(&mut self, id: TxId) -> MultisigResult<ExecutionOutcome> {
        self.wallet.execute(id, &mut self.invoker)
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn invoker(&self) -> &I {
        &self.invoker
    }
}

impl MultisigManager<Treasury> {
    /// Send value to the wallet
    ///
    /// Returns false, without emitting anything, if the treasury balance
    /// would overflow.
    pub fn deposit(&mut self, sender: &str, value: u64) -> bool {
        if !self.invoker.credit(value) {
            log::warn!("Rejected deposit of {} from {}: balance overflow", value, sender);
            return false;
        }
        self.wallet.deposit(sender, value);
        true
    }

    /// Value held by the wallet
    pub fn balance(&self) -> u64 {
        self.invoker.balance()
    }
}
