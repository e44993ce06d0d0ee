//! Multi-owner wallet state machine
//!
//! Ties the owner registry, ledger, confirmation tracker and audit trail
//! together. Every public operation validates all of its preconditions
//! before touching state, so a rejected call leaves the wallet unchanged.

use crate::events::{AuditTrail, WalletEvent};
use crate::executor::{ExecutionOutcome, Invoker};
use crate::multisig::confirmation::ConfirmationTracker;
use crate::multisig::error::{MultisigError, MultisigResult};
use crate::multisig::ledger::Ledger;
use crate::multisig::owners::{MultisigConfig, OwnerRegistry};
use crate::multisig::quorum;
use crate::multisig::transaction::{Transaction, TxId};
use serde::{Deserialize, Serialize};

/// Derived position of a transaction in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// Collecting confirmations
    Proposed,
    /// Enough confirmations; waiting for an execution attempt
    QuorumReached,
    /// Successfully executed, terminal
    Executed,
}

/// A multi-signature wallet
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Wallet {
    registry: OwnerRegistry,
    ledger: Ledger,
    confirmations: ConfirmationTracker,
    trail: AuditTrail,
}

impl Wallet {
    /// Create a wallet for `owners` requiring `required` confirmations
    pub fn new(owners: Vec<String>, required: usize) -> MultisigResult<Self> {
        Self::from_config(MultisigConfig::new(owners, required)?)
    }

    /// Create a wallet from a configuration
    pub fn from_config(config: MultisigConfig) -> MultisigResult<Self> {
        let registry = OwnerRegistry::try_from(config)?;
        log::info!(
            "Multisig wallet initialized: {} ({} owners)",
            registry.description(),
            registry.owner_count()
        );

        Ok(Self {
            registry,
            ledger: Ledger::new(),
            confirmations: ConfirmationTracker::new(),
            trail: AuditTrail::new(),
        })
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Propose a new transaction
    ///
    /// The submitter's confirmation is not recorded; use
    /// [`Wallet::submit_and_confirm`] for the usual propose-and-approve flow.
    pub fn submit(
        &mut self,
        caller: &str,
        destination: &str,
        value: u64,
        payload: Vec<u8>,
    ) -> MultisigResult<TxId> {
        self.require_owner(caller)?;

        let id = self
            .ledger
            .append(destination.to_string(), value, payload, caller.to_string());
        self.trail.record(WalletEvent::Submission { id });

        Ok(id)
    }

    /// Propose a transaction and confirm it as the submitter
    pub fn submit_and_confirm(
        &mut self,
        caller: &str,
        destination: &str,
        value: u64,
        payload: Vec<u8>,
        invoker: &mut dyn Invoker,
    ) -> MultisigResult<(TxId, ExecutionOutcome)> {
        let id = self.submit(caller, destination, value, payload)?;
        let outcome = self.confirm(caller, id, invoker)?;
        Ok((id, outcome))
    }

    /// Confirm a transaction, executing it if this completes the quorum
    pub fn confirm(
        &mut self,
        caller: &str,
        id: TxId,
        invoker: &mut dyn Invoker,
    ) -> MultisigResult<ExecutionOutcome> {
        self.require_owner(caller)?;
        let tx = self.ledger.get(id)?;
        if self.confirmations.is_confirmed(id, caller) {
            return Err(MultisigError::AlreadyConfirmed {
                id,
                owner: caller.to_string(),
            });
        }
        if tx.executed {
            return Err(MultisigError::AlreadyExecuted(id));
        }

        self.confirmations.insert(id, caller);
        self.trail.record(WalletEvent::Confirmation {
            owner: caller.to_string(),
            id,
        });

        self.execute(id, invoker)
    }

    /// Withdraw an earlier confirmation
    ///
    /// Allowed after execution too, where it only edits the record.
    pub fn revoke(&mut self, caller: &str, id: TxId) -> MultisigResult<()> {
        self.require_owner(caller)?;
        self.ledger.get(id)?;
        if !self.confirmations.is_confirmed(id, caller) {
            return Err(MultisigError::NotConfirmed {
                id,
                owner: caller.to_string(),
            });
        }

        self.confirmations.remove(id, caller);
        self.trail.record(WalletEvent::ConfirmationRevoked {
            owner: caller.to_string(),
            id,
        });

        Ok(())
    }

    /// Attempt to execute a transaction; anyone may call this
    ///
    /// The executed flag is written before the invoker runs and cleared again
    /// only if it reports failure. Nested calls made by the invoker therefore
    /// see the transaction as executed and cannot run it a second time.
    pub fn execute(
        &mut self,
        id: TxId,
        invoker: &mut dyn Invoker,
    ) -> MultisigResult<ExecutionOutcome> {
        if self.ledger.get(id)?.executed {
            return Err(MultisigError::AlreadyExecuted(id));
        }

        if !self.is_quorum_reached(id) {
            log::debug!(
                "Transaction {} awaiting {} more confirmation(s)",
                id,
                quorum::remaining_confirmations(&self.registry, &self.confirmations, id)
            );
            return Ok(ExecutionOutcome::NotReady);
        }

        let call = {
            let tx = self.ledger.get_mut(id)?;
            tx.executed = true;
            tx.call()
        };
        log::info!(
            "Executing transaction {}: {} value to {}",
            id,
            call.value,
            call.destination
        );

        if invoker.invoke(self, &call) {
            self.trail.record(WalletEvent::ExecutionOk { id });
            Ok(ExecutionOutcome::Executed)
        } else {
            self.ledger.get_mut(id)?.executed = false;
            self.trail.record(WalletEvent::ExecutionFailure { id });
            Ok(ExecutionOutcome::Failed)
        }
    }

    /// Accept inbound value
    ///
    /// The wallet keeps no balance of its own; the environment does the
    /// accounting and this only emits the notification.
    pub fn deposit(&mut self, sender: &str, value: u64) {
        if value > 0 {
            self.trail.record(WalletEvent::Deposit {
                sender: sender.to_string(),
                value,
            });
        }
    }

    fn require_owner(&self, caller: &str) -> MultisigResult<()> {
        if self.registry.is_owner(caller) {
            Ok(())
        } else {
            Err(MultisigError::Unauthorized(caller.to_string()))
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Check if a principal is an owner
    pub fn is_owner(&self, principal: &str) -> bool {
        self.registry.is_owner(principal)
    }

    /// Owners in registry order
    pub fn owners(&self) -> &[String] {
        self.registry.owners()
    }

    /// Confirmations needed for execution
    pub fn required(&self) -> usize {
        self.registry.required()
    }

    pub fn registry(&self) -> &OwnerRegistry {
        &self.registry
    }

    /// Look up a transaction
    pub fn get(&self, id: TxId) -> MultisigResult<&Transaction> {
        self.ledger.get(id)
    }

    /// Check if `id` has enough confirmations to execute
    pub fn is_quorum_reached(&self, id: TxId) -> bool {
        quorum::is_quorum_reached(&self.registry, &self.confirmations, id)
    }

    /// Check if `owner` has confirmed `id`
    pub fn is_confirmed(&self, id: TxId, owner: &str) -> bool {
        self.confirmations.is_confirmed(id, owner)
    }

    /// Number of owners who have confirmed `id`
    pub fn confirmation_count(&self, id: TxId) -> usize {
        self.confirmations.count(id)
    }

    /// Owners who have confirmed `id`, in registry order
    pub fn confirmations(&self, id: TxId) -> Vec<&str> {
        self.confirmations.confirmed_by(id, &self.registry)
    }

    /// Lifecycle status of a transaction
    pub fn status(&self, id: TxId) -> MultisigResult<TransactionStatus> {
        let tx = self.ledger.get(id)?;
        Ok(if tx.executed {
            TransactionStatus::Executed
        } else if self.is_quorum_reached(id) {
            TransactionStatus::QuorumReached
        } else {
            TransactionStatus::Proposed
        })
    }

    /// Count transactions matching the filters
    pub fn transaction_count(&self, pending: bool, executed: bool) -> usize {
        self.ledger
            .iter()
            .filter(|tx| Self::matches(tx, pending, executed))
            .count()
    }

    /// Ids of matching transactions, sliced to `[from, to)` after filtering
    ///
    /// `to` is clamped to the number of matches; an empty vector is returned
    /// when `from >= to`.
    pub fn transaction_ids(
        &self,
        from: usize,
        to: usize,
        pending: bool,
        executed: bool,
    ) -> Vec<TxId> {
        let matching: Vec<TxId> = self
            .ledger
            .iter()
            .filter(|tx| Self::matches(tx, pending, executed))
            .map(|tx| tx.id)
            .collect();

        let to = to.min(matching.len());
        if from >= to {
            return Vec::new();
        }
        matching[from..to].to_vec()
    }

    fn matches(tx: &Transaction, pending: bool, executed: bool) -> bool {
        (pending && !tx.executed) || (executed && tx.executed)
    }

    /// All transactions in id order
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.ledger.iter()
    }

    /// Audit trail of every event emitted so far
    pub fn trail(&self) -> &AuditTrail {
        &self.trail
    }

    /// Check cross-structure invariants of a loaded wallet
    pub fn check_integrity(&self) -> Result<(), String> {
        if !self.ledger.is_sequential() {
            return Err("ledger ids are not sequential".to_string());
        }

        for (id, owner) in self.confirmations.entries() {
            if !self.ledger.contains(id) {
                return Err(format!("confirmation for unknown transaction {}", id));
            }
            if !self.registry.is_owner(owner) {
                return Err(format!("confirmation by non-owner {} on {}", owner, id));
            }
        }

        if !self.trail.verify() {
            return Err("audit trail hash chain is broken".to_string());
        }

        Ok(())
    }
}
