//! Append-only transaction ledger
//!
//! Transaction ids are positions in the ledger: they start at 0, are never
//! reused, and an id exists exactly when it has been assigned.

use crate::multisig::error::MultisigError;
use crate::multisig::transaction::{Transaction, TxId};
use serde::{Deserialize, Serialize};

/// Ordered store of every transaction ever submitted
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
        }
    }

    /// Append a new transaction and return its id
    pub fn append(
        &mut self,
        destination: String,
        value: u64,
        payload: Vec<u8>,
        submitter: String,
    ) -> TxId {
        let id = self.next_id();
        self.transactions
            .push(Transaction::new(id, destination, value, payload, submitter));
        id
    }

    /// The id the next submission will receive
    pub fn next_id(&self) -> TxId {
        self.transactions.len() as TxId
    }

    /// Check if an id has been assigned
    pub fn contains(&self, id: TxId) -> bool {
        id < self.next_id()
    }

    /// Look up a transaction by id
    pub fn get(&self, id: TxId) -> Result<&Transaction, MultisigError> {
        usize::try_from(id)
            .ok()
            .and_then(|idx| self.transactions.get(idx))
            .ok_or(MultisigError::NotFound(id))
    }

    /// Mutable lookup, reserved for the executor
    pub(crate) fn get_mut(&mut self, id: TxId) -> Result<&mut Transaction, MultisigError> {
        usize::try_from(id)
            .ok()
            .and_then(|idx| self.transactions.get_mut(idx))
            .ok_or(MultisigError::NotFound(id))
    }

    /// Iterate transactions in id order
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Check that every stored transaction sits at the position its id names
    pub fn is_sequential(&self) -> bool {
        self.transactions
            .iter()
            .enumerate()
            .all(|(idx, tx)| tx.id == idx as TxId)
    }
}
