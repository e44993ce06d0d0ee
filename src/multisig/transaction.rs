//! Proposed multisig transactions
//!
//! A transaction describes one downstream invocation awaiting approval.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sequential transaction identifier
pub type TxId = u64;

/// A transaction proposed by one of the owners
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    /// Position in the ledger, assigned at submission
    pub id: TxId,
    /// Target of the invocation
    pub destination: String,
    /// Amount transferred with the invocation
    pub value: u64,
    /// Opaque call data passed through to the invoker
    #[serde(with = "hex::serde")]
    pub payload: Vec<u8>,
    /// Whether the invocation has completed successfully
    pub executed: bool,
    /// Owner who proposed the transaction
    pub submitter: String,
    /// Submission timestamp
    pub submitted_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new, unexecuted transaction
    pub fn new(
        id: TxId,
        destination: String,
        value: u64,
        payload: Vec<u8>,
        submitter: String,
    ) -> Self {
        Self {
            id,
            destination,
            value,
            payload,
            executed: false,
            submitter,
            submitted_at: Utc::now(),
        }
    }

    /// Check if the transaction is still awaiting execution
    pub fn is_pending(&self) -> bool {
        !self.executed
    }

    /// Snapshot the invocation arguments
    ///
    /// The call is detached from the ledger so the invoker can be handed the
    /// wallet mutably while it runs.
    pub fn call(&self) -> Call {
        Call {
            id: self.id,
            destination: self.destination.clone(),
            value: self.value,
            payload: self.payload.clone(),
        }
    }
}

/// Arguments handed to the downstream invoker
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    /// Transaction being executed
    pub id: TxId,
    pub destination: String,
    pub value: u64,
    #[serde(with = "hex::serde")]
    pub payload: Vec<u8>,
}
