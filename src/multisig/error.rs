//! Errors raised by the multisig engine
//!
//! Every variant is a local rejection: the call that produced it left the
//! wallet exactly as it found it.

use crate::multisig::transaction::TxId;
use thiserror::Error;

/// Errors related to multisig operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MultisigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Caller is not an owner: {0}")]
    Unauthorized(String),
    #[error("Transaction not found: {0}")]
    NotFound(TxId),
    #[error("Transaction {id} already confirmed by {owner}")]
    AlreadyConfirmed { id: TxId, owner: String },
    #[error("Transaction {id} not confirmed by {owner}")]
    NotConfirmed { id: TxId, owner: String },
    #[error("Transaction already executed: {0}")]
    AlreadyExecuted(TxId),
}

/// Result alias used throughout the multisig module
pub type MultisigResult<T> = Result<T, MultisigError>;
