//! Multisig Engine: an M-of-N transaction approval engine in Rust
//!
//! This crate provides a multi-owner wallet featuring:
//! - A fixed owner set with an M-of-N confirmation threshold
//! - An append-only ledger of proposed transactions
//! - Per-owner confirmation and revocation
//! - Exactly-once execution guarded against re-entrant invocation
//! - A hash-linked audit trail of every event
//! - JSON persistence with rotating backups
//!
//! # Example
//!
//! ```rust
//! use multisig_engine::executor::{ExecutionOutcome, Treasury};
//! use multisig_engine::multisig::{MultisigConfig, MultisigManager};
//!
//! let owners = vec!["alice".to_string(), "bob".to_string(), "carol".to_string()];
//! let config = MultisigConfig::new(owners, 2).unwrap();
//! let mut manager = MultisigManager::new(config, Treasury::with_balance(100)).unwrap();
//!
//! // Alice proposes a transfer and confirms it
//! let (id, outcome) = manager.submit_and_confirm("alice", "shop", 30, vec![]).unwrap();
//! assert_eq!(outcome, ExecutionOutcome::NotReady);
//!
//! // Bob's confirmation reaches quorum and executes it
//! let outcome = manager.confirm("bob", id).unwrap();
//! assert_eq!(outcome, ExecutionOutcome::Executed);
//! assert_eq!(manager.balance(), 70);
//! ```

pub mod cli;
pub mod events;
pub mod executor;
pub mod multisig;
pub mod storage;

// Re-export commonly used types
pub use events::{AuditTrail, EventRecord, WalletEvent};
pub use executor::{ExecutionOutcome, Invoker, Treasury};
pub use multisig::{
    MultisigConfig, MultisigError, MultisigManager, Transaction, TransactionStatus,
    TreasuryManager, TxId, Wallet,
};
pub use storage::{Storage, StorageConfig, StorageError};
