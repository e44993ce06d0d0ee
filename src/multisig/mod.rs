//! Multi-owner transaction approval
//!
//! A fixed set of owners must jointly approve a transaction before it is
//! handed to the downstream invoker. M confirmations out of N owners are
//! required, and a transaction executes successfully at most once.
//!
//! # Example
//!
//! ```ignore
//! use multisig_engine::executor::Treasury;
//! use multisig_engine::multisig::{MultisigConfig, MultisigManager};
//!
//! // Create a 2-of-3 wallet holding 100 units
//! let config = MultisigConfig::new(vec![alice, bob, carol], 2)?;
//! let mut manager = MultisigManager::new(config, Treasury::with_balance(100))?;
//!
//! // Propose a transfer; the proposer's confirmation is recorded
//! let (id, _) = manager.submit_and_confirm(&alice, "shop", 30, vec![])?;
//!
//! // The second confirmation reaches quorum and executes the transfer
//! manager.confirm(&bob, id)?;
//! ```

pub mod confirmation;
pub mod error;
pub mod ledger;
pub mod manager;
pub mod owners;
pub mod quorum;
pub mod transaction;
pub mod wallet;

pub use confirmation::ConfirmationTracker;
pub use error::{MultisigError, MultisigResult};
pub use ledger::Ledger;
pub use manager::{MultisigManager, TreasuryManager};
pub use owners::{MultisigConfig, OwnerRegistry};
pub use transaction::{Call, Transaction, TxId};
pub use wallet::{TransactionStatus, Wallet};
