//! Notification and audit trail
//!
//! Wallet operations emit [`WalletEvent`]s in call order; the
//! [`AuditTrail`] keeps them as a hash-linked log for external monitors.

pub mod audit;
pub mod event;

pub use audit::{AuditTrail, EventRecord, GENESIS_HASH};
pub use event::WalletEvent;
