//! Wallet events
//!
//! Events are the only notification channel to external monitors. They are
//! emitted in call order and never influence the state machine.

use crate::multisig::TxId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Events emitted by wallet operations
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum WalletEvent {
    /// A transaction was added to the ledger
    Submission { id: TxId },
    /// An owner confirmed a transaction
    Confirmation { owner: String, id: TxId },
    /// An owner withdrew an earlier confirmation
    ConfirmationRevoked { owner: String, id: TxId },
    /// The downstream invocation succeeded
    ExecutionOk { id: TxId },
    /// The downstream invocation failed; the transaction can be retried
    ExecutionFailure { id: TxId },
    /// Value was sent to the wallet
    Deposit { sender: String, value: u64 },
}

impl WalletEvent {
    /// Short name of the event kind
    pub fn type_name(&self) -> &'static str {
        match self {
            WalletEvent::Submission { .. } => "Submission",
            WalletEvent::Confirmation { .. } => "Confirmation",
            WalletEvent::ConfirmationRevoked { .. } => "ConfirmationRevoked",
            WalletEvent::ExecutionOk { .. } => "ExecutionOk",
            WalletEvent::ExecutionFailure { .. } => "ExecutionFailure",
            WalletEvent::Deposit { .. } => "Deposit",
        }
    }

    /// Transaction the event refers to, if any
    pub fn tx_id(&self) -> Option<TxId> {
        match self {
            WalletEvent::Submission { id }
            | WalletEvent::Confirmation { id, .. }
            | WalletEvent::ConfirmationRevoked { id, .. }
            | WalletEvent::ExecutionOk { id }
            | WalletEvent::ExecutionFailure { id } => Some(*id),
            WalletEvent::Deposit { .. } => None,
        }
    }
}

impl fmt::Display for WalletEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletEvent::Submission { id } => write!(f, "Submission(tx={})", id),
            WalletEvent::Confirmation { owner, id } => {
                write!(f, "Confirmation(owner={}, tx={})", owner, id)
            }
            WalletEvent::ConfirmationRevoked { owner, id } => {
                write!(f, "ConfirmationRevoked(owner={}, tx={})", owner, id)
            }
            WalletEvent::ExecutionOk { id } => write!(f, "ExecutionOk(tx={})", id),
            WalletEvent::ExecutionFailure { id } => write!(f, "ExecutionFailure(tx={})", id),
            WalletEvent::Deposit { sender, value } => {
                write!(f, "Deposit(sender={}, value={})", sender, value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_shape() {
        let event = WalletEvent::Confirmation {
            owner: "alice".to_string(),
            id: 2,
        };
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "Confirmation");
        assert_eq!(json["data"]["owner"], "alice");
        assert_eq!(json["data"]["id"], 2);
    }

    #[test]
    fn test_tx_id() {
        assert_eq!(WalletEvent::ExecutionOk { id: 9 }.tx_id(), Some(9));
        let deposit = WalletEvent::Deposit {
            sender: "x".to_string(),
            value: 1,
        };
        assert_eq!(deposit.tx_id(), None);
        assert_eq!(deposit.type_name(), "Deposit");
    }
}
