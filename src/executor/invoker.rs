//! Downstream invocation capability

use crate::multisig::{Call, Wallet};
use serde::{Deserialize, Serialize};

/// The action performed when a transaction reaches quorum
///
/// Implementations must leave no side effect behind when they report
/// failure: the wallet re-opens a failed transaction for retry. Errors are
/// absorbed into the returned flag.
///
/// The wallet is handed back mutably so an invocation may call into it
/// again before returning. By then the transaction is already marked
/// executed, so nested attempts to run it fail with `AlreadyExecuted`.
pub trait Invoker {
    /// Perform the call; returns true on success
    fn invoke(&mut self, wallet: &mut Wallet, call: &Call) -> bool;
}

impl<F> Invoker for F
where
    F: FnMut(&mut Wallet, &Call) -> bool,
{
    fn invoke(&mut self, wallet: &mut Wallet, call: &Call) -> bool {
        self(wallet, call)
    }
}

/// Result of an execution attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionOutcome {
    /// Quorum not reached; nothing happened
    NotReady,
    /// The invocation succeeded and the transaction is final
    Executed,
    /// The invocation failed and the transaction is open for retry
    Failed,
}

impl ExecutionOutcome {
    /// Check if an invocation was attempted
    pub fn attempted(&self) -> bool {
        !matches!(self, ExecutionOutcome::NotReady)
    }
}
