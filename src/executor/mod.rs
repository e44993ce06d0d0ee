//! Execution capability
//!
//! The wallet never performs an action itself; it hands quorum-approved
//! calls to an [`Invoker`]. [`Treasury`] is the value-transfer invoker used
//! by the CLI, and any `FnMut(&mut Wallet, &Call) -> bool` closure works as
//! a stand-in.

pub mod invoker;
pub mod treasury;

pub use invoker::{ExecutionOutcome, Invoker};
pub use treasury::{CallRecord, Treasury};
