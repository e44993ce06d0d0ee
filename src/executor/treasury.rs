//! Value-holding environment for a multisig wallet
//!
//! The treasury keeps the wallet's balance and acts as the default invoker:
//! executing a transaction moves `value` to the destination account and
//! records the call data.

use crate::executor::invoker::Invoker;
use crate::multisig::{Call, Wallet};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A completed downstream call
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CallRecord {
    pub call: Call,
    pub executed_at: DateTime<Utc>,
}

/// Balance accounting for the wallet and its destinations
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Treasury {
    /// Value held by the wallet
    balance: u64,
    /// Value received by destinations: address -> amount
    accounts: HashMap<String, u64>,
    /// Successful calls, oldest first
    calls: Vec<CallRecord>,
}

impl Treasury {
    /// Create an empty treasury
    pub fn new() -> Self {
        Self {
            balance: 0,
            accounts: HashMap::new(),
            calls: Vec::new(),
        }
    }

    /// Create a treasury holding `balance`
    pub fn with_balance(balance: u64) -> Self {
        Self {
            balance,
            ..Self::new()
        }
    }

    /// Add inbound value; returns false if the balance would overflow
    pub fn credit(&mut self, value: u64) -> bool {
        match self.balance.checked_add(value) {
            Some(balance) => {
                self.balance = balance;
                true
            }
            None => false,
        }
    }

    /// Value currently held by the wallet
    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Value received so far by `address`
    pub fn account_balance(&self, address: &str) -> u64 {
        self.accounts.get(address).copied().unwrap_or(0)
    }

    /// Successful calls, oldest first
    pub fn calls(&self) -> &[CallRecord] {
        &self.calls
    }
}

impl Invoker for Treasury {
    fn invoke(&mut self, _wallet: &mut Wallet, call: &Call) -> bool {
        if call.value > self.balance {
            log::warn!(
                "Insufficient balance for tx {}: have {}, need {}",
                call.id,
                self.balance,
                call.value
            );
            return false;
        }

        let received = self.account_balance(&call.destination);
        let Some(received) = received.checked_add(call.value) else {
            log::warn!("Account overflow for {} on tx {}", call.destination, call.id);
            return false;
        };

        self.balance -= call.value;
        self.accounts.insert(call.destination.clone(), received);
        self.calls.push(CallRecord {
            call: call.clone(),
            executed_at: Utc::now(),
        });

        log::debug!(
            "Transferred {} to {} ({} bytes of call data)",
            call.value,
            call.destination,
            call.payload.len()
        );
        true
    }
}
