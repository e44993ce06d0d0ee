//! Confirmation tracking
//!
//! Records which owners have approved which transactions. The tracker does
//! no authorization itself; the wallet only ever passes the caller's own
//! address, so an owner can never touch another owner's entry.

use crate::multisig::owners::OwnerRegistry;
use crate::multisig::transaction::TxId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Per-transaction sets of confirming owners
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConfirmationTracker {
    confirmations: HashMap<TxId, HashSet<String>>,
}

impl ConfirmationTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self {
            confirmations: HashMap::new(),
        }
    }

    /// Check if `owner` has confirmed `id`
    pub fn is_confirmed(&self, id: TxId, owner: &str) -> bool {
        self.confirmations
            .get(&id)
            .is_some_and(|set| set.contains(owner))
    }

    /// Record a confirmation; returns false if it was already present
    pub fn insert(&mut self, id: TxId, owner: &str) -> bool {
        self.confirmations
            .entry(id)
            .or_default()
            .insert(owner.to_string())
    }

    /// Drop a confirmation; returns false if there was none
    pub fn remove(&mut self, id: TxId, owner: &str) -> bool {
        let Some(set) = self.confirmations.get_mut(&id) else {
            return false;
        };
        let removed = set.remove(owner);
        if set.is_empty() {
            self.confirmations.remove(&id);
        }
        removed
    }

    /// Number of confirmations recorded for `id`
    pub fn count(&self, id: TxId) -> usize {
        self.confirmations.get(&id).map_or(0, HashSet::len)
    }

    /// Confirming owners of `id`, in registry order
    pub fn confirmed_by<'a>(&self, id: TxId, registry: &'a OwnerRegistry) -> Vec<&'a str> {
        registry
            .owners()
            .iter()
            .filter(|owner| self.is_confirmed(id, owner))
            .map(String::as_str)
            .collect()
    }

    /// Iterate over every (id, owner) pair
    pub fn entries(&self) -> impl Iterator<Item = (TxId, &str)> {
        self.confirmations
            .iter()
            .flat_map(|(id, set)| set.iter().map(move |owner| (*id, owner.as_str())))
    }
}
