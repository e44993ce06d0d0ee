//! Owner registry
//!
//! Holds the fixed set of principals allowed to propose and approve
//! transactions, together with the quorum threshold.

use crate::multisig::error::MultisigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Configuration for a multisig wallet
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MultisigConfig {
    /// Addresses of all owners, in registry order
    pub owners: Vec<String>,
    /// Minimum confirmations required (M in M-of-N)
    pub required: usize,
}

impl MultisigConfig {
    /// Create a new multisig configuration
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if the owner list is empty, contains
    /// duplicates, or `required` is outside `1..=owners.len()`.
    pub fn new(owners: Vec<String>, required: usize) -> Result<Self, MultisigError> {
        let config = Self { owners, required };
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration invariants
    pub fn validate(&self) -> Result<(), MultisigError> {
        if self.owners.is_empty() {
            return Err(MultisigError::InvalidConfiguration(
                "owner list is empty".to_string(),
            ));
        }

        if self.required == 0 {
            return Err(MultisigError::InvalidConfiguration(
                "required must be at least 1".to_string(),
            ));
        }

        if self.required > self.owners.len() {
            return Err(MultisigError::InvalidConfiguration(format!(
                "required {} exceeds owner count {}",
                self.required,
                self.owners.len()
            )));
        }

        let mut seen = HashSet::with_capacity(self.owners.len());
        for owner in &self.owners {
            if !seen.insert(owner.as_str()) {
                return Err(MultisigError::InvalidConfiguration(format!(
                    "duplicate owner {}",
                    owner
                )));
            }
        }

        Ok(())
    }

    /// Get description like "2-of-3"
    pub fn description(&self) -> String {
        format!("{}-of-{}", self.required, self.owners.len())
    }
}

/// Immutable set of owners and the quorum threshold
///
/// Serializes as its [`MultisigConfig`]; deserializing re-runs validation,
/// so a tampered snapshot can never yield an unusable registry.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "MultisigConfig", into = "MultisigConfig")]
pub struct OwnerRegistry {
    /// Owners in the order they were registered
    owners: Vec<String>,
    /// Membership index
    index: HashSet<String>,
    required: usize,
}

impl OwnerRegistry {
    /// Build a registry from an owner list and threshold
    pub fn new(owners: Vec<String>, required: usize) -> Result<Self, MultisigError> {
        Self::try_from(MultisigConfig::new(owners, required)?)
    }

    /// Check if a principal is an owner
    pub fn is_owner(&self, principal: &str) -> bool {
        self.index.contains(principal)
    }

    /// Owners in registry order
    pub fn owners(&self) -> &[String] {
        &self.owners
    }

    /// Get the threshold (M)
    pub fn required(&self) -> usize {
        self.required
    }

    /// Get the total owner count (N)
    pub fn owner_count(&self) -> usize {
        self.owners.len()
    }

    pub fn description(&self) -> String {
        format!("{}-of-{}", self.required, self.owners.len())
    }
}

impl TryFrom<MultisigConfig> for OwnerRegistry {
    type Error = MultisigError;

    fn try_from(config: MultisigConfig) -> Result<Self, Self::Error> {
        config.validate()?;
        let index = config.owners.iter().cloned().collect();
        Ok(Self {
            owners: config.owners,
            index,
            required: config.required,
        })
    }
}

impl From<OwnerRegistry> for MultisigConfig {
    fn from(registry: OwnerRegistry) -> Self {
        Self {
            owners: registry.owners,
            required: registry.required,
        }
    }
}
