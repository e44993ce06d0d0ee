//! Tamper-evident audit trail
//!
//! Each record commits to its predecessor's hash, the same way block headers
//! link to the previous block, so rewriting history breaks `verify`.

use crate::events::event::WalletEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Hash used as the predecessor of the first record
pub const GENESIS_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// A single entry in the audit trail
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventRecord {
    /// Position in the trail, starting at 0
    pub seq: u64,
    /// When the event was emitted
    pub timestamp: DateTime<Utc>,
    pub event: WalletEvent,
    /// Hash of the previous record
    pub prev_hash: String,
    /// Hash of this record
    pub hash: String,
}

impl EventRecord {
    /// Calculate the hash of the record contents
    pub fn calculate_hash(&self) -> String {
        // Serializing an enum of strings and integers cannot fail
        let event = serde_json::to_string(&self.event).unwrap_or_default();
        let data = format!(
            "{}{}{}{}",
            self.prev_hash,
            self.seq,
            self.timestamp.timestamp_nanos_opt().unwrap_or(0),
            event
        );
        let mut hasher = Sha256::new();
        hasher.update(data.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Append-only, hash-linked log of wallet events
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AuditTrail {
    records: Vec<EventRecord>,
}

impl AuditTrail {
    /// Create an empty trail
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append an event and return the new record
    pub fn record(&mut self, event: WalletEvent) -> &EventRecord {
        log::info!("{}", event);

        let mut record = EventRecord {
            seq: self.records.len() as u64,
            timestamp: Utc::now(),
            event,
            prev_hash: self.last_hash().to_string(),
            hash: String::new(),
        };
        record.hash = record.calculate_hash();

        let idx = self.records.len();
        self.records.push(record);
        &self.records[idx]
    }

    /// Hash of the latest record, or the genesis hash when empty
    pub fn last_hash(&self) -> &str {
        self.records
            .last()
            .map_or(GENESIS_HASH, |record| record.hash.as_str())
    }

    /// Records with a sequence number at or after `seq`
    pub fn since(&self, seq: u64) -> &[EventRecord] {
        let start = usize::try_from(seq)
            .unwrap_or(usize::MAX)
            .min(self.records.len());
        &self.records[start..]
    }

    /// Iterate over the events alone
    pub fn events(&self) -> impl Iterator<Item = &WalletEvent> {
        self.records.iter().map(|record| &record.event)
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Re-walk the chain and check every link
    pub fn verify(&self) -> bool {
        let mut prev_hash = GENESIS_HASH;
        for (idx, record) in self.records.iter().enumerate() {
            if record.seq != idx as u64 || record.prev_hash != prev_hash {
                return false;
            }
            if record.hash != record.calculate_hash() {
                return false;
            }
            prev_hash = &record.hash;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trail() -> AuditTrail {
        let mut trail = AuditTrail::new();
        trail.record(WalletEvent::Submission { id: 0 });
        trail.record(WalletEvent::Confirmation {
            owner: "alice".to_string(),
            id: 0,
        });
        trail.record(WalletEvent::ExecutionOk { id: 0 });
        trail
    }

    #[test]
    fn test_records_are_linked() {
        let trail = sample_trail();

        assert_eq!(trail.len(), 3);
        assert_eq!(trail.records()[0].prev_hash, GENESIS_HASH);
        assert_eq!(trail.records()[1].prev_hash, trail.records()[0].hash);
        assert_eq!(trail.last_hash(), trail.records()[2].hash);
        assert!(trail.verify());
    }

    #[test]
    fn test_tampering_detected() {
        let mut trail = sample_trail();
        trail.records[1].event = WalletEvent::Confirmation {
            owner: "mallory".to_string(),
            id: 0,
        };
        assert!(!trail.verify());

        let mut trail = sample_trail();
        trail.records.remove(1);
        assert!(!trail.verify());
    }

    #[test]
    fn test_since_cursor() {
        let trail = sample_trail();

        assert_eq!(trail.since(0).len(), 3);
        assert_eq!(trail.since(2).len(), 1);
        assert_eq!(trail.since(2)[0].event, WalletEvent::ExecutionOk { id: 0 });
        assert!(trail.since(10).is_empty());
    }

    #[test]
    fn test_empty_trail_verifies() {
        let trail = AuditTrail::new();
        assert!(trail.verify());
        assert_eq!(trail.last_hash(), GENESIS_HASH);
    }

    #[test]
    fn test_survives_serialization() {
        let trail = sample_trail();
        let json = serde_json::to_string(&trail).unwrap();
        let restored: AuditTrail = serde_json::from_str(&json).unwrap();

        assert!(restored.verify());
        assert_eq!(restored.last_hash(), trail.last_hash());
    }
}
