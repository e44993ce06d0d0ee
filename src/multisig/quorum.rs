//! Quorum evaluation

use crate::multisig::confirmation::ConfirmationTracker;
use crate::multisig::owners::OwnerRegistry;
use crate::multisig::transaction::TxId;

/// Check whether `id` has at least `required` owner confirmations
///
/// Owners are scanned in registry order and the scan stops as soon as the
/// running count reaches the threshold, so the cost is bounded by the
/// position of the M-th confirming owner rather than by N.
pub fn is_quorum_reached(
    registry: &OwnerRegistry,
    confirmations: &ConfirmationTracker,
    id: TxId,
) -> bool {
    let required = registry.required();
    let mut count = 0;
    for owner in registry.owners() {
        if confirmations.is_confirmed(id, owner) {
            count += 1;
        }
        if count == required {
            return true;
        }
    }
    false
}

/// Confirmations still missing before `id` reaches quorum
pub fn remaining_confirmations(
    registry: &OwnerRegistry,
    confirmations: &ConfirmationTracker,
    id: TxId,
) -> usize {
    registry
        .required()
        .saturating_sub(confirmations.count(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> OwnerRegistry {
        OwnerRegistry::new(
            vec!["alice".to_string(), "bob".to_string(), "carol".to_string()],
            2,
        )
        .unwrap()
    }

    #[test]
    fn test_quorum_threshold() {
        let registry = registry();
        let mut tracker = ConfirmationTracker::new();

        assert!(!is_quorum_reached(&registry, &tracker, 0));
        tracker.insert(0, "carol");
        assert!(!is_quorum_reached(&registry, &tracker, 0));
        assert_eq!(remaining_confirmations(&registry, &tracker, 0), 1);

        tracker.insert(0, "alice");
        assert!(is_quorum_reached(&registry, &tracker, 0));
        assert_eq!(remaining_confirmations(&registry, &tracker, 0), 0);
    }

    #[test]
    fn test_quorum_lost_after_revocation() {
        let registry = registry();
        let mut tracker = ConfirmationTracker::new();
        tracker.insert(0, "alice");
        tracker.insert(0, "bob");
        assert!(is_quorum_reached(&registry, &tracker, 0));

        tracker.remove(0, "bob");
        assert!(!is_quorum_reached(&registry, &tracker, 0));
    }

    #[test]
    fn test_confirmations_are_per_transaction() {
        let registry = registry();
        let mut tracker = ConfirmationTracker::new();
        tracker.insert(0, "alice");
        tracker.insert(1, "bob");

        assert!(!is_quorum_reached(&registry, &tracker, 0));
        assert!(!is_quorum_reached(&registry, &tracker, 1));
        assert!(!is_quorum_reached(&registry, &tracker, 7));
    }
}
