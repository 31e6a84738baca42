//! End-to-end scan flow: payload decode, key verification, unprotect,
//! atomic commit, and the fault paths in between.

#[cfg(test)]
use super::Harness;
#[cfg(test)]
use hunt_crypto::{protect, PuzzleKey, ScanPayload};
#[cfg(test)]
use hunt_engine::{GameError, PuzzleRecord};
#[cfg(test)]
use hunt_types::{PlayerId, PuzzleId};

/// Installs the worked example from the interface contract: puzzle id 3
/// with recorded key `a1b2c3d4e5f60718`.
#[cfg(test)]
fn install_example_puzzle(harness: &Harness) -> String {
    let key = PuzzleKey::from_recorded("a1b2c3d4e5f60718");
    let blob = protect("I speak without a mouth.", &key).unwrap();
    harness
        .vault
        .insert(PuzzleRecord {
            id: PuzzleId(3),
            title: "Echo".to_string(),
            sealed: hunt_crypto::SealedContent::from_parts(key, blob),
            solution: "an echo".to_string(),
            points: 30,
            sequence: 3,
            active: true,
        })
        .unwrap();
    "3:a1b2c3d4e5f60718".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hunt_engine::{ProgressStore, PuzzleVault};

    #[test]
    fn test_worked_example_first_and_repeat_scan() {
        let harness = Harness::new();
        let payload = install_example_puzzle(&harness);

        // First scan by player 7 scores.
        let first = harness
            .scans
            .submit_at(PlayerId(7), &payload, 1_000)
            .unwrap();
        assert!(first.first_scan);
        assert_eq!(first.puzzle.id, PuzzleId(3));
        assert_eq!(first.puzzle.content, "I speak without a mouth.");
        assert_eq!(first.puzzle.solution, "an echo");

        let after_first = harness.store.aggregate_for(PlayerId(7)).unwrap().unwrap();
        assert_eq!(after_first.total_points, 30);

        // Immediate second scan of the same payload: logged, not scored.
        let second = harness
            .scans
            .submit_at(PlayerId(7), &payload, 1_500)
            .unwrap();
        assert!(!second.first_scan);

        let after_second = harness.store.aggregate_for(PlayerId(7)).unwrap().unwrap();
        assert_eq!(after_second.total_points, 30);
        assert_eq!(after_second.total_scans, 2);
        assert_eq!(after_second.unique_puzzles, 1);
    }

    #[test]
    fn test_payload_from_record_matches_hand_built_literal() {
        let harness = Harness::new();
        install_example_puzzle(&harness);
        let record = harness.vault.puzzle(PuzzleId(3)).unwrap().unwrap();
        assert_eq!(
            ScanPayload::encode(record.id, record.sealed.key()),
            "3:a1b2c3d4e5f60718"
        );
    }

    #[test]
    fn test_rotated_payload_becomes_forbidden() {
        let harness = Harness::new();
        let stale_payload = install_example_puzzle(&harness);

        // Admin edit reseals content: key and blob rotate together.
        let mut record = harness.vault.puzzle(PuzzleId(3)).unwrap().unwrap();
        record.sealed = hunt_crypto::SealedContent::seal("I am edited now.").unwrap();
        harness.vault.insert(record).unwrap();

        // The already-distributed payload is permanently invalid.
        let err = harness
            .scans
            .submit_at(PlayerId(7), &stale_payload, 2_000)
            .unwrap_err();
        assert_eq!(err, GameError::KeyMismatch(PuzzleId(3)));

        // A freshly encoded payload works.
        let record = harness.vault.puzzle(PuzzleId(3)).unwrap().unwrap();
        let fresh = ScanPayload::encode(record.id, record.sealed.key());
        let receipt = harness.scans.submit_at(PlayerId(7), &fresh, 3_000).unwrap();
        assert_eq!(receipt.puzzle.content, "I am edited now.");
    }

    #[test]
    fn test_fault_paths_commit_nothing() {
        let harness = Harness::new();
        let payload = install_example_puzzle(&harness);

        // Malformed, unknown, inactive, forbidden: four failures in a row.
        for raw in ["garbage", "9:a1b2c3d4e5f60718", "3:wrongkey00000000"] {
            assert!(harness.scans.submit_at(PlayerId(7), raw, 100).is_err());
        }
        harness.vault.set_active(PuzzleId(3), false).unwrap();
        assert_eq!(
            harness
                .scans
                .submit_at(PlayerId(7), &payload, 100)
                .unwrap_err(),
            GameError::PuzzleInactive(PuzzleId(3))
        );

        assert_eq!(harness.store.aggregate_for(PlayerId(7)).unwrap(), None);
        assert!(harness.store.scan_history(PlayerId(7)).unwrap().is_empty());
    }

    #[test]
    fn test_scan_then_progress_then_complete() {
        let harness = Harness::new();
        let payload = install_example_puzzle(&harness);
        harness
            .vault
            .insert_sealed("Second", "more text", "sol", 20, 4)
            .unwrap();

        harness
            .scans
            .submit_at(PlayerId(7), &payload, 10_000)
            .unwrap();

        let snapshot = harness.progress.snapshot(PlayerId(7)).unwrap();
        assert_eq!(snapshot.total_puzzles, 2);
        assert_eq!(snapshot.completion_percentage, 50);
        assert!(!snapshot.is_completed);

        let stats = harness.progress.complete_at(PlayerId(7), 70_000).unwrap();
        assert_eq!(stats.duration_seconds, 60);
        assert_eq!(stats.total_points, 30);

        let snapshot = harness.progress.snapshot(PlayerId(7)).unwrap();
        assert!(snapshot.is_completed);
        assert_eq!(snapshot.end_time, Some(70_000));
    }

    #[test]
    fn test_receipt_serializes_interface_contract() {
        let harness = Harness::new();
        let payload = install_example_puzzle(&harness);
        let receipt = harness
            .scans
            .submit_at(PlayerId(7), &payload, 1_000)
            .unwrap();
        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["firstScan"], true);
        assert_eq!(json["puzzle"]["id"], 3);
        assert_eq!(json["puzzle"]["title"], "Echo");
        assert_eq!(json["puzzle"]["points"], 30);
    }
}
