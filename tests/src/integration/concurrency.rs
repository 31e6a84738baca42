//! Idempotent scoring under concurrent submission.
//!
//! The per-player commit must serialize: N parallel submissions of one
//! payload yield N log rows but exactly one credit.

#[cfg(test)]
mod tests {
    use crate::integration::Harness;
    use hunt_crypto::ScanPayload;
    use hunt_engine::ProgressStore;
    use hunt_types::PlayerId;
    use std::sync::Arc;

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_n_concurrent_submits_credit_once() {
        let harness = Arc::new(Harness::new());
        let record = harness
            .vault
            .insert_sealed("Gate", "what opens?", "a gate", 30, 1)
            .unwrap();
        let payload = ScanPayload::encode(record.id, record.sealed.key());

        let n: u64 = 32;
        let mut tasks = Vec::new();
        for i in 0..n {
            let scans = Arc::clone(&harness.scans);
            let payload = payload.clone();
            tasks.push(tokio::task::spawn_blocking(move || {
                scans
                    .submit_at(PlayerId(7), &payload, 1_000 + i)
                    .unwrap()
                    .first_scan
            }));
        }

        let mut first_scans = 0u64;
        for task in tasks {
            if task.await.unwrap() {
                first_scans += 1;
            }
        }
        assert_eq!(first_scans, 1);

        let agg = harness.store.aggregate_for(PlayerId(7)).unwrap().unwrap();
        assert_eq!(agg.total_scans, n);
        assert_eq!(agg.unique_puzzles, 1);
        assert_eq!(agg.total_points, 30);
        assert_eq!(
            harness.store.scan_history(PlayerId(7)).unwrap().len(),
            n as usize
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_players_scan_in_parallel_without_cross_talk() {
        let harness = Arc::new(Harness::new());
        let mut payloads = Vec::new();
        for i in 1..=4u64 {
            let record = harness
                .vault
                .insert_sealed(format!("P{}", i).as_str(), "text", "sol", 10 * i, i as u32)
                .unwrap();
            payloads.push(ScanPayload::encode(record.id, record.sealed.key()));
        }
        let payloads = Arc::new(payloads);

        let mut tasks = Vec::new();
        for player in 1..=8u64 {
            let scans = Arc::clone(&harness.scans);
            let payloads = Arc::clone(&payloads);
            tasks.push(tokio::task::spawn_blocking(move || {
                for (i, payload) in payloads.iter().enumerate() {
                    scans
                        .submit_at(PlayerId(player), payload, 1_000 + i as u64)
                        .unwrap();
                }
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        // Every player independently scored every puzzle exactly once.
        for player in 1..=8u64 {
            let agg = harness
                .store
                .aggregate_for(PlayerId(player))
                .unwrap()
                .unwrap();
            assert_eq!(agg.unique_puzzles, 4);
            assert_eq!(agg.total_scans, 4);
            assert_eq!(agg.total_points, 10 + 20 + 30 + 40);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_repeats_against_prior_credit() {
        // Player already scored the puzzle; a concurrent burst of repeats
        // must leave the scoring fields untouched.
        let harness = Arc::new(Harness::new());
        let record = harness
            .vault
            .insert_sealed("Gate", "text", "sol", 25, 1)
            .unwrap();
        let payload = ScanPayload::encode(record.id, record.sealed.key());
        harness
            .scans
            .submit_at(PlayerId(3), &payload, 500)
            .unwrap();

        let mut tasks = Vec::new();
        for i in 0..16u64 {
            let scans = Arc::clone(&harness.scans);
            let payload = payload.clone();
            tasks.push(tokio::task::spawn_blocking(move || {
                scans.submit_at(PlayerId(3), &payload, 1_000 + i).unwrap()
            }));
        }
        for task in tasks {
            assert!(!task.await.unwrap().first_scan);
        }

        let agg = harness.store.aggregate_for(PlayerId(3)).unwrap().unwrap();
        assert_eq!(agg.total_scans, 17);
        assert_eq!(agg.unique_puzzles, 1);
        assert_eq!(agg.total_points, 25);
        assert_eq!(agg.start_time, 500);
    }
}
