//! Leaderboard determinism over populated stores.

#[cfg(test)]
mod tests {
    use crate::integration::Harness;
    use hunt_crypto::ScanPayload;
    use hunt_engine::LeaderboardQuery;
    use hunt_types::PlayerId;

    /// Seeds three puzzles and returns their payloads (10, 20, 100 points).
    fn seed_puzzles(harness: &Harness) -> Vec<String> {
        [("A", 10u64), ("B", 20), ("C", 100)]
            .iter()
            .enumerate()
            .map(|(i, (title, points))| {
                let record = harness
                    .vault
                    .insert_sealed(title, "text", "sol", *points, i as u32)
                    .unwrap();
                ScanPayload::encode(record.id, record.sealed.key())
            })
            .collect()
    }

    #[test]
    fn test_equal_scores_rank_by_earlier_finish() {
        let harness = Harness::new();
        let payloads = seed_puzzles(&harness);
        harness.register_player(1, "Ada", "CSE");
        harness.register_player(2, "Grace", "CSE");

        // Identical points and puzzle counts; player 2 finishes earlier.
        for player in [1u64, 2] {
            for (i, payload) in payloads.iter().enumerate() {
                harness
                    .scans
                    .submit_at(PlayerId(player), payload, 1_000 + i as u64)
                    .unwrap();
            }
        }
        harness.progress.complete_at(PlayerId(1), 90_000).unwrap();
        harness.progress.complete_at(PlayerId(2), 50_000).unwrap();

        let page = harness
            .board
            .page(&LeaderboardQuery::default())
            .unwrap();
        assert_eq!(page.entries[0].player.id, PlayerId(2));
        assert_eq!(page.entries[0].rank, 1);
        assert_eq!(page.entries[1].player.id, PlayerId(1));
        assert_eq!(page.entries[1].rank, 2);

        assert_eq!(harness.board.rank_of(PlayerId(2)).unwrap(), Some(1));
        assert_eq!(harness.board.rank_of(PlayerId(1)).unwrap(), Some(2));
    }

    #[test]
    fn test_rank_of_agrees_with_page_across_a_field() {
        let harness = Harness::new();
        let payloads = seed_puzzles(&harness);

        // Players scan staggered prefixes of the puzzle list, so scores
        // and puzzle counts differ; all complete at distinct times.
        for player in 1..=6u64 {
            harness.register_player(player, "P", "D");
            let prefix = ((player as usize - 1) % 3) + 1;
            for (i, payload) in payloads.iter().take(prefix).enumerate() {
                harness
                    .scans
                    .submit_at(PlayerId(player), payload, 1_000 + i as u64)
                    .unwrap();
            }
            harness
                .progress
                .complete_at(PlayerId(player), 10_000 + player * 1_000)
                .unwrap();
        }

        let page = harness
            .board
            .page(&LeaderboardQuery::default())
            .unwrap();
        assert_eq!(page.total, 6);
        for entry in &page.entries {
            assert_eq!(
                harness.board.rank_of(entry.player.id).unwrap(),
                Some(entry.rank),
                "page and counting query disagree for {:?}",
                entry.player.id
            );
        }
        // Ranks are the consecutive positions.
        let ranks: Vec<_> = page.entries.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, (1..=6).collect::<Vec<u64>>());
    }

    #[test]
    fn test_paging_slices_one_consistent_order() {
        let harness = Harness::new();
        let payloads = seed_puzzles(&harness);
        for player in 1..=5u64 {
            harness.register_player(player, "P", "D");
            harness
                .scans
                .submit_at(PlayerId(player), &payloads[0], 1_000)
                .unwrap();
            harness
                .progress
                .complete_at(PlayerId(player), 10_000 + player * 500)
                .unwrap();
        }

        let full = harness
            .board
            .page(&LeaderboardQuery::default())
            .unwrap();
        let second_page = harness
            .board
            .page(&LeaderboardQuery {
                limit: Some(2),
                offset: 2,
                requesting_player: None,
            })
            .unwrap();

        assert_eq!(second_page.entries.len(), 2);
        assert_eq!(second_page.entries[0].rank, 3);
        assert_eq!(
            second_page.entries[0].player.id,
            full.entries[2].player.id
        );
        assert_eq!(second_page.total, full.total);
    }

    #[test]
    fn test_incomplete_and_zero_puzzle_runs_never_rank() {
        let harness = Harness::new();
        let payloads = seed_puzzles(&harness);
        harness.register_player(1, "Ada", "CSE");
        harness.register_player(2, "Grace", "CSE");

        // Player 1 scans but never completes; player 2 completes.
        harness
            .scans
            .submit_at(PlayerId(1), &payloads[2], 1_000)
            .unwrap();
        harness
            .scans
            .submit_at(PlayerId(2), &payloads[0], 1_000)
            .unwrap();
        harness.progress.complete_at(PlayerId(2), 5_000).unwrap();

        let page = harness
            .board
            .page(&LeaderboardQuery {
                limit: None,
                offset: 0,
                requesting_player: Some(PlayerId(1)),
            })
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.entries[0].player.id, PlayerId(2));
        // The incomplete viewer has no rank, even with the higher score.
        assert_eq!(page.current_player_rank, None);
    }

    #[test]
    fn test_leaderboard_row_durations() {
        let harness = Harness::new();
        let payloads = seed_puzzles(&harness);
        harness.register_player(1, "Ada", "CSE");
        harness
            .scans
            .submit_at(PlayerId(1), &payloads[0], 10_000)
            .unwrap();
        harness.progress.complete_at(PlayerId(1), 95_500).unwrap();

        let page = harness
            .board
            .page(&LeaderboardQuery::default())
            .unwrap();
        let row = &page.entries[0];
        assert_eq!(row.duration_seconds, Some(85));
        assert_eq!(row.completed_at, Some(95_500));
        assert_eq!(row.total_points, 10);
    }
}
