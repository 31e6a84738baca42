//! # Leaderboard Ranking
//!
//! Deterministic ordering over completed aggregates:
//!
//! 1. `total_points` descending
//! 2. `unique_puzzles` descending
//! 3. `end_time` ascending (earlier finish wins among equal scorers)
//!
//! This is a strict weak ordering: two aggregates compare equal only when
//! all three keys match. A single player's rank is a counting query over
//! strict predecessors, so it never materializes the full order.

use hunt_types::{PlayerId, ProgressAggregate};
use std::cmp::Ordering;

/// Whether an aggregate participates in ranking at all.
///
/// Only completed runs with at least one scored puzzle are ranked.
pub fn is_ranked(aggregate: &ProgressAggregate) -> bool {
    aggregate.is_completed && aggregate.unique_puzzles > 0 && aggregate.end_time.is_some()
}

/// The three-key ranking predicate.
///
/// `Less` means `a` ranks strictly above `b`. Both inputs must satisfy
/// [`is_ranked`]; an absent `end_time` sorts last defensively but cannot
/// occur for ranked aggregates.
pub fn rank_order(a: &ProgressAggregate, b: &ProgressAggregate) -> Ordering {
    b.total_points
        .cmp(&a.total_points)
        .then_with(|| b.unique_puzzles.cmp(&a.unique_puzzles))
        .then_with(|| {
            a.end_time
                .unwrap_or(u64::MAX)
                .cmp(&b.end_time.unwrap_or(u64::MAX))
        })
}

/// Sorts the ranked subset and returns one page of `(rank, player,
/// aggregate)` rows, with `rank = offset + position + 1`, plus the total
/// count of ranked aggregates.
///
/// Ties on all three keys keep the input order (stable sort), matching
/// what the counting query in [`rank_of`] assigns them.
pub fn ranked_page(
    rows: &[(PlayerId, ProgressAggregate)],
    limit: usize,
    offset: usize,
) -> (Vec<(u64, PlayerId, ProgressAggregate)>, u64) {
    let mut ranked: Vec<&(PlayerId, ProgressAggregate)> =
        rows.iter().filter(|(_, agg)| is_ranked(agg)).collect();
    ranked.sort_by(|a, b| rank_order(&a.1, &b.1));
    let total = ranked.len() as u64;

    let page = ranked
        .into_iter()
        .skip(offset)
        .take(limit)
        .enumerate()
        .map(|(i, (player, agg))| ((offset + i) as u64 + 1, *player, agg.clone()))
        .collect();
    (page, total)
}

/// Rank of one player: 1 + the number of ranked aggregates that strictly
/// precede theirs. `None` when the player's aggregate is absent or not
/// ranked.
///
/// Counts without sorting, so it stays a single pass over the snapshot.
pub fn rank_of(rows: &[(PlayerId, ProgressAggregate)], player: PlayerId) -> Option<u64> {
    let mine = rows
        .iter()
        .find(|(p, agg)| *p == player && is_ranked(agg))
        .map(|(_, agg)| agg)?;

    let ahead = rows
        .iter()
        .filter(|(p, agg)| *p != player && is_ranked(agg))
        .filter(|(_, agg)| rank_order(agg, mine) == Ordering::Less)
        .count() as u64;
    Some(ahead + 1)
}
