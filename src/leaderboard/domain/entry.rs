//! Leaderboard rows and their ordering.

use serde::Serialize;
use std::cmp::Ordering;

/// One ranked user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LeaderboardEntry {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Tasks with status `Completed`.
    pub completed: u64,
    /// Tasks with any other status.
    pub incomplete: u64,
}

/// Orders entries by completed count descending, then name ascending.
///
/// Email breaks any remaining tie so the order is total.
#[must_use]
pub fn rank(mut entries: Vec<LeaderboardEntry>) -> Vec<LeaderboardEntry> {
    entries.sort_by(compare);
    entries
}

fn compare(left: &LeaderboardEntry, right: &LeaderboardEntry) -> Ordering {
    right
        .completed
        .cmp(&left.completed)
        .then_with(|| left.name.cmp(&right.name))
        .then_with(|| left.email.cmp(&right.email))
}
