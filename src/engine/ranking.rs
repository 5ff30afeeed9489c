//! Diversity-constrained selection
//!
//! Walks score-sorted candidates under a per-category admission cap, then
//! relaxes the caps in bounded rounds when catalog scarcity would otherwise
//! leave slots unfilled.

use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::models::ScoredCandidate;

/// Outcome of the diversity walk
pub struct Selection {
    pub selected: Vec<ScoredCandidate>,
    pub relaxation_rounds: usize,
}

/// Per-category admission cap for one batch
///
/// The 50% base ceiling is never tightened; it only widens as the user's
/// effective diversity preference rises.
pub fn category_cap(count: usize, diversity_preference: f64) -> usize {
    (count as f64 * diversity_preference.max(0.5)).ceil() as usize
}

/// Select up to `count` candidates from a score-sorted list under the
/// diversity cap, relaxing by +1 per round when the walk runs dry
pub fn diversity_select(
    sorted: Vec<ScoredCandidate>,
    count: usize,
    diversity_preference: f64,
) -> Selection {
    let base_cap = category_cap(count, diversity_preference);

    // Once the cap reaches `count` nothing can be blocked, so the walk needs
    // at most count - base_cap rounds to fill from a scarce catalog
    let distinct_categories = sorted
        .iter()
        .flat_map(|c| c.record.categories.iter().map(String::as_str))
        .collect::<HashSet<&str>>()
        .len();
    let max_rounds = distinct_categories.max(count.saturating_sub(base_cap));

    let mut selected: Vec<ScoredCandidate> = Vec::with_capacity(count.min(sorted.len()));
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut remaining = sorted;
    let mut rounds = 0;

    loop {
        let cap = base_cap + rounds;
        let mut skipped = Vec::new();

        for candidate in remaining {
            if selected.len() >= count {
                break;
            }
            let admissible = candidate
                .record
                .categories
                .iter()
                .all(|c| counts.get(c).copied().unwrap_or(0) < cap);

            if admissible {
                for category in &candidate.record.categories {
                    *counts.entry(category.clone()).or_insert(0) += 1;
                }
                selected.push(candidate);
            } else {
                skipped.push(candidate);
            }
        }

        if selected.len() >= count || skipped.is_empty() || rounds >= max_rounds {
            if rounds > 0 {
                debug!(
                    "Diversity caps relaxed {} round(s) to fill {}/{} slots",
                    rounds,
                    selected.len(),
                    count
                );
            }
            return Selection {
                selected,
                relaxation_rounds: rounds,
            };
        }

        remaining = skipped;
        rounds += 1;
    }
}
