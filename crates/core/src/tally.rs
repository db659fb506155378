//! Vote tally for the workshop time slot.
//!
//! A tally is always rebuilt from the full set of stored slot values; it is
//! never cached or updated incrementally.

use std::collections::HashMap;

use serde::Serialize;

/// Votes for one distinct slot value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TallyEntry {
    pub interval: String,
    pub votes: u64,
}

/// Slot value → vote count, ordered by votes descending.
///
/// Ties keep the order in which the values were first observed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VoteTally {
    pub entries: Vec<TallyEntry>,
}

impl VoteTally {
    /// Count occurrences of each value in a fetched column.
    pub fn from_slots<I, S>(slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut entries: Vec<TallyEntry> = Vec::new();

        for slot in slots {
            let slot = slot.as_ref();
            match index.get(slot) {
                Some(&i) => entries[i].votes += 1,
                None => {
                    index.insert(slot.to_string(), entries.len());
                    entries.push(TallyEntry {
                        interval: slot.to_string(),
                        votes: 1,
                    });
                }
            }
        }

        Self::ordered(entries)
    }

    /// Build a tally from counts that were already grouped by the store.
    ///
    /// Non-positive counts are dropped.
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (String, i64)>,
    {
        let entries = counts
            .into_iter()
            .filter_map(|(interval, count)| {
                u64::try_from(count)
                    .ok()
                    .filter(|votes| *votes > 0)
                    .map(|votes| TallyEntry { interval, votes })
            })
            .collect();

        Self::ordered(entries)
    }

    fn ordered(mut entries: Vec<TallyEntry>) -> Self {
        // Stable, so ties stay in first-seen order.
        entries.sort_by(|a, b| b.votes.cmp(&a.votes));
        Self { entries }
    }

    pub fn votes_for(&self, interval: &str) -> u64 {
        self.entries
            .iter()
            .find(|e| e.interval == interval)
            .map_or(0, |e| e.votes)
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.votes).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
