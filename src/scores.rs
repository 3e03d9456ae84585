//! Best survival times
//!
//! Top-10 table persisted as JSON next to the binary. Each entry keeps the
//! seed that produced the run, so a notable survival can be replayed.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Maximum number of entries to keep
pub const MAX_ENTRIES: usize = 10;

/// A single recorded run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BestTimeEntry {
    /// Survival time in seconds
    pub seconds: f32,
    /// Seed the run was played with
    pub seed: u64,
}

/// Leaderboard of the longest survivals
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BestTimes {
    pub entries: Vec<BestTimeEntry>,
}

impl BestTimes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a survival time qualifies for the table
    pub fn qualifies(&self, seconds: f32) -> bool {
        if seconds <= 0.0 {
            return false;
        }
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        self.entries
            .last()
            .map(|e| seconds > e.seconds)
            .unwrap_or(true)
    }

    /// Record a run if it qualifies. Returns the 1-indexed rank achieved.
    pub fn record(&mut self, seconds: f32, seed: u64) -> Option<usize> {
        if !self.qualifies(seconds) {
            return None;
        }

        let entry = BestTimeEntry { seconds, seed };
        // Sorted descending by survival time.
        let pos = self.entries.iter().position(|e| seconds > e.seconds);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };
        self.entries.truncate(MAX_ENTRIES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The longest survival so far (if any)
    pub fn top(&self) -> Option<&BestTimeEntry> {
        self.entries.first()
    }

    /// Load the table from a JSON file, starting fresh if it is missing or
    /// unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<BestTimes>(&json) {
                Ok(scores) => {
                    log::info!("Loaded {} best times", scores.entries.len());
                    scores
                }
                Err(err) => {
                    log::warn!("Ignoring malformed best times {}: {err}", path.display());
                    Self::new()
                }
            },
            Err(_) => {
                log::info!("No best times found, starting fresh");
                Self::new()
            }
        }
    }

    /// Save the table. Failures are logged, not fatal.
    pub fn save(&self, path: &Path) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if let Err(err) = fs::write(path, json) {
                    log::warn!("Could not save best times to {}: {err}", path.display());
                } else {
                    log::info!("Best times saved ({} entries)", self.entries.len());
                }
            }
            Err(err) => log::warn!("Could not serialize best times: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_accepts_any_positive_time() {
        let scores = BestTimes::new();
        assert!(scores.qualifies(0.1));
        assert!(!scores.qualifies(0.0));
        assert!(!scores.qualifies(-3.0));
    }

    #[test]
    fn test_record_keeps_descending_order() {
        let mut scores = BestTimes::new();
        assert_eq!(scores.record(10.0, 1), Some(1));
        assert_eq!(scores.record(30.0, 2), Some(1));
        assert_eq!(scores.record(20.0, 3), Some(2));

        let times: Vec<f32> = scores.entries.iter().map(|e| e.seconds).collect();
        assert_eq!(times, vec![30.0, 20.0, 10.0]);
        assert_eq!(scores.top().unwrap().seed, 2);
    }

    #[test]
    fn test_table_truncates_at_capacity() {
        let mut scores = BestTimes::new();
        for i in 1..=MAX_ENTRIES {
            scores.record(i as f32, i as u64);
        }
        // A new worst time no longer qualifies...
        assert!(!scores.qualifies(0.5));
        assert_eq!(scores.record(0.5, 99), None);
        // ...but a new best does, and the table stays at capacity.
        assert_eq!(scores.record(100.0, 99), Some(1));
        assert_eq!(scores.entries.len(), MAX_ENTRIES);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let mut scores = BestTimes::new();
        scores.record(12.5, 7);
        scores.record(3.25, 8);

        let path = std::env::temp_dir().join("drop_dodge_scores_test.json");
        scores.save(&path);
        let loaded = BestTimes::load_or_default(&path);
        let _ = fs::remove_file(&path);

        assert_eq!(loaded.entries, scores.entries);
    }
}
