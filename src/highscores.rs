//! Best score tracking
//!
//! Persisted as a decimal string so older saves stay readable.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, StoreError};

/// Best score reached on this device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    const STORAGE_KEY: &'static str = "bb_highscore";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Check if a score beats the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a score; returns true if it is a new best
    pub fn record(&mut self, score: u64) -> bool {
        if self.qualifies(score) {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Load the best score; missing or unreadable values count as 0
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get_item(Self::STORAGE_KEY) {
            Ok(Some(raw)) => match raw.trim().parse::<u64>() {
                Ok(best) => {
                    log::info!("Loaded high score {}", best);
                    Self { best }
                }
                Err(_) => {
                    log::warn!("Ignoring unreadable high score {:?}", raw);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
            Err(err) => {
                log::warn!("Could not read high score: {}", err);
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        store.set_item(Self::STORAGE_KEY, &self.best.to_string())?;
        log::info!("High score saved ({})", self.best);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_record_only_improvements() {
        let mut high = HighScore::new(100);
        assert!(!high.record(100));
        assert!(!high.record(50));
        assert!(high.record(101));
        assert_eq!(high.best, 101);
    }

    #[test]
    fn test_persistence() {
        let mut store = MemoryStore::new();
        assert_eq!(HighScore::load(&store), HighScore::default());

        HighScore::new(4200).save(&mut store).unwrap();
        assert_eq!(store.get_item("bb_highscore").unwrap().as_deref(), Some("4200"));
        assert_eq!(HighScore::load(&store).best, 4200);

        store.set_item("bb_highscore", "lots").unwrap();
        assert_eq!(HighScore::load(&store).best, 0);
    }
}
