//! Brick breaker best score
//!
//! A single integer persisted under a fixed key so an existing browser
//! profile keeps its record.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, load_json, save_json};

/// Best brick breaker score seen on this device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScore {
    pub value: u32,
}

impl BestScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "brickBreaker_highScore";

    pub fn new(value: u32) -> Self {
        Self { value }
    }

    /// Strictly beats the current record
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.value
    }

    /// Take `score` as the new record if it qualifies
    pub fn record(&mut self, score: u32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.value = score;
        true
    }

    /// Load the stored record, starting from 0 when absent or unreadable
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match load_json::<u32>(store, Self::STORAGE_KEY) {
            Some(value) => {
                log::info!("Loaded best score {}", value);
                Self::new(value)
            }
            None => {
                log::info!("No best score found, starting fresh");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        save_json(store, Self::STORAGE_KEY, &self.value);
        log::info!("Best score saved ({})", self.value);
    }
}
