//! Game settings and preferences
//!
//! Persisted separately from the best score, as one JSON blob.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_FRAME_DT;
use crate::persistence::{KeyValueStore, load_json, save_json};
use crate::tuning::{BreakoutTuning, HockeyTuning};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Cap on a single frame's delta time in seconds. `None` lets a long
    /// stall through as one big step.
    pub max_frame_dt: Option<f32>,

    // === Balance ===
    pub breakout: BreakoutTuning,
    pub hockey: HockeyTuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_frame_dt: Some(MAX_FRAME_DT),
            breakout: BreakoutTuning::default(),
            hockey: HockeyTuning::default(),
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "neon_arcade_settings";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(store: &dyn KeyValueStore) -> Self {
        if let Some(settings) = load_json(store, Self::STORAGE_KEY) {
            log::info!("Loaded settings");
            return settings;
        }
        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        save_json(store, Self::STORAGE_KEY, self);
        log::info!("Settings saved");
    }
}
