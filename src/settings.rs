//! Game settings and preferences
//!
//! Each setting is persisted under its own key in a [`KeyValueStore`].

use serde::{Deserialize, Serialize};

use crate::levels::LevelSource;
use crate::persistence::{KeyValueStore, StoreError, get_bool, set_bool};

/// Game settings/preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// All sound muted
    pub sound_muted: bool,
    /// Play generated levels instead of the configured ones
    pub procedural_levels: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_muted: false,
            procedural_levels: true,
        }
    }
}

impl Settings {
    const SOUND_MUTED_KEY: &'static str = "bb_soundMuted";
    const PROCEDURAL_KEY: &'static str = "bb_useProceduralLevels";

    /// Level source selected by these settings
    pub fn level_source(&self) -> LevelSource {
        LevelSource::from_procedural_flag(self.procedural_levels)
    }

    /// Flip mute, returning the new state
    pub fn toggle_sound(&mut self) -> bool {
        self.sound_muted = !self.sound_muted;
        self.sound_muted
    }

    /// Flip the level source, returning the new one
    pub fn toggle_level_source(&mut self) -> LevelSource {
        self.procedural_levels = !self.procedural_levels;
        self.level_source()
    }

    /// Load settings; missing or unreadable keys keep their defaults
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let defaults = Self::default();
        let settings = Self {
            sound_muted: get_bool(store, Self::SOUND_MUTED_KEY).unwrap_or(defaults.sound_muted),
            procedural_levels: get_bool(store, Self::PROCEDURAL_KEY)
                .unwrap_or(defaults.procedural_levels),
        };
        log::info!("Loaded settings: {:?}", settings);
        settings
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        set_bool(store, Self::SOUND_MUTED_KEY, self.sound_muted)?;
        set_bool(store, Self::PROCEDURAL_KEY, self.procedural_levels)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Load, change and write back in one step, returning the stored settings
    pub fn update(
        store: &mut dyn KeyValueStore,
        change: impl FnOnce(&mut Settings),
    ) -> Result<Settings, StoreError> {
        let mut settings = Self::load(store);
        change(&mut settings);
        settings.save(store)?;
        Ok(settings)
    }
}
