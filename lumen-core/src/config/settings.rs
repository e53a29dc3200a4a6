//! In-memory settings store
//!
//! Used during bring-up before the persistent store is mounted, and as the
//! settings double in driver tests.

use heapless::LinearMap;

use crate::traits::{SettingKey, SettingsProvider};

/// Maximum number of integer settings held in memory
pub const MAX_INT_SETTINGS: usize = 8;

/// Settings store backed by a fixed-capacity map
#[derive(Debug, Clone, Default)]
pub struct InMemorySettings {
    values: LinearMap<SettingKey, i32, MAX_INT_SETTINGS>,
}

impl InMemorySettings {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            values: LinearMap::new(),
        }
    }

    /// Create a store with the projector LED current preset
    pub fn with_led_current(current: i32) -> Self {
        let mut settings = Self::new();
        settings.set_int(SettingKey::ProjectorLedCurrent, current);
        settings
    }

    /// Store an integer setting, replacing any previous value
    pub fn set_int(&mut self, key: SettingKey, value: i32) {
        // Every key fits: the map is sized for the whole key space
        let _ = self.values.insert(key, value);
    }

    /// Remove a setting so that it reads as unset
    pub fn clear(&mut self, key: SettingKey) {
        self.values.remove(&key);
    }
}

impl SettingsProvider for InMemorySettings {
    fn get_int(&self, key: SettingKey) -> i32 {
        self.values.get(&key).copied().unwrap_or(0)
    }
}
