//! Printer settings access

use core::cell::RefCell;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Keys for integer printer settings
///
/// Only the settings read by drivers live here; job and network settings
/// are owned by the firmware's settings store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum SettingKey {
    /// Projector LED drive current (raw DLPC350 current byte, 0 = leave as is)
    ProjectorLedCurrent = 0,
}

impl SettingKey {
    /// Get the key as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a key from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(SettingKey::ProjectorLedCurrent),
            _ => None,
        }
    }
}

/// Read access to the printer settings store
///
/// Drivers call this every time they need a value so that a change to the
/// store takes effect on the next operation without a restart.
pub trait SettingsProvider {
    /// Read an integer setting
    ///
    /// Returns 0 for keys that have no stored value.
    fn get_int(&self, key: SettingKey) -> i32;
}

impl<T: SettingsProvider + ?Sized> SettingsProvider for &T {
    fn get_int(&self, key: SettingKey) -> i32 {
        (**self).get_int(key)
    }
}

// Lets a single-threaded firmware update settings while a driver holds a
// shared reference to the store. A store that is mid-update reads as unset.
impl<T: SettingsProvider> SettingsProvider for RefCell<T> {
    fn get_int(&self, key: SettingKey) -> i32 {
        self.try_borrow().map(|s| s.get_int(key)).unwrap_or(0)
    }
}
