//! Projector control configuration
//!
//! Timing and policy knobs for the DLPC350 projector driver. The defaults
//! follow the bring-up sequence in the PRO DLPC350 Programmer's Guide and
//! should not need changing on production hardware.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default 7-bit I2C address of the DLPC350
pub const DLPC350_I2C_ADDRESS: u8 = 0x1B;

/// How strictly the status poll after a mode change is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StatusCheck {
    /// Log the status registers and always report success
    #[default]
    Lenient,
    /// Fail on init/hardware errors, a stopped sequencer or a pending
    /// frame buffer swap
    Strict,
}

/// Projector driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProjectorConfig {
    /// I2C address of the projector controller
    pub i2c_address: u8,
    /// Settle delay after each register write of a mode change (ms)
    pub settle_ms: u32,
    /// Wait before each read of the validate status (ms)
    pub validate_poll_interval_ms: u32,
    /// Maximum validate status reads before giving up
    pub max_validate_attempts: u8,
    /// Maximum write/poll rounds when disabling gamma correction
    pub max_gamma_attempts: u8,
    /// Status poll policy
    pub status_check: StatusCheck,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self::DLPC350
    }
}

impl ProjectorConfig {
    /// Settings for the DLPC350 as shipped on the printer
    pub const DLPC350: Self = Self {
        i2c_address: DLPC350_I2C_ADDRESS,
        settle_ms: 100,
        validate_poll_interval_ms: 1000,
        max_validate_attempts: 20,
        max_gamma_attempts: 5,
        status_check: StatusCheck::Lenient,
    };

    /// Same timing with the strict status poll enabled
    pub const fn strict(self) -> Self {
        Self {
            status_check: StatusCheck::Strict,
            ..self
        }
    }

    /// Worst-case time spent waiting in the validate loop (ms)
    pub fn max_validate_wait_ms(&self) -> u32 {
        self.validate_poll_interval_ms
            .saturating_mul(self.max_validate_attempts as u32)
    }
}
