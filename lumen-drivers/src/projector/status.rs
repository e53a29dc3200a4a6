//! Status register decoding
//!
//! Each status read yields a raw byte that is decoded into independent
//! flags. Decoded values are transient; nothing here is cached between
//! operations.

use super::reg::status;

/// Which status register a fault was reported by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusRegister {
    /// HW_STATUS
    Hardware,
    /// SYSTEM_STATUS
    System,
    /// MAIN_STATUS
    Main,
}

/// Parsed HW_STATUS register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HardwareStatus {
    /// Raw register value
    pub raw: u8,
    /// Internal initialization completed
    pub init_done: bool,
    /// Any hardware error flag set
    pub error: bool,
}

impl HardwareStatus {
    /// Parse from raw HW_STATUS register value
    pub fn from_register(value: u8) -> Self {
        Self {
            raw: value,
            init_done: value & status::HW_INIT_DONE != 0,
            error: value & status::HW_ERROR != 0,
        }
    }

    /// Initialized and no error flags
    pub fn is_healthy(&self) -> bool {
        self.init_done && !self.error
    }
}

/// Parsed SYSTEM_STATUS register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SystemStatus {
    /// Raw register value
    pub raw: u8,
    /// Internal memory test passed
    pub memory_ok: bool,
}

impl SystemStatus {
    /// Parse from raw SYSTEM_STATUS register value
    pub fn from_register(value: u8) -> Self {
        Self {
            raw: value,
            memory_ok: value & status::SYSTEM_MEMORY_OK != 0,
        }
    }
}

/// Parsed MAIN_STATUS register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MainStatus {
    /// Raw register value
    pub raw: u8,
    /// DMD micromirrors parked
    pub dmd_parked: bool,
    /// Sequencer running
    pub sequencer_running: bool,
    /// Frame buffer swap pending
    pub swap_pending: bool,
    /// Gamma correction enabled
    pub gamma_enabled: bool,
}

impl MainStatus {
    /// Parse from raw MAIN_STATUS register value
    pub fn from_register(value: u8) -> Self {
        Self {
            raw: value,
            dmd_parked: value & status::MAIN_DMD_PARKED != 0,
            sequencer_running: value & status::MAIN_SEQUENCER_RUN != 0,
            swap_pending: value & status::MAIN_FB_SWAP != 0,
            gamma_enabled: value & status::MAIN_GAMMA_ENABLED != 0,
        }
    }

    /// Sequencer running with no swap outstanding
    pub fn is_displaying(&self) -> bool {
        self.sequencer_running && !self.swap_pending
    }
}

/// Parsed VALIDATE status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ValidateStatus {
    /// Raw register value
    pub raw: u8,
}

impl ValidateStatus {
    /// Parse from raw VALIDATE register value
    pub fn from_register(value: u8) -> Self {
        Self { raw: value }
    }

    /// Validation still running
    pub fn is_busy(&self) -> bool {
        self.raw & status::VALIDATE_BUSY != 0
    }

    /// Device rejected the programmed sequence
    pub fn is_invalid(&self) -> bool {
        self.raw & status::VALIDATE_INVALID != 0
    }

    /// Sequence accepted with warnings
    pub fn has_warnings(&self) -> bool {
        self.raw & status::VALIDATE_WARNINGS != 0
    }
}

/// Snapshot of all three status registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProjectorStatus {
    /// HW_STATUS
    pub hardware: HardwareStatus,
    /// SYSTEM_STATUS
    pub system: SystemStatus,
    /// MAIN_STATUS
    pub main: MainStatus,
}
