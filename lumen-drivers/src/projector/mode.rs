//! Display mode control
//!
//! Pattern mode is entered by programming a one-entry pattern LUT, having
//! the controller validate it and then starting the sequence. Validate,
//! status poll and start are shared with the re-trigger used before
//! every exposure.
//!
//! No current mode is stored. Each operation issues its commands
//! regardless of what the controller was last told.

use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};
use lumen_core::config::StatusCheck;
use lumen_hal::RegisterBus;

use super::device::Dlpc350;
use super::error::ProjectorError;
use super::reg::{addr, pattern, value, VALIDATE_COMMAND_FLAG};
use super::status::{HardwareStatus, MainStatus, StatusRegister, SystemStatus, ValidateStatus};

/// Projector display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// Continuous video from the frame buffer
    Video,
    /// LUT-driven pattern sequence
    Pattern,
}

impl DisplayMode {
    /// Value written to DISPLAY_MODE
    pub const fn register_value(self) -> u8 {
        match self {
            DisplayMode::Video => value::DISPLAY_MODE_VIDEO,
            DisplayMode::Pattern => value::DISPLAY_MODE_PATTERN,
        }
    }
}

impl<B, D> Dlpc350<B, D>
where
    B: RegisterBus,
    D: DelayNs,
{
    /// Configure pattern mode from scratch and start the sequence
    ///
    /// Every command is followed by the settle delay. If validation or the
    /// status poll fails the controller is left partly configured.
    pub fn enter_pattern_mode(&mut self) -> Result<(), ProjectorError> {
        if !self.is_controllable() {
            return Ok(());
        }

        info!("Entering projector pattern mode");
        self.settle();

        self.set_display_mode(DisplayMode::Pattern)?;
        self.settle();
        self.write_settled(addr::PATTERN_SOURCE, value::PATTERN_SOURCE_VIDEO)?;
        self.write_block_settled(addr::PATTERN_LUT_CTL, &pattern::LUT_CONTROL)?;
        self.write_settled(addr::PATTERN_TRIGGER, value::TRIGGER_MODE_0)?;
        self.write_block_settled(addr::PATTERN_TIMES, &pattern::times())?;

        // LUT mailbox
        self.write_settled(addr::PATTERN_LUT_ACCESS, value::LUT_ACCESS_PATTERN)?;
        self.write_settled(addr::PATTERN_LUT_OFFSET, 0)?;
        self.write_block_settled(addr::PATTERN_LUT_DATA, &pattern::LUT_ENTRY)?;
        self.write_settled(addr::PATTERN_LUT_ACCESS, value::LUT_ACCESS_CLOSED)?;

        self.validate_and_start()
    }

    /// Restart the already programmed pattern sequence
    ///
    /// Assumes a previous [`enter_pattern_mode`](Self::enter_pattern_mode)
    /// left the LUT resident on the controller.
    pub fn retrigger_pattern_mode(&mut self) -> Result<(), ProjectorError> {
        if !self.is_controllable() {
            return Ok(());
        }

        self.validate_and_start()
    }

    /// Switch back to video mode and make sure gamma stays off
    pub fn enter_video_mode(&mut self) -> Result<(), ProjectorError> {
        if !self.is_controllable() {
            return Ok(());
        }

        info!("Entering projector video mode");
        self.set_display_mode(DisplayMode::Video)?;
        self.poll_status()?;

        self.disable_gamma()
    }

    fn set_display_mode(&mut self, mode: DisplayMode) -> Result<(), ProjectorError> {
        self.write(addr::DISPLAY_MODE, mode.register_value())
    }

    fn validate_and_start(&mut self) -> Result<(), ProjectorError> {
        self.write(addr::VALIDATE | VALIDATE_COMMAND_FLAG, 0)?;
        self.wait_for_validation()?;

        self.settle();
        self.poll_status()?;
        self.settle();

        self.write(addr::PATTERN_START, value::PATTERN_START)
    }

    /// Poll the validation status until the controller is done
    fn wait_for_validation(&mut self) -> Result<(), ProjectorError> {
        let attempts = self.config.max_validate_attempts;

        for attempt in 1..=attempts {
            self.delay.delay_ms(self.config.validate_poll_interval_ms);

            let validate = ValidateStatus::from_register(self.poll(addr::VALIDATE)?);
            if validate.is_busy() {
                debug!("Pattern validation busy ({}/{})", attempt, attempts);
                continue;
            }
            if validate.is_invalid() {
                warn!("Pattern validation failed: 0x{:02X}", validate.raw);
                return Err(ProjectorError::ValidationRejected(validate));
            }

            if validate.has_warnings() {
                warn!("Pattern validation warnings: 0x{:02X}", validate.raw);
            }
            info!("Pattern validation complete");
            return Ok(());
        }

        warn!("Pattern validation still busy after {} polls", attempts);
        Err(ProjectorError::ValidationTimeout)
    }

    /// Read the three status registers after a mode change
    ///
    /// In [`StatusCheck::Lenient`] mode the values are only logged.
    fn poll_status(&mut self) -> Result<(), ProjectorError> {
        let strict = self.config.status_check == StatusCheck::Strict;

        self.settle();
        let hardware = self.poll_logged(addr::HW_STATUS, "hardware");
        self.settle();
        let system = self.poll_logged(addr::SYSTEM_STATUS, "system");
        self.settle();
        let main = self.poll_logged(addr::MAIN_STATUS, "main");

        if !strict {
            return Ok(());
        }

        if !HardwareStatus::from_register(hardware?).is_healthy() {
            return Err(ProjectorError::StatusFault(StatusRegister::Hardware));
        }
        if !SystemStatus::from_register(system?).memory_ok {
            return Err(ProjectorError::StatusFault(StatusRegister::System));
        }
        if !MainStatus::from_register(main?).is_displaying() {
            return Err(ProjectorError::StatusFault(StatusRegister::Main));
        }

        Ok(())
    }

    fn poll_logged(&mut self, reg: u8, name: &str) -> Result<u8, ProjectorError> {
        let result = self.poll(reg);
        if let Ok(raw) = result {
            info!("Projector {} status: 0x{:02X}", name, raw);
        }
        result
    }
}
