//! DLPC350 command bus access
//!
//! [`Dlpc350`] owns the register bus, the delay source and the bus-absence
//! flag. The illumination, gamma and display-mode operations are
//! implemented on it in their own modules.

use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};
use lumen_core::config::ProjectorConfig;
use lumen_hal::RegisterBus;

use super::error::ProjectorError;
use super::reg::{addr, status};
use super::status::{HardwareStatus, MainStatus, ProjectorStatus, SystemStatus};

/// DLPC350 projector controller on a register bus
///
/// When the probe at construction finds no controller on the bus, every
/// operation that would touch the bus returns `Ok(())` without issuing a
/// transaction, so the printer can still run on boards without the
/// projector's I2C link.
pub struct Dlpc350<B, D> {
    pub(super) bus: B,
    pub(super) delay: D,
    pub(super) config: ProjectorConfig,
    controllable: bool,
}

impl<B, D> Dlpc350<B, D>
where
    B: RegisterBus,
    D: DelayNs,
{
    /// Probe the bus and create the controller
    ///
    /// The probe is a single plain read of the hardware status register;
    /// its outcome is never re-evaluated.
    pub fn new(mut bus: B, delay: D, config: ProjectorConfig) -> Self {
        let controllable = bus.read(addr::HW_STATUS).is_ok();
        if !controllable {
            info!("No I2C connection to projector");
        }

        Self {
            bus,
            delay,
            config,
            controllable,
        }
    }

    /// Whether the projector answered the probe
    pub fn is_controllable(&self) -> bool {
        self.controllable
    }

    /// Get the configuration
    pub fn config(&self) -> &ProjectorConfig {
        &self.config
    }

    /// Release the bus and delay
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    /// Read and decode all three status registers
    ///
    /// Returns `Ok(None)` when the projector is not controllable.
    pub fn read_status(&mut self) -> Result<Option<ProjectorStatus>, ProjectorError> {
        if !self.controllable {
            return Ok(None);
        }

        let hardware = HardwareStatus::from_register(self.poll(addr::HW_STATUS)?);
        let system = SystemStatus::from_register(self.poll(addr::SYSTEM_STATUS)?);
        let main = MainStatus::from_register(self.poll(addr::MAIN_STATUS)?);

        Ok(Some(ProjectorStatus {
            hardware,
            system,
            main,
        }))
    }

    pub(super) fn write(&mut self, reg: u8, value: u8) -> Result<(), ProjectorError> {
        self.bus.write(reg, value).map_err(|e| {
            warn!("Projector write to 0x{:02X} failed: {:?}", reg, e);
            ProjectorError::Bus
        })
    }

    pub(super) fn write_block(&mut self, reg: u8, data: &[u8]) -> Result<(), ProjectorError> {
        self.bus.write_block(reg, data).map_err(|e| {
            warn!("Projector block write to 0x{:02X} failed: {:?}", reg, e);
            ProjectorError::Bus
        })
    }

    /// Ready-poll a status register
    pub(super) fn poll(&mut self, reg: u8) -> Result<u8, ProjectorError> {
        match self.bus.read_when_ready(reg, status::READY) {
            Ok(value) => {
                debug!("Projector register 0x{:02X} = 0x{:02X}", reg, value);
                Ok(value)
            }
            Err(e) => {
                warn!("Projector read of 0x{:02X} failed: {:?}", reg, e);
                Err(ProjectorError::Bus)
            }
        }
    }

    /// Wait out the controller's command settle time
    pub(super) fn settle(&mut self) {
        self.delay.delay_ms(self.config.settle_ms);
    }

    pub(super) fn write_settled(&mut self, reg: u8, value: u8) -> Result<(), ProjectorError> {
        self.write(reg, value)?;
        self.settle();
        Ok(())
    }

    pub(super) fn write_block_settled(&mut self, reg: u8, data: &[u8]) -> Result<(), ProjectorError> {
        self.write_block(reg, data)?;
        self.settle();
        Ok(())
    }
}
