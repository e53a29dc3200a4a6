//! Gamma correction control
//!
//! Exposure needs a linear output, so gamma correction has to be off.
//! The controller does not always take the command on the first try.

use embedded_hal::delay::DelayNs;
use log::{info, warn};
use lumen_hal::RegisterBus;

use super::device::Dlpc350;
use super::error::ProjectorError;
use super::reg::{addr, value};
use super::status::MainStatus;

impl<B, D> Dlpc350<B, D>
where
    B: RegisterBus,
    D: DelayNs,
{
    /// Disable gamma correction
    ///
    /// Each attempt writes the disable command and reads back MAIN_STATUS.
    /// A failed transaction only ends the current attempt. Returns
    /// [`ProjectorError::GammaStillEnabled`] if no attempt reads back
    /// gamma as disabled.
    pub fn disable_gamma(&mut self) -> Result<(), ProjectorError> {
        if !self.is_controllable() {
            return Ok(());
        }

        for attempt in 1..=self.config.max_gamma_attempts {
            info!("Disabling projector gamma correction ({})", attempt);

            if self.write(addr::GAMMA, value::GAMMA_DISABLE).is_err() {
                continue;
            }

            if let Ok(raw) = self.poll(addr::MAIN_STATUS) {
                if !MainStatus::from_register(raw).gamma_enabled {
                    return Ok(());
                }
            }
        }

        warn!(
            "Gamma correction still enabled after {} attempts",
            self.config.max_gamma_attempts
        );
        Err(ProjectorError::GammaStillEnabled)
    }
}
