//! LED illumination control

use embedded_hal::delay::DelayNs;
use lumen_core::traits::{SettingKey, SettingsProvider};
use lumen_hal::RegisterBus;

use super::device::Dlpc350;
use super::error::ProjectorError;
use super::reg::{addr, value};

/// Convert the configured LED current to the register byte
///
/// Values above the register range saturate at 255.
pub fn led_current_byte(current: i32) -> u8 {
    current.clamp(0, u8::MAX as i32) as u8
}

impl<B, D> Dlpc350<B, D>
where
    B: RegisterBus,
    D: DelayNs,
{
    /// Turn the projector's LEDs off
    pub fn turn_led_off(&mut self) -> Result<(), ProjectorError> {
        if !self.is_controllable() {
            return Ok(());
        }

        self.write(addr::LED_ENABLE, value::LEDS_DISABLED)
    }

    /// Program the LED current (if configured) and turn the LEDs on
    ///
    /// The current is read from the settings and written on every call so
    /// that a new setting takes effect without restarting the printer.
    pub fn turn_led_on<S>(&mut self, settings: &S) -> Result<(), ProjectorError>
    where
        S: SettingsProvider + ?Sized,
    {
        if !self.is_controllable() {
            return Ok(());
        }

        let current = settings.get_int(SettingKey::ProjectorLedCurrent);
        if current > 0 {
            // Polarity has to go first, contrary to the programmer's guide
            self.write(addr::LED_PWM_POLARITY, value::PWM_POLARITY_NORMAL)?;

            let level = led_current_byte(current);
            self.write_block(addr::LED_CURRENT, &[level; 3])?;
        }

        self.write(addr::LED_ENABLE, value::LEDS_ENABLED)
    }
}
