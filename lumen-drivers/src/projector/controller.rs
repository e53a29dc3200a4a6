//! Projector facade
//!
//! Ties the controller to the frame buffer and the settings store and
//! orders frame buffer updates against the illumination so nothing is
//! exposed by accident.

use embedded_hal::delay::DelayNs;
use log::{error, warn};
use lumen_core::config::ProjectorConfig;
use lumen_core::traits::{FrameBuffer, SettingsProvider, BLACK, WHITE};
use lumen_hal::RegisterBus;

use super::device::Dlpc350;
use super::error::ProjectorError;
use super::status::ProjectorStatus;

/// Outcome of [`Projector::show_current_image`]
///
/// The image is shown even when re-triggering the pattern sequence
/// fails; the failure is kept here for the caller to inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct ShowReport {
    /// Result of re-triggering the pattern sequence
    pub retrigger: Result<(), ProjectorError>,
}

impl ShowReport {
    /// Whether the pattern sequence was restarted
    pub fn pattern_started(&self) -> bool {
        self.retrigger.is_ok()
    }
}

/// Projector with its frame buffer and settings
///
/// The bus, frame buffer and settings are borrowed for the projector's
/// lifetime. On drop the projector tries to go dark: LEDs off, then the
/// frame buffer filled black. Failures during drop are logged and never
/// panic.
pub struct Projector<'a, B, F, S, D>
where
    B: RegisterBus,
    F: FrameBuffer + ?Sized,
    S: SettingsProvider + ?Sized,
    D: DelayNs,
{
    device: Dlpc350<&'a mut B, D>,
    frame_buffer: &'a mut F,
    settings: &'a S,
}

impl<'a, B, F, S, D> Projector<'a, B, F, S, D>
where
    B: RegisterBus,
    F: FrameBuffer + ?Sized,
    S: SettingsProvider + ?Sized,
    D: DelayNs,
{
    /// Probe the projector and blank the display
    pub fn new(
        bus: &'a mut B,
        frame_buffer: &'a mut F,
        settings: &'a S,
        delay: D,
        config: ProjectorConfig,
    ) -> Self {
        let mut projector = Self {
            device: Dlpc350::new(bus, delay, config),
            frame_buffer,
            settings,
        };

        if let Err(e) = projector.show_black() {
            warn!("Could not blank projector: {}", e);
        }

        projector
    }

    /// Whether the projector answered the probe
    pub fn is_controllable(&self) -> bool {
        self.device.is_controllable()
    }

    /// Get the configuration
    pub fn config(&self) -> &ProjectorConfig {
        self.device.config()
    }

    /// Composite an image into the off-screen buffer
    ///
    /// What is on screen does not change until
    /// [`show_current_image`](Self::show_current_image).
    pub fn set_image(&mut self, image: &F::Image) -> Result<(), ProjectorError> {
        self.frame_buffer.blit(image)?;
        Ok(())
    }

    /// Put the composited image on screen and light it
    ///
    /// Re-triggers the pattern sequence first. A failed re-trigger is
    /// logged and reported but does not stop the image being shown.
    pub fn show_current_image(&mut self) -> Result<ShowReport, ProjectorError> {
        let retrigger = self.device.retrigger_pattern_mode();
        if let Err(e) = &retrigger {
            warn!("Pattern re-trigger failed, showing image anyway: {}", e);
        }

        self.frame_buffer.swap()?;
        self.device.turn_led_on(self.settings)?;

        Ok(ShowReport { retrigger })
    }

    /// Turn the LEDs off and fill the frame buffer black
    ///
    /// The fill happens even if turning the LEDs off failed. When both
    /// fail, the LED error is returned and the fill error is logged.
    pub fn show_black(&mut self) -> Result<(), ProjectorError> {
        let led = self.device.turn_led_off();
        let fill = self.frame_buffer.fill(BLACK);

        if let (Err(_), Err(e)) = (&led, &fill) {
            warn!("Black fill also failed: {}", e);
        }

        led?;
        fill?;
        Ok(())
    }

    /// Fill the frame buffer white, then turn the LEDs on
    pub fn show_white(&mut self) -> Result<(), ProjectorError> {
        self.frame_buffer.fill(WHITE)?;
        self.device.turn_led_on(self.settings)
    }

    /// Configure pattern mode and start the sequence
    pub fn enter_pattern_mode(&mut self) -> Result<(), ProjectorError> {
        self.device.enter_pattern_mode()
    }

    /// Restart the already programmed pattern sequence
    pub fn retrigger_pattern_mode(&mut self) -> Result<(), ProjectorError> {
        self.device.retrigger_pattern_mode()
    }

    /// Switch to video mode and disable gamma correction
    pub fn enter_video_mode(&mut self) -> Result<(), ProjectorError> {
        self.device.enter_video_mode()
    }

    /// Disable gamma correction
    pub fn disable_gamma(&mut self) -> Result<(), ProjectorError> {
        self.device.disable_gamma()
    }

    /// Turn the LEDs on at the configured current
    pub fn turn_led_on(&mut self) -> Result<(), ProjectorError> {
        self.device.turn_led_on(self.settings)
    }

    /// Turn the LEDs off
    pub fn turn_led_off(&mut self) -> Result<(), ProjectorError> {
        self.device.turn_led_off()
    }

    /// Read and decode the status registers
    pub fn read_status(&mut self) -> Result<Option<ProjectorStatus>, ProjectorError> {
        self.device.read_status()
    }
}

impl<B, F, S, D> Drop for Projector<'_, B, F, S, D>
where
    B: RegisterBus,
    F: FrameBuffer + ?Sized,
    S: SettingsProvider + ?Sized,
    D: DelayNs,
{
    fn drop(&mut self) {
        if let Err(e) = self.show_black() {
            error!("Failed to blank projector on shutdown: {}", e);
        }
    }
}
