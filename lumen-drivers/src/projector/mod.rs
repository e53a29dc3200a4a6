//! DLPC350 projector driver
//!
//! Controls a TI DLPC350 display controller over its I2C command bus:
//!
//! - LED illumination (enable, PWM polarity, drive current)
//! - Gamma correction (kept disabled for linear exposure)
//! - Display mode (video, or a one-entry pattern sequence that is
//!   validated and started by the controller)
//!
//! [`Dlpc350`] is the bus-level driver. [`Projector`] adds the frame
//! buffer and the settings store and is what printer code normally uses.
//!
//! If the controller does not answer when the driver is created, every
//! bus operation quietly succeeds without touching the bus.
//!
//! # Example
//!
//! ```ignore
//! let mut projector = Projector::new(
//!     &mut i2c_device,
//!     &mut frame_buffer,
//!     &settings,
//!     delay,
//!     ProjectorConfig::default(),
//! );
//!
//! projector.disable_gamma()?;
//! projector.enter_pattern_mode()?;
//!
//! projector.set_image(&layer)?;
//! let report = projector.show_current_image()?;
//! // expose
//! projector.show_black()?;
//! ```

mod controller;
mod device;
mod error;
mod gamma;
mod illumination;
mod mode;
pub mod reg;
mod status;

#[cfg(test)]
mod mock;

pub use controller::{Projector, ShowReport};
pub use device::Dlpc350;
pub use error::ProjectorError;
pub use illumination::led_current_byte;
pub use mode::DisplayMode;
pub use status::{
    HardwareStatus, MainStatus, ProjectorStatus, StatusRegister, SystemStatus, ValidateStatus,
};
