//! Projector error type

use lumen_core::traits::FrameBufferError;

use super::status::{StatusRegister, ValidateStatus};

/// Errors from projector operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProjectorError {
    /// Bus transaction failed (no status byte available)
    Bus,
    /// Device rejected the programmed pattern sequence
    ValidationRejected(ValidateStatus),
    /// Validation still busy after every poll
    ValidationTimeout,
    /// Strict status poll found a fault
    StatusFault(StatusRegister),
    /// Gamma correction still enabled after every attempt
    GammaStillEnabled,
    /// Frame buffer operation failed
    FrameBuffer(FrameBufferError),
}

impl From<FrameBufferError> for ProjectorError {
    fn from(e: FrameBufferError) -> Self {
        ProjectorError::FrameBuffer(e)
    }
}

impl core::fmt::Display for ProjectorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ProjectorError::Bus => write!(f, "Projector I2C communication failed"),
            ProjectorError::ValidationRejected(status) => {
                write!(f, "Pattern validation failed: 0x{:02X}", status.raw)
            }
            ProjectorError::ValidationTimeout => write!(f, "Pattern validation timed out"),
            ProjectorError::StatusFault(reg) => write!(f, "Projector status fault: {reg:?}"),
            ProjectorError::GammaStillEnabled => write!(f, "Could not disable gamma correction"),
            ProjectorError::FrameBuffer(e) => write!(f, "{e}"),
        }
    }
}
