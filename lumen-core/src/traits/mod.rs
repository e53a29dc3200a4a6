//! Collaborator traits
//!
//! These traits define the interface between the device drivers and the
//! subsystems they consume but do not own.

pub mod frame_buffer;
pub mod settings;

pub use frame_buffer::{FrameBuffer, FrameBufferError, BLACK, WHITE};
pub use settings::{SettingKey, SettingsProvider};
