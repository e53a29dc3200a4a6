//! Lumen Hardware Abstraction Layer
//!
//! This crate defines the bus traits that board support crates implement
//! and that the device drivers consume. The same projector driver runs on
//! any board as long as the board can provide an [`I2cBus`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  lumen-drivers (projector, ...)         │
//! └─────────────────────────────────────────┘
//!                     │  RegisterBus
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  I2cRegisterDevice (this crate)         │
//! └─────────────────────────────────────────┘
//!                     │  I2cBus
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  board HAL (Linux i2c-dev, MCU, ...)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - Raw I2C master operations
//! - [`i2c::RegisterBus`] - Register-addressed command bus with ready-poll

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

// Re-export key traits at crate root for convenience
pub use i2c::{I2cBus, I2cRegisterDevice, ReadyPollConfig, RegisterBus, RegisterBusError};
