//! Hardware driver implementations
//!
//! This crate provides concrete drivers for the printer's peripherals,
//! built on the bus traits from lumen-hal and the collaborator traits from
//! lumen-core:
//!
//! - Projector (DLPC350 display controller: display modes, LED, gamma)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod projector;
