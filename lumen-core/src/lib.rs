//! Board-agnostic core definitions for the printer firmware
//!
//! This crate contains everything the device drivers need that does not
//! depend on a specific board or bus implementation:
//!
//! - Collaborator traits (frame buffer, settings store)
//! - Configuration type definitions (projector timing and policy)
//! - In-memory settings store for bring-up and testing

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod traits;
