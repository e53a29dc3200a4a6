//! Configuration types
//!
//! Board-agnostic configuration structures. Values can be serialized when
//! the `serde` feature is enabled; the storage format itself belongs to the
//! firmware.

pub mod projector;
pub mod settings;

pub use projector::*;
pub use settings::*;
