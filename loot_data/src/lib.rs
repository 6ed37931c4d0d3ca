//! Shared data model for loot scenes.

pub mod defs;
pub mod validate;

pub use defs::*;
pub use validate::{ValidationError, validate_scene};
