//! 2D ball sandbox core.
//!
//! Pinned bodies hang in the upper half of the play area; dynamic bodies fall
//! under gravity, bounce off the walls and collide with everything else. A
//! render loop feeds clicks in through [`crate::core::ParticleField::try_place`],
//! calls [`crate::core::ParticleField::step`] once per frame and draws
//! [`crate::core::ParticleField::positions`].
//!
//! With the `python` feature the crate also builds a `ballfield` extension
//! module so a Python loop can drive the same core.

pub mod core;
pub mod error;

#[cfg(feature = "python")]
mod python;

pub use crate::core::{Body, FieldConfig, ParticleField};
pub use crate::error::{Error, Result};
