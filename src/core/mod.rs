#![allow(missing_docs)] // Doc comments live on the public items in submodules

//! Core physics state for the ball field.
//!
//! A [`ParticleField`] owns every body in a rectangular play area and advances
//! them one tick at a time: gravity, friction and wall bounce first, then
//! pairwise collision resolution.

pub mod body;
pub mod config;
pub mod field;

pub use body::{Body, DIM};
pub use config::FieldConfig;
pub use field::ParticleField;
