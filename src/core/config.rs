//! Physical constants for a [`ParticleField`](super::ParticleField).
//!
//! A `FieldConfig` is fixed for the lifetime of a field. It can be built in
//! code, taken from [`Default`] (the classic 640x480 sandbox), or loaded from
//! JSON where any missing key falls back to its default:
//!
//! ```json
//! {
//!   "width": 800.0,
//!   "height": 600.0,
//!   "radius": 12.0,
//!   "gravity": 0.4,
//!   "num_pinned": 8
//! }
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Play-area bounds and motion constants shared by every body in a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: f64,        // play-area width in pixels
    pub height: f64,       // play-area height in pixels
    pub radius: f64,       // collision radius of every body
    pub gravity: f64,      // downward velocity gain per step
    pub wall_damping: f64, // speed kept on a wall bounce (the sign is flipped separately)
    pub friction: f64,     // per-step velocity multiplier
    pub restitution: f64,  // body-body impulse scale
    pub num_pinned: usize, // pinned bodies placed at construction
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 480.0,
            radius: 15.0,
            gravity: 0.5,
            wall_damping: 0.9,
            friction: 0.98,
            restitution: 0.8,
            num_pinned: 5,
        }
    }
}

impl FieldConfig {
    /// Check every constant is usable.
    ///
    /// Errors:
    /// - `Error::InvalidParam` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("width", self.width),
            ("height", self.height),
            ("radius", self.radius),
            ("gravity", self.gravity),
            ("wall_damping", self.wall_damping),
            ("friction", self.friction),
            ("restitution", self.restitution),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::InvalidParam(format!("{name} must be finite")));
        }
        if self.radius <= 0.0 {
            return Err(Error::InvalidParam("radius must be > 0".into()));
        }
        if self.width < 2.0 * self.radius {
            return Err(Error::InvalidParam(
                "width must be at least 2 * radius".into(),
            ));
        }
        // Pinned bodies are drawn from [radius, height / 2].
        if self.height < 2.0 * self.radius {
            return Err(Error::InvalidParam(
                "height must be at least 2 * radius".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.wall_damping) {
            return Err(Error::InvalidParam(
                "wall_damping must lie in [0, 1]".into(),
            ));
        }
        if self.friction <= 0.0 || self.friction > 1.0 {
            return Err(Error::InvalidParam("friction must lie in (0, 1]".into()));
        }
        if self.restitution <= 0.0 || self.restitution > 1.0 {
            return Err(Error::InvalidParam(
                "restitution must lie in (0, 1]".into(),
            ));
        }
        Ok(())
    }

    /// Parse a JSON document and validate the result.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::debug!("loaded field configuration from {}", path.display());
        Ok(config)
    }
}
