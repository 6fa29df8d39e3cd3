use crate::error::{Error, Result};

/// Fixed spatial dimension (2D).
pub const DIM: usize = 2;

/// One row of a [`ParticleField`](super::ParticleField).
///
/// The field itself stores bodies as three parallel arrays; `Body` is the value
/// used to hand a body in or to read one back out.
///
/// Fields:
/// - `position`: pixel coordinates [x, y], origin top-left, y grows downward
/// - `velocity`: pixels per step [vx, vy]
/// - `pinned`: immovable body with infinite effective mass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Position (x, y).
    pub position: [f64; DIM],
    /// Velocity (vx, vy).
    pub velocity: [f64; DIM],
    /// Whether the body is immovable.
    pub pinned: bool,
}

impl Body {
    /// A free-moving body.
    pub fn dynamic(position: [f64; DIM], velocity: [f64; DIM]) -> Self {
        Self {
            position,
            velocity,
            pinned: false,
        }
    }

    /// A pinned body, which always has zero velocity.
    pub fn pinned(position: [f64; DIM]) -> Self {
        Self {
            position,
            velocity: [0.0; DIM],
            pinned: true,
        }
    }

    /// Check the body can enter a field.
    ///
    /// Bounds are not checked here; the next motion step clamps stray bodies.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if any component is NaN/inf, or a pinned body has non-zero velocity.
    pub fn validate(&self) -> Result<()> {
        if !self.position.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("position must be finite".into()));
        }
        if !self.velocity.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        if self.pinned && self.velocity.iter().any(|&c| c != 0.0) {
            return Err(Error::InvalidParam(
                "pinned bodies must have zero velocity".into(),
            ));
        }
        Ok(())
    }

    /// Kinetic energy with unit mass: 1/2 |v|^2.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * dot(&self.velocity, &self.velocity)
    }
}

#[inline]
pub(crate) fn dot(a: &[f64; DIM], b: &[f64; DIM]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
