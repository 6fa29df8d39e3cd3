use crate::core::body::{dot, Body, DIM};
use crate::core::config::FieldConfig;
use crate::error::Result;
use rand::{rng, rngs::StdRng, Rng, SeedableRng};
use std::ops::Range;

/// A body pair found overlapping at the start of a collision pass.
///
/// `normal` points from `j` to `i`. Both values come from the positions at the
/// start of the pass and are not refreshed while the pass corrects positions.
#[derive(Debug, Clone, Copy)]
struct Contact {
    i: usize,
    j: usize,
    normal: [f64; DIM],
    overlap: f64,
}

/// Physical state of every body in the play area.
///
/// Bodies are stored as three parallel arrays (positions, velocities, pinned
/// flags) that always have the same length. A body's index is its identity:
/// bodies are only ever appended, so an index stays valid for the life of the
/// field.
///
/// Each tick the caller runs [`ParticleField::step`], which applies motion and
/// then resolves collisions. Wall containment is enforced by the motion pass and
/// overlap by the collision pass, so the two must run in that order.
#[derive(Debug, Clone)]
pub struct ParticleField {
    config: FieldConfig,
    steps: u64,
    positions: Vec<[f64; DIM]>,
    velocities: Vec<[f64; DIM]>,
    pinned: Vec<bool>,
}

impl ParticleField {
    /// Create a field holding `config.num_pinned` pinned bodies.
    ///
    /// Each pinned body gets an independent draw: x uniform in
    /// `[radius, width - radius]`, y uniform in `[radius, height / 2]`.
    /// Pinned bodies may overlap one another; they never interact.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if the configuration does not validate.
    pub fn new<R: Rng>(config: FieldConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;

        let n = config.num_pinned;
        let mut field = Self {
            config,
            steps: 0,
            positions: Vec::with_capacity(n),
            velocities: Vec::with_capacity(n),
            pinned: Vec::with_capacity(n),
        };

        let r = field.config.radius;
        let (x_hi, y_hi) = (field.config.width - r, field.config.height / 2.0);
        for _ in 0..n {
            let position = [rng.random_range(r..=x_hi), rng.random_range(r..=y_hi)];
            field.push(Body::pinned(position));
        }

        log::debug!("created field with {n} pinned bodies");
        Ok(field)
    }

    /// Create a field, seeding the placement RNG from `seed` or from entropy when `None`.
    pub fn with_seed(config: FieldConfig, seed: Option<u64>) -> Result<Self> {
        let mut rng: StdRng = match seed {
            Some(s) => SeedableRng::seed_from_u64(s),
            None => SeedableRng::seed_from_u64(rng().random()),
        };
        log::debug!("placement seed: {seed:?}");
        Self::new(config, &mut rng)
    }

    /// The constants this field was built with.
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Number of bodies.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True when the field holds no bodies.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of completed [`ParticleField::step`] calls.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Positions in index order.
    pub fn positions(&self) -> &[[f64; DIM]] {
        &self.positions
    }

    /// Velocities in index order.
    pub fn velocities(&self) -> &[[f64; DIM]] {
        &self.velocities
    }

    /// Pinned flags in index order.
    pub fn pinned(&self) -> &[bool] {
        &self.pinned
    }

    /// The body at `index`, if any.
    pub fn body(&self, index: usize) -> Option<Body> {
        Some(Body {
            position: *self.positions.get(index)?,
            velocity: self.velocities[index],
            pinned: self.pinned[index],
        })
    }

    /// Total kinetic energy with unit masses (diagnostic).
    pub fn kinetic_energy(&self) -> f64 {
        self.velocities.iter().map(|v| 0.5 * dot(v, v)).sum()
    }

    /// Append one body and return its index.
    ///
    /// Positions are not bounds-checked; a body outside the play area is pulled
    /// back by the next motion step.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if the body fails [`Body::validate`]; the field is unchanged.
    pub fn add_body(&mut self, body: Body) -> Result<usize> {
        body.validate()?;
        Ok(self.push(body))
    }

    /// Append a batch of bodies and return the range of their indices.
    ///
    /// The batch is all-or-nothing: if any body is rejected nothing is appended.
    pub fn add_bodies(&mut self, bodies: &[Body]) -> Result<Range<usize>> {
        for body in bodies {
            body.validate()?;
        }
        let start = self.len();
        self.positions.reserve(bodies.len());
        self.velocities.reserve(bodies.len());
        self.pinned.reserve(bodies.len());
        for &body in bodies {
            self.push(body);
        }
        Ok(start..self.len())
    }

    /// True when no body centre lies within `2 * radius` of `point`.
    pub fn is_clear(&self, point: [f64; DIM]) -> bool {
        let reach = 2.0 * self.config.radius;
        self.positions.iter().all(|p| {
            let d = sub(p, &point);
            dot(&d, &d).sqrt() >= reach
        })
    }

    /// Drop a dynamic body at rest on `point` unless it would land on another body.
    ///
    /// Returns the new index, or `None` when the spot is taken.
    pub fn try_place(&mut self, point: [f64; DIM]) -> Result<Option<usize>> {
        if !self.is_clear(point) {
            return Ok(None);
        }
        self.add_body(Body::dynamic(point, [0.0; DIM])).map(Some)
    }

    /// Advance one tick: motion first, then collision resolution.
    ///
    /// Returns the number of contacts resolved.
    pub fn step(&mut self) -> usize {
        self.apply_motion();
        let resolved = self.resolve_collisions();
        self.steps += 1;
        log::trace!("step {}: resolved {resolved} contacts", self.steps);
        resolved
    }

    /// Gravity, friction and Euler integration for dynamic bodies, then wall clamping for all bodies.
    ///
    /// A body whose edge crosses a wall is put back on the wall and its velocity
    /// component along that axis is reversed and damped. The checks use strict
    /// inequalities and run independently per side, so a corner hit gets both.
    pub fn apply_motion(&mut self) {
        let FieldConfig {
            width,
            height,
            radius,
            gravity,
            wall_damping,
            friction,
            ..
        } = self.config;
        let extent = [width, height];

        for ((p, v), &pinned) in self
            .positions
            .iter_mut()
            .zip(self.velocities.iter_mut())
            .zip(&self.pinned)
        {
            if !pinned {
                v[1] += gravity;
                for k in 0..DIM {
                    v[k] *= friction;
                    p[k] += v[k];
                }
            }

            for k in 0..DIM {
                if p[k] - radius < 0.0 {
                    p[k] = radius;
                    v[k] *= -wall_damping;
                }
                if p[k] + radius > extent[k] {
                    p[k] = extent[k] - radius;
                    v[k] *= -wall_damping;
                }
            }
        }
    }

    /// Resolve every overlapping pair and return how many contacts were corrected.
    ///
    /// Contacts are gathered once from the positions at entry, and every pair is
    /// visited from both sides (`(i, j)` in row-major order, then later `(j, i)`).
    /// Velocities are read live, so the second visit usually sees a separating
    /// pair and does nothing. When the lower index is pinned and the other body
    /// is dynamic, the first visit under-corrects and the second visit applies
    /// the rest.
    ///
    /// Pairs that are touching exactly, coincident, both pinned, or already
    /// separating along the normal are left alone.
    pub fn resolve_collisions(&mut self) -> usize {
        let mut resolved = 0;
        for contact in self.find_contacts() {
            if self.resolve_contact(contact) {
                resolved += 1;
            }
        }
        resolved
    }

    // ============ Internal helpers ============

    fn push(&mut self, body: Body) -> usize {
        let index = self.positions.len();
        self.positions.push(body.position);
        self.velocities.push(body.velocity);
        self.pinned.push(body.pinned);
        index
    }

    fn find_contacts(&self) -> Vec<Contact> {
        let reach = 2.0 * self.config.radius;
        let n = self.len();
        let mut contacts = Vec::new();
        for i in 0..n {
            for j in 0..n {
                if i == j || (self.pinned[i] && self.pinned[j]) {
                    continue;
                }
                let diff = sub(&self.positions[i], &self.positions[j]);
                let distance = dot(&diff, &diff).sqrt();
                // Coincident centres have no normal.
                if distance <= 0.0 || distance >= reach {
                    continue;
                }
                contacts.push(Contact {
                    i,
                    j,
                    normal: [diff[0] / distance, diff[1] / distance],
                    overlap: reach - distance,
                });
            }
        }
        contacts
    }

    fn resolve_contact(&mut self, contact: Contact) -> bool {
        let Contact {
            i,
            j,
            normal: n,
            overlap,
        } = contact;
        let (pinned_i, pinned_j) = (self.pinned[i], self.pinned[j]);

        let rel = sub(&self.velocities[i], &self.velocities[j]);
        let rel_dot = dot(&rel, &n);
        if rel_dot > 0.0 {
            return false;
        }

        // Only j's flag picks the divisor: a pinned j absorbs nothing, so i takes the full impulse.
        let divisor = if pinned_j { 1.0 } else { 2.0 };
        let impulse = (2.0 * rel_dot) / divisor * self.config.restitution;
        let push = 0.5 * overlap;

        for k in 0..DIM {
            if !pinned_i {
                self.velocities[i][k] -= impulse * n[k];
            }
            if !pinned_j {
                self.velocities[j][k] += impulse * n[k];
            }
        }
        for k in 0..DIM {
            if !pinned_i {
                self.positions[i][k] += push * n[k];
            }
            if !pinned_j {
                self.positions[j][k] -= push * n[k];
            }
        }
        true
    }
}

#[inline]
fn sub(a: &[f64; DIM], b: &[f64; DIM]) -> [f64; DIM] {
    [a[0] - b[0], a[1] - b[1]]
}
