use numpy::ndarray::Array2;
use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray1, PyReadonlyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::path::PathBuf;

use crate::core::{Body, FieldConfig, ParticleField, DIM};

fn py_err<E: ToString>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn rows_to_array(rows: &[[f64; DIM]]) -> Array2<f64> {
    let mut arr = Array2::<f64>::zeros((rows.len(), DIM));
    for (i, row) in rows.iter().enumerate() {
        for k in 0..DIM {
            arr[[i, k]] = row[k];
        }
    }
    arr
}

/// Python-facing wrapper around [`ParticleField`] for a pygame-style render loop.
///
/// API:
/// - __new__(num_fixed_balls=5, seed=None, config_path=None)
/// - add_balls(positions, velocities, fixed)
/// - add_ball_at(x, y) -> bool
/// - move_balls(), resolve_collisions() -> int, step() -> int
/// - get_positions() / get_velocities() -> np.ndarray, shape (N, 2)
/// - get_fixed() -> np.ndarray[bool], shape (N,)
#[pyclass]
pub struct BallSystem {
    field: ParticleField,
}

#[pymethods]
impl BallSystem {
    /// Create a ball system with `num_fixed_balls` pinned balls in the upper half.
    ///
    /// Parameters
    /// - num_fixed_balls: number of pinned balls (int, >= 0)
    /// - seed: RNG seed (int) for reproducible placement; None for nondeterministic
    /// - config_path: optional JSON file overriding the default constants
    ///
    /// Errors: raises ValueError on invalid configuration.
    #[new]
    #[pyo3(signature = (num_fixed_balls=5, seed=None, config_path=None))]
    fn new(num_fixed_balls: usize, seed: Option<u64>, config_path: Option<PathBuf>) -> PyResult<Self> {
        let base = match config_path {
            Some(path) => FieldConfig::load(path).map_err(py_err)?,
            None => FieldConfig::default(),
        };
        let config = FieldConfig {
            num_pinned: num_fixed_balls,
            ..base
        };
        let field = ParticleField::with_seed(config, seed).map_err(py_err)?;
        Ok(Self { field })
    }

    /// Ball radius shared by every body.
    #[getter]
    fn radius(&self) -> f64 {
        self.field.config().radius
    }

    /// Number of balls.
    fn __len__(&self) -> usize {
        self.field.len()
    }

    /// Append balls from arrays of shape (N, 2), (N, 2) and (N,).
    fn add_balls<'py>(
        &mut self,
        positions: PyReadonlyArray2<'py, f64>,
        velocities: PyReadonlyArray2<'py, f64>,
        fixed: PyReadonlyArray1<'py, bool>,
    ) -> PyResult<()> {
        let (pos, vel) = (positions.as_array(), velocities.as_array());
        let fixed = fixed.as_slice().map_err(py_err)?;
        let n = fixed.len();
        for (name, shape) in [("positions", pos.shape()), ("velocities", vel.shape())] {
            if shape != [n, DIM] {
                return Err(py_err(format!(
                    "{name} must have shape ({n}, {DIM}), got {shape:?}"
                )));
            }
        }
        let bodies: Vec<Body> = (0..n)
            .map(|i| Body {
                position: [pos[[i, 0]], pos[[i, 1]]],
                velocity: [vel[[i, 0]], vel[[i, 1]]],
                pinned: fixed[i],
            })
            .collect();
        self.field.add_bodies(&bodies).map_err(py_err)?;
        Ok(())
    }

    /// Add a resting ball at a click position unless it lands on another ball.
    ///
    /// Returns True when a ball was added.
    fn add_ball_at(&mut self, x: f64, y: f64) -> PyResult<bool> {
        let placed = self.field.try_place([x, y]).map_err(py_err)?;
        Ok(placed.is_some())
    }

    /// Gravity, friction and wall bounce only.
    fn move_balls(&mut self) {
        self.field.apply_motion();
    }

    /// Collision pass only; returns the number of contacts resolved.
    fn resolve_collisions(&mut self) -> usize {
        self.field.resolve_collisions()
    }

    /// Full tick (motion, then collisions), releasing the GIL while it runs.
    fn step(&mut self, py: Python<'_>) -> usize {
        py.detach(|| self.field.step())
    }

    /// Return positions as a NumPy array of shape (N, 2), dtype=float64.
    fn get_positions(&self, py: Python<'_>) -> Py<PyArray2<f64>> {
        rows_to_array(self.field.positions()).into_pyarray(py).unbind()
    }

    /// Return velocities as a NumPy array of shape (N, 2), dtype=float64.
    fn get_velocities(&self, py: Python<'_>) -> Py<PyArray2<f64>> {
        rows_to_array(self.field.velocities()).into_pyarray(py).unbind()
    }

    /// Return pinned flags as a NumPy array of shape (N,), dtype=bool.
    fn get_fixed(&self, py: Python<'_>) -> Py<PyArray1<bool>> {
        PyArray1::from_slice(py, self.field.pinned()).unbind()
    }

    /// Total kinetic energy with unit masses.
    fn kinetic_energy(&self) -> f64 {
        self.field.kinetic_energy()
    }
}

/// The ballfield Python module entry point.
#[pymodule]
fn ballfield(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<BallSystem>()?;
    Ok(())
}
