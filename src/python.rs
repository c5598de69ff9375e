use std::sync::Mutex;

use numpy::ndarray::Array2;
use numpy::{IntoPyArray, PyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::RunConfig;
use crate::core::{random, Collider, ParticipantProfile, RunParameters};
use crate::output::EventRecord;

/// Columns of the array returned by `Trento.run`.
const COLUMNS: usize = 9;

fn py_err<E: ToString>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Python-facing wrapper around the Rust collider.
///
/// API:
/// - __new__(projectile_a, projectile_b, number_events=1, b_min=0.0, b_max=-1.0,
///   cross_section=6.4, nucleon_min_dist=0.0, ncoll=False, trials=False, seed=None)
/// - run() -> np.ndarray, shape (number_events, 9)
/// - b_min, b_max, asymmetry (read-only)
#[pyclass(name = "Trento")]
pub struct PyTrento {
    collider: Mutex<Collider>,
    params: RunParameters,
}

#[pymethods]
impl PyTrento {
    /// Configure a run.
    ///
    /// Parameters
    /// - projectile_a, projectile_b: species ("p", "Cu", "Xe", "Au", "Pb", "U") or "hs:<A>:<R>"
    /// - number_events: events generated per call to run() (int, >= 0)
    /// - b_min, b_max: impact parameter range in fm; negative b_max derives the maximum
    /// - cross_section: nucleon-nucleon inelastic cross section in fm^2 (> 0)
    /// - nucleon_min_dist: minimum distance between nucleons in fm (>= 0)
    /// - ncoll, trials: track binary collisions / trials to first collision
    /// - seed: RNG seed (int) for reproducibility; None or <= 0 for nondeterministic
    ///
    /// Errors: raises ValueError on invalid parameters.
    #[new]
    #[pyo3(signature = (
        projectile_a,
        projectile_b,
        number_events=1,
        b_min=0.0,
        b_max=-1.0,
        cross_section=6.4,
        nucleon_min_dist=0.0,
        ncoll=false,
        trials=false,
        seed=None
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        projectile_a: &str,
        projectile_b: &str,
        number_events: i64,
        b_min: f64,
        b_max: f64,
        cross_section: f64,
        nucleon_min_dist: f64,
        ncoll: bool,
        trials: bool,
        seed: Option<i64>,
    ) -> PyResult<Self> {
        let mut config = RunConfig::new(
            projectile_a.parse().map_err(py_err)?,
            projectile_b.parse().map_err(py_err)?,
        );
        config.number_events = number_events;
        config.b_min = b_min;
        config.b_max = b_max;
        config.cross_section = cross_section;
        config.nucleon_min_dist = nucleon_min_dist;
        config.ncoll = ncoll;
        config.trials = trials;
        config.random_seed = seed.and_then(random::seed_from_signed);

        let collider = Collider::from_config(&config).map_err(py_err)?;
        let params = *collider.params();
        Ok(Self {
            collider: Mutex::new(collider),
            params,
        })
    }

    /// Generate the configured number of events (releases the GIL during computation).
    ///
    /// Returns an array of shape (N, 9) with columns
    /// [index, b, npart, ncoll, trials, e2, e3, e4, e5]. Untracked counters are 0.
    fn run<'py>(&mut self, py: Python<'py>) -> PyResult<Py<PyArray2<f64>>> {
        let collider = self
            .collider
            .get_mut()
            .map_err(|_| py_err("collider state poisoned by an earlier panic"))?;
        let mut records: Vec<EventRecord> = Vec::with_capacity(self.params.nevents);
        py.detach(|| collider.run_events(&mut ParticipantProfile::new(), &mut records))
            .map_err(py_err)?;

        let mut arr = Array2::<f64>::zeros((records.len(), COLUMNS));
        for (i, r) in records.iter().enumerate() {
            arr[[i, 0]] = r.index as f64;
            arr[[i, 1]] = r.collision.impact_parameter;
            arr[[i, 2]] = r.event.npart as f64;
            arr[[i, 3]] = r.collision.binary_collisions as f64;
            arr[[i, 4]] = r.collision.trials as f64;
            for (k, e) in r.event.eccentricity.iter().enumerate() {
                arr[[i, 5 + k]] = *e;
            }
        }
        Ok(arr.into_pyarray(py).to_owned().into())
    }

    #[getter]
    fn b_min(&self) -> f64 {
        self.params.b_min
    }

    /// Maximum impact parameter after derivation.
    #[getter]
    fn b_max(&self) -> f64 {
        self.params.b_max
    }

    #[getter]
    fn asymmetry(&self) -> f64 {
        self.params.asymmetry
    }
}

/// The trento Python module entry point.
#[pymodule]
fn trento(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTrento>()?;
    Ok(())
}
