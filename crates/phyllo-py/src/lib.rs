//! PyO3 bindings for the `phyllo` simulator.
//!
//! Notes
//! - Keep bindings thin; the interactive front end lives on the Python side
//!   and only needs areas, centers, the mask and sweep rows.
//! - Parameter errors surface as `ValueError` carrying the core message,
//!   which names the offending field.

use phyllo::{ParamError, SimParams};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

type Centers = Vec<(f64, f64)>;
type MaskRows = Vec<Vec<bool>>;

fn map_param_err(err: ParamError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Run one evaluation. Returns `(S, overlap, centers, mask_rows)` where
/// `mask_rows[i][j]` is the sample at `y = ys[i]`, `x = xs[j]`.
#[pyfunction]
#[pyo3(signature = (n, theta_deg, a=20.0, b=5.0, c=18.0, box_size=600, res=1.0))]
fn simulate_once(
    py: Python<'_>,
    n: usize,
    theta_deg: f64,
    a: f64,
    b: f64,
    c: f64,
    box_size: u32,
    res: f64,
) -> PyResult<(f64, f64, Centers, MaskRows)> {
    let params = SimParams {
        a,
        b,
        c,
        box_size,
        res,
    };
    let r = py
        .allow_threads(|| phyllo::simulate_once(n, theta_deg, &params))
        .map_err(map_param_err)?;
    let centers = r.centers.iter().map(|p| (p.x, p.y)).collect();
    let mask = r
        .mask
        .row_iter()
        .map(|row| row.iter().copied().collect())
        .collect();
    Ok((r.s_union_area, r.overlap_area, centers, mask))
}

/// Sweep angles; returns `(N, theta_deg, S, overlap)` tuples sorted by angle.
#[pyfunction]
#[pyo3(signature = (n, thetas, a=20.0, b=5.0, c=18.0, box_size=600, res=1.0))]
fn sweep_theta(
    py: Python<'_>,
    n: usize,
    thetas: Vec<f64>,
    a: f64,
    b: f64,
    c: f64,
    box_size: u32,
    res: f64,
) -> PyResult<Vec<(usize, f64, f64, f64)>> {
    let params = SimParams {
        a,
        b,
        c,
        box_size,
        res,
    };
    let rows = py
        .allow_threads(|| phyllo::sweep_theta_par(n, &thetas, &params))
        .map_err(map_param_err)?;
    Ok(rows
        .into_iter()
        .map(|r| (r.n, r.theta_deg, r.s, r.overlap))
        .collect())
}

/// Angles `center ± span` stepped by `step`, both ends included.
#[pyfunction]
fn sweep_angles(center: f64, span: f64, step: f64) -> PyResult<Vec<f64>> {
    phyllo::sweep_angles(center, span, step).map_err(map_param_err)
}

#[pymodule]
fn phyllo_native(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(simulate_once, m)?)?;
    m.add_function(wrap_pyfunction!(sweep_theta, m)?)?;
    m.add_function(wrap_pyfunction!(sweep_angles, m)?)?;
    m.add("GOLDEN_ANGLE_DEG", phyllo::GOLDEN_ANGLE_DEG)?;
    Ok(())
}
