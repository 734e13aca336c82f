//! Single evaluation: spiral layout → raster union → overlap.

use nalgebra::{DMatrix, Vector2};

use crate::params::{finite, ParamError, SimParams};
use crate::raster::{union_area_raster, Grid};
use crate::shape::Ellipse;
use crate::spiral::leaf_centers;

/// Everything one evaluation produces, handed to printers and renderers.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationResult {
    /// Leaf count.
    pub n: usize,
    /// Divergence angle in degrees.
    pub theta_deg: f64,
    /// Estimated union ("light") area.
    pub s_union_area: f64,
    /// `n·π·a·b − s_union_area`; may be negative under coarse grids or
    /// inflated when leaves leave the box.
    pub overlap_area: f64,
    pub mask: DMatrix<bool>,
    pub grid_x: DMatrix<f64>,
    pub grid_y: DMatrix<f64>,
    pub centers: Vec<Vector2<f64>>,
    pub params: SimParams,
}

impl SimulationResult {
    /// Half-extent of the sampled domain.
    pub fn half(&self) -> u32 {
        self.params.half()
    }

    /// Sampling grid the mask was computed on.
    pub fn grid(&self) -> Grid {
        Grid::new(self.params.box_size, self.params.res)
    }

    /// Union area as a share of the nominal `box_size²` domain.
    pub fn coverage_fraction(&self) -> f64 {
        let side = 2.0 * self.half() as f64;
        if side > 0.0 {
            self.s_union_area / (side * side)
        } else {
            0.0
        }
    }
}

/// Area of one leaf, `π·a·b`.
#[inline]
pub fn leaf_area(a: f64, b: f64) -> f64 {
    Ellipse::new(a, b).area()
}

/// Evaluate `n` leaves at divergence angle `theta_deg`.
///
/// Fails with `ParamError` before any grid is allocated when a parameter is
/// out of domain.
pub fn simulate_once(
    n: usize,
    theta_deg: f64,
    params: &SimParams,
) -> Result<SimulationResult, ParamError> {
    params.validate()?;
    finite("theta_deg", theta_deg)?;
    Ok(evaluate(n, theta_deg, params))
}

/// Unchecked evaluation; callers validate first.
pub(crate) fn evaluate(n: usize, theta_deg: f64, params: &SimParams) -> SimulationResult {
    let centers = leaf_centers(n, theta_deg, params.c);
    let raster = union_area_raster(&centers, params.a, params.b, params.box_size, params.res);
    let overlap = n as f64 * leaf_area(params.a, params.b) - raster.area;
    SimulationResult {
        n,
        theta_deg,
        s_union_area: raster.area,
        overlap_area: overlap,
        mask: raster.mask,
        grid_x: raster.grid_x,
        grid_y: raster.grid_y,
        centers,
        params: *params,
    }
}
