//! Phyllotactic leaf-overlap simulation on a raster.
//!
//! N congruent elliptical leaves are placed on a Vogel-style spiral
//! (`r_k = c·√k`, `φ_k = k·θ`) and the area of their union is estimated by
//! counting covered samples of a square grid. Overlap follows from the
//! single-leaf area `π·a·b`.
//!
//! Layout
//! - `spiral`: leaf centers from (count, divergence angle, spacing).
//! - `shape`: the elliptical leaf.
//! - `raster`: sampling grid and union-area estimator.
//! - `sim`: validated single evaluation (`simulate_once`).
//! - `sweep`: the same arrangement over many angles (`sweep_theta`).
//!
//! Approximation caveats
//! - Area is quantized to `res²`; the error scales with perimeter × `res`.
//! - Leaf area falling outside `[-half, half)²` is not counted, so overlap is
//!   inflated when leaves leave the box. Neither effect is corrected.

mod cfg;
pub mod params;
pub mod raster;
pub mod shape;
pub mod sim;
pub mod spiral;
pub mod sweep;

#[cfg(test)]
mod tests_props;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::{GOLDEN_ANGLE_DEG, MAX_AXIS_SAMPLES, MAX_SWEEP_ANGLES};
pub use nalgebra::Vector2 as Vec2;
pub use params::{ParamError, SimParams};
pub use raster::{union_area_raster, Grid, RasterUnion};
pub use shape::Ellipse;
pub use sim::{leaf_area, simulate_once, SimulationResult};
pub use spiral::leaf_centers;
pub use sweep::{sweep_angles, sweep_theta, sweep_theta_par, SweepRow};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::params::{ParamError, SimParams};
    pub use crate::sim::{simulate_once, SimulationResult};
    pub use crate::sweep::{sweep_angles, sweep_theta, sweep_theta_par, SweepRow};
    pub use crate::GOLDEN_ANGLE_DEG;
    pub use nalgebra::Vector2 as Vec2;
}
