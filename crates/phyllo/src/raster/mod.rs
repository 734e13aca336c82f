//! Raster estimate of the area covered by a union of congruent ellipses.
//!
//! Model
//! - A square grid over `[-half, half)²` with `half = box_size / 2` (integer
//!   division) and step `res`. Each axis holds `ceil(2·half / res)` samples at
//!   `-half + i·res`; coordinates are index-scaled, never accumulated.
//! - A sample is covered when at least one ellipse contains it (closed test).
//! - Area is `covered samples × res²`.
//!
//! Caveats
//! - Quantization error is O(perimeter × res).
//! - Ellipse area outside the grid is dropped, not clamped back in.
//!
//! Layout
//! - Meshes and mask are `n × n` matrices with the row index following y and
//!   the column index following x: `grid_x[(i, j)] = xs[j]`,
//!   `grid_y[(i, j)] = ys[i]`.

use nalgebra::{DMatrix, Vector2};

use crate::shape::Ellipse;

/// Square sampling lattice centered at the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    half: u32,
    res: f64,
    n: usize,
}

impl Grid {
    /// Pre: `res` finite, > 0, and `axis_samples` within `MAX_AXIS_SAMPLES`
    /// (checked by `SimParams::validate`).
    pub fn new(box_size: u32, res: f64) -> Self {
        let half = box_size / 2;
        let n = axis_samples(half, res) as usize;
        Self { half, res, n }
    }

    #[inline]
    pub fn half(&self) -> u32 {
        self.half
    }

    #[inline]
    pub fn res(&self) -> f64 {
        self.res
    }

    /// Samples per axis.
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Area represented by one sample.
    #[inline]
    pub fn cell_area(&self) -> f64 {
        self.res * self.res
    }

    /// Coordinate of sample `i` along either axis.
    #[inline]
    pub fn coord(&self, i: usize) -> f64 {
        -(self.half as f64) + (i as f64) * self.res
    }

    /// Axis coordinates (shared by x and y).
    pub fn axis(&self) -> Vec<f64> {
        (0..self.n).map(|i| self.coord(i)).collect()
    }

    /// `[x_min, x_max, y_min, y_max]` of the nominal domain.
    pub fn extent(&self) -> [f64; 4] {
        let h = self.half as f64;
        [-h, h, -h, h]
    }

    /// Coordinate meshes `(grid_x, grid_y)`.
    pub fn mesh(&self) -> (DMatrix<f64>, DMatrix<f64>) {
        let gx = DMatrix::from_fn(self.n, self.n, |_, j| self.coord(j));
        let gy = DMatrix::from_fn(self.n, self.n, |i, _| self.coord(i));
        (gx, gy)
    }
}

/// Half-open stepping over `[-half, half)`: `ceil(2·half / res)`, unclamped.
/// Infinite for subnormal `res`; callers bound it before casting.
pub(crate) fn axis_samples(half: u32, res: f64) -> f64 {
    let span = 2.0 * half as f64;
    (span / res).ceil()
}

/// Output of the raster estimator.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterUnion {
    /// Estimated union area.
    pub area: f64,
    /// Covered samples.
    pub mask: DMatrix<bool>,
    pub grid_x: DMatrix<f64>,
    pub grid_y: DMatrix<f64>,
}

impl RasterUnion {
    /// Number of covered samples.
    pub fn covered(&self) -> usize {
        self.mask.iter().filter(|&&m| m).count()
    }
}

/// Rasterize the union of ellipses with semi-axes `(a, b)` centered at
/// `centers` over the grid for `(box_size, res)`.
///
/// Pre: `a`, `b`, `res` finite and > 0 (checked by `simulate_once`).
pub fn union_area_raster(
    centers: &[Vector2<f64>],
    a: f64,
    b: f64,
    box_size: u32,
    res: f64,
) -> RasterUnion {
    let grid = Grid::new(box_size, res);
    let mask = union_mask(&grid, centers, Ellipse::new(a, b));
    let (grid_x, grid_y) = grid.mesh();
    let covered = mask.iter().filter(|&&m| m).count();
    RasterUnion {
        area: covered as f64 * grid.cell_area(),
        mask,
        grid_x,
        grid_y,
    }
}

/// OR each ellipse into a fresh mask. O(N · |grid|) in the worst case; a
/// column is skipped as soon as its x offset alone leaves the ellipse, which
/// cannot change the outcome since the y term is non-negative.
pub(crate) fn union_mask(grid: &Grid, centers: &[Vector2<f64>], shape: Ellipse) -> DMatrix<bool> {
    let n = grid.len();
    let axis = grid.axis();
    let mut mask = DMatrix::from_element(n, n, false);
    for p in centers {
        for (j, &x) in axis.iter().enumerate() {
            let u = (x - p.x) / shape.a;
            if u * u > 1.0 {
                continue;
            }
            for (i, &y) in axis.iter().enumerate() {
                if shape.contains_offset(x - p.x, y - p.y) {
                    mask[(i, j)] = true;
                }
            }
        }
    }
    mask
}
