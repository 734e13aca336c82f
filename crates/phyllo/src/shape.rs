//! Elliptical leaf shape.

use serde::{Deserialize, Serialize};

/// Axis-aligned ellipse with semi-axes `a` (x) and `b` (y), shared by all
/// leaves of a run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    pub a: f64,
    pub b: f64,
}

impl Ellipse {
    #[inline]
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// Exact area `π·a·b`.
    #[inline]
    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.a * self.b
    }

    /// Closed membership test for an offset `(dx, dy)` from the center:
    /// `(dx/a)² + (dy/b)² ≤ 1`.
    #[inline]
    pub fn contains_offset(&self, dx: f64, dy: f64) -> bool {
        let u = dx / self.a;
        let v = dy / self.b;
        u * u + v * v <= 1.0
    }
}
