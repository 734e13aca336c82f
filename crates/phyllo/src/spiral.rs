//! Spiral (phyllotactic) leaf placement.
//!
//! Leaf `k` sits at radius `c·√k` and polar angle `k·θ`; successive leaves
//! are rotated by the divergence angle θ. Angles wrap through `cos`/`sin`, so
//! no explicit modulo is applied.

use nalgebra::Vector2;

/// Centers of `n` leaves for divergence angle `theta_deg` (degrees) and
/// spacing `c`, ordered by leaf index. Leaf 0 is always the origin.
///
/// Pre: `theta_deg` and `c` are finite (checked by `simulate_once`).
pub fn leaf_centers(n: usize, theta_deg: f64, c: f64) -> Vec<Vector2<f64>> {
    let theta = theta_deg.to_radians();
    (0..n)
        .map(|k| {
            let k = k as f64;
            let r = c * k.sqrt();
            let phi = k * theta;
            Vector2::new(r * phi.cos(), r * phi.sin())
        })
        .collect()
}
