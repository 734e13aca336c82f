//! Overlap at the golden angle versus nearby rational divergences.
//!
//! Purpose
//! - Quick, reproducible data point for "how much light does the golden angle
//!   buy over 120°, 135° or 144°?" at the default leaf shape.
//! - Also reports per-evaluation timing at the default 600×600 grid.

use std::time::Instant;

use phyllo::{simulate_once, SimParams, GOLDEN_ANGLE_DEG};

fn main() {
    let params = SimParams::default();
    for &n in &[5usize, 8, 13, 21] {
        for &theta in &[120.0, 135.0, 137.5, GOLDEN_ANGLE_DEG, 144.0] {
            let start = Instant::now();
            let r = simulate_once(n, theta, &params).expect("default params are valid");
            let ms = start.elapsed().as_secs_f64() * 1e3;
            println!(
                "N={n:<2} theta={theta:>9.4} S={:>9.2} overlap={:>8.2} coverage={:.4} time_ms={ms:.2}",
                r.s_union_area,
                r.overlap_area,
                r.coverage_fraction()
            );
        }
    }
}
