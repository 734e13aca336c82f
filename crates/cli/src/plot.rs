//! S(θ) line plot for a sweep, with the centre angle marked.

use anyhow::{ensure, Result};
use phyllo::{SimParams, SweepRow};
use serde_json::json;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::provenance::{write_sidecar, Payload};
use crate::svg::{write_figure, Frame};

const PLOT_WIDTH: f64 = 640.0;
const PLOT_HEIGHT: f64 = 400.0;

pub fn sweep_title(n: usize, params: &SimParams) -> String {
    format!("S vs theta (N={n}, c={})", params.c)
}

/// `[min, max]`, widened by one unit each way when the range is flat.
fn data_range(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if hi > lo {
        [lo, hi]
    } else {
        [lo - 1.0, hi + 1.0]
    }
}

/// SVG line plot of `S` against `theta_deg` (rows already sorted by angle)
/// with a vertical marker at `center`.
pub fn sweep_svg(rows: &[SweepRow], center: f64, title: &str) -> String {
    let x = data_range(rows.iter().map(|r| r.theta_deg).chain([center]));
    let y = data_range(rows.iter().map(|r| r.s));
    let frame = Frame::new(PLOT_WIDTH, PLOT_HEIGHT, x, y);
    let mut svg = frame.open(title, "theta (deg)", "S (union)");

    let cx = frame.px(center);
    let _ = writeln!(
        svg,
        r##"  <line class="center" x1="{cx:.2}" y1="{:.2}" x2="{cx:.2}" y2="{:.2}" stroke="#d62728" stroke-width="1" stroke-dasharray="4 3"/>"##,
        frame.top,
        frame.top + frame.height
    );
    let points: Vec<String> = rows
        .iter()
        .map(|r| format!("{:.2},{:.2}", frame.px(r.theta_deg), frame.py(r.s)))
        .collect();
    let _ = writeln!(
        svg,
        r##"  <polyline class="s" points="{}" fill="none" stroke="#1f77b4" stroke-width="1.5"/>"##,
        points.join(" ")
    );
    frame.close(svg)
}

/// Write the S(θ) plot (`.svg` or `.png`) plus sidecar; returns the sidecar.
pub fn write_sweep_plot(
    rows: &[SweepRow],
    center: f64,
    params: &SimParams,
    path: &Path,
) -> Result<PathBuf> {
    ensure!(!rows.is_empty(), "sweep produced no rows to plot");
    let n = rows[0].n;
    let title = sweep_title(n, params);
    write_figure(&sweep_svg(rows, center, &title), path)?;
    let payload = Payload::new(
        "sweep",
        json!({
            "title": title,
            "center": center,
            "N": n,
            "thetas": rows.iter().map(|r| r.theta_deg).collect::<Vec<_>>(),
            "sim": params,
        }),
    );
    write_sidecar(path, payload)
}
