//! Union-mask figure.
//!
//! The mask is drawn over its `[-half, half] × [-half, half]` extent with +y
//! pointing up, under a title (default `N=.., θ=..° (union)`) and labelled
//! `x`/`y` axes. Covered samples are merged into horizontal runs, one `<rect>`
//! per run.

use anyhow::{ensure, Result};
use phyllo::SimulationResult;
use serde_json::json;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::provenance::{write_sidecar, Payload};
use crate::svg::{write_figure, Frame};

/// Side of the plot area in page units.
const PLOT_SIDE: f64 = 600.0;
const LEAF_FILL: &str = "#2a9d4f";

/// Title used when the caller supplies none.
pub fn default_title(r: &SimulationResult) -> String {
    format!("N={}, θ={}° (union)", r.n, r.theta_deg)
}

/// SVG figure of the mask. `title` falls back to `default_title`.
pub fn mask_svg(r: &SimulationResult, title: Option<&str>) -> String {
    let title = title.map_or_else(|| default_title(r), str::to_string);
    let [x0, x1, y0, y1] = r.grid().extent();
    let frame = Frame::new(PLOT_SIDE, PLOT_SIDE, [x0, x1], [y0, y1]);
    let mut svg = frame.open(&title, "x", "y");

    let (rows, cols) = r.mask.shape();
    if rows > 0 && cols > 0 {
        let cw = PLOT_SIDE / cols as f64;
        let ch = PLOT_SIDE / rows as f64;
        let _ = writeln!(svg, r#"  <g fill="{LEAF_FILL}" shape-rendering="crispEdges">"#);
        for i in 0..rows {
            // Row i holds y = ys[i]; draw it from the bottom.
            let top = frame.top + (rows - 1 - i) as f64 * ch;
            let mut j = 0;
            while j < cols {
                if !r.mask[(i, j)] {
                    j += 1;
                    continue;
                }
                let start = j;
                while j < cols && r.mask[(i, j)] {
                    j += 1;
                }
                let _ = writeln!(
                    svg,
                    r#"    <rect x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}"/>"#,
                    frame.left + start as f64 * cw,
                    top,
                    (j - start) as f64 * cw,
                    ch
                );
            }
        }
        svg.push_str("  </g>\n");
    }
    frame.close(svg)
}

/// Write the mask figure (`.svg` or `.png`) plus its provenance sidecar;
/// returns the sidecar path.
pub fn write_mask_figure(r: &SimulationResult, path: &Path, title: Option<&str>) -> Result<PathBuf> {
    ensure!(
        !r.mask.is_empty(),
        "mask is empty: box_size {} with res {} has no samples",
        r.params.box_size,
        r.params.res
    );
    write_figure(&mask_svg(r, title), path)?;

    let title = title.map_or_else(|| default_title(r), str::to_string);
    let payload = Payload::new(
        "run",
        json!({
            "title": title,
            "extent": r.grid().extent(),
            "origin": "lower",
            "N": r.n,
            "theta_deg": r.theta_deg,
            "S_union_area": r.s_union_area,
            "overlap_area": r.overlap_area,
            "sim": r.params,
        }),
    );
    write_sidecar(path, payload)
}
