//! Shared SVG plumbing for figures: a plot frame with axes, text escaping,
//! and output to `.svg` or (rasterized through resvg) `.png`.

use anyhow::{bail, Context, Result};
use image::{ImageFormat, RgbaImage};
use resvg::{tiny_skia, usvg};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Square-ish plot area with room for a title, tick labels and axis labels.
#[derive(Clone, Copy, Debug)]
pub struct Frame {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Data ranges `[min, max]`.
    pub x: [f64; 2],
    pub y: [f64; 2],
}

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 50.0;

impl Frame {
    pub fn new(width: f64, height: f64, x: [f64; 2], y: [f64; 2]) -> Self {
        Self {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width,
            height,
            x,
            y,
        }
    }

    pub fn page_width(&self) -> f64 {
        self.left + self.width + MARGIN_RIGHT
    }

    pub fn page_height(&self) -> f64 {
        self.top + self.height + MARGIN_BOTTOM
    }

    /// Data x → page x.
    pub fn px(&self, x: f64) -> f64 {
        self.left + (x - self.x[0]) / (self.x[1] - self.x[0]) * self.width
    }

    /// Data y → page y (y grows upward).
    pub fn py(&self, y: f64) -> f64 {
        self.top + (self.y[1] - y) / (self.y[1] - self.y[0]) * self.height
    }

    /// SVG header, title, frame border, min/max tick labels and axis labels.
    /// The caller appends content and then `close`.
    pub fn open(&self, title: &str, x_label: &str, y_label: &str) -> String {
        let (w, h) = (self.page_width(), self.page_height());
        let mut svg = String::new();
        let _ = write!(
            svg,
            r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">
  <title>{title}</title>
  <rect width="100%" height="100%" fill="white"/>
  <text x="{tx:.2}" y="24" font-family="sans-serif" font-size="16" text-anchor="middle" fill="#222222">{title}</text>
  <g font-family="sans-serif" font-size="11" fill="#333333">
    <text x="{l:.2}" y="{ty:.2}" text-anchor="middle">{x0}</text>
    <text x="{r:.2}" y="{ty:.2}" text-anchor="middle">{x1}</text>
    <text x="{tl:.2}" y="{b:.2}" text-anchor="end">{y0}</text>
    <text x="{tl:.2}" y="{t:.2}" text-anchor="end">{y1}</text>
    <text x="{tx:.2}" y="{xl:.2}" font-size="13" text-anchor="middle">{x_label}</text>
    <text x="18" y="{ym:.2}" font-size="13" text-anchor="middle" transform="rotate(-90 18 {ym:.2})">{y_label}</text>
  </g>
"##,
            title = escape(title),
            tx = self.left + self.width / 2.0,
            l = self.left,
            r = self.left + self.width,
            t = self.top + 4.0,
            b = self.top + self.height,
            ty = self.top + self.height + 16.0,
            tl = self.left - 6.0,
            xl = self.top + self.height + 38.0,
            ym = self.top + self.height / 2.0,
            x0 = tick(self.x[0]),
            x1 = tick(self.x[1]),
            y0 = tick(self.y[0]),
            y1 = tick(self.y[1]),
            x_label = escape(x_label),
            y_label = escape(y_label),
        );
        svg
    }

    pub fn close(&self, mut svg: String) -> String {
        let _ = writeln!(
            svg,
            r##"  <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="#444444" stroke-width="1"/>"##,
            self.left, self.top, self.width, self.height
        );
        svg.push_str("</svg>\n");
        svg
    }
}

fn tick(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e9 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

/// Escape text content and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Write `svg` to `path`: verbatim for `.svg`, rasterized for `.png`.
pub fn write_figure(svg: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating figure dir {}", parent.display()))?;
        }
    }
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("svg") => {
            fs::write(path, svg).with_context(|| format!("writing {}", path.display()))?
        }
        Some("png") => rasterize(svg)?
            .save_with_format(path, ImageFormat::Png)
            .with_context(|| format!("writing {}", path.display()))?,
        _ => bail!(
            "unsupported figure format for {} (expected .svg or .png)",
            path.display()
        ),
    }
    Ok(())
}

/// Render an SVG onto a white canvas. Text uses whatever system fonts are
/// available.
pub fn rasterize(svg: &str) -> Result<RgbaImage> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &options).context("parsing figure svg")?;
    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .context("figure has zero size")?;
    pixmap.fill(tiny_skia::Color::WHITE);
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    // Opaque background, so premultiplied RGBA equals straight RGBA.
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), pixmap.take())
        .context("pixmap buffer size mismatch")
}
