mod figure;
mod plot;
mod provenance;
mod svg;
mod table;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use phyllo::{simulate_once, sweep_angles, sweep_theta, sweep_theta_par, SimParams};
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

use crate::provenance::{write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "phyllo")]
#[command(about = "Leaf overlap simulation (raster)")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Evaluate one divergence angle and print light and overlap areas
    Run {
        #[command(flatten)]
        leaf: LeafArgs,
        /// Draw the union mask to a figure (.svg or .png, plus provenance sidecar)
        #[arg(long, value_name = "PATH")]
        show: Option<PathBuf>,
        /// Figure title [default: "N=.., θ=..° (union)"]
        #[arg(long)]
        title: Option<String>,
    },
    /// Sweep theta over [theta - span, theta + span] and print the table
    Sweep {
        #[command(flatten)]
        leaf: LeafArgs,
        /// Sweep +/- span in degrees
        #[arg(long, default_value_t = 10.0)]
        span: f64,
        /// Sweep step in degrees
        #[arg(long, default_value_t = 1.0)]
        step: f64,
        /// Also write the table (.csv or .parquet, plus provenance sidecar)
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
        /// Also draw S against theta (.svg or .png, plus provenance sidecar)
        #[arg(long, value_name = "PATH")]
        plot: Option<PathBuf>,
        /// Evaluate angles on all cores
        #[arg(long)]
        parallel: bool,
    },
    /// Print a small provenance JSON block with the default parameters
    Report,
}

#[derive(Args, Clone, Debug)]
struct LeafArgs {
    /// Number of leaves
    #[arg(long = "N", visible_alias = "n", default_value_t = 8)]
    n: usize,
    /// Divergence angle in degrees
    #[arg(long, default_value_t = 137.5, allow_negative_numbers = true)]
    theta: f64,
    /// Spiral spacing constant
    #[arg(long, default_value_t = 18.0)]
    c: f64,
    /// Ellipse semi-axis along x
    #[arg(long, default_value_t = 20.0)]
    a: f64,
    /// Ellipse semi-axis along y
    #[arg(long, default_value_t = 5.0)]
    b: f64,
    /// Box size (pixels)
    #[arg(long = "box", default_value_t = 600)]
    box_size: u32,
    /// Grid resolution (lower = more accurate, slower)
    #[arg(long, default_value_t = 1.0)]
    res: f64,
    /// JSON file with a, b, c, box_size and res; overrides the flags above
    #[arg(long, value_name = "FILE")]
    params: Option<PathBuf>,
}

impl LeafArgs {
    fn sim_params(&self) -> Result<SimParams> {
        match &self.params {
            Some(path) => {
                let raw = std::fs::read(path)
                    .with_context(|| format!("reading params {}", path.display()))?;
                serde_json::from_slice(&raw)
                    .with_context(|| format!("parsing params {}", path.display()))
            }
            None => Ok(SimParams {
                a: self.a,
                b: self.b,
                c: self.c,
                box_size: self.box_size,
                res: self.res,
            }),
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    // Sweep tables are printed in full.
    if std::env::var_os("POLARS_FMT_MAX_ROWS").is_none() {
        std::env::set_var("POLARS_FMT_MAX_ROWS", "-1");
    }
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Run { leaf, show, title } => run(leaf, show, title),
        Action::Sweep {
            leaf,
            span,
            step,
            out,
            plot,
            parallel,
        } => sweep(leaf, span, step, out, plot, parallel),
        Action::Report => report(),
    }
}

fn run(leaf: LeafArgs, show: Option<PathBuf>, title: Option<String>) -> Result<()> {
    let params = leaf.sim_params()?;
    tracing::info!(n = leaf.n, theta = leaf.theta, ?params, "run");
    let r = simulate_once(leaf.n, leaf.theta, &params)?;

    println!("N={}, theta={}°", r.n, r.theta_deg);
    println!("S (light area) = {:.2}", r.s_union_area);
    println!("overlap area   = {:.2}", r.overlap_area);

    if let Some(path) = show {
        let prov = figure::write_mask_figure(&r, &path, title.as_deref())?;
        tracing::info!(
            figure = %path.display(),
            provenance = %prov.display(),
            "mask_written"
        );
    }
    Ok(())
}

fn sweep(
    leaf: LeafArgs,
    span: f64,
    step: f64,
    out: Option<PathBuf>,
    plot: Option<PathBuf>,
    parallel: bool,
) -> Result<()> {
    let params = leaf.sim_params()?;
    let thetas = sweep_angles(leaf.theta, span, step)?;
    tracing::info!(
        n = leaf.n,
        center = leaf.theta,
        span,
        step,
        angles = thetas.len(),
        parallel,
        "sweep"
    );
    let rows = if parallel {
        sweep_theta_par(leaf.n, &thetas, &params)?
    } else {
        sweep_theta(leaf.n, &thetas, &params)?
    };

    let mut df = table::rows_to_frame(&rows)?;
    println!("{df}");

    if let Some(path) = out {
        table::write_table(&mut df, &path)?;
        let payload = Payload::new(
            "sweep",
            json!({
                "N": leaf.n,
                "center": leaf.theta,
                "span": span,
                "step": step,
                "sim": params,
            }),
        );
        let prov = write_sidecar(&path, payload)?;
        tracing::info!(
            rows = df.height(),
            table = %path.display(),
            provenance = %prov.display(),
            "table_written"
        );
    }
    if let Some(path) = plot {
        let prov = plot::write_sweep_plot(&rows, leaf.theta, &params, &path)?;
        tracing::info!(
            figure = %path.display(),
            provenance = %prov.display(),
            "plot_written"
        );
    }
    Ok(())
}

fn report() -> Result<()> {
    let doc = provenance::document("report", json!({ "sim": SimParams::default() }));
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn defaults_match_library_defaults() {
        let cmd = Cmd::try_parse_from(["phyllo", "run"]).unwrap();
        let Action::Run { leaf, .. } = cmd.action else {
            panic!("expected run");
        };
        assert_eq!(leaf.n, 8);
        assert_eq!(leaf.theta, 137.5);
        assert_eq!(leaf.sim_params().unwrap(), SimParams::default());
    }

    #[test]
    fn sweep_flags_parse() {
        let cmd = Cmd::try_parse_from([
            "phyllo", "sweep", "--N", "13", "--theta", "-20", "--span", "5", "--step", "0.5",
            "--box", "400", "--parallel",
        ])
        .unwrap();
        let Action::Sweep {
            leaf,
            span,
            step,
            parallel,
            out,
            plot,
        } = cmd.action
        else {
            panic!("expected sweep");
        };
        assert_eq!(leaf.n, 13);
        assert_eq!(leaf.theta, -20.0);
        assert_eq!((span, step), (5.0, 0.5));
        assert_eq!(leaf.box_size, 400);
        assert!(parallel);
        assert!(out.is_none());
        assert!(plot.is_none());
    }

    #[test]
    fn params_file_overrides_flags() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("leaf.json");
        let p = SimParams {
            a: 10.0,
            b: 10.0,
            c: 12.0,
            box_size: 300,
            res: 0.5,
        };
        fs::write(&path, serde_json::to_vec(&p).unwrap()).unwrap();
        let cmd = Cmd::try_parse_from([
            "phyllo",
            "run",
            "--a",
            "3",
            "--params",
            path.to_str().unwrap(),
        ])
        .unwrap();
        let Action::Run { leaf, .. } = cmd.action else {
            panic!("expected run");
        };
        assert_eq!(leaf.sim_params().unwrap(), p);
    }

    #[test]
    fn invalid_resolution_names_the_field() {
        let cmd = Cmd::try_parse_from(["phyllo", "run", "--res", "0"]).unwrap();
        let Action::Run { leaf, show, title } = cmd.action else {
            panic!("expected run");
        };
        let err = run(leaf, show, title).unwrap_err();
        assert!(err.to_string().contains("`res`"), "{err}");
    }

    #[test]
    fn sweep_writes_table_plot_and_sidecars() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("sweep.csv");
        let plot_path = dir.path().join("s_theta.svg");
        let cmd = Cmd::try_parse_from([
            "phyllo",
            "sweep",
            "--N",
            "3",
            "--box",
            "100",
            "--span",
            "2",
            "--out",
            out.to_str().unwrap(),
            "--plot",
            plot_path.to_str().unwrap(),
        ])
        .unwrap();
        let Action::Sweep {
            leaf,
            span,
            step,
            out: out_arg,
            plot,
            parallel,
        } = cmd.action
        else {
            panic!("expected sweep");
        };
        sweep(leaf, span, step, out_arg, plot, parallel).unwrap();
        assert!(out.exists());
        assert!(dir.path().join("sweep.provenance.json").exists());
        let svg = std::fs::read_to_string(&plot_path).unwrap();
        assert!(svg.contains("S vs theta (N=3, c=18)"));
        let prov: serde_json::Value = serde_json::from_slice(
            &fs::read(dir.path().join("s_theta.provenance.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(prov["params"]["center"], 137.5);
    }

    #[test]
    fn huge_span_is_rejected_without_panicking() {
        let cmd = Cmd::try_parse_from(["phyllo", "sweep", "--span", "1e308"]).unwrap();
        let Action::Sweep {
            leaf,
            span,
            step,
            out,
            plot,
            parallel,
        } = cmd.action
        else {
            panic!("expected sweep");
        };
        let err = sweep(leaf, span, step, out, plot, parallel).unwrap_err();
        assert!(err.to_string().contains("`step`"), "{err}");
    }
}
