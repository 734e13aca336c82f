//! Sweep rows as a polars `DataFrame`: printed to stdout, optionally written
//! as CSV or Parquet depending on the output extension.

use anyhow::{bail, Context, Result};
use phyllo::SweepRow;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;

/// Columns `N`, `theta_deg`, `S`, `overlap`, in row order.
pub fn rows_to_frame(rows: &[SweepRow]) -> PolarsResult<DataFrame> {
    let n: Vec<u64> = rows.iter().map(|r| r.n as u64).collect();
    let theta: Vec<f64> = rows.iter().map(|r| r.theta_deg).collect();
    let s: Vec<f64> = rows.iter().map(|r| r.s).collect();
    let overlap: Vec<f64> = rows.iter().map(|r| r.overlap).collect();
    df!(
        "N" => n,
        "theta_deg" => theta,
        "S" => s,
        "overlap" => overlap
    )
}

pub fn write_table(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating table dir {}", parent.display()))?;
        }
    }
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("csv") => {
            let mut file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            CsvWriter::new(&mut file).finish(df)?;
        }
        Some("parquet") => {
            let file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            ParquetWriter::new(file).finish(df)?;
        }
        _ => bail!(
            "unsupported table format for {} (expected .csv or .parquet)",
            path.display()
        ),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use phyllo::{sweep_theta, SimParams};
    use tempfile::tempdir;

    fn rows() -> Vec<SweepRow> {
        let p = SimParams {
            box_size: 120,
            ..SimParams::default()
        };
        sweep_theta(5, &[140.0, 130.0, 135.0], &p).unwrap()
    }

    #[test]
    fn frame_keeps_row_order_and_headers() {
        let df = rows_to_frame(&rows()).unwrap();
        assert_eq!(df.shape(), (3, 4));
        let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
        assert_eq!(names, ["N", "theta_deg", "S", "overlap"]);
        let theta: Vec<Option<f64>> = df
            .column("theta_deg")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(theta, [Some(130.0), Some(135.0), Some(140.0)]);
    }

    #[test]
    fn csv_round_trips_through_lazy_reader() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("sweep.csv");
        let mut df = rows_to_frame(&rows()).unwrap();
        write_table(&mut df, &path).unwrap();
        let back = LazyCsvReader::new(&path)
            .with_infer_schema_length(Some(100))
            .finish()
            .unwrap()
            .collect()
            .unwrap();
        assert_eq!(back.shape(), (3, 4));
    }

    #[test]
    fn parquet_is_written() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sweep.parquet");
        let mut df = rows_to_frame(&rows()).unwrap();
        write_table(&mut df, &path).unwrap();
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn unknown_extension_is_refused() {
        let dir = tempdir().unwrap();
        let mut df = rows_to_frame(&rows()).unwrap();
        assert!(write_table(&mut df, &dir.path().join("sweep.txt")).is_err());
    }
}
