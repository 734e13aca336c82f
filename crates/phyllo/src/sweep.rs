//! Divergence-angle sweeps.
//!
//! Every angle is an independent evaluation with its own grid and mask, so
//! the parallel variant is a plain map over the rayon pool followed by the
//! same stable sort. Rows are ordered ascending by angle; duplicate angles
//! are kept in input order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cfg::{MAX_SWEEP_ANGLES, RANGE_END_SLACK};
use crate::params::{finite, non_negative, positive, within_limit, ParamError, SimParams};
use crate::sim::{evaluate, SimulationResult};

/// Summary of one evaluation in a sweep.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SweepRow {
    #[serde(rename = "N")]
    pub n: usize,
    pub theta_deg: f64,
    #[serde(rename = "S")]
    pub s: f64,
    pub overlap: f64,
}

impl From<&SimulationResult> for SweepRow {
    fn from(r: &SimulationResult) -> Self {
        Self {
            n: r.n,
            theta_deg: r.theta_deg,
            s: r.s_union_area,
            overlap: r.overlap_area,
        }
    }
}

/// Evaluate `n` leaves at each angle in `thetas`, sequentially.
pub fn sweep_theta(
    n: usize,
    thetas: &[f64],
    params: &SimParams,
) -> Result<Vec<SweepRow>, ParamError> {
    check(thetas, params)?;
    let mut rows: Vec<SweepRow> = thetas
        .iter()
        .map(|&th| SweepRow::from(&evaluate(n, th, params)))
        .collect();
    sort_rows(&mut rows);
    Ok(rows)
}

/// Same rows as `sweep_theta`, with angles spread over the rayon pool.
pub fn sweep_theta_par(
    n: usize,
    thetas: &[f64],
    params: &SimParams,
) -> Result<Vec<SweepRow>, ParamError> {
    check(thetas, params)?;
    let mut rows: Vec<SweepRow> = thetas
        .par_iter()
        .map(|&th| SweepRow::from(&evaluate(n, th, params)))
        .collect();
    sort_rows(&mut rows);
    Ok(rows)
}

/// Angles `center − span, center − span + step, …` up to and including
/// `center + span` (within a 1e-9 slack). Index-scaled like the grid axes.
///
/// At most `MAX_SWEEP_ANGLES` angles; wider ranges (including spans whose
/// width overflows to infinity) are rejected on `step`.
pub fn sweep_angles(center: f64, span: f64, step: f64) -> Result<Vec<f64>, ParamError> {
    finite("theta_deg", center)?;
    non_negative("span", span)?;
    positive("step", step)?;
    let start = center - span;
    let stop = center + span + RANGE_END_SLACK;
    let count = ((stop - start) / step).ceil();
    within_limit("step", count, MAX_SWEEP_ANGLES)?;
    Ok((0..count as usize)
        .map(|i| start + (i as f64) * step)
        .collect())
}

fn check(thetas: &[f64], params: &SimParams) -> Result<(), ParamError> {
    params.validate()?;
    thetas.iter().try_for_each(|&th| finite("theta_deg", th))
}

fn sort_rows(rows: &mut [SweepRow]) {
    rows.sort_by(|a, b| a.theta_deg.total_cmp(&b.theta_deg));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::simulate_once;

    fn small() -> SimParams {
        SimParams {
            box_size: 160,
            res: 1.0,
            ..SimParams::default()
        }
    }

    #[test]
    fn rows_sorted_for_unsorted_input() {
        let rows = sweep_theta(5, &[150.0, 120.0, 137.5, 90.0], &small()).unwrap();
        let th: Vec<f64> = rows.iter().map(|r| r.theta_deg).collect();
        assert_eq!(th, vec![90.0, 120.0, 137.5, 150.0]);
        assert!(rows.iter().all(|r| r.n == 5));
    }

    #[test]
    fn duplicates_are_kept() {
        let rows = sweep_theta(3, &[140.0, 130.0, 140.0], &small()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], rows[2]);
    }

    #[test]
    fn empty_sweep_is_empty() {
        assert!(sweep_theta(8, &[], &small()).unwrap().is_empty());
        assert!(sweep_theta_par(8, &[], &small()).unwrap().is_empty());
    }

    #[test]
    fn rows_match_single_evaluations() {
        let p = small();
        let rows = sweep_theta(8, &[137.5, 100.0], &p).unwrap();
        for row in rows {
            let r = simulate_once(8, row.theta_deg, &p).unwrap();
            assert_eq!(row, SweepRow::from(&r));
        }
    }

    #[test]
    fn parallel_matches_sequential() {
        let p = small();
        let thetas = sweep_angles(137.5, 5.0, 0.5).unwrap();
        let seq = sweep_theta(8, &thetas, &p).unwrap();
        let par = sweep_theta_par(8, &thetas, &p).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn invalid_params_fail_before_work() {
        let p = SimParams {
            res: 0.0,
            ..small()
        };
        assert_eq!(sweep_theta(8, &[137.5], &p).unwrap_err().field(), "res");
        let err = sweep_theta_par(8, &[1.0, f64::INFINITY], &small()).unwrap_err();
        assert_eq!(err.field(), "theta_deg");
    }

    #[test]
    fn angle_range_includes_both_ends() {
        let th = sweep_angles(137.5, 10.0, 1.0).unwrap();
        assert_eq!(th.len(), 21);
        assert_eq!(th[0], 127.5);
        assert!((th[20] - 147.5).abs() < 1e-9);
        assert_eq!(sweep_angles(137.5, 2.0, 0.5).unwrap().len(), 9);
        assert_eq!(sweep_angles(90.0, 0.0, 1.0).unwrap(), vec![90.0]);
    }

    #[test]
    fn angle_range_rejects_bad_step() {
        assert_eq!(sweep_angles(137.5, 10.0, 0.0).unwrap_err().field(), "step");
        assert_eq!(sweep_angles(137.5, -1.0, 1.0).unwrap_err().field(), "span");
    }

    #[test]
    fn overflowing_range_is_rejected() {
        for (span, step) in [(1e308, 1.0), (f64::MAX, 1e-300), (1.0, 1e-12)] {
            let err = sweep_angles(0.0, span, step).unwrap_err();
            assert_eq!(err.field(), "step");
            assert!(matches!(err, ParamError::TooManySamples { .. }));
        }
        // 20.000000001 / 0.001 rounds up to 20_001 angles, well under the cap.
        assert_eq!(sweep_angles(0.0, 10.0, 0.001).unwrap().len(), 20_001);
    }

    #[test]
    fn row_serializes_with_table_headers() {
        let row = SweepRow {
            n: 8,
            theta_deg: 137.5,
            s: 1.0,
            overlap: 2.0,
        };
        let v = serde_json::to_value(row).unwrap();
        assert_eq!(v["N"], 8);
        assert_eq!(v["S"], 1.0);
        assert_eq!(v["theta_deg"], 137.5);
    }
}
