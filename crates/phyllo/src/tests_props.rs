//! Property checks over small random arrangements.

use std::f64::consts::PI;

use proptest::prelude::*;

use crate::{leaf_centers, simulate_once, sweep_theta, SimParams};

fn small_params() -> impl Strategy<Value = SimParams> {
    (1.0f64..15.0, 1.0f64..15.0, 2.0f64..20.0, 20u32..80, 0.5f64..3.0).prop_map(
        |(a, b, c, box_size, res)| SimParams {
            a,
            b,
            c,
            box_size,
            res,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn layout_is_deterministic(n in 0usize..40, th in -720.0f64..720.0, c in 0.1f64..50.0) {
        let a = leaf_centers(n, th, c);
        let b = leaf_centers(n, th, c);
        prop_assert_eq!(a.len(), n);
        for (p, q) in a.iter().zip(&b) {
            prop_assert_eq!(p.x.to_bits(), q.x.to_bits());
            prop_assert_eq!(p.y.to_bits(), q.y.to_bits());
        }
    }

    #[test]
    fn overlap_identity_holds(n in 0usize..6, th in 0.0f64..360.0, p in small_params()) {
        let r = simulate_once(n, th, &p).unwrap();
        let expected = n as f64 * PI * p.a * p.b - r.s_union_area;
        prop_assert!((r.overlap_area - expected).abs() <= 1e-9 * expected.abs().max(1.0));
        prop_assert!(r.s_union_area >= 0.0);
        let again = simulate_once(n, th, &p).unwrap();
        prop_assert_eq!(r, again);
    }

    #[test]
    fn sweep_rows_ascend(
        n in 0usize..4,
        thetas in prop::collection::vec(-360.0f64..360.0, 0..6),
        p in small_params(),
    ) {
        let rows = sweep_theta(n, &thetas, &p).unwrap();
        prop_assert_eq!(rows.len(), thetas.len());
        for w in rows.windows(2) {
            prop_assert!(w[0].theta_deg <= w[1].theta_deg);
        }
    }
}
