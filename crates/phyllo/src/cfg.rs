//! Numeric constants (internal).
//!
//! Policy
//! - Fixed constants rather than knobs; callers that need a different angle
//!   range pass explicit angles to `sweep_theta`.

/// Golden divergence angle `360°·(2 − φ)` with φ the golden ratio.
pub const GOLDEN_ANGLE_DEG: f64 = 137.507_764_050_037_85;

/// Slack added to the upper end of a sweep range so `center + span` itself
/// is sampled despite the half-open stepping.
pub(crate) const RANGE_END_SLACK: f64 = 1e-9;

/// Upper bound on grid samples per axis. The mask and both meshes hold
/// `n²` cells each, so this keeps one evaluation under ~2 GB.
pub const MAX_AXIS_SAMPLES: usize = 10_000;

/// Upper bound on the number of angles `sweep_angles` will produce.
pub const MAX_SWEEP_ANGLES: usize = 100_000;
