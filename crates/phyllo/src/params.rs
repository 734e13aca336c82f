//! Simulation parameters and their validation.
//!
//! `SimParams` bundles the leaf shape (`a`, `b`), the spiral spacing `c` and
//! the raster (`box_size`, `res`). Validation runs once at the orchestrator
//! boundary; `spiral` and `raster` trust their inputs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cfg::MAX_AXIS_SAMPLES;
use crate::raster::axis_samples;

/// Geometry and raster parameters shared by every leaf of a run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimParams {
    /// Ellipse semi-axis along x.
    pub a: f64,
    /// Ellipse semi-axis along y.
    pub b: f64,
    /// Spiral spacing constant (`r_k = c·√k`).
    pub c: f64,
    /// Side length of the square sampling domain; the grid spans
    /// `[-box_size/2, box_size/2)` with integer halving.
    pub box_size: u32,
    /// Grid step.
    pub res: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            a: 20.0,
            b: 5.0,
            c: 18.0,
            box_size: 600,
            res: 1.0,
        }
    }
}

impl SimParams {
    /// Reject non-positive or non-finite `a`, `b`, `c`, `res`, a zero box,
    /// and grids with more than `MAX_AXIS_SAMPLES` samples per axis.
    pub fn validate(&self) -> Result<(), ParamError> {
        positive("a", self.a)?;
        positive("b", self.b)?;
        positive("c", self.c)?;
        if self.box_size == 0 {
            return Err(ParamError::EmptyBox);
        }
        positive("res", self.res)?;
        within_limit("res", axis_samples(self.half(), self.res), MAX_AXIS_SAMPLES)
    }

    /// Half-extent of the sampling domain (integer division).
    #[inline]
    pub fn half(&self) -> u32 {
        self.box_size / 2
    }
}

/// Invalid-parameter errors. Every variant names the offending field.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamError {
    /// Field must be finite and strictly positive.
    NotPositive { field: &'static str, value: f64 },
    /// Field must be finite and non-negative.
    Negative { field: &'static str, value: f64 },
    /// Field must be finite.
    NotFinite { field: &'static str, value: f64 },
    /// `box_size` must be at least 1.
    EmptyBox,
    /// Field would produce `count` samples, above `limit`.
    TooManySamples {
        field: &'static str,
        count: f64,
        limit: usize,
    },
}

impl ParamError {
    /// Name of the parameter that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            ParamError::NotPositive { field, .. }
            | ParamError::Negative { field, .. }
            | ParamError::NotFinite { field, .. }
            | ParamError::TooManySamples { field, .. } => field,
            ParamError::EmptyBox => "box_size",
        }
    }
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamError::NotPositive { field, value } => {
                write!(f, "invalid parameter `{field}`: expected a finite value > 0, got {value}")
            }
            ParamError::Negative { field, value } => {
                write!(f, "invalid parameter `{field}`: expected a finite value >= 0, got {value}")
            }
            ParamError::NotFinite { field, value } => {
                write!(f, "invalid parameter `{field}`: expected a finite value, got {value}")
            }
            ParamError::EmptyBox => write!(f, "invalid parameter `box_size`: expected >= 1, got 0"),
            ParamError::TooManySamples {
                field,
                count,
                limit,
            } => write!(
                f,
                "invalid parameter `{field}`: needs {count} samples, limit is {limit}"
            ),
        }
    }
}

impl std::error::Error for ParamError {}

pub(crate) fn positive(field: &'static str, value: f64) -> Result<(), ParamError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ParamError::NotPositive { field, value })
    }
}

pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<(), ParamError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ParamError::Negative { field, value })
    }
}

/// `count` is a raw (possibly infinite or NaN) sample count.
pub(crate) fn within_limit(
    field: &'static str,
    count: f64,
    limit: usize,
) -> Result<(), ParamError> {
    if count <= limit as f64 {
        Ok(())
    } else {
        Err(ParamError::TooManySamples {
            field,
            count,
            limit,
        })
    }
}

pub(crate) fn finite(field: &'static str, value: f64) -> Result<(), ParamError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParamError::NotFinite { field, value })
    }
}
