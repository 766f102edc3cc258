//! Core value types shared across the workspace.

use nalgebra::Matrix4;

use crate::error::ValidationError;

/// A homogeneous transform: orthonormal 3x3 rotation block top-left,
/// translation top-right, bottom row `[0, 0, 0, 1]`.
pub type Pose = Matrix4<f64>;

/// Build a [`Pose`] from 16 row-major entries, validating count and
/// finiteness at the boundary.
pub fn pose_from_row_major(entries: &[f64]) -> Result<Pose, ValidationError> {
    if entries.len() != 16 {
        return Err(ValidationError::PoseCountMismatch {
            expected: 16,
            got: entries.len(),
        });
    }
    for (i, value) in entries.iter().enumerate() {
        if !value.is_finite() {
            return Err(ValidationError::PoseEntryNotFinite {
                row: i / 4,
                col: i % 4,
            });
        }
    }
    Ok(Pose::from_row_slice(entries))
}

// ---------------------------------------------------------------------------
// JointAngles
// ---------------------------------------------------------------------------

/// Joint angles in radians, base to tip. Exactly four entries.
///
/// The fixed arity makes the angle-count contract a type-level property:
/// code past the boundary never sees the wrong number of angles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointAngles([f64; 4]);

impl JointAngles {
    pub const DOF: usize = 4;

    #[must_use]
    pub const fn new(angles: [f64; 4]) -> Self {
        Self(angles)
    }

    /// Validate a caller-supplied slice: exactly four finite values.
    pub fn from_slice(angles: &[f64]) -> Result<Self, ValidationError> {
        let values: [f64; 4] =
            angles
                .try_into()
                .map_err(|_| ValidationError::AngleCountMismatch {
                    expected: Self::DOF,
                    got: angles.len(),
                })?;
        for (index, value) in values.iter().enumerate() {
            if !value.is_finite() {
                return Err(ValidationError::AngleNotFinite { index });
            }
        }
        Ok(Self(values))
    }

    #[must_use]
    pub const fn as_array(&self) -> &[f64; 4] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    /// Largest absolute per-joint difference to `other`.
    #[must_use]
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}

impl std::ops::Index<usize> for JointAngles {
    type Output = f64;
    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

impl From<[f64; 4]> for JointAngles {
    fn from(angles: [f64; 4]) -> Self {
        Self(angles)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
