//! Single-joint transform in the Modified Denavit-Hartenberg convention.

use polibot_core::geometry::MdhRow;
use polibot_core::types::Pose;

/// Homogeneous transform from joint frame `i-1` to joint frame `i`.
///
/// This is the *modified* DH convention (Craig), not the classic one: the
/// link length `a` translates along the previous x-axis and the twist
/// `alpha` rotates about it before the joint rotation `theta` is applied.
/// Total for all finite inputs.
#[must_use]
pub fn link_transform(theta: f64, d: f64, a: f64, alpha: f64) -> Pose {
    let (st, ct) = theta.sin_cos();
    let (sa, ca) = alpha.sin_cos();
    Pose::new(
        ct, -st, 0.0, a, //
        ca * st, ca * ct, -sa, -d * sa, //
        sa * st, sa * ct, ca, d * ca, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// [`link_transform`] from a table row.
#[must_use]
pub fn row_transform(row: &MdhRow) -> Pose {
    link_transform(row.theta, row.d, row.a, row.alpha)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
