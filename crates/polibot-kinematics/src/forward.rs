//! Forward kinematics: joint angles to base-frame poses.

use polibot_core::geometry::ArmGeometry;
use polibot_core::types::{JointAngles, Pose};

use crate::mdh::row_transform;

/// Result of a forward solve: the cumulative base-to-frame pose of every
/// joint, base to tip.
///
/// `frame_poses[i]` is `T(0->i+1)`; the last entry doubles as the
/// end-effector pose, so the chain cannot drift from its own tip.
#[derive(Debug, Clone, PartialEq)]
pub struct FkResult {
    pub frame_poses: [Pose; 4],
}

impl FkResult {
    /// Base-to-end-effector pose. Identical to `frame_poses[3]`.
    #[must_use]
    pub fn ee_pose(&self) -> &Pose {
        &self.frame_poses[3]
    }
}

/// Compute the transform chain for the given joint angles.
///
/// Builds one MDH transform per joint and accumulates products left to
/// right. Pure and total for finite angles; joint limits are deliberately
/// not checked here (the solver's clamping policy lives in `inverse`).
#[must_use]
pub fn forward(geometry: &ArmGeometry, q: &JointAngles) -> FkResult {
    let rows = geometry.mdh(q.as_array());

    let mut cumulative = Pose::identity();
    let frame_poses = std::array::from_fn(|i| {
        cumulative *= row_transform(&rows[i]);
        cumulative
    });

    FkResult { frame_poses }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
