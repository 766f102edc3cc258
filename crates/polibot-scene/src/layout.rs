//! Placement of joint markers and link cylinders from frame poses.

use nalgebra::{UnitQuaternion, Vector3};

use polibot_core::types::Pose;
use polibot_kinematics::FkResult;

/// Placement of one link cylinder between two consecutive joints.
///
/// The cylinder's reference axis is +Y; `rotation` aligns it with the
/// inter-joint direction and `midpoint` centers it between the joints.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkSegment {
    pub midpoint: Vector3<f64>,
    pub length: f64,
    pub rotation: UnitQuaternion<f64>,
}

/// Everything a renderer needs to place the arm.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLayout {
    /// Joint-marker positions, base to tip.
    pub joints: [Vector3<f64>; 4],
    /// Cylinders connecting consecutive joints.
    pub links: [LinkSegment; 3],
    /// Full pose of the end-effector marker.
    pub end_effector: Pose,
}

/// Reference axis the link cylinders are modelled along.
const UP: Vector3<f64> = Vector3::new(0.0, 1.0, 0.0);

/// Compute marker and link placements from a forward solve.
#[must_use]
pub fn layout(fk: &FkResult) -> SceneLayout {
    let joints: [Vector3<f64>; 4] =
        std::array::from_fn(|i| fk.frame_poses[i].fixed_view::<3, 1>(0, 3).into_owned());

    let links = std::array::from_fn(|i| segment_between(&joints[i], &joints[i + 1]));

    SceneLayout {
        joints,
        links,
        end_effector: fk.frame_poses[3],
    }
}

fn segment_between(start: &Vector3<f64>, end: &Vector3<f64>) -> LinkSegment {
    let direction = end - start;
    let length = direction.norm();

    // Coincident joints leave the direction undefined; antiparallel
    // directions have no unique rotation axis. rotation_between covers the
    // latter with a half-turn about a perpendicular axis and returns None
    // only for the former.
    let rotation = if length == 0.0 {
        UnitQuaternion::identity()
    } else {
        UnitQuaternion::rotation_between(&UP, &direction)
            .unwrap_or_else(|| UnitQuaternion::from_axis_angle(&Vector3::x_axis(), std::f64::consts::PI))
    };

    LinkSegment {
        midpoint: start + direction / 2.0,
        length,
        rotation,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
