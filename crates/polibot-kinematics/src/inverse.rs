//! Closed-form inverse kinematics: desired pose to candidate joint angles.
//!
//! The solver is the analytical solution of a 6R arm whose two trailing
//! wrist joints are frozen, reduced to the 4 live joints. It decouples
//! geometrically in four stages:
//!
//! 1. Joint 1 — two base branches from the position's `atan2` plus a
//!    square-root discriminant.
//! 2. Joint 3 — per base branch, planar distances `m, n` and two elbow
//!    branches from a second discriminant.
//! 3. Joint 2 — unique per `(t1, t3)` pair.
//! 4. Joint 4 — per triple, an auxiliary wrist angle with two sign
//!    branches; joint 4 follows from a second `atan2` whose denominators
//!    carry the wrist angle's sine.
//!
//! Up to 2 x 2 x 2 = 8 candidates, emitted in branch order (base, then
//! elbow, then wrist). Every candidate is clamped into its joint's limits
//! and the clamped value feeds the later stages, so a clamped base angle
//! shifts the elbow solution exactly as on the real machine. A negative
//! discriminant drops the affected branches instead of propagating NaN;
//! an empty result means the pose is out of reach. Poses generated by the
//! 4-joint arm itself sit on the wrist degeneracy (`sin t5 = 0`), where
//! joint 4 is defined to be zero.

use polibot_core::geometry::ArmGeometry;
use polibot_core::types::{JointAngles, Pose};

/// Wrist sine magnitudes below this count as the degenerate case.
const WRIST_SIN_EPS: f64 = 1e-12;

/// One candidate solution with per-joint clamp markers.
///
/// A set `clamped` flag means the raw branch value violated that joint's
/// travel and was replaced by the nearest bound; the solution then no
/// longer reproduces the requested pose exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IkSolution {
    pub angles: JointAngles,
    pub clamped: [bool; 4],
}

impl IkSolution {
    /// Whether any joint was clamped.
    #[must_use]
    pub fn is_clamped(&self) -> bool {
        self.clamped.iter().any(|&c| c)
    }
}

/// Candidate solutions in branch-enumeration order, at most 8.
pub type SolutionSet = Vec<IkSolution>;

fn checked_sqrt(x: f64) -> Option<f64> {
    if x >= 0.0 { Some(x.sqrt()) } else { None }
}

/// Solve the inverse kinematics for a desired end-effector pose.
///
/// The rotation block is expected to be orthonormal; entries are read
/// directly (the approach vector is the third rotation column). Returns
/// fewer than 8 solutions when a branch's discriminant is negative, and an
/// empty set when no branch survives.
#[must_use]
pub fn inverse(geometry: &ArmGeometry, pose: &Pose) -> SolutionSet {
    let (ax, ay, az) = (pose[(0, 2)], pose[(1, 2)], pose[(2, 2)]);
    let (px, py, pz) = (pose[(0, 3)], pose[(1, 3)], pose[(2, 3)]);

    let [_, a1, a2, a3] = geometry.a();
    let [_, d2, d3, d4] = geometry.d();
    // Twists feeding the decoupling: the live rows' f1/f3 and the frozen
    // wrist pair f4/f5. All four have nonzero sine by architecture, so the
    // divisions below them are safe.
    let f1 = ArmGeometry::ALPHA[1];
    let f3 = ArmGeometry::ALPHA[3];
    let f4 = ArmGeometry::WRIST_TWIST_1;
    let f5 = ArmGeometry::WRIST_TWIST_2;
    let limits = &geometry.limits;

    let mut solutions = SolutionSet::with_capacity(8);

    // Stage 1: base rotation, two branches.
    let disc1 = (px * f1.sin()).powi(2) + (py * f1.sin()).powi(2) - (d2 - d3).powi(2);
    let Some(root1) = checked_sqrt(disc1) else {
        return solutions;
    };

    for base_sign in [1.0, -1.0] {
        let raw_t1 = -(-py).atan2(px) + ((d2 - d3) / f1.sin()).atan2(base_sign * root1);
        let (t1, clamped1) = limits[0].clamp(raw_t1);

        // Planar distances seen by the shoulder, from the clamped t1.
        let m = pz * f1.sin();
        let n = a1 - px * t1.cos() - py * t1.sin();

        // Stage 2: elbow, two branches sharing one discriminant.
        let k = m * m + n * n - a2 * a2 - a3 * a3 - d4 * d4;
        let disc3 = (2.0 * a2 * d4 * f3.sin()).powi(2) + (2.0 * a2 * a3).powi(2) - k * k;
        let Some(root3) = checked_sqrt(disc3) else {
            // radius out of the elbow's annulus on this base branch
            continue;
        };

        for elbow_sign in [1.0, -1.0] {
            let raw_t3 =
                -(a2 * a3 / f3.sin()).atan2(a2 * d4) + (k / f3.sin()).atan2(elbow_sign * root3);
            let (t3, clamped3) = limits[2].clamp(raw_t3);

            // Stage 3: shoulder pitch, unique for the chosen t1/t3.
            let m2 = a2 + a3 * t3.cos() + d4 * f3.sin() * t3.sin();
            let n2 = a3 * t3.sin() - d4 * f3.sin() * t3.cos();
            let raw_t2 = (m * m2 + n2 * n).atan2(m * n2 - m2 * n);
            let (t2, clamped2) = limits[1].clamp(raw_t2);

            // Stage 4: orientation through the frozen wrist. The approach
            // vector is rotated into the joint-3 frame.
            let m5 = -f5.sin()
                * (ax * t1.cos() * t2.cos() + ay * t1.sin() * t2.cos() + az * f1.sin() * t2.sin());
            let n5 = f5.sin()
                * (ax * t1.cos() * t2.sin() + ay * t1.sin() * t2.sin() - az * f1.sin() * t2.cos());
            let w = ay * t1.cos() - ax * t1.sin();

            // Sum of squares; this radicand cannot go negative.
            let wrist_root = (w * w + (m5 * t3.cos() + n5 * t3.sin()).powi(2)).sqrt();

            for wrist_sign in [1.0, -1.0] {
                let t5 = (wrist_sign * wrist_root)
                    .atan2((m5 * t3.sin() - n5 * t3.cos()) / (f3.sin() * f4.sin()));

                let raw_t4 = if t5.sin().abs() < WRIST_SIN_EPS {
                    // Wrist singularity: joints 4 and 6 of the parent 6R
                    // design are collinear and only their sum is defined.
                    0.0
                } else {
                    (w * f1.sin() * f5.sin() / (-t5.sin() * f3.sin()))
                        .atan2((-m5 * t3.cos() - n5 * t3.sin()) / t5.sin())
                };
                let (t4, clamped4) = limits[3].clamp(raw_t4);

                solutions.push(IkSolution {
                    angles: JointAngles::new([t1, t2, t3, t4]),
                    clamped: [clamped1, clamped2, clamped3, clamped4],
                });
            }
        }
    }

    solutions
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forward::forward;
    use approx::assert_relative_eq;
    use polibot_core::geometry::JointLimits;

    fn geometry() -> ArmGeometry {
        ArmGeometry::default()
    }

    fn fk_pose(q: [f64; 4]) -> Pose {
        *forward(&geometry(), &JointAngles::new(q)).ee_pose()
    }

    #[test]
    fn zero_pose_round_trip() {
        let solutions = inverse(&geometry(), &fk_pose([0.0; 4]));
        // The shoulder-flipped base branch fails its elbow discriminant, so
        // only 4 of the 8 candidates survive.
        assert_eq!(solutions.len(), 4);
        let first = &solutions[0];
        assert_relative_eq!(first.angles[0], 0.0);
        assert_relative_eq!(first.angles[1], 0.0);
        assert_relative_eq!(first.angles[2], 0.0);
        assert_eq!(first.angles[3], 0.0);
        assert!(!first.is_clamped());
    }

    #[test]
    fn round_trip_within_limits() {
        // In-limit configurations with the wrist at zero round-trip exactly
        // on one of the returned branches.
        for q in [
            [0.4, 0.3, -0.5, 0.0],
            [-0.4, 0.2, -0.3, 0.0],
            [1.2, -0.8, 0.9, 0.0],
            [0.0, 1.2, -2.0, 0.0],
        ] {
            let target = JointAngles::new(q);
            let solutions = inverse(&geometry(), &fk_pose(q));
            let best = solutions
                .iter()
                .map(|s| s.angles.max_abs_diff(&target))
                .fold(f64::INFINITY, f64::min);
            assert!(best < 1e-6, "no branch recovered {q:?}: best {best}");
        }
    }

    #[test]
    fn wrist_degeneracy_reports_zero_joint4() {
        // A pose the arm generated itself keeps the parent design's wrist
        // at zero, so joint 4 is unobservable and reports the documented
        // default instead of dividing by a vanishing sine.
        let solutions = inverse(&geometry(), &fk_pose([0.4, 0.3, -0.5, 0.7]));
        let matching = solutions
            .iter()
            .find(|s| {
                (s.angles[0] - 0.4).abs() < 1e-9
                    && (s.angles[1] - 0.3).abs() < 1e-9
                    && (s.angles[2] + 0.5).abs() < 1e-9
            })
            .expect("position branch missing");
        assert_eq!(matching.angles[3], 0.0);
    }

    #[test]
    fn clamped_solution_sits_exactly_on_bound() {
        // Narrow joint 3 so the elbow-flipped branch must clamp.
        let mut g = geometry();
        g.limits[2] = JointLimits { min: -0.1, max: 0.1 };
        let solutions = inverse(&g, &fk_pose([0.0; 4]));
        assert_eq!(solutions.len(), 4);

        // First branch pair is the true zero solution, untouched.
        assert!(!solutions[0].is_clamped());
        // Elbow-flipped pair lands exactly on the new bound, flagged.
        let flipped = &solutions[2];
        assert_eq!(flipped.angles[2].to_bits(), (-0.1_f64).to_bits());
        assert_eq!(flipped.clamped, [false, false, true, false]);
    }

    #[test]
    fn all_solutions_respect_limits() {
        let g = geometry();
        for q in [
            [0.4, 0.3, -0.5, 0.7],
            [1.2, -0.8, 0.9, 0.0],
            [-1.0, 0.5, -1.2, 2.0],
        ] {
            for (i, solution) in inverse(&g, &fk_pose(q)).iter().enumerate() {
                for joint in 0..4 {
                    assert!(
                        g.limits[joint].contains(solution.angles[joint]),
                        "solution {i} joint {joint} out of limits"
                    );
                }
            }
        }
    }

    #[test]
    fn unreachable_pose_returns_empty_set() {
        // Translation far beyond the 3 m reach; must not panic or NaN.
        let mut pose = Pose::identity();
        pose[(0, 3)] = 10.0;
        pose[(1, 3)] = 10.0;
        pose[(2, 3)] = 10.0;
        let solutions = inverse(&geometry(), &pose);
        assert!(solutions.is_empty());
    }

    #[test]
    fn inverse_is_deterministic() {
        let pose = fk_pose([0.9, -0.2, 0.4, 1.1]);
        let a = inverse(&geometry(), &pose);
        let b = inverse(&geometry(), &pose);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.clamped, y.clamped);
            for j in 0..4 {
                assert_eq!(x.angles[j].to_bits(), y.angles[j].to_bits());
            }
        }
    }

    #[test]
    fn solution_positions_match_target() {
        // Unclamped solutions must land the tool point on the requested
        // position (orientation may differ across branches; position
        // depends only on the first three joints).
        let g = geometry();
        let target = fk_pose([0.4, 0.3, -0.5, 0.0]);
        for solution in inverse(&g, &target)
            .iter()
            .filter(|s| !s.is_clamped())
        {
            let fk = forward(&g, &solution.angles);
            let pose = fk.ee_pose();
            assert_relative_eq!(pose[(0, 3)], target[(0, 3)], epsilon = 1e-9);
            assert_relative_eq!(pose[(1, 3)], target[(1, 3)], epsilon = 1e-9);
            assert_relative_eq!(pose[(2, 3)], target[(2, 3)], epsilon = 1e-9);
        }
    }

    #[test]
    fn checked_sqrt_rejects_negative() {
        assert_eq!(checked_sqrt(-1e-9), None);
        assert_eq!(checked_sqrt(0.0), Some(0.0));
        assert_relative_eq!(checked_sqrt(4.0).unwrap(), 2.0);
    }
}
