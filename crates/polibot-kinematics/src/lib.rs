//! Kinematics engine for the polibot 4-DOF grind/polish manipulator.
//!
//! Two stateless operations over the shared [`ArmGeometry`](polibot_core::geometry::ArmGeometry):
//!
//! ```text
//! joint angles ──► forward ──► end-effector pose + 4 frame poses
//! desired pose ──► inverse ──► up to 8 candidate joint-angle solutions
//! ```
//!
//! Forward kinematics chains per-joint Modified Denavit-Hartenberg
//! transforms ([`mdh::link_transform`]). Inverse kinematics is closed-form:
//! a geometric decoupling with two branch choices at the base, two at the
//! elbow, and two at the wrist, each candidate clamped into the joint's
//! mechanical limits. Both operations are pure; concurrent callers need no
//! synchronization.

pub mod forward;
pub mod inverse;
pub mod mdh;

pub use forward::{FkResult, forward};
pub use inverse::{IkSolution, SolutionSet, inverse};
pub use mdh::link_transform;
