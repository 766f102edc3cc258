// polibot-core: Geometry constants, error taxonomy, and core types for the
// polibot 4-DOF grind/polish manipulator.

pub mod error;
pub mod geometry;
pub mod types;

pub mod prelude {
    pub use crate::error::{ConfigError, PolibotError, ValidationError};
    pub use crate::geometry::{ArmGeometry, JointLimits, MdhRow};
    pub use crate::types::{JointAngles, Pose};
}
