//! Mechanical constants of the 4-DOF grind/polish arm.
//!
//! [`ArmGeometry`] is the single source of truth for the MDH parameter table
//! and the per-joint limits. Both the forward chain and the inverse solver
//! read from it; the constants are never duplicated at the call sites.
//!
//! The arm is the front half of a 6R design whose two trailing wrist joints
//! are frozen. The frozen joints' twist angles still appear in the inverse
//! solver's orientation decoupling, so they are kept here as architecture
//! constants alongside the live MDH rows.

use std::f64::consts::{FRAC_PI_2, PI};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const DEG: f64 = PI / 180.0;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_shoulder_offset() -> f64 {
    0.325
}
const fn default_upper_arm() -> f64 {
    1.150
}
const fn default_forearm() -> f64 {
    0.300
}
const fn default_wrist_offset() -> f64 {
    1.225
}
const fn default_limits() -> [JointLimits; 4] {
    [
        JointLimits {
            min: -180.0 * DEG,
            max: 180.0 * DEG,
        },
        JointLimits {
            min: -60.0 * DEG,
            max: 76.0 * DEG,
        },
        JointLimits {
            min: -147.0 * DEG,
            max: 90.0 * DEG,
        },
        JointLimits {
            min: -210.0 * DEG,
            max: 210.0 * DEG,
        },
    ]
}

// ---------------------------------------------------------------------------
// JointLimits
// ---------------------------------------------------------------------------

/// Mechanical travel bounds of one joint, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointLimits {
    pub min: f64,
    pub max: f64,
}

impl JointLimits {
    /// Clamp `angle` into the bounds.
    ///
    /// Returns the (possibly replaced) angle and whether clamping occurred.
    /// A clamped angle sits exactly at the violated bound.
    #[must_use]
    pub fn clamp(&self, angle: f64) -> (f64, bool) {
        if angle < self.min {
            (self.min, true)
        } else if angle > self.max {
            (self.max, true)
        } else {
            (angle, false)
        }
    }

    /// Whether `angle` lies within the bounds.
    #[must_use]
    pub fn contains(&self, angle: f64) -> bool {
        angle >= self.min && angle <= self.max
    }
}

// ---------------------------------------------------------------------------
// ArmGeometry
// ---------------------------------------------------------------------------

/// One row of the Modified Denavit-Hartenberg table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MdhRow {
    /// Joint angle (rad). The only per-solve variable.
    pub theta: f64,
    /// Link offset (m).
    pub d: f64,
    /// Link length (m).
    pub a: f64,
    /// Link twist (rad).
    pub alpha: f64,
}

/// Immutable mechanical description of the arm.
///
/// Link lengths and joint limits are configurable (TOML); the twist angles
/// are fixed by the joint architecture and are not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmGeometry {
    /// Link length between joints 1 and 2 (default: 0.325 m).
    #[serde(default = "default_shoulder_offset")]
    pub a1: f64,

    /// Upper-arm link length between joints 2 and 3 (default: 1.150 m).
    #[serde(default = "default_upper_arm")]
    pub a2: f64,

    /// Forearm link length between joints 3 and 4 (default: 0.300 m).
    #[serde(default = "default_forearm")]
    pub a3: f64,

    /// Link offset along joint 4's axis (default: 1.225 m).
    #[serde(default = "default_wrist_offset")]
    pub d4: f64,

    /// Per-joint travel bounds, base to tip.
    #[serde(default = "default_limits")]
    pub limits: [JointLimits; 4],
}

impl Default for ArmGeometry {
    fn default() -> Self {
        Self {
            a1: default_shoulder_offset(),
            a2: default_upper_arm(),
            a3: default_forearm(),
            d4: default_wrist_offset(),
            limits: default_limits(),
        }
    }
}

impl ArmGeometry {
    /// Fixed link twists, base to tip.
    pub const ALPHA: [f64; 4] = [0.0, -FRAC_PI_2, 0.0, -FRAC_PI_2];

    /// Twist of the first frozen wrist joint of the parent 6R design.
    pub const WRIST_TWIST_1: f64 = FRAC_PI_2;

    /// Twist of the second frozen wrist joint of the parent 6R design.
    pub const WRIST_TWIST_2: f64 = -FRAC_PI_2;

    /// Load geometry from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parse geometry from a TOML string. Missing fields take the grinding
    /// robot's defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let geometry: Self = toml::from_str(text)?;
        geometry.validate()?;
        Ok(geometry)
    }

    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (joint, value) in [(2, self.a1), (3, self.a2), (4, self.a3), (4, self.d4)] {
            if value <= 0.0 {
                return Err(ConfigError::InvalidLinkLength { joint, value });
            }
        }
        for (joint, limits) in self.limits.iter().enumerate() {
            if limits.min >= limits.max {
                return Err(ConfigError::InvalidLimits {
                    joint: joint + 1,
                    min: limits.min,
                    max: limits.max,
                });
            }
        }
        Ok(())
    }

    /// Link offsets, base to tip.
    #[must_use]
    pub fn d(&self) -> [f64; 4] {
        [0.0, 0.0, 0.0, self.d4]
    }

    /// Link lengths, base to tip.
    #[must_use]
    pub fn a(&self) -> [f64; 4] {
        [0.0, self.a1, self.a2, self.a3]
    }

    /// The full MDH table for a given set of joint angles.
    #[must_use]
    pub fn mdh(&self, theta: &[f64; 4]) -> [MdhRow; 4] {
        let d = self.d();
        let a = self.a();
        std::array::from_fn(|i| MdhRow {
            theta: theta[i],
            d: d[i],
            a: a[i],
            alpha: Self::ALPHA[i],
        })
    }

    /// Total reach with the arm fully extended, for workspace heuristics.
    #[must_use]
    pub fn reach(&self) -> f64 {
        self.a1 + self.a2 + self.a3 + self.d4
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_geometry_matches_grinding_robot() {
        let g = ArmGeometry::default();
        assert_relative_eq!(g.a1, 0.325);
        assert_relative_eq!(g.a2, 1.150);
        assert_relative_eq!(g.a3, 0.300);
        assert_relative_eq!(g.d4, 1.225);
        assert_relative_eq!(g.limits[1].min, -60.0 * DEG);
        assert_relative_eq!(g.limits[1].max, 76.0 * DEG);
        assert_relative_eq!(g.limits[2].min, -147.0 * DEG);
        assert_relative_eq!(g.limits[3].max, 210.0 * DEG);
        assert!(g.validate().is_ok());
    }

    #[test]
    fn mdh_table_layout() {
        let g = ArmGeometry::default();
        let rows = g.mdh(&[0.1, 0.2, 0.3, 0.4]);
        assert_relative_eq!(rows[0].theta, 0.1);
        assert_relative_eq!(rows[0].d, 0.0);
        assert_relative_eq!(rows[0].a, 0.0);
        assert_relative_eq!(rows[0].alpha, 0.0);
        assert_relative_eq!(rows[1].a, 0.325);
        assert_relative_eq!(rows[1].alpha, -FRAC_PI_2);
        assert_relative_eq!(rows[2].a, 1.150);
        assert_relative_eq!(rows[2].alpha, 0.0);
        assert_relative_eq!(rows[3].d, 1.225);
        assert_relative_eq!(rows[3].a, 0.300);
        assert_relative_eq!(rows[3].alpha, -FRAC_PI_2);
    }

    #[test]
    fn clamp_at_bounds() {
        let limits = JointLimits { min: -1.0, max: 2.0 };
        assert_eq!(limits.clamp(0.5), (0.5, false));
        assert_eq!(limits.clamp(-3.0), (-1.0, true));
        assert_eq!(limits.clamp(2.1), (2.0, true));
        // clamped value is exactly the bound, not an approximation
        assert_eq!(limits.clamp(5.0).0.to_bits(), 2.0_f64.to_bits());
    }

    #[test]
    fn contains_is_inclusive() {
        let limits = JointLimits { min: -1.0, max: 2.0 };
        assert!(limits.contains(-1.0));
        assert!(limits.contains(2.0));
        assert!(!limits.contains(2.0000001));
    }

    #[test]
    fn toml_defaults_fill_missing_fields() {
        let g = ArmGeometry::from_toml_str("a2 = 1.5\n").unwrap();
        assert_relative_eq!(g.a2, 1.5);
        assert_relative_eq!(g.a1, 0.325);
        assert_relative_eq!(g.d4, 1.225);
    }

    #[test]
    fn toml_full_round_trip() {
        let g = ArmGeometry::default();
        let text = toml::to_string(&g).unwrap();
        let back = ArmGeometry::from_toml_str(&text).unwrap();
        assert_eq!(g, back);
    }

    #[test]
    fn validate_rejects_nonpositive_link() {
        let g = ArmGeometry {
            a2: 0.0,
            ..ArmGeometry::default()
        };
        assert!(matches!(
            g.validate(),
            Err(ConfigError::InvalidLinkLength { joint: 3, .. })
        ));
    }

    #[test]
    fn validate_rejects_inverted_limits() {
        let mut g = ArmGeometry::default();
        g.limits[1] = JointLimits { min: 1.0, max: -1.0 };
        assert!(matches!(
            g.validate(),
            Err(ConfigError::InvalidLimits { joint: 2, .. })
        ));
    }

    #[test]
    fn from_toml_str_rejects_bad_values() {
        assert!(matches!(
            ArmGeometry::from_toml_str("a1 = -0.5\n"),
            Err(ConfigError::InvalidLinkLength { .. })
        ));
        assert!(matches!(
            ArmGeometry::from_toml_str("a1 = \"wide\"\n"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn reach_sums_links() {
        assert_relative_eq!(ArmGeometry::default().reach(), 3.0);
    }
}
