use thiserror::Error;

/// Top-level error type for polibot.
#[derive(Debug, Error)]
pub enum PolibotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Geometry configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid link length for joint {joint}: {value} (must be > 0)")]
    InvalidLinkLength { joint: usize, value: f64 },

    #[error("Invalid limits for joint {joint}: min {min} must be < max {max}")]
    InvalidLimits { joint: usize, min: f64, max: f64 },
}

/// Input validation errors at the call boundary.
///
/// Copy + static messages for cheap propagation; the kinematics core itself
/// assumes well-formed inputs.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ValidationError {
    #[error("Angle count mismatch: expected {expected}, got {got}")]
    AngleCountMismatch { expected: usize, got: usize },

    #[error("Angle at index {index} is not finite")]
    AngleNotFinite { index: usize },

    #[error("Pose entry count mismatch: expected {expected}, got {got}")]
    PoseCountMismatch { expected: usize, got: usize },

    #[error("Pose entry ({row}, {col}) is not finite")]
    PoseEntryNotFinite { row: usize, col: usize },
}
