//! Scene-layout math for visualizing the arm.
//!
//! Turns the forward chain's frame poses into plain placement data:
//! joint-marker positions, link segments between consecutive joints, and
//! the end-effector marker. A rendering front end consumes these as-is;
//! nothing here draws.

pub mod layout;

pub use layout::{LinkSegment, SceneLayout, layout};
