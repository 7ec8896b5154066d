//! Kinematics for a two-link planar arm.
//!
//! The shoulder is fixed at an origin, the elbow joins both links and the
//! end-effector is placed on a requested target. All functions in this crate
//! are pure: they take every input as an argument and return plain values.

pub mod algorithm;
pub mod geometry;
pub mod pose;

mod arm;

pub use self::algorithm::ik::{solve, Unreachable};
pub use self::algorithm::select::{select, CandidateConfiguration};
pub use self::arm::{Arm, InvalidLinkLength, LinkLengths};
pub use self::geometry::Point;
pub use self::pose::{finalize, should_publish, PoseResult};

pub use nalgebra;
