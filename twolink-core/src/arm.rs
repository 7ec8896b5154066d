use std::{error, fmt};

use crate::{
    algorithm::{ik, select},
    geometry::Point,
    CandidateConfiguration, Unreachable,
};

/// Link length is zero, negative or not a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidLinkLength(pub f64);

impl fmt::Display for InvalidLinkLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "link length must be strictly positive, got {}", self.0)
    }
}

impl error::Error for InvalidLinkLength {}

/// Lengths of both arm links.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkLengths {
    /// Shoulder to elbow.
    l1: f64,
    /// Elbow to end-effector.
    l2: f64,
}

impl LinkLengths {
    /// Construct the link lengths.
    ///
    /// Both lengths must be finite and strictly positive.
    pub fn new(l1: f64, l2: f64) -> Result<Self, InvalidLinkLength> {
        for length in [l1, l2] {
            if !length.is_finite() || length <= 0.0 {
                return Err(InvalidLinkLength(length));
            }
        }

        Ok(Self { l1, l2 })
    }

    /// Shoulder to elbow.
    #[inline]
    pub fn l1(&self) -> f64 {
        self.l1
    }

    /// Elbow to end-effector.
    #[inline]
    pub fn l2(&self) -> f64 {
        self.l2
    }

    /// Furthest distance the end-effector can be from the shoulder.
    #[inline]
    pub fn max_reach(&self) -> f64 {
        self.l1 + self.l2
    }

    /// Closest distance the end-effector can be from the shoulder.
    #[inline]
    pub fn min_reach(&self) -> f64 {
        (self.l1 - self.l2).abs()
    }
}

impl fmt::Display for LinkLengths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L1: {:.2} L2: {:.2}", self.l1, self.l2)
    }
}

/// The fixed part of the arm: shoulder position and link lengths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arm {
    origin: Point,
    links: LinkLengths,
}

impl Arm {
    /// Construct a new arm.
    pub fn new(origin: Point, links: LinkLengths) -> Self {
        Self { origin, links }
    }

    /// Shoulder position.
    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Link lengths.
    #[inline]
    pub fn links(&self) -> LinkLengths {
        self.links
    }

    /// Candidate elbow positions for the target.
    pub fn solve(&self, target: &Point) -> Result<(Point, Point), Unreachable> {
        ik::solve(self.origin, *target, self.links.l1, self.links.l2)
    }

    /// Both candidate configurations and the selected one.
    pub fn configure(
        &self,
        target: &Point,
    ) -> Result<([CandidateConfiguration; 2], CandidateConfiguration), Unreachable> {
        let candidates = self.solve(target)?;

        let pair = [
            CandidateConfiguration::from_elbow(self.origin, candidates.0, *target),
            CandidateConfiguration::from_elbow(self.origin, candidates.1, *target),
        ];

        let selected = select::choose(pair[0], pair[1]);

        Ok((pair, selected))
    }
}

impl fmt::Display for Arm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Origin: ({:.2}, {:.2}) {}",
            self.origin.x, self.origin.y, self.links
        )
    }
}
