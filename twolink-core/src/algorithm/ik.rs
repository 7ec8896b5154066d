use std::{error, fmt};

use crate::geometry::{distance, Point};

/// Target cannot be reached by the arm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Unreachable {
    /// Target is further away than both links combined.
    OutOfReach { distance: f64, reach: f64 },
    /// Target is closer to the shoulder than the links can fold.
    DeadZone { distance: f64, reach: f64 },
    /// Target coincides with the shoulder.
    Coincident,
}

impl fmt::Display for Unreachable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unreachable::OutOfReach { distance, reach } => write!(
                f,
                "target at distance {:.2} is beyond maximum reach {:.2}",
                distance, reach
            ),
            Unreachable::DeadZone { distance, reach } => write!(
                f,
                "target at distance {:.2} is within minimum reach {:.2}",
                distance, reach
            ),
            Unreachable::Coincident => write!(f, "target coincides with origin"),
        }
    }
}

impl error::Error for Unreachable {}

/// Find the candidate elbow positions for a target.
///
/// The elbow lies on the circle of radius `l1` around the origin and on the
/// circle of radius `l2` around the target. Both intersections of these
/// circles are returned. The first candidate is the intersection found by
/// rotating the origin to target direction counter-clockwise, the second
/// clockwise. When the arm is fully extended or fully folded both
/// candidates are the same point.
///
/// The link lengths are expected to be strictly positive.
pub fn solve(origin: Point, target: Point, l1: f64, l2: f64) -> Result<(Point, Point), Unreachable> {
    let delta = target - origin;
    let distance = distance(&origin, &target);
    log::trace!("IK distance:        {:.2}", distance);

    let reach = l1 + l2;
    if !distance.is_finite() || distance > reach {
        return Err(Unreachable::OutOfReach { distance, reach });
    }

    if distance == 0.0 {
        return Err(Unreachable::Coincident);
    }

    // Distance along the origin to target line up to the chord between both
    // intersections.
    let d = (l1.powi(2) - l2.powi(2) + distance.powi(2)) / (2.0 * distance);
    log::trace!("IK chord offset:    {:.2}", d);

    // Allow for rounding at full extension and full fold.
    let radicand = l1.powi(2) - d.powi(2);
    if radicand < -(f64::EPSILON * 16.0 * l1.powi(2)) {
        return Err(Unreachable::DeadZone {
            distance,
            reach: (l1 - l2).abs(),
        });
    }

    let h = radicand.max(0.0).sqrt();
    log::trace!("IK chord half:      {:.2}", h);

    let upper = Point::new(
        origin.x + (d * delta.x - h * delta.y) / distance,
        origin.y + (h * delta.x + d * delta.y) / distance,
    );
    let lower = Point::new(
        origin.x + (d * delta.x + h * delta.y) / distance,
        origin.y + (-h * delta.x + d * delta.y) / distance,
    );

    Ok((upper, lower))
}
