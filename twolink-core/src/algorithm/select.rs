use std::cmp::Ordering;

use crate::geometry::{bearing, distance, Point};

/// Straight angle against which both joint angles are measured.
const RIGHT_ANGLE: f64 = 90.0;

/// One arm configuration that reaches the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateConfiguration {
    /// Elbow position.
    pub elbow: Point,
    /// Shoulder angle in degrees.
    pub shoulder_angle: f64,
    /// Elbow angle in degrees, relative to the upper link.
    pub elbow_angle: f64,
}

impl CandidateConfiguration {
    /// Derive the joint angles from an elbow position.
    ///
    /// The shoulder angle is the bearing of the upper link. The elbow angle
    /// is offset by a right angle so that a straight arm reads 90 degrees.
    #[allow(clippy::if_same_then_else)]
    pub fn from_elbow(origin: Point, elbow: Point, target: Point) -> Self {
        let shoulder_angle = bearing(&origin, &elbow);
        let forearm_angle = bearing(&elbow, &target);

        // TODO: Both orderings share one expression and the result is never
        // wrapped. Fold into the controller's accepted range once it is known.
        let elbow_angle = if shoulder_angle < forearm_angle {
            RIGHT_ANGLE + forearm_angle - shoulder_angle
        } else {
            RIGHT_ANGLE + forearm_angle - shoulder_angle
        };

        Self {
            elbow,
            shoulder_angle,
            elbow_angle,
        }
    }

    /// Summed absolute deviation of both joint angles from a right angle.
    ///
    /// Angles are taken in whole degrees, truncated toward zero, as the
    /// actuator receives them.
    #[inline]
    pub fn deviation(&self) -> f64 {
        (self.shoulder_angle.trunc() - RIGHT_ANGLE).abs()
            + (self.elbow_angle.trunc() - RIGHT_ANGLE).abs()
    }
}

impl std::fmt::Display for CandidateConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Elbow: ({:.2}, {:.2}) Shoulder: {:+.2}° Relative: {:+.2}°",
            self.elbow.x, self.elbow.y, self.shoulder_angle, self.elbow_angle
        )
    }
}

/// Pick one of two configurations.
///
/// The configuration furthest from a right angle pose wins. The outcome does
/// not depend on the order of the arguments: on equal deviation the
/// configuration with the higher elbow is taken, then the one furthest right.
pub fn choose(a: CandidateConfiguration, b: CandidateConfiguration) -> CandidateConfiguration {
    let order = a
        .deviation()
        .total_cmp(&b.deviation())
        .then_with(|| a.elbow.y.total_cmp(&b.elbow.y))
        .then_with(|| a.elbow.x.total_cmp(&b.elbow.x));

    match order {
        Ordering::Less => b,
        _ => a,
    }
}

/// Select the arm configuration for the candidate elbow positions.
pub fn select(
    origin: Point,
    target: Point,
    candidates: (Point, Point),
    l1: f64,
    l2: f64,
) -> CandidateConfiguration {
    let first = CandidateConfiguration::from_elbow(origin, candidates.0, target);
    let second = CandidateConfiguration::from_elbow(origin, candidates.1, target);

    for candidate in [&first, &second] {
        log::trace!(
            "Candidate {} Deviation: {:.2} Link error: {:.2e} {:.2e}",
            candidate,
            candidate.deviation(),
            distance(&origin, &candidate.elbow) - l1,
            distance(&candidate.elbow, &target) - l2
        );
    }

    choose(first, second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::ik::solve;

    const TOLERANCE: f64 = 1e-6;

    fn candidate(shoulder_angle: f64, elbow_angle: f64) -> CandidateConfiguration {
        CandidateConfiguration {
            elbow: Point::new(shoulder_angle, elbow_angle),
            shoulder_angle,
            elbow_angle,
        }
    }

    #[test]
    fn test_deviation() {
        assert!((candidate(85.0, 95.0).deviation() - 10.0).abs() < TOLERANCE);
        assert!((candidate(5.0, 5.0).deviation() - 170.0).abs() < TOLERANCE);
        assert!((candidate(-30.0, 200.0).deviation() - 230.0).abs() < TOLERANCE);
        assert_eq!(candidate(10.9, 10.0).deviation(), 160.0);
        assert_eq!(candidate(-0.7, 90.9).deviation(), 90.0);
    }

    #[test]
    fn test_choose_larger_deviation() {
        let near = candidate(85.0, 95.0);
        let far = candidate(5.0, 5.0);

        assert_eq!(choose(near, far), far);
        assert_eq!(choose(far, near), far);
    }

    #[test]
    fn test_choose_tie_is_order_independent() {
        let a = CandidateConfiguration {
            elbow: Point::new(10.0, 20.0),
            shoulder_angle: 80.0,
            elbow_angle: 100.0,
        };
        let b = CandidateConfiguration {
            elbow: Point::new(10.0, -20.0),
            shoulder_angle: 100.0,
            elbow_angle: 80.0,
        };

        assert_eq!(choose(a, b), a);
        assert_eq!(choose(b, a), a);
    }

    #[test]
    fn test_choose_whole_degrees() {
        // Fractions differ, whole degrees tie: the higher elbow decides.
        let a = CandidateConfiguration {
            elbow: Point::new(10.0, 20.0),
            shoulder_angle: 10.9,
            elbow_angle: 10.0,
        };
        let b = CandidateConfiguration {
            elbow: Point::new(10.0, -20.0),
            shoulder_angle: 10.0,
            elbow_angle: 10.5,
        };

        assert_eq!(a.deviation(), b.deviation());
        assert_eq!(choose(a, b), a);
        assert_eq!(choose(b, a), a);
    }

    #[test]
    fn test_from_elbow_angles() {
        let origin = Point::new(0.0, 0.0);
        let config =
            CandidateConfiguration::from_elbow(origin, Point::new(0.0, 100.0), Point::new(80.0, 100.0));

        assert!((config.shoulder_angle - 90.0).abs() < TOLERANCE);
        assert!((config.elbow_angle - 0.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_from_elbow_straight_arm() {
        let origin = Point::new(0.0, 0.0);
        let config =
            CandidateConfiguration::from_elbow(origin, Point::new(100.0, 0.0), Point::new(180.0, 0.0));

        assert!((config.shoulder_angle - 0.0).abs() < TOLERANCE);
        assert!((config.elbow_angle - 90.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_select_scenario() {
        let origin = Point::new(0.0, 0.0);
        let target = Point::new(150.0, 0.0);
        let candidates = solve(origin, target, 100.0, 80.0).unwrap();

        let upper = CandidateConfiguration::from_elbow(origin, candidates.0, target);
        let lower = CandidateConfiguration::from_elbow(origin, candidates.1, target);

        let expected = (87.0_f64 / 100.0).acos().to_degrees();
        assert!((upper.shoulder_angle - expected).abs() < TOLERANCE);
        assert!((lower.shoulder_angle + expected).abs() < TOLERANCE);

        let selected = select(origin, target, candidates, 100.0, 80.0);
        assert!(lower.deviation() > upper.deviation());
        assert_eq!(selected, lower);
    }

    #[test]
    fn test_select_swap_candidates() {
        let origin = Point::new(320.0, 240.0);
        let (l1, l2) = (150.0, 100.0);

        for target in [
            Point::new(420.0, 340.0),
            Point::new(200.0, 100.0),
            Point::new(320.0, 440.0),
            Point::new(100.0, 240.0),
        ] {
            let (a, b) = solve(origin, target, l1, l2).unwrap();

            assert_eq!(
                select(origin, target, (a, b), l1, l2),
                select(origin, target, (b, a), l1, l2)
            );
        }
    }

    #[test]
    fn test_select_degenerate() {
        let origin = Point::new(0.0, 0.0);
        let target = Point::new(180.0, 0.0);
        let candidates = solve(origin, target, 100.0, 80.0).unwrap();

        let selected = select(origin, target, candidates, 100.0, 80.0);
        assert!((selected.elbow - Point::new(100.0, 0.0)).norm() < TOLERANCE);
        assert!((selected.elbow_angle - 90.0).abs() < TOLERANCE);
    }
}
