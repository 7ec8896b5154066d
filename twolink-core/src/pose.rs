use std::fmt;

use crate::{geometry::Point, CandidateConfiguration};

/// The arm configuration handed to the actuator.
///
/// A pose result can only be obtained through [`finalize`], which applies the
/// publish policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseResult(CandidateConfiguration);

impl PoseResult {
    /// The configuration this pose was created from.
    #[inline]
    pub fn configuration(&self) -> &CandidateConfiguration {
        &self.0
    }

    /// Elbow position.
    #[inline]
    pub fn elbow(&self) -> Point {
        self.0.elbow
    }

    /// Shoulder angle in degrees.
    #[inline]
    pub fn shoulder_angle(&self) -> f64 {
        self.0.shoulder_angle
    }

    /// Elbow angle in degrees.
    #[inline]
    pub fn elbow_angle(&self) -> f64 {
        self.0.elbow_angle
    }

    /// Joint angles in whole degrees, truncated towards zero.
    pub fn degrees(&self) -> (i32, i32) {
        (
            self.0.shoulder_angle.trunc() as i32,
            self.0.elbow_angle.trunc() as i32,
        )
    }

    /// Actuator message payload.
    ///
    /// The payload is the shoulder and elbow angle in whole degrees,
    /// separated by a comma.
    pub fn to_payload(&self) -> String {
        let (shoulder, elbow) = self.degrees();
        format!("{},{}", shoulder, elbow)
    }
}

impl fmt::Display for PoseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (shoulder, elbow) = self.degrees();
        write!(f, "Pose: Shoulder: {}° Elbow: {}°", shoulder, elbow)
    }
}

/// Whether a configuration may be sent to the actuator.
///
/// Only configurations whose shoulder angle, in whole degrees as sent on
/// the wire, is strictly positive are sent.
#[inline]
pub fn should_publish(config: &CandidateConfiguration) -> bool {
    config.shoulder_angle.trunc() > 0.0
}

/// Turn the selected configuration into the output pose.
///
/// Returns `None` when the configuration must not be sent.
pub fn finalize(config: CandidateConfiguration) -> Option<PoseResult> {
    if should_publish(&config) {
        Some(PoseResult(config))
    } else {
        log::debug!("Suppressed pose with shoulder angle {:.2}°", config.shoulder_angle);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(shoulder_angle: f64, elbow_angle: f64) -> CandidateConfiguration {
        CandidateConfiguration {
            elbow: Point::new(0.0, 0.0),
            shoulder_angle,
            elbow_angle,
        }
    }

    #[test]
    fn test_should_publish() {
        assert!(should_publish(&config(1.0, 45.0)));
        assert!(should_publish(&config(1.7, 45.0)));
        assert!(!should_publish(&config(0.1, 45.0)));
        assert!(!should_publish(&config(0.0, 45.0)));
        assert!(!should_publish(&config(-29.5, 157.6)));
    }

    #[test]
    fn test_finalize_suppress() {
        assert_eq!(finalize(config(0.0, 90.0)), None);
        assert_eq!(finalize(config(-0.0, 90.0)), None);
        assert_eq!(finalize(config(-120.0, 10.0)), None);
    }

    #[test]
    fn test_finalize_suppress_below_one_degree() {
        assert_eq!(finalize(config(0.5, 88.3)), None);
        assert_eq!(finalize(config(0.999, 88.3)), None);
        assert_eq!(finalize(config(1.2, 88.3)).unwrap().to_payload(), "1,88");
    }

    #[test]
    fn test_finalize_pass() {
        let pose = finalize(config(29.54, 22.41)).unwrap();
        assert_eq!(pose.configuration(), &config(29.54, 22.41));
        assert_eq!(pose.degrees(), (29, 22));
    }

    #[test]
    fn test_payload() {
        assert_eq!(finalize(config(45.9, 112.2)).unwrap().to_payload(), "45,112");
        assert_eq!(finalize(config(12.0, -7.8)).unwrap().to_payload(), "12,-7");
        assert_eq!(finalize(config(170.5, 300.0)).unwrap().to_payload(), "170,300");
    }
}
