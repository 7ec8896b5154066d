use crate::{
    core::{
        geometry::{midpoint, Point},
        Arm, CandidateConfiguration, PoseResult,
    },
    Board,
};

/// Everything there is to draw for a single target request.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Drawing surface.
    pub board: Board,
    /// Shoulder position and link lengths.
    pub arm: Arm,
    /// Requested target.
    pub target: Point,
    /// Both candidate configurations, if the target is reachable.
    pub candidates: Option<[CandidateConfiguration; 2]>,
    /// Selected configuration, if the target is reachable.
    pub selected: Option<CandidateConfiguration>,
    /// Pose sent to the actuator, if any.
    pub pose: Option<PoseResult>,
}

impl Scene {
    /// Label positions for the shoulder and elbow angle.
    ///
    /// Each label sits halfway along the link it belongs to.
    pub fn angle_labels(&self) -> Option<(Point, Point)> {
        self.selected.map(|selected| {
            (
                midpoint(&self.arm.origin(), &selected.elbow),
                midpoint(&selected.elbow, &self.target),
            )
        })
    }
}

/// Render collaborator.
///
/// A renderer only consumes the scene and never feeds back into the solver.
pub trait Render {
    fn draw(&mut self, scene: &Scene);
}

/// Render the scene as log lines.
#[derive(Default)]
pub struct LogRender;

impl Render for LogRender {
    fn draw(&mut self, scene: &Scene) {
        let origin = scene.arm.origin();
        let links = scene.arm.links();

        debug!(
            "Origin ({:.0}, {:.0}) reach circle radius {:.2}",
            origin.x,
            origin.y,
            links.l1()
        );
        debug!(
            "Target ({:.0}, {:.0}) reach circle radius {:.2}",
            scene.target.x,
            scene.target.y,
            links.l2()
        );

        if let Some(candidates) = &scene.candidates {
            for candidate in candidates {
                debug!(
                    "Intersection ({:.0}, {:.0})",
                    candidate.elbow.x, candidate.elbow.y
                );
            }
        }

        if let (Some(selected), Some((shoulder_label, elbow_label))) =
            (&scene.selected, scene.angle_labels())
        {
            debug!(
                "Link ({:.0}, {:.0}) -> ({:.0}, {:.0}) -> ({:.0}, {:.0})",
                origin.x,
                origin.y,
                selected.elbow.x,
                selected.elbow.y,
                scene.target.x,
                scene.target.y
            );
            debug!(
                "Label {} deg at ({:.0}, {:.0})",
                selected.shoulder_angle.trunc(),
                shoulder_label.x,
                shoulder_label.y
            );
            debug!(
                "Label {} deg at ({:.0}, {:.0})",
                selected.elbow_angle.trunc(),
                elbow_label.x,
                elbow_label.y
            );
        }
    }
}
