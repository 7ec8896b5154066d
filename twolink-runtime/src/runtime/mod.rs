use std::{fmt, future::Future};

use tokio::sync::mpsc;

use crate::{
    core::{finalize, Arm, Point, PoseResult, Unreachable},
    input::Event,
    net::{PoseSink, PublishError},
    render::{Render, Scene},
    Board,
};

mod error;

pub use self::error::Error;

pub type Result<T = ()> = std::result::Result<T, error::Error>;

/// Outcome of a single target request.
#[derive(Debug)]
pub enum Outcome {
    /// Target cannot be reached, nothing was drawn or sent.
    Unreachable(Unreachable),
    /// Pose was selected but held back by the publish policy.
    Suppressed,
    /// Pose was delivered to the actuator.
    Published(PoseResult),
    /// Pose could not be delivered to the actuator.
    Failed(PublishError),
}

/// Request counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    /// Target requests handled.
    pub requests: usize,
    /// Targets out of reach.
    pub unreachable: usize,
    /// Poses held back by the publish policy.
    pub suppressed: usize,
    /// Poses delivered.
    pub published: usize,
    /// Poses that failed to deliver.
    pub failed: usize,
}

impl Stats {
    fn record(&mut self, outcome: &Outcome) {
        self.requests += 1;

        match outcome {
            Outcome::Unreachable(_) => self.unreachable += 1,
            Outcome::Suppressed => self.suppressed += 1,
            Outcome::Published(_) => self.published += 1,
            Outcome::Failed(_) => self.failed += 1,
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Requests: {} Unreachable: {} Suppressed: {} Published: {} Failed: {}",
            self.requests, self.unreachable, self.suppressed, self.published, self.failed
        )
    }
}

/// Arm runtime.
///
/// The runtime owns the static arm configuration, the pose sink and the
/// renderer. Target requests are handled one at a time: solve, select,
/// finalize, draw and publish all complete before the next request is taken.
pub struct Runtime<S, R> {
    /// Shoulder position and link lengths.
    arm: Arm,
    /// Drawing surface.
    board: Board,
    /// Actuator interface.
    sink: S,
    /// Render collaborator.
    render: R,
    /// Request counters.
    stats: Stats,
}

impl<S: PoseSink, R: Render> Runtime<S, R> {
    /// Construct a new runtime.
    pub fn new(arm: Arm, board: Board, sink: S, render: R) -> Self {
        Self {
            arm,
            board,
            sink,
            render,
            stats: Stats::default(),
        }
    }

    /// Request counters.
    #[inline]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Render collaborator.
    #[inline]
    pub fn render(&self) -> &R {
        &self.render
    }

    /// Actuator interface.
    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Handle a single target request.
    pub async fn handle(&mut self, target: Point) -> Outcome {
        let outcome = self.solve(target).await;
        self.stats.record(&outcome);
        outcome
    }

    async fn solve(&mut self, target: Point) -> Outcome {
        trace!("Target ({:.2}, {:.2})", target.x, target.y);

        let mut scene = Scene {
            board: self.board,
            arm: self.arm,
            target,
            candidates: None,
            selected: None,
            pose: None,
        };

        let (candidates, selected) = match self.arm.configure(&target) {
            Ok(configuration) => configuration,
            Err(e) => {
                warn!("Target ({:.0}, {:.0}) unreachable: {}", target.x, target.y, e);
                self.render.draw(&scene);
                return Outcome::Unreachable(e);
            }
        };

        info!(
            "Angles: {} {}",
            selected.shoulder_angle.trunc(),
            selected.elbow_angle.trunc()
        );

        let pose = finalize(selected);

        scene.candidates = Some(candidates);
        scene.selected = Some(selected);
        scene.pose = pose;
        self.render.draw(&scene);

        let pose = match pose {
            Some(pose) => pose,
            None => {
                debug!("Pose not published, shoulder angle is not positive");
                return Outcome::Suppressed;
            }
        };

        match self.sink.send(&pose).await {
            Ok(_) => {
                info!("Published {}", pose);
                Outcome::Published(pose)
            }
            Err(e) => {
                error!("Failed to publish pose: {}", e);
                Outcome::Failed(e)
            }
        }
    }

    /// Run the event loop.
    ///
    /// The loop ends on a quit event, when all event senders are dropped or
    /// on termination request.
    pub async fn run(&mut self, events: mpsc::Receiver<Event>) -> Stats {
        self.run_until(events, tokio::signal::ctrl_c()).await
    }

    /// Run the event loop until quit or until `shutdown` resolves.
    ///
    /// A failing `shutdown` future is logged and no longer polled, the loop
    /// then only ends on a quit event or when all event senders are dropped.
    pub async fn run_until<F>(&mut self, mut events: mpsc::Receiver<Event>, shutdown: F) -> Stats
    where
        F: Future<Output = std::io::Result<()>>,
    {
        info!("{}", self.arm);

        tokio::pin!(shutdown);

        let mut listen_shutdown = true;

        loop {
            tokio::select! {
                event = events.recv() => {
                    match event {
                        Some(Event::Target(target)) => {
                            self.handle(target).await;
                        }
                        Some(Event::Quit) | None => break,
                    }
                }
                result = &mut shutdown, if listen_shutdown => {
                    match result {
                        Ok(()) => {
                            info!("Termination requested");
                            break;
                        }
                        Err(e) => {
                            error!("Failed to listen for termination signal: {}", e);
                            listen_shutdown = false;
                        }
                    }
                }
            }
        }

        info!("{}", self.stats);

        self.stats
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::core::LinkLengths;

    #[derive(Default)]
    struct RecordingSink {
        payloads: Vec<String>,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl PoseSink for RecordingSink {
        async fn send(&mut self, pose: &PoseResult) -> std::result::Result<(), PublishError> {
            if self.fail {
                return Err(PublishError::Timeout(Duration::from_millis(1)));
            }

            self.payloads.push(pose.to_payload());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingRender {
        scenes: Vec<Scene>,
    }

    impl Render for RecordingRender {
        fn draw(&mut self, scene: &Scene) {
            self.scenes.push(scene.clone());
        }
    }

    fn runtime(fail: bool) -> Runtime<RecordingSink, RecordingRender> {
        Runtime::new(
            Arm::new(
                Point::new(0.0, 0.0),
                LinkLengths::new(100.0, 80.0).unwrap(),
            ),
            Board {
                width: 400,
                height: 400,
            },
            RecordingSink {
                fail,
                ..Default::default()
            },
            RecordingRender::default(),
        )
    }

    #[tokio::test]
    async fn test_handle_unreachable() {
        let mut runtime = runtime(false);

        assert!(matches!(
            runtime.handle(Point::new(300.0, 0.0)).await,
            Outcome::Unreachable(Unreachable::OutOfReach { .. })
        ));
        assert!(matches!(
            runtime.handle(Point::new(0.0, 0.0)).await,
            Outcome::Unreachable(Unreachable::Coincident)
        ));
        assert!(matches!(
            runtime.handle(Point::new(10.0, 0.0)).await,
            Outcome::Unreachable(Unreachable::DeadZone { .. })
        ));

        assert!(runtime.sink().payloads.is_empty());
        assert_eq!(runtime.render().scenes.len(), 3);
        assert!(runtime.render().scenes.iter().all(|s| s.selected.is_none()));
        assert_eq!(runtime.stats().unreachable, 3);
    }

    #[tokio::test]
    async fn test_handle_suppressed() {
        let mut runtime = runtime(false);

        // The selected elbow lies below the shoulder, the shoulder angle is negative.
        assert!(matches!(
            runtime.handle(Point::new(150.0, 0.0)).await,
            Outcome::Suppressed
        ));

        assert!(runtime.sink().payloads.is_empty());

        let scene = &runtime.render().scenes[0];
        let selected = scene.selected.unwrap();
        assert!(selected.shoulder_angle < 0.0);
        assert!(scene.candidates.unwrap().contains(&selected));
        assert_eq!(scene.pose, None);
    }

    #[tokio::test]
    async fn test_handle_published() {
        let mut runtime = runtime(false);

        let outcome = runtime.handle(Point::new(0.0, 150.0)).await;
        let pose = match outcome {
            Outcome::Published(pose) => pose,
            _ => panic!("expected published pose"),
        };

        assert!(pose.shoulder_angle() > 0.0);
        assert_eq!(runtime.sink().payloads, vec![pose.to_payload()]);
        assert_eq!(runtime.render().scenes[0].pose, Some(pose));
        assert_eq!(runtime.stats().published, 1);
    }

    #[tokio::test]
    async fn test_handle_publish_failure() {
        let mut runtime = runtime(true);

        assert!(matches!(
            runtime.handle(Point::new(0.0, 150.0)).await,
            Outcome::Failed(PublishError::Timeout(_))
        ));
        assert!(matches!(
            runtime.handle(Point::new(0.0, 150.0)).await,
            Outcome::Failed(_)
        ));
        assert_eq!(runtime.stats().failed, 2);
    }

    #[tokio::test]
    async fn test_run_until_quit() {
        let mut runtime = runtime(false);
        let (tx, rx) = mpsc::channel(8);

        tx.send(Event::Target(Point::new(0.0, 150.0))).await.unwrap();
        tx.send(Event::Target(Point::new(500.0, 0.0))).await.unwrap();
        tx.send(Event::Target(Point::new(150.0, 0.0))).await.unwrap();
        tx.send(Event::Quit).await.unwrap();
        tx.send(Event::Target(Point::new(0.0, 150.0))).await.unwrap();

        let stats = runtime.run(rx).await;

        assert_eq!(
            stats,
            Stats {
                requests: 3,
                unreachable: 1,
                suppressed: 1,
                published: 1,
                failed: 0,
            }
        );
    }

    #[tokio::test]
    async fn test_run_until_shutdown() {
        let mut runtime = runtime(false);
        let (_tx, rx) = mpsc::channel(8);

        let stats = runtime.run_until(rx, std::future::ready(Ok(()))).await;
        assert_eq!(stats, Stats::default());
    }

    #[tokio::test]
    async fn test_run_shutdown_listener_failure() {
        let mut runtime = runtime(false);
        let (tx, rx) = mpsc::channel(8);

        tx.send(Event::Target(Point::new(0.0, 150.0))).await.unwrap();
        tx.send(Event::Target(Point::new(0.0, 150.0))).await.unwrap();
        tx.send(Event::Quit).await.unwrap();

        let failure = std::io::Error::new(std::io::ErrorKind::Other, "no signal handler");
        let stats = runtime
            .run_until(rx, std::future::ready(Err(failure)))
            .await;

        assert_eq!(stats.requests, 2);
        assert_eq!(stats.published, 2);
        assert_eq!(runtime.sink().payloads.len(), 2);
    }
}
