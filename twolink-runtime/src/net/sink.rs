use std::{error, fmt, time::Duration};

use crate::core::PoseResult;

#[derive(Debug)]
pub enum PublishError {
    /// Publish cycle did not complete in time.
    Timeout(Duration),
    /// Request could not be queued on the client.
    Client(rumqttc::ClientError),
    /// Connection to the broker failed.
    Connection(rumqttc::ConnectionError),
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishError::Timeout(timeout) => {
                write!(f, "publish did not complete within {:?}", timeout)
            }
            PublishError::Client(e) => write!(f, "client: {}", e),
            PublishError::Connection(e) => write!(f, "connection: {}", e),
        }
    }
}

impl error::Error for PublishError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            PublishError::Timeout(_) => None,
            PublishError::Client(e) => Some(e),
            PublishError::Connection(e) => Some(e),
        }
    }
}

impl From<rumqttc::ClientError> for PublishError {
    fn from(value: rumqttc::ClientError) -> Self {
        PublishError::Client(value)
    }
}

impl From<rumqttc::ConnectionError> for PublishError {
    fn from(value: rumqttc::ConnectionError) -> Self {
        PublishError::Connection(value)
    }
}

/// Pose sink.
///
/// A pose sink delivers a pose to the actuator controller. Each call is a
/// single attempt; the caller does not retry.
#[async_trait::async_trait]
pub trait PoseSink {
    /// Deliver the pose.
    async fn send(&mut self, pose: &PoseResult) -> Result<(), PublishError>;
}

/// Sink that only logs the payload.
#[derive(Default)]
pub struct DryRunSink;

#[async_trait::async_trait]
impl PoseSink for DryRunSink {
    async fn send(&mut self, pose: &PoseResult) -> Result<(), PublishError> {
        info!("Publish disabled, payload: {}", pose.to_payload());

        Ok(())
    }
}
