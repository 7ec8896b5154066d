mod mqtt;
mod sink;

pub use self::mqtt::MqttSink;
pub use self::sink::{DryRunSink, PoseSink, PublishError};
