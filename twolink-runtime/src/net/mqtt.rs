use std::time::Duration;

use rumqttc::{AsyncClient, Event, MqttOptions, Outgoing, Packet, QoS};

use crate::{core::PoseResult, ActuatorConfig, GlobalConfig};

use super::{PoseSink, PublishError};

/// Capacity of the client request queue.
const REQUEST_CAPACITY: usize = 10;

/// Publish poses to the actuator controller over MQTT.
///
/// Every pose is sent on a fresh connection which is closed again once the
/// broker has taken the message. There is no persistent session and no
/// batching.
pub struct MqttSink {
    /// Client identifier.
    client_id: String,
    /// Broker hostname or ip address.
    host: String,
    /// Broker port.
    port: u16,
    /// Broker credentials.
    credentials: Option<(String, String)>,
    /// Publish topic.
    topic: String,
    /// Quality of service.
    qos: QoS,
    /// Upper bound for one publish cycle.
    timeout: Duration,
}

impl MqttSink {
    /// Construct the sink from configuration.
    pub fn new(global: &GlobalConfig, actuator: &ActuatorConfig) -> Self {
        let credentials = global.mqtt_username.as_ref().map(|username| {
            (
                username.clone(),
                global.mqtt_password.clone().unwrap_or_default(),
            )
        });

        let qos = match actuator.qos {
            0 => QoS::AtMostOnce,
            1 => QoS::AtLeastOnce,
            _ => QoS::ExactlyOnce,
        };

        Self {
            client_id: format!("{}-{}", global.bin_name, std::process::id()),
            host: global.mqtt_host.clone(),
            port: global.mqtt_port,
            credentials,
            topic: actuator.topic.clone(),
            qos,
            timeout: actuator.timeout(),
        }
    }

    /// Connect, publish the payload and disconnect.
    async fn transmit(&self, payload: String) -> Result<(), PublishError> {
        let mut options = MqttOptions::new(&self.client_id, &self.host, self.port);
        options.set_keep_alive(crate::consts::MQTT_KEEP_ALIVE);

        if let Some((username, password)) = &self.credentials {
            options.set_credentials(username, password);
        }

        let (client, mut eventloop) = AsyncClient::new(options, REQUEST_CAPACITY);

        client
            .publish(&self.topic, self.qos, false, payload)
            .await?;

        loop {
            match eventloop.poll().await? {
                Event::Incoming(Packet::ConnAck(_)) => {
                    trace!("Connected to {}:{}", self.host, self.port);
                }
                Event::Outgoing(Outgoing::Publish(_)) if self.qos == QoS::AtMostOnce => {
                    client.disconnect().await?;
                }
                Event::Incoming(Packet::PubAck(_)) if self.qos == QoS::AtLeastOnce => {
                    client.disconnect().await?;
                }
                Event::Incoming(Packet::PubComp(_)) if self.qos == QoS::ExactlyOnce => {
                    client.disconnect().await?;
                }
                Event::Outgoing(Outgoing::Disconnect) => break,
                _ => {}
            }
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl PoseSink for MqttSink {
    async fn send(&mut self, pose: &PoseResult) -> Result<(), PublishError> {
        let payload = pose.to_payload();

        tokio::time::timeout(self.timeout, self.transmit(payload.clone()))
            .await
            .map_err(|_| PublishError::Timeout(self.timeout))??;

        trace!("Published {} on {}", payload, self.topic);

        Ok(())
    }
}
