use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde_derive::Deserialize;

use crate::core::{Arm, LinkLengths, Point};

pub trait Configurable: Clone {
    fn global(&self) -> &GlobalConfig;
}

/// Global configuration.
#[derive(Clone, Debug)]
pub struct GlobalConfig {
    /// Name of the binary.
    pub bin_name: String,

    /// MQTT broker hostname or ip address.
    pub mqtt_host: String,

    /// MQTT broker port.
    pub mqtt_port: u16,

    /// MQTT broker username.
    pub mqtt_username: Option<String>,

    /// MQTT broker password.
    pub mqtt_password: Option<String>,

    /// Whether poses are published to the actuator.
    pub enable_publish: bool,

    /// Whether the application runs as daemon.
    pub daemon: bool,
}

impl GlobalConfig {
    /// Take over the broker settings present in the configuration file.
    pub fn apply_broker(&mut self, broker: &BrokerConfig) {
        if let Some(host) = &broker.host {
            self.mqtt_host = host.clone();
        }
        if let Some(port) = broker.port {
            self.mqtt_port = port;
        }
        if broker.username.is_some() {
            self.mqtt_username = broker.username.clone();
        }
        if broker.password.is_some() {
            self.mqtt_password = broker.password.clone();
        }
    }
}

impl Configurable for GlobalConfig {
    fn global(&self) -> &GlobalConfig {
        self
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            bin_name: String::new(),
            mqtt_host: "localhost".to_string(),
            mqtt_port: crate::consts::DEFAULT_MQTT_PORT,
            mqtt_username: None,
            mqtt_password: None,
            enable_publish: true,
            daemon: false,
        }
    }
}

/// Drawing surface dimensions.
///
/// Targets are only accepted within the board.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct Board {
    /// Board width.
    pub width: u32,
    /// Board height.
    pub height: u32,
}

impl Board {
    /// Check if the point lies on the board.
    pub fn contains(&self, point: &Point) -> bool {
        (0.0..=self.width as f64).contains(&point.x) && (0.0..=self.height as f64).contains(&point.y)
    }
}

/// Actuator publish settings.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ActuatorConfig {
    /// Topic on which the joint angles are published.
    #[serde(default = "ActuatorConfig::default_topic")]
    pub topic: String,
    /// Upper bound for one publish cycle in milliseconds.
    #[serde(default = "ActuatorConfig::default_timeout")]
    pub timeout_ms: u64,
    /// MQTT quality of service level.
    #[serde(default = "ActuatorConfig::default_qos")]
    pub qos: u8,
}

impl ActuatorConfig {
    fn default_topic() -> String {
        crate::consts::DEFAULT_TOPIC.to_string()
    }

    fn default_timeout() -> u64 {
        crate::consts::DEFAULT_PUBLISH_TIMEOUT.as_millis() as u64
    }

    fn default_qos() -> u8 {
        1
    }

    /// Publish cycle timeout.
    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ActuatorConfig {
    fn default() -> Self {
        Self {
            topic: Self::default_topic(),
            timeout_ms: Self::default_timeout(),
            qos: Self::default_qos(),
        }
    }
}

/// Broker settings from the configuration file.
///
/// Any field left out falls back to the global configuration.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct BrokerConfig {
    /// MQTT broker hostname or ip address.
    pub host: Option<String>,
    /// MQTT broker port.
    pub port: Option<u16>,
    /// MQTT broker username.
    pub username: Option<String>,
    /// MQTT broker password.
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OriginSection {
    x: f64,
    y: f64,
}

#[derive(Debug, Deserialize)]
struct LinksSection {
    l1: f64,
    l2: f64,
}

#[derive(Debug, Deserialize)]
struct ArmFile {
    board: Board,
    origin: OriginSection,
    links: LinksSection,
    #[serde(default)]
    actuator: ActuatorConfig,
    #[serde(default)]
    broker: BrokerConfig,
}

/// Static arm configuration.
///
/// Loaded once on startup and fixed for the lifetime of the process.
#[derive(Clone, Debug)]
pub struct ArmConfig {
    /// Drawing surface.
    pub board: Board,
    /// Shoulder position and link lengths.
    pub arm: Arm,
    /// Actuator publish settings.
    pub actuator: ActuatorConfig,
    /// Broker settings.
    pub broker: BrokerConfig,
}

impl ArmConfig {
    /// Load the configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> crate::runtime::Result<Self> {
        let data = std::fs::read_to_string(path)?;

        Self::from_toml(&data)
    }

    /// Parse and validate the configuration.
    pub fn from_toml(data: &str) -> crate::runtime::Result<Self> {
        use crate::runtime::Error;

        let file: ArmFile = toml::from_str(data)
            .map_err(|e| Error::Config(format!("configuration malformatted: {}", e)))?;

        if file.board.width == 0 || file.board.height == 0 {
            return Err(Error::Config("board dimensions must be non-zero".to_string()));
        }

        let origin = Point::new(file.origin.x, file.origin.y);
        if !file.board.contains(&origin) {
            return Err(Error::Config(format!(
                "origin ({}, {}) lies outside the board",
                origin.x, origin.y
            )));
        }

        let links = LinkLengths::new(file.links.l1, file.links.l2)?;

        if file.actuator.timeout_ms == 0 {
            return Err(Error::Config("publish timeout must be non-zero".to_string()));
        }
        if file.actuator.qos > 2 {
            return Err(Error::Config(format!(
                "invalid quality of service level {}",
                file.actuator.qos
            )));
        }

        Ok(Self {
            board: file.board,
            arm: Arm::new(origin, links),
            actuator: file.actuator,
            broker: file.broker,
        })
    }
}

/// Daemon configuration.
#[derive(Clone, Debug)]
pub struct DaemonConfig {
    /// Static arm configuration.
    pub arm: ArmConfig,
    /// Program file to replay instead of reading standard input.
    pub program: Option<PathBuf>,
    /// Global configuration.
    pub global: GlobalConfig,
}

impl Configurable for DaemonConfig {
    fn global(&self) -> &GlobalConfig {
        &self.global
    }
}
