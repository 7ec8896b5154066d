// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

//! Runtime for the two-link planar arm.
//!
//! Target requests are read from an input source, solved by the kinematics
//! in `twolink-core`, drawn by a renderer and, when the publish policy
//! allows it, sent to the actuator controller over MQTT.

pub mod input;
pub mod logger;
pub mod net;
pub mod render;
pub mod runtime;

#[macro_use]
extern crate log;

mod config;

pub use self::config::*;

pub use twolink_core as core;

pub use self::runtime::Error;
pub use self::runtime::Runtime;

/// Runtime constants.
pub mod consts {
    use std::time::Duration;

    /// Runtime version.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// Default MQTT broker port.
    pub const DEFAULT_MQTT_PORT: u16 = 1883;

    /// Default topic on which the joint angles are published.
    pub const DEFAULT_TOPIC: &str = "arm/angles";

    /// Default upper bound for a single connect, publish and disconnect cycle.
    pub const DEFAULT_PUBLISH_TIMEOUT: Duration = Duration::from_millis(2_000);

    /// MQTT keep alive interval.
    pub const MQTT_KEEP_ALIVE: Duration = Duration::from_secs(5);

    /// Queue size for input events.
    pub const QUEUE_SIZE_EVENT: usize = 16;
}
