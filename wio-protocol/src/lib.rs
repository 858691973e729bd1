//! MQTT wire formats for wio-node
//!
//! The node talks to its broker with plain-text payloads. This crate holds
//! the pieces both ends must agree on:
//!
//! ```text
//!   cfg/<device-id>            <- JSON configuration (slot 0)
//!   <prefix>/<functionality>   <- "on" / "off" switch commands (slot 1)
//!   stat/<device-id>/<leaf>    -> telemetry, "%d" or "%.3f" text
//! ```
//!
//! Topics are bounded to [`MAX_TOPIC_LEN`] characters. Everything here is
//! allocation-free and `no_std`.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod payload;
pub mod topic;

pub use config::{parse_device_id, ConfigError, ConfigMessage, DeviceId, DEFAULT_BROKER_PORT};
pub use payload::{encode_float, encode_int, parse_switch, PayloadError, PayloadText, Switch};
pub use topic::{Topic, TopicError, MAX_TOPIC_LEN};
