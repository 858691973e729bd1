//! wio-node Hardware Abstraction Layer
//!
//! This crate defines the collaborator traits the connectivity and display
//! logic is written against. The WiFi co-processor driver, the MQTT client
//! and the SD card driver live outside the core crates and implement these
//! traits, so the same supervisor runs on the device and in host tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  wio-core (supervisor, node)            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  wio-hal (this crate - traits)          │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┼───────────┐
//!         ▼           ▼           ▼
//!   ┌──────────┐ ┌──────────┐ ┌──────────┐
//!   │ RTL8720  │ │  MQTT    │ │  SD card │
//!   │ eRPC     │ │  client  │ │  driver  │
//!   └──────────┘ └──────────┘ └──────────┘
//! ```
//!
//! # Traits
//!
//! - [`wifi::WifiLink`] - Station association and asynchronous scanning
//! - [`mqtt::MqttLink`], [`mqtt::MessageSink`] - Broker session and inbound delivery
//! - [`storage::StorageMedia`] - Removable media presence

#![no_std]
#![deny(unsafe_code)]

pub mod mqtt;
pub mod storage;
pub mod wifi;

// Re-export key traits at crate root for convenience
pub use mqtt::{MessageSink, MqttError, MqttLink};
pub use storage::StorageMedia;
pub use wifi::{ScanState, WifiLink, WifiStatus};
