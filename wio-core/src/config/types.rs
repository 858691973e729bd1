//! Configuration type definitions

use heapless::String;
use wio_protocol::config::{DeviceId, MAX_HOST_LEN, MAX_NAME_LEN, MAX_SECRET_LEN};
use wio_protocol::DEFAULT_BROKER_PORT;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::page::copy_truncated;

/// Maximum SSID length (802.11)
pub const MAX_SSID_LEN: usize = 32;

/// Broker address used until configuration says otherwise
pub const DEFAULT_BROKER_HOST: &str = "192.168.178.48";

/// Device id used when the storage card has none
pub const DEFAULT_DEVICE_ID: &str = "default";

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValidationError {
    /// SSID is empty
    EmptySsid,
    /// Broker host is empty
    EmptyBrokerHost,
    /// Broker port is 0
    InvalidPort,
    /// Device id is empty
    EmptyDeviceId,
    /// An interval is 0 ms
    ZeroInterval,
}

/// WiFi network credentials
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WifiCredentials {
    pub ssid: String<MAX_SSID_LEN>,
    pub password: String<MAX_SECRET_LEN>,
}

impl WifiCredentials {
    pub fn new(ssid: &str, password: &str) -> Self {
        Self {
            ssid: copy_truncated(ssid),
            password: copy_truncated(password),
        }
    }
}

impl Default for WifiCredentials {
    fn default() -> Self {
        Self::new("default", "default")
    }
}

/// MQTT broker target and credentials
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BrokerConfig {
    pub host: String<MAX_HOST_LEN>,
    pub port: u16,
    /// Empty for an anonymous session
    pub user: String<MAX_NAME_LEN>,
    pub password: String<MAX_SECRET_LEN>,
}

impl BrokerConfig {
    pub fn new(host: &str, port: u16, user: &str, password: &str) -> Self {
        Self {
            host: copy_truncated(host),
            port,
            user: copy_truncated(user),
            password: copy_truncated(password),
        }
    }
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BROKER_HOST, DEFAULT_BROKER_PORT, "", "")
    }
}

/// Periods of the node's recurring activities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NetIntervals {
    /// WiFi status and scan polling
    pub wifi_poll_ms: u32,
    /// MQTT servicing and reconnect attempts
    pub mqtt_poll_ms: u32,
    /// Header icon refresh
    pub icon_refresh_ms: u32,
    /// A WiFi connect attempt is re-issued after this long
    pub wifi_connect_timeout_ms: u32,
    /// Telemetry publishing
    pub telemetry_ms: u32,
    /// Longest time the boot log stays up waiting for WiFi
    pub boot_screen_ms: u32,
    /// Heartbeat LED half-period
    pub heartbeat_ms: u32,
}

impl Default for NetIntervals {
    fn default() -> Self {
        Self {
            wifi_poll_ms: 500,
            mqtt_poll_ms: 1000,
            icon_refresh_ms: 2000,
            wifi_connect_timeout_ms: 10_000,
            telemetry_ms: 5000,
            boot_screen_ms: 5000,
            heartbeat_ms: 250,
        }
    }
}

/// Complete node configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeConfig {
    pub wifi: WifiCredentials,
    pub broker: BrokerConfig,
    pub device_id: DeviceId,
    pub intervals: NetIntervals,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            wifi: WifiCredentials::default(),
            broker: BrokerConfig::default(),
            device_id: copy_truncated(DEFAULT_DEVICE_ID),
            intervals: NetIntervals::default(),
        }
    }
}

impl NodeConfig {
    /// Set the device id, truncating to the protocol limit
    pub fn with_device_id(mut self, id: &str) -> Self {
        self.device_id = copy_truncated(id);
        self
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.wifi.ssid.is_empty() {
            return Err(ValidationError::EmptySsid);
        }
        if self.broker.host.is_empty() {
            return Err(ValidationError::EmptyBrokerHost);
        }
        if self.broker.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if self.device_id.is_empty() {
            return Err(ValidationError::EmptyDeviceId);
        }
        let i = &self.intervals;
        let periods = [
            i.wifi_poll_ms,
            i.mqtt_poll_ms,
            i.icon_refresh_ms,
            i.wifi_connect_timeout_ms,
            i.telemetry_ms,
            i.heartbeat_ms,
        ];
        if periods.contains(&0) {
            return Err(ValidationError::ZeroInterval);
        }
        Ok(())
    }
}
