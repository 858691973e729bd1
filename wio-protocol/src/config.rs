//! JSON configuration messages
//!
//! The broker pushes configuration to `cfg/<device-id>` as a flat JSON
//! object:
//!
//! ```json
//! {
//!   "brokerToConnect": "10.0.0.5",
//!   "portToConnect": 1883,
//!   "mqtt_prefix": "home/1OG",
//!   "mqtt_bootstrap_broker_user": "node",
//!   "mqtt_bootstrap_broker_password": "secret",
//!   "functionality": "Heizung"
//! }
//! ```
//!
//! Every key is optional. Absent string keys decode as empty strings and an
//! absent port decodes as 0; unknown keys are ignored.

use heapless::String;
use serde::Deserialize;

/// Port used when a configuration names a broker without a port
pub const DEFAULT_BROKER_PORT: u16 = 1883;

/// Maximum broker host length
pub const MAX_HOST_LEN: usize = 64;

/// Maximum user name / prefix / functionality length
pub const MAX_NAME_LEN: usize = 32;

/// Maximum password length
pub const MAX_SECRET_LEN: usize = 64;

/// Maximum device id length
pub const MAX_DEVICE_ID_LEN: usize = 24;

/// Device identifier string
pub type DeviceId = String<MAX_DEVICE_ID_LEN>;

/// Errors decoding configuration documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Document is not valid JSON of the expected shape
    Malformed,
    /// A string value does not fit its field
    FieldTooLong,
    /// Required key missing (device id file)
    MissingKey,
}

#[derive(Deserialize)]
struct RawConfig<'a> {
    #[serde(rename = "brokerToConnect", default, borrow)]
    broker: Option<&'a str>,
    #[serde(rename = "portToConnect", default)]
    port: Option<u16>,
    #[serde(rename = "mqtt_prefix", default, borrow)]
    prefix: Option<&'a str>,
    #[serde(rename = "mqtt_bootstrap_broker_user", default, borrow)]
    user: Option<&'a str>,
    #[serde(rename = "mqtt_bootstrap_broker_password", default, borrow)]
    password: Option<&'a str>,
    #[serde(default, borrow)]
    functionality: Option<&'a str>,
}

/// Decoded configuration message
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigMessage {
    /// Broker host to switch to; empty keeps the current broker
    pub broker: String<MAX_HOST_LEN>,
    /// Broker port; 0 when absent
    pub port: u16,
    /// Topic prefix for function topics
    pub prefix: String<MAX_NAME_LEN>,
    /// Broker user name
    pub user: String<MAX_NAME_LEN>,
    /// Broker password
    pub password: String<MAX_SECRET_LEN>,
    /// Function this node serves (last topic level)
    pub functionality: String<MAX_NAME_LEN>,
}

impl ConfigMessage {
    /// Decode a configuration payload
    pub fn parse(payload: &[u8]) -> Result<Self, ConfigError> {
        let (raw, _) = serde_json_core::from_slice::<RawConfig<'_>>(payload)
            .map_err(|_| ConfigError::Malformed)?;

        Ok(Self {
            broker: bounded(raw.broker)?,
            port: raw.port.unwrap_or(0),
            prefix: bounded(raw.prefix)?,
            user: bounded(raw.user)?,
            password: bounded(raw.password)?,
            functionality: bounded(raw.functionality)?,
        })
    }

    /// Port to connect to, defaulting to [`DEFAULT_BROKER_PORT`]
    pub fn port_or_default(&self) -> u16 {
        if self.port == 0 {
            DEFAULT_BROKER_PORT
        } else {
            self.port
        }
    }

    /// Check if the message asks for a broker change
    pub fn names_broker(&self) -> bool {
        !self.broker.is_empty()
    }
}

#[derive(Deserialize)]
struct RawDeviceId<'a> {
    #[serde(default, borrow)]
    id: Option<&'a str>,
}

/// Decode the device id file (`{"id": "..."}`)
pub fn parse_device_id(document: &[u8]) -> Result<DeviceId, ConfigError> {
    let (raw, _) = serde_json_core::from_slice::<RawDeviceId<'_>>(document)
        .map_err(|_| ConfigError::Malformed)?;
    match raw.id {
        Some(id) if !id.is_empty() => bounded(Some(id)),
        _ => Err(ConfigError::MissingKey),
    }
}

fn bounded<const N: usize>(value: Option<&str>) -> Result<String<N>, ConfigError> {
    let mut s = String::new();
    if let Some(v) = value {
        s.push_str(v).map_err(|_| ConfigError::FieldTooLong)?;
    }
    Ok(s)
}
