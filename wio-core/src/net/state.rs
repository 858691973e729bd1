//! Connection state store
//!
//! Written by the supervisor once per tick, read by the renderer and by
//! application pages. Readers get a `Copy` snapshot.

/// Signal strength reported while WiFi is down
pub const STRENGTH_DISCONNECTED_DBM: i32 = -99;

/// Link status as seen by readers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkStatus {
    #[default]
    Disconnected,
    Connected,
}

impl LinkStatus {
    pub fn is_connected(self) -> bool {
        matches!(self, LinkStatus::Connected)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LinkStatus::Connected => "connected",
            LinkStatus::Disconnected => "disconnected",
        }
    }
}

impl From<bool> for LinkStatus {
    fn from(connected: bool) -> Self {
        if connected {
            LinkStatus::Connected
        } else {
            LinkStatus::Disconnected
        }
    }
}

/// Snapshot of network connectivity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnectionState {
    pub wifi: LinkStatus,
    /// RSSI of the joined network in dBm; [`STRENGTH_DISCONNECTED_DBM`] while down
    pub wifi_strength_dbm: i32,
    /// Channel of the joined network; 0 while unknown
    pub wifi_channel: i32,
    pub mqtt: LinkStatus,
    /// A publish went out since the activity was last taken
    pub mqtt_published_recently: bool,
    /// A message arrived since the activity was last taken
    pub mqtt_subscribed_recently: bool,
}

impl ConnectionState {
    /// State after WiFi loss: everything down, strength at the sentinel
    pub fn mark_wifi_lost(&mut self) {
        self.wifi = LinkStatus::Disconnected;
        self.wifi_strength_dbm = STRENGTH_DISCONNECTED_DBM;
        self.wifi_channel = 0;
        self.mqtt = LinkStatus::Disconnected;
        self.mqtt_published_recently = false;
        self.mqtt_subscribed_recently = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_disconnected() {
        let state = ConnectionState::default();
        assert_eq!(state.wifi, LinkStatus::Disconnected);
        assert_eq!(state.mqtt, LinkStatus::Disconnected);
        assert_eq!(state.wifi_strength_dbm, 0);
    }

    #[test]
    fn test_mark_wifi_lost() {
        let mut state = ConnectionState {
            wifi: LinkStatus::Connected,
            wifi_strength_dbm: -55,
            wifi_channel: 6,
            mqtt: LinkStatus::Connected,
            mqtt_published_recently: true,
            mqtt_subscribed_recently: true,
        };
        state.mark_wifi_lost();
        assert_eq!(state.wifi_strength_dbm, STRENGTH_DISCONNECTED_DBM);
        assert_eq!(state.wifi_channel, 0);
        assert!(!state.mqtt.is_connected());
        assert!(!state.mqtt_published_recently);
    }
}
