//! Mock WiFi and MQTT links shared by the network and app tests

use heapless::{String, Vec};
use wio_hal::{MessageSink, MqttError, MqttLink, ScanState, WifiLink, WifiStatus};

use crate::page::copy_truncated;

pub(crate) struct ScanEntry {
    pub ssid: String<32>,
    pub rssi: i32,
    pub channel: i32,
}

pub(crate) struct MockWifi {
    pub connected: bool,
    pub connect_calls: u32,
    pub disconnect_calls: u32,
    pub scans_started: u32,
    pub scan: ScanState,
    pub results: Vec<ScanEntry, 8>,
}

impl MockWifi {
    pub fn new() -> Self {
        Self {
            connected: false,
            connect_calls: 0,
            disconnect_calls: 0,
            scans_started: 0,
            scan: ScanState::NotTriggered,
            results: Vec::new(),
        }
    }

    pub fn set_results(&mut self, entries: &[(&str, i32, i32)]) {
        self.results.clear();
        for &(ssid, rssi, channel) in entries {
            let _ = self.results.push(ScanEntry {
                ssid: copy_truncated(ssid),
                rssi,
                channel,
            });
        }
        self.scan = ScanState::Complete(self.results.len() as u8);
    }
}

impl WifiLink for MockWifi {
    fn status(&mut self) -> WifiStatus {
        if self.connected {
            WifiStatus::Connected
        } else {
            WifiStatus::Disconnected
        }
    }

    fn begin_connect(&mut self, _ssid: &str, _password: &str) {
        self.connect_calls += 1;
    }

    fn disconnect(&mut self) {
        self.disconnect_calls += 1;
    }

    fn start_scan(&mut self) {
        self.scans_started += 1;
        self.scan = ScanState::Running;
    }

    fn scan_state(&mut self) -> ScanState {
        self.scan
    }

    fn scan_ssid(&self, index: u8) -> Option<&str> {
        self.results.get(index as usize).map(|e| e.ssid.as_str())
    }

    fn scan_rssi(&self, index: u8) -> i32 {
        self.results.get(index as usize).map_or(0, |e| e.rssi)
    }

    fn scan_channel(&self, index: u8) -> i32 {
        self.results.get(index as usize).map_or(0, |e| e.channel)
    }

    fn clear_scan_results(&mut self) {
        self.results.clear();
        self.scan = ScanState::NotTriggered;
    }
}

pub(crate) struct Message {
    pub topic: String<64>,
    pub payload: Vec<u8, 256>,
}

impl Message {
    fn new(topic: &str, payload: &[u8]) -> Self {
        let mut buf = Vec::new();
        let _ = buf.extend_from_slice(&payload[..payload.len().min(256)]);
        Self {
            topic: copy_truncated(topic),
            payload: buf,
        }
    }
}

pub(crate) struct MockMqtt {
    pub connected: bool,
    pub refuse: bool,
    pub connect_calls: u32,
    pub disconnect_calls: u32,
    pub server: String<64>,
    pub port: u16,
    pub client_id: String<64>,
    pub user: String<64>,
    pub password: String<64>,
    pub subscriptions: Vec<String<64>, 32>,
    pub published: Vec<Message, 16>,
    pub inbox: Vec<Message, 8>,
}

impl MockMqtt {
    pub fn new() -> Self {
        Self {
            connected: false,
            refuse: false,
            connect_calls: 0,
            disconnect_calls: 0,
            server: String::new(),
            port: 0,
            client_id: String::new(),
            user: String::new(),
            password: String::new(),
            subscriptions: Vec::new(),
            published: Vec::new(),
            inbox: Vec::new(),
        }
    }

    /// Queue a message for the next poll
    pub fn queue(&mut self, topic: &str, payload: &[u8]) {
        let _ = self.inbox.push(Message::new(topic, payload));
    }

    /// Last payload published on `topic`
    pub fn last_published(&self, topic: &str) -> Option<&[u8]> {
        self.published
            .iter()
            .rev()
            .find(|m| m.topic.as_str() == topic)
            .map(|m| m.payload.as_slice())
    }
}

impl MqttLink for MockMqtt {
    fn is_connected(&mut self) -> bool {
        self.connected
    }

    fn set_server(&mut self, host: &str, port: u16) {
        self.server = copy_truncated(host);
        self.port = port;
    }

    fn connect(&mut self, client_id: &str, user: &str, password: &str) -> Result<(), MqttError> {
        self.connect_calls += 1;
        self.client_id = copy_truncated(client_id);
        self.user = copy_truncated(user);
        self.password = copy_truncated(password);
        if self.refuse {
            return Err(MqttError::Refused(5));
        }
        self.connected = true;
        Ok(())
    }

    fn disconnect(&mut self) {
        self.disconnect_calls += 1;
        self.connected = false;
    }

    fn subscribe(&mut self, topic: &str) -> Result<(), MqttError> {
        if !self.connected {
            return Err(MqttError::NotConnected);
        }
        self.subscriptions
            .push(copy_truncated(topic))
            .map_err(|_| MqttError::BufferOverflow)
    }

    fn publish(&mut self, topic: &str, payload: &[u8], _retain: bool) -> Result<(), MqttError> {
        if !self.connected {
            return Err(MqttError::NotConnected);
        }
        self.published
            .push(Message::new(topic, payload))
            .map_err(|_| MqttError::BufferOverflow)
    }

    fn poll(&mut self, sink: &mut dyn MessageSink) -> Result<(), MqttError> {
        for message in self.inbox.iter() {
            sink.on_message(message.topic.as_str(), &message.payload);
        }
        self.inbox.clear();
        Ok(())
    }
}

/// Sink that keeps every message it sees
#[derive(Default)]
pub(crate) struct Recorder {
    pub messages: Vec<(String<64>, Vec<u8, 64>), 8>,
}

impl MessageSink for Recorder {
    fn on_message(&mut self, topic: &str, payload: &[u8]) {
        let mut buf = Vec::new();
        let _ = buf.extend_from_slice(&payload[..payload.len().min(64)]);
        let _ = self.messages.push((copy_truncated(topic), buf));
    }
}
