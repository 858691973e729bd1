//! Network supervisor
//!
//! Two gated sub-tasks run from [`NetworkSupervisor::tick`]:
//!
//! - **WiFi** (every `wifi_poll_ms`): while associated, drive the
//!   asynchronous scan and pick the joined network's RSSI and channel out
//!   of the results. While not associated, issue a connect attempt; a
//!   pending attempt is only re-issued after `wifi_connect_timeout_ms`.
//! - **MQTT** (every `mqtt_poll_ms`, only with WiFi up): while the session
//!   is up, service it, deliver inbound messages and latch the activity
//!   flags. Otherwise try one reconnect and, on success, subscribe every
//!   registered topic in slot order.

use heapless::String;
use wio_display::LogSink;
use wio_hal::{MessageSink, MqttError, MqttLink, ScanState, WifiLink, WifiStatus};

use super::link::{LinkEvent, LinkState};
use super::state::{ConnectionState, LinkStatus};
use crate::config::{BrokerConfig, NetIntervals, NodeConfig, WifiCredentials};
use crate::page::copy_truncated;
use crate::timing::Interval;
use crate::topics::TopicRegistry;

/// Supervisor errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NetError {
    /// MQTT session is down
    NotConnected,
    /// MQTT client reported an error
    Mqtt(MqttError),
}

impl From<MqttError> for NetError {
    fn from(e: MqttError) -> Self {
        NetError::Mqtt(e)
    }
}

/// Forwards messages and notes that one arrived
struct ActivityTap<'a> {
    inner: &'a mut dyn MessageSink,
    received: bool,
}

impl MessageSink for ActivityTap<'_> {
    fn on_message(&mut self, topic: &str, payload: &[u8]) {
        self.received = true;
        self.inner.on_message(topic, payload);
    }
}

/// Keeps WiFi and MQTT connected
#[derive(Debug, Clone)]
pub struct NetworkSupervisor {
    wifi_credentials: WifiCredentials,
    broker: BrokerConfig,
    client_id: String<64>,
    connect_timeout_ms: u32,

    state: ConnectionState,
    wifi_link: LinkState,
    mqtt_link: LinkState,
    wifi_timer: Interval,
    mqtt_timer: Interval,

    /// Publish since the last MQTT poll
    published: bool,
    /// Message received since the last MQTT poll
    received: bool,
    /// Registry revision of the last complete subscribe cycle
    subscribed_revision: Option<u32>,
}

impl NetworkSupervisor {
    pub fn new(config: &NodeConfig) -> Self {
        let NetIntervals {
            wifi_poll_ms,
            mqtt_poll_ms,
            wifi_connect_timeout_ms,
            ..
        } = config.intervals;

        Self {
            wifi_credentials: config.wifi.clone(),
            broker: config.broker.clone(),
            client_id: wio_protocol::topic::client_id(&config.device_id),
            connect_timeout_ms: wifi_connect_timeout_ms,
            state: ConnectionState::default(),
            wifi_link: LinkState::Disconnected,
            mqtt_link: LinkState::Disconnected,
            wifi_timer: Interval::new(wifi_poll_ms),
            mqtt_timer: Interval::new(mqtt_poll_ms),
            published: false,
            received: false,
            subscribed_revision: None,
        }
    }

    /// Snapshot of the current connectivity
    pub fn connection_state(&self) -> ConnectionState {
        self.state
    }

    pub fn wifi_link(&self) -> LinkState {
        self.wifi_link
    }

    pub fn mqtt_link(&self) -> LinkState {
        self.mqtt_link
    }

    /// Broker currently targeted
    pub fn broker(&self) -> &BrokerConfig {
        &self.broker
    }

    pub fn client_id(&self) -> &str {
        self.client_id.as_str()
    }

    /// Issue the first WiFi connect attempt and announce the MQTT identity
    ///
    /// Returns immediately; association completes in later ticks.
    pub fn begin<W: WifiLink, L: LogSink>(&mut self, now_ms: u32, wifi: &mut W, log: &mut L) {
        log.add_log("Start WiFi Init", false);
        self.start_wifi_attempt(now_ms, wifi, log);
        log.add_log("Start MQTT Init", false);
        log.add_log("- ID: ", false);
        log.add_log(self.client_id.as_str(), true);
        info!("network init, client id {=str}", self.client_id.as_str());
    }

    /// Run whichever sub-tasks are due
    pub fn tick<W, M, L>(
        &mut self,
        now_ms: u32,
        wifi: &mut W,
        mqtt: &mut M,
        topics: &TopicRegistry,
        log: &mut L,
        sink: &mut dyn MessageSink,
    ) where
        W: WifiLink,
        M: MqttLink,
        L: LogSink,
    {
        if self.wifi_timer.poll(now_ms) {
            self.wifi_task(now_ms, wifi, mqtt, log);
        }
        if self.mqtt_timer.poll(now_ms) {
            self.mqtt_task(now_ms, mqtt, topics, log, sink);
        }
    }

    /// Replace the user name and password used on the next reconnect
    pub fn set_credentials(&mut self, user: &str, password: &str) {
        self.broker.user = copy_truncated(user);
        self.broker.password = copy_truncated(password);
    }

    /// Switch to another broker
    ///
    /// Tears down the current session, connects to `broker` right away when
    /// WiFi is up, and resubscribes all topics. Calling it again with the
    /// target already in use changes nothing and returns `false`.
    pub fn change_broker<M: MqttLink, L: LogSink>(
        &mut self,
        now_ms: u32,
        broker: BrokerConfig,
        mqtt: &mut M,
        topics: &TopicRegistry,
        log: &mut L,
    ) -> bool {
        if broker == self.broker && !self.mqtt_link_is_down() {
            return false;
        }

        info!("changing broker to {=str}:{}", broker.host.as_str(), broker.port);
        if self.mqtt_link.is_connected() || mqtt.is_connected() {
            mqtt.disconnect();
        }
        self.broker = broker;
        self.mark_mqtt_down();
        self.mqtt_link = LinkState::Disconnected;

        if self.state.wifi.is_connected() {
            self.connect_mqtt(now_ms, mqtt, topics, log);
        }
        // Next MQTT poll follows up immediately
        self.mqtt_timer.reset();
        true
    }

    /// Publish while the session is up
    pub fn publish<M: MqttLink>(
        &mut self,
        mqtt: &mut M,
        topic: &str,
        payload: &[u8],
        retain: bool,
    ) -> Result<(), NetError> {
        if !self.state.mqtt.is_connected() {
            return Err(NetError::NotConnected);
        }
        mqtt.publish(topic, payload, retain)?;
        self.published = true;
        Ok(())
    }

    /// Snapshot for the header icons, then clear the activity flags
    ///
    /// Publish/receive activity accumulates across MQTT polls until it is
    /// taken here, so every message shows up on at least one icon refresh.
    pub fn take_activity(&mut self) -> ConnectionState {
        let snapshot = self.state;
        self.state.mqtt_published_recently = false;
        self.state.mqtt_subscribed_recently = false;
        snapshot
    }

    fn mqtt_link_is_down(&self) -> bool {
        matches!(self.mqtt_link, LinkState::Disconnected)
    }

    fn wifi_task<W: WifiLink, M: MqttLink, L: LogSink>(
        &mut self,
        now_ms: u32,
        wifi: &mut W,
        mqtt: &mut M,
        log: &mut L,
    ) {
        match wifi.status() {
            WifiStatus::Connected => {
                if !self.wifi_link.is_connected() {
                    info!("WiFi connected to {=str}", self.wifi_credentials.ssid.as_str());
                    log.add_log("- WiFi connected", false);
                    // Strength unknown until the first scan completes
                    self.state.wifi_strength_dbm = 0;
                    self.state.wifi_channel = 0;
                }
                self.wifi_link = self.wifi_link.transition(LinkEvent::Up);
                self.state.wifi = LinkStatus::Connected;
                self.update_scan(wifi);
            }
            WifiStatus::Disconnected => {
                if self.wifi_link.is_connected() {
                    warn!("WiFi connection lost");
                    log.add_log("WiFi connection lost", false);
                    if self.mqtt_link.is_connected() {
                        mqtt.disconnect();
                    }
                }
                self.wifi_link = self.wifi_link.transition(LinkEvent::Down);
                self.mark_mqtt_down();
                self.state.mark_wifi_lost();
                self.published = false;
                self.received = false;

                if self.wifi_link.attempt_expired(now_ms, self.connect_timeout_ms) {
                    debug!("WiFi attempt timed out");
                    self.wifi_link = self.wifi_link.transition(LinkEvent::AttemptFailed);
                }
                if matches!(self.wifi_link, LinkState::Disconnected) {
                    wifi.disconnect();
                    self.start_wifi_attempt(now_ms, wifi, log);
                }
            }
        }
    }

    fn start_wifi_attempt<W: WifiLink, L: LogSink>(&mut self, now_ms: u32, wifi: &mut W, log: &mut L) {
        let WifiCredentials { ssid, password } = &self.wifi_credentials;
        log.add_log("- Connecting to ", false);
        log.add_log(ssid.as_str(), true);
        wifi.begin_connect(ssid.as_str(), password.as_str());
        self.wifi_link = self.wifi_link.transition(LinkEvent::AttemptStarted(now_ms));
    }

    fn update_scan<W: WifiLink>(&mut self, wifi: &mut W) {
        match wifi.scan_state() {
            ScanState::NotTriggered => wifi.start_scan(),
            ScanState::Running => {}
            ScanState::Complete(found) => {
                let ssid = self.wifi_credentials.ssid.as_str();
                if let Some(i) = (0..found).find(|&i| wifi.scan_ssid(i) == Some(ssid)) {
                    self.state.wifi_strength_dbm = wifi.scan_rssi(i);
                    self.state.wifi_channel = wifi.scan_channel(i);
                    debug!(
                        "scan: {=str} at {} dBm, channel {}",
                        ssid,
                        self.state.wifi_strength_dbm,
                        self.state.wifi_channel
                    );
                }
                wifi.clear_scan_results();
            }
        }
    }

    fn mqtt_task<M: MqttLink, L: LogSink>(
        &mut self,
        now_ms: u32,
        mqtt: &mut M,
        topics: &TopicRegistry,
        log: &mut L,
        sink: &mut dyn MessageSink,
    ) {
        if !self.state.wifi.is_connected() {
            self.mark_mqtt_down();
            return;
        }

        if mqtt.is_connected() {
            self.mqtt_link = self.mqtt_link.transition(LinkEvent::Up);
            self.state.mqtt = LinkStatus::Connected;

            if self.subscribed_revision != Some(topics.revision()) {
                self.subscribe_all(mqtt, topics, log);
            }

            let mut tap = ActivityTap {
                inner: sink,
                received: false,
            };
            if let Err(e) = mqtt.poll(&mut tap) {
                warn!("MQTT poll failed: {}", e);
            }
            self.received |= tap.received;

            // Held until the icon refresh takes them
            self.state.mqtt_published_recently |= core::mem::take(&mut self.published);
            self.state.mqtt_subscribed_recently |= core::mem::take(&mut self.received);
        } else {
            if self.mqtt_link.is_connected() {
                warn!("MQTT session lost");
                log.add_log("MQTT connection lost", false);
            }
            self.mark_mqtt_down();
            self.connect_mqtt(now_ms, mqtt, topics, log);
        }
    }

    /// Forget the session; whatever comes up next is subscribed afresh
    fn mark_mqtt_down(&mut self) {
        self.mqtt_link = self.mqtt_link.transition(LinkEvent::Down);
        self.state.mqtt = LinkStatus::Disconnected;
        self.state.mqtt_published_recently = false;
        self.state.mqtt_subscribed_recently = false;
        self.subscribed_revision = None;
    }

    /// One connect attempt; subscribes everything on success
    fn connect_mqtt<M: MqttLink, L: LogSink>(
        &mut self,
        now_ms: u32,
        mqtt: &mut M,
        topics: &TopicRegistry,
        log: &mut L,
    ) {
        let BrokerConfig {
            host,
            port,
            user,
            password,
        } = &self.broker;

        log.add_log("- Connecting to broker ", false);
        log.add_log(host.as_str(), true);
        mqtt.set_server(host.as_str(), *port);
        self.mqtt_link = self.mqtt_link.transition(LinkEvent::AttemptStarted(now_ms));

        match mqtt.connect(self.client_id.as_str(), user.as_str(), password.as_str()) {
            Ok(()) => {
                info!("MQTT connected to {=str}:{}", host.as_str(), *port);
                log.add_log("- MQTT connected", false);
                self.mqtt_link = self.mqtt_link.transition(LinkEvent::Up);
                self.state.mqtt = LinkStatus::Connected;
                self.subscribe_all(mqtt, topics, log);
            }
            Err(e) => {
                warn!("MQTT connect failed: {}", e);
                log.add_log("- MQTT connect failed", false);
                self.mqtt_link = self.mqtt_link.transition(LinkEvent::AttemptFailed);
                self.state.mqtt = LinkStatus::Disconnected;
            }
        }
    }

    /// Subscribe every registered topic in slot order
    fn subscribe_all<M: MqttLink, L: LogSink>(&mut self, mqtt: &mut M, topics: &TopicRegistry, log: &mut L) {
        let mut complete = true;
        for topic in topics.iter() {
            log.add_log("- Subscribe: ", false);
            log.add_log(topic, true);
            if let Err(e) = mqtt.subscribe(topic) {
                warn!("subscribe {=str} failed: {}", topic, e);
                complete = false;
            }
        }
        // A failed subscription is retried on the next poll
        self.subscribed_revision = complete.then_some(topics.revision());
    }
}
