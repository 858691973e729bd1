//! Inbound message routing
//!
//! The router is the [`MessageSink`] handed to the supervisor for one tick.
//! It resolves each topic to its registry slot and acts on it:
//!
//! - slot 0 (`cfg/<id>`): JSON configuration, queued as [`Pending`] work
//! - slot 1 (function topic): `on` / `off` drives the heater output
//!
//! Anything touching the registry or the broker is only queued here; the
//! node applies it after the supervisor tick returns.

use heapless::String;
use wio_hal::MessageSink;
use wio_protocol::config::{MAX_NAME_LEN, MAX_SECRET_LEN};
use wio_protocol::topic::function_topic;
use wio_protocol::{parse_switch, ConfigMessage, Switch, Topic};

use crate::config::BrokerConfig;
use crate::topics::{TopicRegistry, CONFIG_SLOT, FUNCTION_SLOT};
use crate::traits::SwitchOutput;

/// Work queued by inbound messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pending {
    /// New function topic for slot 1
    pub function_topic: Option<Topic>,
    /// Broker to switch to
    pub broker: Option<BrokerConfig>,
    /// Credentials for the current broker
    pub credentials: Option<(String<MAX_NAME_LEN>, String<MAX_SECRET_LEN>)>,
    /// Heater state changed and should be published
    pub heater_changed: bool,
}

impl Pending {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Application state shared between ticks
#[derive(Debug, Clone)]
pub struct AppState {
    heater: Switch,
    pending: Pending,
    /// Messages dispatched to a slot
    handled: u32,
    /// Messages on topics outside the registry
    ignored: u32,
}

impl AppState {
    pub fn new(heater: Switch) -> Self {
        Self {
            heater,
            pending: Pending::default(),
            handled: 0,
            ignored: 0,
        }
    }

    pub fn heater(&self) -> Switch {
        self.heater
    }

    /// Heater state text (`"on"` / `"off"`)
    pub fn heater_state(&self) -> &'static str {
        self.heater.as_str()
    }

    pub fn handled(&self) -> u32 {
        self.handled
    }

    pub fn ignored(&self) -> u32 {
        self.ignored
    }

    pub fn pending(&self) -> &Pending {
        &self.pending
    }

    /// Take the queued work, leaving nothing pending
    pub fn take_pending(&mut self) -> Pending {
        core::mem::take(&mut self.pending)
    }

    /// Drive the heater and record the new state
    pub fn set_heater<H: SwitchOutput>(&mut self, heater: &mut H, state: Switch) {
        if let Err(e) = heater.set_on(state.is_on()) {
            warn!("heater output failed: {}", e);
            return;
        }
        if self.heater != state {
            info!("heater {=str}", state.as_str());
        }
        self.heater = state;
        self.pending.heater_changed = true;
    }
}

/// Routes inbound messages by registry slot
pub struct MessageRouter<'a, H> {
    topics: &'a TopicRegistry,
    heater: &'a mut H,
    state: &'a mut AppState,
}

impl<'a, H: SwitchOutput> MessageRouter<'a, H> {
    pub fn new(topics: &'a TopicRegistry, heater: &'a mut H, state: &'a mut AppState) -> Self {
        Self {
            topics,
            heater,
            state,
        }
    }

    fn on_config(&mut self, payload: &[u8]) {
        let config = match ConfigMessage::parse(payload) {
            Ok(config) => config,
            Err(e) => {
                warn!("config message rejected: {}", e);
                return;
            }
        };

        if !config.prefix.is_empty() && !config.functionality.is_empty() {
            match function_topic(&config.prefix, &config.functionality) {
                Ok(topic) => self.state.pending.function_topic = Some(topic),
                Err(e) => warn!("function topic rejected: {}", e),
            }
        }

        if config.names_broker() {
            self.state.pending.broker = Some(BrokerConfig::new(
                &config.broker,
                config.port_or_default(),
                &config.user,
                &config.password,
            ));
        } else if !config.user.is_empty() {
            self.state.pending.credentials = Some((config.user, config.password));
        }
    }

    fn on_function(&mut self, payload: &[u8]) {
        match parse_switch(payload) {
            Ok(state) => self.state.set_heater(&mut *self.heater, state),
            Err(e) => warn!("heater payload ignored: {}", e),
        }
    }
}

impl<H: SwitchOutput> MessageSink for MessageRouter<'_, H> {
    fn on_message(&mut self, topic: &str, payload: &[u8]) {
        let slot = match self.topics.resolve(topic) {
            Ok(slot) => slot,
            Err(_) => {
                warn!("message on unregistered topic {=str}", topic);
                self.state.ignored += 1;
                return;
            }
        };

        debug!("message on slot {}", slot);
        self.state.handled += 1;
        match slot {
            CONFIG_SLOT => self.on_config(payload),
            FUNCTION_SLOT => self.on_function(payload),
            _ => debug!("no handler for slot {}", slot),
        }
    }
}
