//! MQTT client abstraction
//!
//! Inbound messages are delivered synchronously from [`MqttLink::poll`] to a
//! [`MessageSink`] supplied by the caller, so the application decides per
//! poll who handles them.

/// MQTT client errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MqttError {
    /// Operation requires an established session
    NotConnected,
    /// Broker refused the session (client state code)
    Refused(i8),
    /// Transport failure while talking to the broker
    Network,
    /// Topic or payload exceeds the client's buffer
    BufferOverflow,
}

/// Receiver of inbound publishes
pub trait MessageSink {
    /// Handle one message received on `topic`
    fn on_message(&mut self, topic: &str, payload: &[u8]);
}

/// MQTT session with a single broker
pub trait MqttLink {
    /// True while the session is established
    fn is_connected(&mut self) -> bool;

    /// Select the broker used by the next `connect`
    fn set_server(&mut self, host: &str, port: u16);

    /// Open a session
    ///
    /// Empty `user` means an anonymous session.
    fn connect(&mut self, client_id: &str, user: &str, password: &str) -> Result<(), MqttError>;

    /// Close the session
    fn disconnect(&mut self);

    /// Subscribe to a topic filter
    fn subscribe(&mut self, topic: &str) -> Result<(), MqttError>;

    /// Publish a message
    fn publish(&mut self, topic: &str, payload: &[u8], retain: bool) -> Result<(), MqttError>;

    /// Service the session and deliver any inbound messages to `sink`
    fn poll(&mut self, sink: &mut dyn MessageSink) -> Result<(), MqttError>;
}
