//! Link state machine
//!
//! WiFi and MQTT each follow the same three-state lifecycle. The supervisor
//! feeds observations in as events; the machine only decides the next
//! state.

/// Lifecycle state of a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    #[default]
    Disconnected,
    /// Attempt issued at this time (ms)
    Connecting { since_ms: u32 },
    Connected,
}

/// Observation about a link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    /// A connection attempt was issued at this time (ms)
    AttemptStarted(u32),
    /// Link reported up
    Up,
    /// Link reported down
    Down,
    /// The pending attempt failed or timed out
    AttemptFailed,
}

impl LinkState {
    pub fn is_connected(&self) -> bool {
        matches!(self, LinkState::Connected)
    }

    pub fn is_connecting(&self) -> bool {
        matches!(self, LinkState::Connecting { .. })
    }

    /// Process an event and return the next state
    pub fn transition(self, event: LinkEvent) -> Self {
        use LinkEvent::*;
        use LinkState::*;

        match (self, event) {
            (Disconnected, AttemptStarted(now)) => Connecting { since_ms: now },
            (Disconnected, Up) => Connected,

            // Re-issuing an attempt restarts its timer
            (Connecting { .. }, AttemptStarted(now)) => Connecting { since_ms: now },
            (Connecting { .. }, Up) => Connected,
            (Connecting { .. }, AttemptFailed) => Disconnected,

            (Connected, Down) => Disconnected,

            // Default: stay in current state
            _ => self,
        }
    }

    /// Check if a pending attempt is older than `timeout_ms`
    pub fn attempt_expired(&self, now_ms: u32, timeout_ms: u32) -> bool {
        match self {
            LinkState::Connecting { since_ms } => now_ms.wrapping_sub(*since_ms) >= timeout_ms,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_flow() {
        let state = LinkState::Disconnected;
        let connecting = state.transition(LinkEvent::AttemptStarted(100));
        assert_eq!(connecting, LinkState::Connecting { since_ms: 100 });

        let connected = connecting.transition(LinkEvent::Up);
        assert_eq!(connected, LinkState::Connected);

        let lost = connected.transition(LinkEvent::Down);
        assert_eq!(lost, LinkState::Disconnected);
    }

    #[test]
    fn test_failed_attempt() {
        let connecting = LinkState::Connecting { since_ms: 0 };
        assert_eq!(connecting.transition(LinkEvent::AttemptFailed), LinkState::Disconnected);
    }

    #[test]
    fn test_connected_ignores_attempts() {
        let connected = LinkState::Connected;
        assert_eq!(connected.transition(LinkEvent::AttemptStarted(5)), LinkState::Connected);
        assert_eq!(connected.transition(LinkEvent::AttemptFailed), LinkState::Connected);
        assert_eq!(connected.transition(LinkEvent::Up), LinkState::Connected);
    }

    #[test]
    fn test_up_without_attempt() {
        // Radio may come up on its own (auto-reconnect)
        assert_eq!(LinkState::Disconnected.transition(LinkEvent::Up), LinkState::Connected);
    }

    #[test]
    fn test_attempt_expiry() {
        let connecting = LinkState::Connecting { since_ms: 1000 };
        assert!(!connecting.attempt_expired(5000, 10_000));
        assert!(connecting.attempt_expired(11_000, 10_000));
        assert!(!LinkState::Disconnected.attempt_expired(u32::MAX, 1));
    }

    #[test]
    fn test_restart_attempt() {
        let connecting = LinkState::Connecting { since_ms: 0 };
        assert_eq!(
            connecting.transition(LinkEvent::AttemptStarted(7)),
            LinkState::Connecting { since_ms: 7 }
        );
    }
}
