//! Network connectivity
//!
//! The supervisor keeps WiFi and the MQTT session alive without ever
//! blocking the tick, and publishes what it sees into a
//! [`ConnectionState`] snapshot.

mod link;
mod state;
mod supervisor;

pub use link::{LinkEvent, LinkState};
pub use state::{ConnectionState, LinkStatus, STRENGTH_DISCONNECTED_DBM};
pub use supervisor::{NetError, NetworkSupervisor};

#[cfg(test)]
pub(crate) mod testing;
