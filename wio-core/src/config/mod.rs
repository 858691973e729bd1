//! Configuration types
//!
//! Board-agnostic configuration of a node. The firmware fills it from the
//! compiled-in secrets and the device id file on the storage card.

pub mod types;

pub use types::*;
