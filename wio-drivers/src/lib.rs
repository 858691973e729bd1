//! GPIO driver implementations
//!
//! Concrete drivers for the board peripherals the node core drives through
//! its traits, built on `embedded-hal` 1.0 pins:
//!
//! - Heater relay ([`relay::GpioRelay`])
//! - Heartbeat LED ([`heartbeat::Heartbeat`])
//! - Eight-button panel ([`buttons::ButtonPanel`])

#![no_std]
#![deny(unsafe_code)]

pub mod buttons;
pub mod heartbeat;
pub mod relay;

pub use buttons::{ButtonPanel, InputError, DEBOUNCE_MS};
pub use heartbeat::Heartbeat;
pub use relay::GpioRelay;
