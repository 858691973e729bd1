//! Hardware abstraction traits
//!
//! Board-side outputs the application drives. Radio, MQTT client and
//! storage traits live in `wio-hal`; the canvas lives in `wio-display`.

pub mod output;

pub use output::{OutputError, SwitchOutput};
