//! Board-agnostic core logic for the wio-node firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Line/page model of the status display
//! - Incremental render engine with per-region width cache
//! - Connection state store and non-blocking network supervisor
//! - MQTT topic registry and message dispatch
//! - Node configuration types
//! - Tick orchestration (`Node`)

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod app;
pub mod config;
pub mod input;
pub mod net;
pub mod page;
pub mod render;
pub mod timing;
pub mod topics;
pub mod traits;
