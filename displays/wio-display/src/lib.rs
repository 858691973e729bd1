//! Display abstraction and shared components for wio-node
//!
//! This crate provides:
//! - `Canvas` trait for the pixel-addressed TFT panel
//! - `Color` and `Font` types shared by all renderers
//! - `LogScreen` scrollback buffer shown while the node is booting
//! - `LogSink` trait for writing user-visible log lines
//!
//! # Architecture
//!
//! The panel driver (ILI9341 on the Wio Terminal) implements `Canvas`. The
//! page renderer in `wio-core` and the boot log here only ever talk to the
//! trait, which keeps them testable against a recording canvas on the host.

#![no_std]

pub mod backend;
pub mod log;

// Re-export key types
pub use backend::{Canvas, Color, DisplayError, Font, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use log::{LogScreen, LogSink, LOG_LINES, LOG_LINE_LEN};
