//! Screen geometry
//!
//! ```text
//!  0                       199      240  260  280   320
//!  ┌────────────────────────┬───────┬────┬────┬─────┐  0
//!  │ Title                  │ band  │pub │sub │     │
//!  │                        │ WiFi  │ MQTT    │ SD  │
//!  ├────────────────────────┴───────┴─────────┴─────┤ 40
//!  │ name (x=10)          value (x=180)             │ 55 + 30·i
//!  │ ...                                            │
//!  └────────────────────────────────────────────────┘ 240
//! ```

use wio_display::SCREEN_WIDTH;

pub const HEADER_HEIGHT: u16 = 40;
pub const HEADER_DIVIDER_X: u16 = 199;
pub const TITLE_X: u16 = 5;
pub const TITLE_Y: u16 = 5;

pub const LINE_START_X: u16 = 10;
pub const LINE_START_Y: u16 = 55;
pub const LINE_PITCH: u16 = 30;
pub const LINE_VALUE_X: u16 = 180;
/// Height of the area cleared behind a line's text
pub const LINE_CLEAR_HEIGHT: u16 = 18;
/// Widest value that is drawn instead of the overflow message
pub const MAX_VALUE_WIDTH: u16 = 140;
/// Full width of the value region up to the panel edge
pub const VALUE_REGION_WIDTH: u16 = SCREEN_WIDTH - LINE_VALUE_X;

pub const BAR_FRAME_WIDTH: u16 = 104;
pub const BAR_FRAME_HEIGHT: u16 = 20;
/// Frame starts this far above the line's text top
pub const BAR_FRAME_RAISE: u16 = 2;
pub const BAR_FILL_INSET: u16 = 2;
pub const BAR_FILL_HEIGHT: u16 = 16;
pub const BAR_LABEL_OFFSET_X: u16 = 42;

pub const ICON_SIZE: u16 = 40;
pub const ICON_RADIUS: u16 = 10;
pub const WIFI_ICON_X: u16 = 200;
pub const MQTT_ICON_X: u16 = 240;
pub const STORAGE_ICON_X: u16 = 280;

/// Band label area in the top-left corner of the WiFi icon
pub const BAND_LABEL_X: u16 = 201;
pub const BAND_CLEAR_WIDTH: u16 = 30;
pub const BAND_CLEAR_HEIGHT: u16 = 8;

/// Publish/receive arrows in the top-left corner of the MQTT icon
pub const ACTIVITY_X: u16 = 250;
pub const ACTIVITY_CLEAR_SIZE: u16 = 10;
pub const PUBLISH_ARROW_X: u16 = 250;
pub const RECEIVE_ARROW_X: u16 = 254;

/// Top edge of line `index`
pub const fn line_y(index: usize) -> u16 {
    LINE_START_Y + index as u16 * LINE_PITCH
}
