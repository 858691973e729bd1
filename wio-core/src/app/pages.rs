//! Built-in pages
//!
//! ```text
//!   0  Heater   heater state, function topic, device, RSSI, signal, uptime
//!   1  Network  WiFi / MQTT diagnostics
//!   2  Demo     one line of every kind
//! ```

use wio_protocol::Switch;

use crate::net::ConnectionState;
use crate::page::{Line, Page, PageCatalog, PageError, RenderOption};
use crate::render::FrequencyBand;

pub const HEATER_PAGE: usize = 0;
pub const NETWORK_PAGE: usize = 1;
pub const DEMO_PAGE: usize = 2;

/// Heater page rows
pub mod heater_row {
    pub const STATE: usize = 0;
    pub const TOPIC: usize = 1;
    pub const DEVICE: usize = 2;
    pub const RSSI: usize = 3;
    pub const SIGNAL: usize = 4;
    pub const UPTIME: usize = 5;
}

/// Network page rows
pub mod network_row {
    pub const WIFI: usize = 0;
    pub const RSSI: usize = 1;
    pub const CHANNEL: usize = 2;
    pub const BAND: usize = 3;
    pub const MQTT: usize = 4;
    pub const BROKER: usize = 5;
}

const DEMO_RSSI_ROW: usize = 5;

/// Build the page catalog
pub fn build_catalog(device_id: &str, function_topic: &str) -> Result<PageCatalog, PageError> {
    let mut catalog = PageCatalog::new();

    catalog.push(Page::with_lines(
        "Heater",
        [
            Line::text("Heater", Switch::Off.as_str()),
            Line::text("Topic", function_topic),
            Line::text("Device", device_id),
            Line::numeric("RSSI", 0.0, "dB", RenderOption::Decimals0),
            Line::bar("Signal", 0.0, RenderOption::BarWithValue),
            Line::time("Uptime", 0.0, RenderOption::TimeHhMmSs),
        ],
    ))?;

    catalog.push(Page::with_lines(
        "Network",
        [
            Line::text("WiFi", ""),
            Line::numeric("RSSI", 0.0, "dB", RenderOption::Decimals0),
            Line::numeric("Channel", 0.0, "", RenderOption::Decimals0),
            Line::text("Band", ""),
            Line::text("MQTT", ""),
            Line::text("Broker", ""),
        ],
    ))?;

    catalog.push(Page::with_lines(
        "Demo",
        [
            Line::text("Text", "HELLO"),
            Line::bar("Bar", 50.0, RenderOption::BarWithValue),
            Line::numeric("Number", 50.0, "", RenderOption::Decimals1),
            Line::numeric("Percent", 24.0, "%", RenderOption::Decimals0),
            Line::time("Time", 221645.0, RenderOption::TimeHhMm),
            Line::numeric("RSSI", 0.0, "dB", RenderOption::Decimals0),
        ],
    ))?;

    Ok(catalog)
}

/// Link quality in percent: -100 dBm is 0 %, -50 dBm and above is 100 %
pub fn signal_quality(dbm: i32) -> f32 {
    (2 * (dbm.clamp(-100, -50) + 100)) as f32
}

/// Uptime as an `HHMMSS` time value
pub fn uptime_hhmmss(uptime_ms: u32) -> f32 {
    let secs = uptime_ms / 1000;
    let (h, m, s) = (secs / 3600, (secs / 60) % 60, secs % 60);
    (h * 10_000 + m * 100 + s) as f32
}

/// Refresh the heater page
pub fn sync_heater_page(
    page: &mut Page,
    heater: Switch,
    function_topic: &str,
    conn: &ConnectionState,
) -> Result<(), PageError> {
    page.set_text(heater_row::STATE, heater.as_str())?;
    page.set_text(heater_row::TOPIC, function_topic)?;
    page.set_value(heater_row::RSSI, conn.wifi_strength_dbm as f32)?;
    page.set_value(heater_row::SIGNAL, signal_quality(conn.wifi_strength_dbm))?;
    Ok(())
}

/// Update the heater page's uptime line
pub fn set_uptime(page: &mut Page, uptime_ms: u32) -> Result<(), PageError> {
    page.set_value(heater_row::UPTIME, uptime_hhmmss(uptime_ms))?;
    Ok(())
}

/// Refresh the network diagnostics page
pub fn sync_network_page(page: &mut Page, conn: &ConnectionState, broker: &str) -> Result<(), PageError> {
    page.set_text(network_row::WIFI, conn.wifi.as_str())?;
    page.set_value(network_row::RSSI, conn.wifi_strength_dbm as f32)?;
    page.set_value(network_row::CHANNEL, conn.wifi_channel as f32)?;
    page.set_text(network_row::BAND, FrequencyBand::from_channel(conn.wifi_channel).label())?;
    page.set_text(network_row::MQTT, conn.mqtt.as_str())?;
    page.set_text(network_row::BROKER, broker)?;
    Ok(())
}

/// Refresh the demo page's live line
pub fn sync_demo_page(page: &mut Page, conn: &ConnectionState) -> Result<(), PageError> {
    page.set_value(DEMO_RSSI_ROW, conn.wifi_strength_dbm as f32)?;
    Ok(())
}
