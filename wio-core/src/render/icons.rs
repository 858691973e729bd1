//! Header status icons
//!
//! Four indicators share the right part of the header: WiFi signal with the
//! frequency band label, MQTT session with publish/receive arrows, and the
//! storage card. Each is drawn from a bitmap on the card when one is
//! present, otherwise from vector shapes.

use wio_display::Color;

use crate::net::{ConnectionState, LinkStatus};

/// Signal quality bucket of an RSSI reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SignalBand {
    /// -1 ..= -49 dBm
    Full,
    /// -50 ..= -59 dBm
    Good,
    /// -60 ..= -69 dBm
    Fair,
    /// Below -70 dBm, including the disconnected sentinel
    None,
    /// Anything else (0, positive, exactly -70)
    Unknown,
}

impl SignalBand {
    pub fn from_rssi(dbm: i32) -> Self {
        match dbm {
            -49..=-1 => SignalBand::Full,
            -59..=-50 => SignalBand::Good,
            -69..=-60 => SignalBand::Fair,
            i32::MIN..=-71 => SignalBand::None,
            _ => SignalBand::Unknown,
        }
    }

    /// Fill color of the vector glyph
    pub fn color(self) -> Color {
        match self {
            SignalBand::Full => Color::GREEN,
            SignalBand::Good => Color::YELLOW,
            SignalBand::Fair => Color::ORANGE,
            SignalBand::None => Color::RED,
            SignalBand::Unknown => Color::LIGHT_GREY,
        }
    }

    /// Bitmap on the storage card
    pub fn image(self) -> &'static str {
        match self {
            SignalBand::Full => "sys/img/bmp/wlan_full.bmp",
            SignalBand::Good => "sys/img/bmp/wlan_mid.bmp",
            SignalBand::Fair => "sys/img/bmp/wlan_low.bmp",
            SignalBand::None => "sys/img/bmp/wlan_no.bmp",
            SignalBand::Unknown => "sys/img/bmp/wlan_no_red.bmp",
        }
    }
}

/// WiFi frequency band derived from the channel number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrequencyBand {
    /// Channels 1..=14
    Ghz2_4,
    /// Channels 32..=68
    Ghz5,
    /// Channels 96..=165
    Ghz5_9,
    /// No label
    None,
}

impl FrequencyBand {
    pub fn from_channel(channel: i32) -> Self {
        match channel {
            1..=14 => FrequencyBand::Ghz2_4,
            32..=68 => FrequencyBand::Ghz5,
            96..=165 => FrequencyBand::Ghz5_9,
            _ => FrequencyBand::None,
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            FrequencyBand::Ghz2_4 => "2.4GHz",
            FrequencyBand::Ghz5 => "5GHz",
            FrequencyBand::Ghz5_9 => "5.9GHz",
            FrequencyBand::None => "",
        }
    }

    /// Glyphs of the label with their x offsets
    pub fn glyphs(self) -> &'static [(Glyph, u16)] {
        match self {
            FrequencyBand::Ghz2_4 => &[
                (GLYPH_2, 0),
                (GLYPH_DOT, 5),
                (GLYPH_4, 7),
                (GLYPH_G, 12),
                (GLYPH_H, 17),
                (GLYPH_Z, 22),
            ],
            FrequencyBand::Ghz5 => &[(GLYPH_5, 0), (GLYPH_G, 5), (GLYPH_H, 10), (GLYPH_Z, 15)],
            FrequencyBand::Ghz5_9 => &[
                (GLYPH_5, 0),
                (GLYPH_DOT, 5),
                (GLYPH_9, 7),
                (GLYPH_G, 12),
                (GLYPH_H, 17),
                (GLYPH_Z, 22),
            ],
            FrequencyBand::None => &[],
        }
    }
}

/// Tiny pixel glyph, one bit per pixel, bit 0 leftmost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub rows: [u8; 6],
    pub width: u16,
}

impl Glyph {
    const fn new(rows: [u8; 6]) -> Self {
        Self { rows, width: 4 }
    }

    /// Set pixels as (dx, dy) offsets
    pub fn pixels(&self) -> impl Iterator<Item = (u16, u16)> + '_ {
        let width = self.width;
        self.rows.iter().enumerate().flat_map(move |(dy, bits)| {
            (0..width)
                .filter(move |dx| bits & (1 << dx) != 0)
                .map(move |dx| (dx, dy as u16))
        })
    }
}

pub const GLYPH_2: Glyph = Glyph::new([0b0110, 0b1001, 0b1000, 0b0100, 0b0010, 0b1111]);
pub const GLYPH_4: Glyph = Glyph::new([0b0101, 0b0101, 0b0101, 0b1111, 0b0100, 0b0100]);
pub const GLYPH_5: Glyph = Glyph::new([0b1111, 0b0001, 0b0111, 0b1000, 0b1001, 0b0110]);
pub const GLYPH_9: Glyph = Glyph::new([0b0110, 0b1001, 0b1001, 0b1110, 0b1000, 0b0110]);
pub const GLYPH_G: Glyph = Glyph::new([0b0110, 0b1001, 0b0001, 0b1101, 0b1001, 0b0110]);
pub const GLYPH_H: Glyph = Glyph::new([0b1001, 0b1001, 0b1001, 0b1111, 0b1001, 0b1001]);
pub const GLYPH_Z: Glyph = Glyph::new([0b0000, 0b0000, 0b1111, 0b0010, 0b0100, 0b1111]);
pub const GLYPH_DOT: Glyph = Glyph::new([0, 0, 0, 0, 0, 0b0001]);

/// Publish arrow (3 px wide, rows 1..=5)
pub const ARROW_PUBLISH: Glyph = Glyph {
    rows: [0b100, 0b110, 0b101, 0b100, 0b100, 0],
    width: 3,
};

/// Receive arrow (3 px wide, rows 1..=5)
pub const ARROW_RECEIVE: Glyph = Glyph {
    rows: [0b001, 0b001, 0b101, 0b011, 0b001, 0],
    width: 3,
};

pub const STORAGE_IMAGE: &str = "sys/img/bmp/sd_card.bmp";
pub const MQTT_ON_IMAGE: &str = "sys/img/bmp/MQTT_on.bmp";
pub const MQTT_OFF_IMAGE: &str = "sys/img/bmp/MQTT_off.bmp";

/// Inputs of the MQTT indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MqttIndicator {
    pub status: LinkStatus,
    pub published: bool,
    pub received: bool,
}

/// Last drawn value of each indicator; `None` until first drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IconCache {
    pub storage: Option<bool>,
    pub mqtt: Option<MqttIndicator>,
    pub signal: Option<SignalBand>,
    pub band: Option<FrequencyBand>,
}

impl IconCache {
    pub const fn new() -> Self {
        Self {
            storage: None,
            mqtt: None,
            signal: None,
            band: None,
        }
    }
}

impl MqttIndicator {
    pub fn from_state(state: &ConnectionState) -> Self {
        Self {
            status: state.mqtt,
            published: state.mqtt_published_recently,
            received: state.mqtt_subscribed_recently,
        }
    }
}
