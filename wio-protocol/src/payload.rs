//! Telemetry payload encoding and command payload parsing
//!
//! Telemetry is published as decimal text: integers as `%d`, floats with
//! exactly three decimals as `%.3f`.

use core::fmt::Write;

use heapless::String;

/// Capacity of an encoded payload (fits any `f32` with three decimals)
pub const MAX_PAYLOAD_TEXT: usize = 48;

/// Encoded telemetry payload
pub type PayloadText = String<MAX_PAYLOAD_TEXT>;

/// Errors decoding an inbound payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PayloadError {
    /// Payload is not valid UTF-8
    NotUtf8,
    /// Payload is not one of the accepted values
    Unrecognized,
}

/// Switch command carried on a function topic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    /// Wire text of the command
    pub const fn as_str(self) -> &'static str {
        match self {
            Switch::On => "on",
            Switch::Off => "off",
        }
    }

    /// Check if this is `On`
    pub const fn is_on(self) -> bool {
        matches!(self, Switch::On)
    }
}

impl From<bool> for Switch {
    fn from(on: bool) -> Self {
        if on {
            Switch::On
        } else {
            Switch::Off
        }
    }
}

/// Encode an integer as `%d`
pub fn encode_int(value: i32) -> PayloadText {
    let mut text = PayloadText::new();
    // i32 is at most 11 characters
    let _ = write!(text, "{}", value);
    text
}

/// Encode a float as `%.3f`
///
/// Non-finite values use the C spellings `nan`, `inf` and `-inf`.
pub fn encode_float(value: f32) -> PayloadText {
    let mut text = PayloadText::new();
    let _ = if value.is_nan() {
        text.push_str("nan")
    } else if value.is_infinite() {
        text.push_str(if value > 0.0 { "inf" } else { "-inf" })
    } else {
        // f32::MAX is 39 digits; sign, point and decimals fit in the capacity
        write!(text, "{:.3}", value).map_err(|_| ())
    };
    text
}

/// Parse an `on` / `off` command
///
/// Surrounding whitespace and letter case are ignored.
pub fn parse_switch(payload: &[u8]) -> Result<Switch, PayloadError> {
    let text = core::str::from_utf8(payload).map_err(|_| PayloadError::NotUtf8)?;
    let text = text.trim();
    if text.eq_ignore_ascii_case("on") {
        Ok(Switch::On)
    } else if text.eq_ignore_ascii_case("off") {
        Ok(Switch::Off)
    } else {
        Err(PayloadError::Unrecognized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_int() {
        assert_eq!(encode_int(0).as_str(), "0");
        assert_eq!(encode_int(-55).as_str(), "-55");
        assert_eq!(encode_int(i32::MIN).as_str(), "-2147483648");
    }

    #[test]
    fn test_encode_float_three_decimals() {
        assert_eq!(encode_float(21.5).as_str(), "21.500");
        assert_eq!(encode_float(-0.25).as_str(), "-0.250");
        assert_eq!(encode_float(3.0).as_str(), "3.000");
    }

    #[test]
    fn test_encode_float_extremes() {
        assert!(encode_float(f32::MAX).as_str().ends_with(".000"));
        assert_eq!(encode_float(f32::NAN).as_str(), "nan");
        assert_eq!(encode_float(f32::NEG_INFINITY).as_str(), "-inf");
    }

    #[test]
    fn test_parse_switch() {
        assert_eq!(parse_switch(b"on"), Ok(Switch::On));
        assert_eq!(parse_switch(b"OFF"), Ok(Switch::Off));
        assert_eq!(parse_switch(b" On\r\n"), Ok(Switch::On));
        assert_eq!(parse_switch(b"toggle"), Err(PayloadError::Unrecognized));
        assert_eq!(parse_switch(&[0xff, 0xfe]), Err(PayloadError::NotUtf8));
    }

    #[test]
    fn test_switch_wire_text() {
        assert_eq!(Switch::from(true).as_str(), "on");
        assert_eq!(Switch::from(false).as_str(), "off");
    }
}
