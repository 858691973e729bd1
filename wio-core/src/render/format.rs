//! Value formatting
//!
//! Turns a line's value into the text drawn in its value region. All
//! formatting goes into fixed buffers; a value whose text does not fit is
//! reported as `None` and rendered as overflow.

use core::fmt::Write;

use heapless::String;

use crate::page::{Line, LineKind};

/// Text drawn in place of a value that does not fit
pub const OVERFLOW_TEXT: &str = "Text too long!!!";

/// Capacity of formatted value text
pub const VALUE_TEXT_LEN: usize = 72;

/// Formatted value text
pub type ValueText = String<VALUE_TEXT_LEN>;

/// Time of day decoded from an HHMMSS value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    pub hours: i32,
    pub minutes: i32,
    pub seconds: i32,
}

impl TimeOfDay {
    /// Split an HHMMSS-encoded value
    ///
    /// The value is truncated toward zero first. No range checking: 256199
    /// decodes to 25:61:99.
    pub fn decode(value: f32) -> Self {
        let v = value as i32;
        Self {
            hours: v / 10_000,
            minutes: (v % 10_000) / 100,
            seconds: v % 100,
        }
    }
}

/// Write `value` with `decimals` places, spelling non-finite values like C
fn write_fixed<const N: usize>(out: &mut String<N>, value: f32, decimals: usize) -> core::fmt::Result {
    if value.is_nan() {
        out.write_str("nan")
    } else if value.is_infinite() {
        out.write_str(if value > 0.0 { "inf" } else { "-inf" })
    } else {
        write!(out, "{:.*}", decimals, value)
    }
}

/// Numeric value with unit: `"<value> <unit>"`
pub fn format_numeric(value: f32, unit: &str, decimals: usize) -> Option<ValueText> {
    let mut text = ValueText::new();
    write_fixed(&mut text, value, decimals.min(3)).ok()?;
    text.push(' ').ok()?;
    text.push_str(unit).ok()?;
    Some(text)
}

/// Time of day as `H:M` or `H:M:S`, without zero padding
pub fn format_time(value: f32, with_seconds: bool) -> ValueText {
    let t = TimeOfDay::decode(value);
    let mut text = ValueText::new();
    // At most three i32 fields and two separators
    let _ = if with_seconds {
        write!(text, "{}:{}:{}", t.hours, t.minutes, t.seconds)
    } else {
        write!(text, "{}:{}", t.hours, t.minutes)
    };
    text
}

/// Filled width of a bar in pixels: the value clamped to 0..=100
pub fn bar_fill(value: f32) -> u16 {
    (value as i32).clamp(0, 100) as u16
}

/// Label drawn over a bar: the unclamped value truncated to an integer
pub fn bar_label(value: f32) -> ValueText {
    let mut text = ValueText::new();
    let _ = write!(text, "{}", value as i32);
    text
}

/// Value text of a text, numeric or time line
///
/// Returns `None` for bars, and for numeric values too long for the
/// buffer.
pub fn value_text(line: &Line) -> Option<ValueText> {
    match line.kind() {
        LineKind::Text => {
            let mut text = ValueText::new();
            text.push_str(line.text_value()).ok()?;
            Some(text)
        }
        LineKind::Numeric => format_numeric(line.value(), line.text_value(), line.option().decimals()),
        LineKind::Time => Some(format_time(line.value(), line.option().time_shows_seconds())),
        LineKind::Bar => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::RenderOption;

    #[test]
    fn test_numeric_decimals() {
        assert_eq!(format_numeric(24.0, "%", 0).unwrap().as_str(), "24 %");
        assert_eq!(format_numeric(21.456, "C", 1).unwrap().as_str(), "21.5 C");
        assert_eq!(format_numeric(1.5, "V", 2).unwrap().as_str(), "1.50 V");
        assert_eq!(format_numeric(-0.125, "A", 3).unwrap().as_str(), "-0.125 A");
    }

    #[test]
    fn test_numeric_empty_unit_keeps_space() {
        assert_eq!(format_numeric(7.0, "", 0).unwrap().as_str(), "7 ");
    }

    #[test]
    fn test_numeric_non_finite() {
        assert_eq!(format_numeric(f32::NAN, "x", 2).unwrap().as_str(), "nan x");
        assert_eq!(format_numeric(f32::INFINITY, "x", 2).unwrap().as_str(), "inf x");
    }

    #[test]
    fn test_numeric_extreme_value_fits_buffer() {
        let text = format_numeric(-f32::MAX, "abcdefghijklmnopqrs", 3).unwrap();
        assert!(text.as_str().ends_with(".000 abcdefghijklmnopqrs"));
    }

    #[test]
    fn test_time_decode() {
        let t = TimeOfDay::decode(221645.0);
        assert_eq!((t.hours, t.minutes, t.seconds), (22, 16, 45));
        let t = TimeOfDay::decode(90509.9);
        assert_eq!((t.hours, t.minutes, t.seconds), (9, 5, 9));
    }

    #[test]
    fn test_time_format() {
        assert_eq!(format_time(221645.0, false).as_str(), "22:16");
        assert_eq!(format_time(221645.0, true).as_str(), "22:16:45");
        assert_eq!(format_time(90509.0, true).as_str(), "9:5:9");
        assert_eq!(format_time(0.0, true).as_str(), "0:0:0");
    }

    #[test]
    fn test_bar_fill_clamps() {
        assert_eq!(bar_fill(-5.0), 0);
        assert_eq!(bar_fill(42.9), 42);
        assert_eq!(bar_fill(150.0), 100);
        assert_eq!(bar_fill(f32::NAN), 0);
    }

    #[test]
    fn test_bar_label_unclamped() {
        assert_eq!(bar_label(150.7).as_str(), "150");
        assert_eq!(bar_label(-3.2).as_str(), "-3");
    }

    #[test]
    fn test_value_text_by_kind() {
        let text = Line::text("Status", "on");
        assert_eq!(value_text(&text).unwrap().as_str(), "on");

        let num = Line::numeric("Hum", 24.0, "%", RenderOption::Decimals0);
        assert_eq!(value_text(&num).unwrap().as_str(), "24 %");

        let time = Line::time("Clock", 221645.0, RenderOption::TimeHhMmSs);
        assert_eq!(value_text(&time).unwrap().as_str(), "22:16:45");

        let bar = Line::bar("Level", 50.0, RenderOption::BarEmpty);
        assert_eq!(value_text(&bar), None);
    }
}
