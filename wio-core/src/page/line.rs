//! Display line definition
//!
//! A line is a labelled value: a name drawn at the left and a value drawn at
//! the value column in one of four presentations.

use heapless::String;

use super::copy_truncated;

/// Maximum characters in a line name
pub const MAX_NAME_LEN: usize = 15;

/// Maximum characters in a line's text (text value or numeric unit)
pub const MAX_TEXT_LEN: usize = 19;

/// How the value of a line is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineKind {
    /// The line's text verbatim
    Text,
    /// Number with unit, e.g. `24 %`
    Numeric,
    /// Horizontal bar, 0..=100
    Bar,
    /// Time of day encoded as HHMMSS
    Time,
}

/// Presentation detail of a line value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderOption {
    /// Kind-specific default (2 decimals, bar without value, `H:M`)
    #[default]
    Default,
    Decimals0,
    Decimals1,
    Decimals2,
    Decimals3,
    /// Bar without the numeric overlay
    BarEmpty,
    /// Bar with the value drawn over it
    BarWithValue,
    /// Time as hours and minutes
    TimeHhMm,
    /// Time as hours, minutes and seconds
    TimeHhMmSs,
}

impl RenderOption {
    /// Decimal places for numeric lines
    pub const fn decimals(self) -> usize {
        match self {
            RenderOption::Decimals0 => 0,
            RenderOption::Decimals1 => 1,
            RenderOption::Decimals3 => 3,
            _ => 2,
        }
    }

    /// Whether a bar shows its value
    pub const fn bar_shows_value(self) -> bool {
        matches!(self, RenderOption::BarWithValue)
    }

    /// Whether a time shows seconds
    pub const fn time_shows_seconds(self) -> bool {
        matches!(self, RenderOption::TimeHhMmSs)
    }

    /// Option for `places` decimals, clamped to 0..=3
    pub const fn with_decimals(places: u8) -> Self {
        match places {
            0 => RenderOption::Decimals0,
            1 => RenderOption::Decimals1,
            2 => RenderOption::Decimals2,
            _ => RenderOption::Decimals3,
        }
    }
}

/// One row of a page
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    name: String<MAX_NAME_LEN>,
    kind: LineKind,
    value: f32,
    text: String<MAX_TEXT_LEN>,
    option: RenderOption,
}

impl Default for Line {
    fn default() -> Self {
        Self::empty()
    }
}

impl Line {
    /// Blank text line; renders nothing
    pub fn empty() -> Self {
        Self {
            name: String::new(),
            kind: LineKind::Text,
            value: 0.0,
            text: String::new(),
            option: RenderOption::Default,
        }
    }

    /// Text line
    pub fn text(name: &str, text: &str) -> Self {
        Self {
            name: copy_truncated(name),
            text: copy_truncated(text),
            ..Self::empty()
        }
    }

    /// Numeric line with unit
    pub fn numeric(name: &str, value: f32, unit: &str, option: RenderOption) -> Self {
        Self {
            name: copy_truncated(name),
            kind: LineKind::Numeric,
            value,
            text: copy_truncated(unit),
            option,
        }
    }

    /// Bar line
    pub fn bar(name: &str, value: f32, option: RenderOption) -> Self {
        Self {
            name: copy_truncated(name),
            kind: LineKind::Bar,
            value,
            text: String::new(),
            option,
        }
    }

    /// Time line; `hhmmss` is e.g. `221645.0` for 22:16:45
    pub fn time(name: &str, hhmmss: f32, option: RenderOption) -> Self {
        Self {
            name: copy_truncated(name),
            kind: LineKind::Time,
            value: hhmmss,
            text: String::new(),
            option,
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn kind(&self) -> LineKind {
        self.kind
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Text value, or unit for numeric lines
    pub fn text_value(&self) -> &str {
        self.text.as_str()
    }

    pub fn option(&self) -> RenderOption {
        self.option
    }

    /// Set the name, truncating to [`MAX_NAME_LEN`]
    pub fn set_name(&mut self, name: &str) {
        self.name = copy_truncated(name);
    }

    /// Set the text, truncating to [`MAX_TEXT_LEN`]
    ///
    /// Returns `true` if the stored text changed.
    pub fn set_text(&mut self, text: &str) -> bool {
        let next: String<MAX_TEXT_LEN> = copy_truncated(text);
        let changed = next != self.text;
        self.text = next;
        changed
    }

    /// Set the numeric value
    ///
    /// Returns `true` if the stored value changed.
    pub fn set_value(&mut self, value: f32) -> bool {
        let changed = value.to_bits() != self.value.to_bits();
        self.value = value;
        changed
    }

    pub fn set_option(&mut self, option: RenderOption) {
        self.option = option;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimals() {
        assert_eq!(RenderOption::Default.decimals(), 2);
        assert_eq!(RenderOption::Decimals0.decimals(), 0);
        assert_eq!(RenderOption::Decimals3.decimals(), 3);
        assert_eq!(RenderOption::with_decimals(9), RenderOption::Decimals3);
    }

    #[test]
    fn test_name_and_text_truncated() {
        let line = Line::text("a very long line name", "and an even longer text value");
        assert_eq!(line.name().len(), MAX_NAME_LEN);
        assert_eq!(line.text_value().len(), MAX_TEXT_LEN);
    }

    #[test]
    fn test_change_detection() {
        let mut line = Line::numeric("Temp", 21.0, "C", RenderOption::Decimals1);
        assert!(!line.set_value(21.0));
        assert!(line.set_value(21.5));
        assert!(!line.set_text("C"));
        assert!(line.set_text("F"));
    }

    #[test]
    fn test_empty_line() {
        let line = Line::empty();
        assert_eq!(line.kind(), LineKind::Text);
        assert!(line.name().is_empty());
        assert!(line.text_value().is_empty());
    }
}
