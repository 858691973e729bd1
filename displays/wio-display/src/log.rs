//! Scrollback log screen
//!
//! A fixed-size text log shown in place of the page view while the node is
//! booting (the "loading screen"). Connectivity code writes to it through
//! [`LogSink`] whether or not it is currently visible.

use heapless::String;

use crate::backend::{Canvas, Color, DisplayError, Font};

/// Number of log lines kept
pub const LOG_LINES: usize = 15;

/// Maximum characters per log line
pub const LOG_LINE_LEN: usize = 49;

/// Left margin of log text
const LOG_X: u16 = 5;

/// Vertical pitch of log lines
const LOG_PITCH: u16 = 16;

/// Destination for user-visible log lines
pub trait LogSink {
    /// Add `text` as a new line, or append it to the last line
    fn add_log(&mut self, text: &str, append: bool);
}

/// Scrollback buffer for the boot log
///
/// Holds at most [`LOG_LINES`] lines; when full the oldest line scrolls out.
#[derive(Clone)]
pub struct LogScreen {
    lines: heapless::Deque<String<LOG_LINE_LEN>, LOG_LINES>,
    /// Whether the log currently owns the panel
    active: bool,
    /// Whether the log needs to be redrawn
    dirty: bool,
}

impl Default for LogScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl LogScreen {
    /// Create an empty, inactive log
    pub const fn new() -> Self {
        Self {
            lines: heapless::Deque::new(),
            active: false,
            dirty: false,
        }
    }

    /// Show or hide the log
    ///
    /// Activating forces a full repaint on the next `render`.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.dirty = active;
    }

    /// Check if the log owns the panel
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Remove all lines
    pub fn clear(&mut self) {
        self.lines.clear();
        self.dirty = true;
    }

    /// Add a line or append to the last one
    ///
    /// Text beyond [`LOG_LINE_LEN`] characters is dropped.
    pub fn add(&mut self, text: &str, append: bool) {
        if append {
            if let Some(last) = self.lines.back_mut() {
                push_truncated(last, text);
                self.dirty = true;
                return;
            }
        }

        if self.lines.is_full() {
            self.lines.pop_front();
        }
        let mut line = String::new();
        push_truncated(&mut line, text);
        // Capacity was freed above
        let _ = self.lines.push_back(line);
        self.dirty = true;
    }

    /// Get a line by position, oldest first
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.iter().nth(row).map(|s| s.as_str())
    }

    /// Number of lines currently held
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the log holds no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get all lines as an iterator, oldest first
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    /// Check if the log needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Repaint the log if it is active and changed
    ///
    /// Returns `true` if anything was drawn.
    pub fn render<C: Canvas>(&mut self, canvas: &mut C) -> Result<bool, DisplayError> {
        if !self.active || !self.dirty {
            return Ok(false);
        }

        canvas.fill_screen(Color::BLACK)?;
        canvas.set_font(Font::Small);
        canvas.set_text_color(Color::DARK_GREEN, None);
        let mut y = 0;
        for line in self.lines.iter() {
            canvas.draw_text(line.as_str(), LOG_X, y)?;
            y += LOG_PITCH;
        }
        self.dirty = false;
        Ok(true)
    }
}

impl LogSink for LogScreen {
    fn add_log(&mut self, text: &str, append: bool) {
        self.add(text, append);
    }
}

/// Push as much of `text` as fits, never splitting a character
fn push_truncated<const N: usize>(dst: &mut String<N>, text: &str) {
    for ch in text.chars() {
        if dst.push(ch).is_err() {
            break;
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for LogScreen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "LogScreen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}
