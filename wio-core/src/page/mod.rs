//! Page model
//!
//! A page is a title plus exactly [`LINES_PER_PAGE`] lines. Pages record
//! which lines changed since the last repaint so the node can redraw only
//! those values.

mod catalog;
mod line;

pub use catalog::{PageCatalog, MAX_PAGES};
pub use line::{Line, LineKind, RenderOption, MAX_NAME_LEN, MAX_TEXT_LEN};

use heapless::String;

/// Lines on every page
pub const LINES_PER_PAGE: usize = 6;

/// Maximum characters in a page title
pub const MAX_TITLE_LEN: usize = 15;

/// Page access errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PageError {
    /// Line or page index out of range
    InvalidIndex(usize),
    /// Catalog has no room for another page
    CatalogFull,
}

/// One screen of lines
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Page {
    title: String<MAX_TITLE_LEN>,
    lines: [Line; LINES_PER_PAGE],
    /// Bit `i` set when line `i` changed since the last `take_dirty`
    dirty: u8,
}

impl Page {
    /// Create a page with blank lines
    pub fn new(title: &str) -> Self {
        Self {
            title: copy_truncated(title),
            lines: core::array::from_fn(|_| Line::empty()),
            dirty: 0,
        }
    }

    /// Create a page from its lines
    pub fn with_lines(title: &str, lines: [Line; LINES_PER_PAGE]) -> Self {
        Self {
            title: copy_truncated(title),
            lines,
            dirty: 0,
        }
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = copy_truncated(title);
    }

    /// Get a line
    pub fn line(&self, index: usize) -> Result<&Line, PageError> {
        self.lines.get(index).ok_or(PageError::InvalidIndex(index))
    }

    /// Get all lines in display order
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    /// Replace a line
    pub fn set_line(&mut self, index: usize, line: Line) -> Result<(), PageError> {
        let slot = self
            .lines
            .get_mut(index)
            .ok_or(PageError::InvalidIndex(index))?;
        *slot = line;
        self.dirty |= 1 << index;
        Ok(())
    }

    /// Set a line's numeric value
    ///
    /// Returns `true` if the value changed.
    pub fn set_value(&mut self, index: usize, value: f32) -> Result<bool, PageError> {
        let line = self
            .lines
            .get_mut(index)
            .ok_or(PageError::InvalidIndex(index))?;
        let changed = line.set_value(value);
        if changed {
            self.dirty |= 1 << index;
        }
        Ok(changed)
    }

    /// Set a line's text
    ///
    /// Returns `true` if the text changed.
    pub fn set_text(&mut self, index: usize, text: &str) -> Result<bool, PageError> {
        let line = self
            .lines
            .get_mut(index)
            .ok_or(PageError::InvalidIndex(index))?;
        let changed = line.set_text(text);
        if changed {
            self.dirty |= 1 << index;
        }
        Ok(changed)
    }

    /// Take and clear the changed-lines mask
    pub fn take_dirty(&mut self) -> u8 {
        core::mem::take(&mut self.dirty)
    }

    /// Check if any line changed
    pub fn is_dirty(&self) -> bool {
        self.dirty != 0
    }
}

/// Copy as much of `text` as fits, never splitting a character
pub(crate) fn copy_truncated<const N: usize>(text: &str) -> String<N> {
    let mut s = String::new();
    for ch in text.chars() {
        if s.push(ch).is_err() {
            break;
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_index_bounds() {
        let page = Page::new("Test");
        assert!(page.line(5).is_ok());
        assert_eq!(page.line(6), Err(PageError::InvalidIndex(6)));
    }

    #[test]
    fn test_title_truncated() {
        let page = Page::new("A title that is too long");
        assert_eq!(page.title().len(), MAX_TITLE_LEN);
    }

    #[test]
    fn test_dirty_tracking() {
        let mut page = Page::new("Test");
        page.set_line(0, Line::text("Status", "off")).unwrap();
        page.set_line(2, Line::numeric("RSSI", -60.0, "dBm", RenderOption::Decimals0))
            .unwrap();
        assert_eq!(page.take_dirty(), 0b0000_0101);
        assert!(!page.is_dirty());

        // Unchanged values do not mark the line
        assert_eq!(page.set_text(0, "off"), Ok(false));
        assert_eq!(page.set_value(2, -60.0), Ok(false));
        assert!(!page.is_dirty());

        assert_eq!(page.set_text(0, "on"), Ok(true));
        assert_eq!(page.take_dirty(), 0b0000_0001);
    }

    #[test]
    fn test_setters_reject_bad_index() {
        let mut page = Page::new("Test");
        assert_eq!(page.set_value(6, 1.0), Err(PageError::InvalidIndex(6)));
        assert_eq!(page.set_text(9, "x"), Err(PageError::InvalidIndex(9)));
        assert_eq!(page.set_line(6, Line::empty()), Err(PageError::InvalidIndex(6)));
    }

    #[test]
    fn test_copy_truncated_multibyte() {
        // "ö" is two bytes and would straddle the capacity
        let s: String<4> = copy_truncated("abcö");
        assert_eq!(s.as_str(), "abc");

        let s: String<4> = copy_truncated("aöb");
        assert_eq!(s.as_str(), "aöb");
    }
}
