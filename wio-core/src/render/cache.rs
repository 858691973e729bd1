//! Per-line width cache
//!
//! Remembers how wide the text last painted in each name and value region
//! was. A shorter replacement must clear the old width first; a longer one
//! simply overpaints.

use crate::page::LINES_PER_PAGE;

/// Region of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Region {
    Name,
    Value,
}

/// Last painted widths for the lines of the page on screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderCache {
    name: [u16; LINES_PER_PAGE],
    value: [u16; LINES_PER_PAGE],
    /// Value region currently shows the overflow message
    overflowed: [bool; LINES_PER_PAGE],
}

impl RenderCache {
    pub const fn new() -> Self {
        Self {
            name: [0; LINES_PER_PAGE],
            value: [0; LINES_PER_PAGE],
            overflowed: [false; LINES_PER_PAGE],
        }
    }

    /// Forget everything; used after the screen is cleared
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Last painted width of a region, 0 if unknown or out of range
    pub fn width(&self, region: Region, index: usize) -> u16 {
        let widths = match region {
            Region::Name => &self.name,
            Region::Value => &self.value,
        };
        widths.get(index).copied().unwrap_or(0)
    }

    /// Check if the value region shows the overflow message
    pub fn is_overflowed(&self, index: usize) -> bool {
        self.overflowed.get(index).copied().unwrap_or(false)
    }

    /// Width to clear before painting `new_width` in a region
    ///
    /// `Some(old)` when the new text is narrower than the old one.
    pub fn clear_width(&self, region: Region, index: usize, new_width: u16) -> Option<u16> {
        let old = self.width(region, index);
        (new_width < old).then_some(old)
    }

    /// Record the width just painted
    pub fn store(&mut self, region: Region, index: usize, width: u16) {
        if index >= LINES_PER_PAGE {
            return;
        }
        match region {
            Region::Name => self.name[index] = width,
            Region::Value => {
                self.value[index] = width;
                self.overflowed[index] = false;
            }
        }
    }

    /// Record that the value region now shows the overflow message
    pub fn store_overflow(&mut self, index: usize) {
        if index < LINES_PER_PAGE {
            self.value[index] = 0;
            self.overflowed[index] = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_only_when_shrinking() {
        let mut cache = RenderCache::new();
        assert_eq!(cache.clear_width(Region::Value, 0, 50), None);
        cache.store(Region::Value, 0, 50);
        assert_eq!(cache.clear_width(Region::Value, 0, 50), None);
        assert_eq!(cache.clear_width(Region::Value, 0, 60), None);
        assert_eq!(cache.clear_width(Region::Value, 0, 20), Some(50));
    }

    #[test]
    fn test_regions_independent() {
        let mut cache = RenderCache::new();
        cache.store(Region::Name, 2, 30);
        cache.store(Region::Value, 2, 70);
        assert_eq!(cache.width(Region::Name, 2), 30);
        assert_eq!(cache.width(Region::Value, 2), 70);
        assert_eq!(cache.width(Region::Value, 3), 0);
    }

    #[test]
    fn test_overflow_flag() {
        let mut cache = RenderCache::new();
        cache.store(Region::Value, 1, 80);
        cache.store_overflow(1);
        assert_eq!(cache.width(Region::Value, 1), 0);
        assert!(cache.is_overflowed(1));

        cache.store(Region::Value, 1, 10);
        assert!(!cache.is_overflowed(1));
    }

    #[test]
    fn test_reset() {
        let mut cache = RenderCache::new();
        cache.store(Region::Name, 0, 12);
        cache.store_overflow(5);
        cache.reset();
        assert_eq!(cache, RenderCache::new());
    }

    #[test]
    fn test_out_of_range_ignored() {
        let mut cache = RenderCache::new();
        cache.store(Region::Name, LINES_PER_PAGE, 12);
        assert_eq!(cache.width(Region::Name, LINES_PER_PAGE), 0);
    }
}
