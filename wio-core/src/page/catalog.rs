//! Fixed page catalog
//!
//! Pages are built once at startup; the catalog only tracks which one is
//! shown.

use heapless::Vec;

use super::{Page, PageError};

/// Maximum number of pages
pub const MAX_PAGES: usize = 4;

/// Ordered set of pages with a current selection
#[derive(Debug, Clone, Default)]
pub struct PageCatalog {
    pages: Vec<Page, MAX_PAGES>,
    current: usize,
}

impl PageCatalog {
    pub const fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: 0,
        }
    }

    /// Append a page, returning its index
    pub fn push(&mut self, page: Page) -> Result<usize, PageError> {
        self.pages.push(page).map_err(|_| PageError::CatalogFull)?;
        Ok(self.pages.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&Page, PageError> {
        self.pages.get(index).ok_or(PageError::InvalidIndex(index))
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Page, PageError> {
        self.pages
            .get_mut(index)
            .ok_or(PageError::InvalidIndex(index))
    }

    /// Index of the page on screen
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Page on screen
    pub fn current(&self) -> Result<&Page, PageError> {
        self.get(self.current)
    }

    pub fn current_mut(&mut self) -> Result<&mut Page, PageError> {
        self.get_mut(self.current)
    }

    /// Show page `index`
    pub fn select(&mut self, index: usize) -> Result<(), PageError> {
        if index >= self.pages.len() {
            return Err(PageError::InvalidIndex(index));
        }
        self.current = index;
        Ok(())
    }

    /// Advance to the next page, wrapping
    pub fn next(&mut self) -> usize {
        if !self.pages.is_empty() {
            self.current = (self.current + 1) % self.pages.len();
        }
        self.current
    }

    /// Go back to the previous page, wrapping
    pub fn prev(&mut self) -> usize {
        if !self.pages.is_empty() {
            self.current = (self.current + self.pages.len() - 1) % self.pages.len();
        }
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(n: usize) -> PageCatalog {
        let mut c = PageCatalog::new();
        for _ in 0..n {
            c.push(Page::new("p")).unwrap();
        }
        c
    }

    #[test]
    fn test_navigation_wraps() {
        let mut c = catalog(3);
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.next(), 1);
        assert_eq!(c.next(), 2);
        assert_eq!(c.next(), 0);
        assert_eq!(c.prev(), 2);
    }

    #[test]
    fn test_empty_catalog_navigation() {
        let mut c = PageCatalog::new();
        assert_eq!(c.next(), 0);
        assert_eq!(c.prev(), 0);
        assert_eq!(c.current().err(), Some(PageError::InvalidIndex(0)));
    }

    #[test]
    fn test_capacity() {
        let mut c = catalog(MAX_PAGES);
        assert_eq!(c.push(Page::new("x")), Err(PageError::CatalogFull));
    }

    #[test]
    fn test_select_bounds() {
        let mut c = catalog(2);
        assert!(c.select(1).is_ok());
        assert_eq!(c.select(2), Err(PageError::InvalidIndex(2)));
        assert_eq!(c.current_index(), 1);
    }
}
