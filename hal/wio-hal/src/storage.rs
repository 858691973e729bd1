//! Removable storage abstraction

/// Removable media (SD card) presence
///
/// The display shows a storage indicator and loads icon bitmaps from the
/// card when one is inserted.
pub trait StorageMedia {
    /// Check if media is inserted and mounted
    fn is_present(&mut self) -> bool;
}

impl StorageMedia for bool {
    fn is_present(&mut self) -> bool {
        *self
    }
}
