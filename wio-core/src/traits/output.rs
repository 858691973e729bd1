//! Switched output trait

/// Errors driving an output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// The pin driver refused the change
    Pin,
}

/// An on/off load such as a heater relay
///
/// Implementations keep the logical state; `is_on` reports what was last
/// requested successfully, independent of pin polarity.
pub trait SwitchOutput {
    /// Switch the load on or off
    fn set_on(&mut self, on: bool) -> Result<(), OutputError>;

    /// Check if the load is currently on
    fn is_on(&self) -> bool;

    /// Invert the current state
    fn toggle(&mut self) -> Result<(), OutputError> {
        let on = !self.is_on();
        self.set_on(on)
    }
}
