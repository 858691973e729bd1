//! Button panel
//!
//! Keys A/B/C and the 5-way switch are active-low inputs with pull-ups.
//! The panel scans them in [`ButtonEvent::PRIORITY`] order, so when two
//! read pressed at once the higher-priority one is reported. A press is
//! reported once; holding a button does not repeat it.
//!
//! Readings inside the debounce window after an accepted change are not
//! reported. Contact bounce settles in the first half of the window; a
//! release seen in the second half is a real one and ends the press once
//! the window expires, so a quick second press is still reported.

use embedded_hal::digital::InputPin;
use wio_core::input::ButtonEvent;

/// Minimum time between accepted state changes
pub const DEBOUNCE_MS: u32 = 100;

/// Errors reading the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// A pin could not be read
    Pin(ButtonEvent),
}

/// Eight debounced, active-low buttons
pub struct ButtonPanel<P> {
    /// Pins in [`ButtonEvent::PRIORITY`] order
    pins: [P; 8],
    /// Button reported as held
    held: Option<ButtonEvent>,
    /// Time of the last accepted change
    changed_ms: Option<u32>,
    /// Held button read released late in the current window
    released_in_window: bool,
    debounce_ms: u32,
}

impl<P: InputPin> ButtonPanel<P> {
    /// Create a panel from pins listed in [`ButtonEvent::PRIORITY`] order
    /// (down, up, press, right, left, A, B, C)
    pub fn new(pins: [P; 8]) -> Self {
        Self::with_debounce(pins, DEBOUNCE_MS)
    }

    pub fn with_debounce(pins: [P; 8], debounce_ms: u32) -> Self {
        Self {
            pins,
            held: None,
            changed_ms: None,
            released_in_window: false,
            debounce_ms,
        }
    }

    /// Scan the panel
    ///
    /// Returns the button that was just pressed, if any.
    pub fn poll(&mut self, now_ms: u32) -> Result<Option<ButtonEvent>, InputError> {
        let pressed = self.scan()?;

        if let Some(changed) = self.changed_ms {
            let elapsed = now_ms.wrapping_sub(changed);
            if elapsed < self.debounce_ms {
                if pressed.is_none() && self.held.is_some() && elapsed >= self.debounce_ms / 2 {
                    self.released_in_window = true;
                }
                return Ok(None);
            }
        }

        if core::mem::take(&mut self.released_in_window) {
            self.held = None;
        }
        if pressed == self.held {
            return Ok(None);
        }

        self.held = pressed;
        self.changed_ms = Some(now_ms);
        Ok(pressed)
    }

    /// Button currently reported as held
    pub fn held(&self) -> Option<ButtonEvent> {
        self.held
    }

    /// Highest-priority button reading low
    fn scan(&mut self) -> Result<Option<ButtonEvent>, InputError> {
        for (pin, button) in self.pins.iter_mut().zip(ButtonEvent::PRIORITY) {
            if pin.is_low().map_err(|_| InputError::Pin(button))? {
                return Ok(Some(button));
            }
        }
        Ok(None)
    }
}
