//! GPIO relay output
//!
//! Switches a load (heater element via SSR or relay module) from a GPIO pin.

use embedded_hal::digital::OutputPin;
use wio_core::traits::{OutputError, SwitchOutput};

/// GPIO relay
///
/// The pin can be active-high (default) or active-low.
pub struct GpioRelay<P> {
    pin: P,
    /// If true, load ON = pin LOW
    inverted: bool,
    /// Current logical state (true = load on)
    on: bool,
}

impl<P: OutputPin> GpioRelay<P> {
    /// Create a relay output and switch it off
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to control
    /// - `inverted`: If true, the load is ON when the pin is LOW
    pub fn new(pin: P, inverted: bool) -> Result<Self, OutputError> {
        let mut relay = Self {
            pin,
            inverted,
            on: false,
        };
        relay.set_on(false)?;
        Ok(relay)
    }

    pub fn new_active_high(pin: P) -> Result<Self, OutputError> {
        Self::new(pin, false)
    }

    pub fn new_active_low(pin: P) -> Result<Self, OutputError> {
        Self::new(pin, true)
    }

    /// Release the pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> SwitchOutput for GpioRelay<P> {
    fn set_on(&mut self, on: bool) -> Result<(), OutputError> {
        let result = if on != self.inverted {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        result.map_err(|_| OutputError::Pin)?;
        self.on = on;
        Ok(())
    }

    fn is_on(&self) -> bool {
        self.on
    }
}
