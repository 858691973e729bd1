//! Heartbeat LED
//!
//! Blinks a status LED at a fixed period so a hung main loop is visible at
//! a glance.

use embedded_hal::digital::StatefulOutputPin;
use wio_core::timing::Interval;
use wio_core::traits::OutputError;

/// Default blink half-period in milliseconds
pub const HEARTBEAT_MS: u32 = 250;

/// Toggles an LED every period
pub struct Heartbeat<P> {
    pin: P,
    timer: Interval,
}

impl<P: StatefulOutputPin> Heartbeat<P> {
    pub fn new(pin: P, period_ms: u32) -> Self {
        Self {
            pin,
            timer: Interval::new(period_ms),
        }
    }

    /// Toggle the LED if the period elapsed
    ///
    /// Returns `true` if the LED was toggled.
    pub fn poll(&mut self, now_ms: u32) -> Result<bool, OutputError> {
        if !self.timer.poll(now_ms) {
            return Ok(false);
        }
        self.pin.toggle().map_err(|_| OutputError::Pin)?;
        Ok(true)
    }

    /// Check if the LED is lit
    pub fn is_lit(&mut self) -> Result<bool, OutputError> {
        self.pin.is_set_high().map_err(|_| OutputError::Pin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::{ErrorType, OutputPin};

    struct Led {
        high: bool,
    }

    impl ErrorType for Led {
        type Error = Infallible;
    }

    impl OutputPin for Led {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            Ok(())
        }
    }

    impl StatefulOutputPin for Led {
        fn is_set_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.high)
        }

        fn is_set_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.high)
        }
    }

    #[test]
    fn test_blinks_at_period() {
        let mut beat = Heartbeat::new(Led { high: false }, HEARTBEAT_MS);

        // First poll toggles immediately
        assert!(beat.poll(0).unwrap());
        assert!(beat.is_lit().unwrap());

        assert!(!beat.poll(100).unwrap());
        assert!(beat.is_lit().unwrap());

        assert!(beat.poll(250).unwrap());
        assert!(!beat.is_lit().unwrap());

        assert!(beat.poll(500).unwrap());
        assert!(beat.is_lit().unwrap());
    }
}
