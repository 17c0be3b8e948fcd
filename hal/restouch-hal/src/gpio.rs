//! GPIO pin abstractions
//!
//! Chip selects, the data/command line and the reset line are outputs; the
//! touch interrupt line is an input. All of them are infallible on the
//! RP2040, so the traits do not carry an error type.

/// Digital output pin
pub trait OutputPin {
    /// Drive the pin high (logic 1)
    fn set_high(&mut self);

    /// Drive the pin low (logic 0)
    fn set_low(&mut self);

    /// Check if the pin is currently driven high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently driven low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Latch(bool);

    impl OutputPin for Latch {
        fn set_high(&mut self) {
            self.0 = true;
        }

        fn set_low(&mut self) {
            self.0 = false;
        }

        fn is_set_high(&self) -> bool {
            self.0
        }
    }

    impl InputPin for Latch {
        fn is_high(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_default_low_checks() {
        let mut pin = Latch(true);
        assert!(!pin.is_set_low());
        assert!(!pin.is_low());

        pin.set_low();
        assert!(pin.is_set_low());
        assert!(pin.is_low());
    }
}
