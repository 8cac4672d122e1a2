//! GPIO pin abstractions
//!
//! Provides the digital input trait implemented by chip-specific HALs.

/// Electrical level of a digital pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0 (pulled to ground)
    Low,
    /// Logic 1
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Internal bias resistor applied to an input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    /// Floating input
    #[default]
    None,
    /// Pulled to VCC; an open switch reads high
    Up,
    /// Pulled to ground; an open switch reads low
    Down,
}

impl Pull {
    /// Level read from an input with nothing connected to it
    ///
    /// A floating input has no defined idle level; callers should treat
    /// it as high so an unconnected active-low switch never asserts.
    pub fn idle_level(self) -> Level {
        match self {
            Pull::Down => Level::Low,
            Pull::Up | Pull::None => Level::High,
        }
    }
}

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }

    /// Read the pin as a [`Level`]
    fn level(&self) -> Level {
        Level::from(self.is_high())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPin(bool);

    impl InputPin for FixedPin {
        fn is_high(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_level_from_pin() {
        assert_eq!(FixedPin(true).level(), Level::High);
        assert_eq!(FixedPin(false).level(), Level::Low);
        assert!(FixedPin(false).is_low());
    }

    #[test]
    fn test_idle_level() {
        assert_eq!(Pull::Up.idle_level(), Level::High);
        assert_eq!(Pull::Down.idle_level(), Level::Low);
        assert_eq!(Pull::None.idle_level(), Level::High);
    }
}
