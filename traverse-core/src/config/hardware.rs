//! Hardware configuration types
//!
//! Pin assignments and the mechanical constants of the drive train.

use traverse_hal::{Level, Pull};

/// Highest GPIO number accepted in a pin string
pub const MAX_GPIO: u8 = 29;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: false,
        }
    }

    /// Create an active-low switch input with pull-up enabled
    ///
    /// This is the wiring used by the speed selector: the switch shorts
    /// the pin to ground, so an open or disconnected switch reads high
    /// and is never taken as a selection.
    pub const fn switch(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: true,
        }
    }

    /// Level at which this input counts as asserted
    pub fn asserted_level(&self) -> Level {
        if self.inverted {
            Level::Low
        } else {
            Level::High
        }
    }

    /// Check whether a raw reading means the input is asserted
    pub fn is_asserted(&self, level: Level) -> bool {
        level == self.asserted_level()
    }

    /// Bias resistor to configure on the input
    pub fn pull(&self) -> Pull {
        if self.pull_up {
            Pull::Up
        } else {
            Pull::None
        }
    }
}

/// Drive train mechanical constants
///
/// Fixed for the lifetime of the firmware; only used to derive the
/// linear distance covered by one step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MechanicsConfig {
    /// Pulley pitch diameter (mm)
    pub pulley_diameter_mm: f32,
    /// Full steps per motor rotation (typically 200 for 1.8° motors)
    pub full_steps_per_rotation: u16,
    /// Microsteps setting of the driver
    pub microsteps: u8,
}

impl Default for MechanicsConfig {
    fn default() -> Self {
        Self {
            pulley_diameter_mm: 19.09,
            full_steps_per_rotation: 200,
            microsteps: 1,
        }
    }
}

impl MechanicsConfig {
    /// Steps issued for one full pulley rotation
    pub fn steps_per_revolution(&self) -> u32 {
        self.full_steps_per_rotation as u32 * self.microsteps.max(1) as u32
    }

    /// Linear distance travelled per step (mm)
    pub fn mm_per_step(&self) -> f32 {
        crate::units::mm_per_step(self.pulley_diameter_mm, self.steps_per_revolution())
    }
}
