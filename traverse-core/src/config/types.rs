//! Configuration type definitions
//!
//! These types represent the stage configuration: the speed table with its
//! input wiring, the debounce tuning, and the motion limits.

use heapless::Vec;

use super::hardware::{MechanicsConfig, PinConfig, MAX_GPIO};

/// Maximum selector channels per config
pub const MAX_CHANNELS: usize = 8;

/// Configuration format version understood by this firmware
pub const CONFIG_VERSION: u8 = 1;

/// Default debounce saturation bound
pub const DEFAULT_MAX_COUNT: u16 = 1000;

/// Default selector polling interval (µs)
pub const DEFAULT_TICK_INTERVAL_US: u32 = 1000;

/// Errors found while validating a configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Selector has no channels
    NoChannels,
    /// More channels than [`MAX_CHANNELS`]
    TooManyChannels,
    /// Pin list and speed table have different lengths
    ChannelCountMismatch { speeds: usize, pins: usize },
    /// Input source provides a different number of channels than configured
    InputCountMismatch { expected: usize, actual: usize },
    /// The same GPIO is assigned to two channels
    DuplicatePin(u8),
    /// GPIO number outside the chip's range
    PinOutOfRange(u8),
    /// Speed table entry is zero, negative or not finite
    InvalidSpeed { channel: u8 },
    /// Initial speed is zero, negative or not finite
    InvalidInitialSpeed,
    /// Debounce bound of zero would select on every tick
    ZeroMaxCount,
    /// Selector polling interval of zero
    ZeroTickInterval,
    /// Pulley diameter or steps per rotation unusable
    InvalidMechanics,
    /// Maximum speed or acceleration unusable
    InvalidLimits,
    /// Config version not understood
    UnsupportedVersion(u8),
}

/// Which counter bound turns a channel into the selected one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelectionPolicy {
    /// Select when a held input rides its counter up to `max_count`
    #[default]
    SelectOnSaturate,
    /// Select when a previously held input decays back to zero
    SelectOnRelease,
}

/// One selectable speed and the input that selects it
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpeedChannelConfig {
    /// Selector input
    pub pin: PinConfig,
    /// Linear speed selected by this input (mm/s)
    pub speed_mm_s: f32,
}

impl SpeedChannelConfig {
    /// Create a channel config
    pub const fn new(pin: PinConfig, speed_mm_s: f32) -> Self {
        Self { pin, speed_mm_s }
    }
}

/// Speed selector configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SelectorConfig {
    /// Channels in priority-free index order
    pub channels: Vec<SpeedChannelConfig, MAX_CHANNELS>,
    /// Debounce saturation bound (ticks)
    pub max_count: u16,
    /// Selection trigger
    pub policy: SelectionPolicy,
    /// Speed reported before any channel is selected (mm/s)
    ///
    /// When `None` the stage's maximum speed is used.
    pub initial_speed_mm_s: Option<f32>,
    /// Polling interval of the run-loop (µs)
    pub tick_interval_us: u32,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        const PINS: [u8; 6] = [7, 8, 9, 10, 11, 12];
        const SPEEDS: [f32; 6] = [100.0, 150.0, 200.0, 250.0, 300.0, 500.0];

        let mut channels = Vec::new();
        for (pin, speed) in PINS.iter().zip(SPEEDS.iter()) {
            let _ = channels.push(SpeedChannelConfig::new(PinConfig::switch(*pin), *speed));
        }

        Self {
            channels,
            max_count: DEFAULT_MAX_COUNT,
            policy: SelectionPolicy::SelectOnSaturate,
            initial_speed_mm_s: None,
            tick_interval_us: DEFAULT_TICK_INTERVAL_US,
        }
    }
}

impl SelectorConfig {
    /// Build the channel list from parallel pin and speed tables
    ///
    /// Returns an error instead of truncating when the two tables differ in
    /// length.
    pub fn channels_from_parallel(
        pins: &[PinConfig],
        speeds: &[f32],
    ) -> Result<Vec<SpeedChannelConfig, MAX_CHANNELS>, ConfigError> {
        if pins.len() != speeds.len() {
            return Err(ConfigError::ChannelCountMismatch {
                speeds: speeds.len(),
                pins: pins.len(),
            });
        }

        let mut channels = Vec::new();
        for (pin, speed) in pins.iter().zip(speeds.iter()) {
            channels
                .push(SpeedChannelConfig::new(*pin, *speed))
                .map_err(|_| ConfigError::TooManyChannels)?;
        }
        Ok(channels)
    }

    /// Number of configured channels
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Time an input must be held before it is selected (µs)
    pub fn debounce_time_us(&self) -> u64 {
        self.max_count as u64 * self.tick_interval_us as u64
    }

    /// Check the selector configuration for consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channels.is_empty() {
            return Err(ConfigError::NoChannels);
        }
        if self.max_count == 0 {
            return Err(ConfigError::ZeroMaxCount);
        }
        if self.tick_interval_us == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        for (i, channel) in self.channels.iter().enumerate() {
            if channel.pin.pin > MAX_GPIO {
                return Err(ConfigError::PinOutOfRange(channel.pin.pin));
            }
            if !is_positive(channel.speed_mm_s) {
                return Err(ConfigError::InvalidSpeed { channel: i as u8 });
            }
            if self.channels[..i].iter().any(|c| c.pin.pin == channel.pin.pin) {
                return Err(ConfigError::DuplicatePin(channel.pin.pin));
            }
        }

        if let Some(speed) = self.initial_speed_mm_s {
            if !is_positive(speed) {
                return Err(ConfigError::InvalidInitialSpeed);
            }
        }

        Ok(())
    }
}

/// Motion limits handed to the external motion controller
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionLimitsConfig {
    /// Maximum linear speed (mm/s)
    pub max_speed_mm_s: f32,
    /// Linear acceleration (mm/s²)
    pub acceleration_mm_s2: f32,
}

impl Default for MotionLimitsConfig {
    fn default() -> Self {
        Self {
            max_speed_mm_s: 500.0,
            acceleration_mm_s2: 800.0,
        }
    }
}

/// Complete stage configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StageConfig {
    /// Configuration version for compatibility checks
    pub version: u8,
    /// Drive train constants
    pub mechanics: MechanicsConfig,
    /// Motion limits
    pub limits: MotionLimitsConfig,
    /// Speed selector
    pub selector: SelectorConfig,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            mechanics: MechanicsConfig::default(),
            limits: MotionLimitsConfig::default(),
            selector: SelectorConfig::default(),
        }
    }
}

impl StageConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Speed reported until the first selection (mm/s)
    pub fn initial_speed_mm_s(&self) -> f32 {
        self.selector
            .initial_speed_mm_s
            .unwrap_or(self.limits.max_speed_mm_s)
    }

    /// Check the whole configuration for consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion(self.version));
        }

        let mech = &self.mechanics;
        if !is_positive(mech.pulley_diameter_mm) || mech.full_steps_per_rotation == 0 {
            return Err(ConfigError::InvalidMechanics);
        }

        let limits = &self.limits;
        if !is_positive(limits.max_speed_mm_s) || !is_positive(limits.acceleration_mm_s2) {
            return Err(ConfigError::InvalidLimits);
        }

        self.selector.validate()
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
