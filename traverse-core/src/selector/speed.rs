//! Debounced speed selector
//!
//! Polls every selector channel once per tick and resolves the bank to one
//! target speed.
//!
//! Channels are processed in index order. When several channels trigger on
//! the same tick, the last one processed (the highest index) decides the
//! speed for that tick. This mirrors a plain loop over the inputs rather than
//! a deliberate priority scheme.

use heapless::Vec;

use crate::config::{
    ConfigError, PinConfig, SelectionPolicy, SelectorConfig, StageConfig, MAX_CHANNELS,
};
use crate::traits::ChannelInputs;

use super::debounce::{CounterEdge, DebounceCounter};

/// One channel record: input, mapped speed and debounce state
#[derive(Debug, Clone, Copy)]
struct Channel {
    pin: PinConfig,
    speed_mm_s: f32,
    counter: DebounceCounter,
}

/// Read-only view of one channel for diagnostics
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelSnapshot {
    /// Channel index
    pub index: u8,
    /// GPIO number of the input
    pub pin: u8,
    /// Debounce count
    pub counter: u16,
    /// Counter has saturated and a decay to zero will release it
    pub armed: bool,
    /// Speed this channel selects (mm/s)
    pub speed_mm_s: f32,
}

/// Speed selector state machine
///
/// Owns the channel records, the resolved speed and the input source.
/// Drive it by calling [`update`](Self::update) once per tick from a single
/// task.
pub struct SpeedSelector<I> {
    channels: Vec<Channel, MAX_CHANNELS>,
    policy: SelectionPolicy,
    max_count: u16,
    speed_mm_s: f32,
    selected: Option<usize>,
    ticks: u32,
    inputs: I,
}

impl<I: ChannelInputs> SpeedSelector<I> {
    /// Create a selector
    ///
    /// # Arguments
    /// - `config`: channel table and debounce tuning
    /// - `initial_speed_mm_s`: speed reported until the first selection
    /// - `inputs`: raw input source, one input per configured channel
    ///
    /// Fails if the configuration is inconsistent or the input source does
    /// not provide exactly one input per channel.
    pub fn new(
        config: &SelectorConfig,
        initial_speed_mm_s: f32,
        inputs: I,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        if !(initial_speed_mm_s.is_finite() && initial_speed_mm_s > 0.0) {
            return Err(ConfigError::InvalidInitialSpeed);
        }

        if inputs.channel_count() != config.channel_count() {
            return Err(ConfigError::InputCountMismatch {
                expected: config.channel_count(),
                actual: inputs.channel_count(),
            });
        }

        let channels = config
            .channels
            .iter()
            .map(|c| Channel {
                pin: c.pin,
                speed_mm_s: c.speed_mm_s,
                counter: DebounceCounter::new(config.max_count),
            })
            .collect();

        Ok(Self {
            channels,
            policy: config.policy,
            max_count: config.max_count,
            speed_mm_s: initial_speed_mm_s,
            selected: None,
            ticks: 0,
            inputs,
        })
    }

    /// Create a selector from a full stage configuration
    pub fn from_stage(config: &StageConfig, inputs: I) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::new(&config.selector, config.initial_speed_mm_s(), inputs)
    }

    /// Advance every channel by one tick and return the resolved speed (mm/s)
    pub fn update(&mut self) -> f32 {
        self.ticks = self.ticks.wrapping_add(1);

        for (index, channel) in self.channels.iter_mut().enumerate() {
            let level = self.inputs.read_channel(index);
            let active = channel.pin.is_asserted(level);

            let triggered = match (self.policy, channel.counter.step(active)) {
                (SelectionPolicy::SelectOnSaturate, Some(CounterEdge::Saturated)) => true,
                (SelectionPolicy::SelectOnRelease, Some(CounterEdge::Released)) => true,
                _ => false,
            };

            if triggered {
                self.speed_mm_s = channel.speed_mm_s;
                self.selected = Some(index);
            }
        }

        self.speed_mm_s
    }

    /// Resolved speed (mm/s)
    pub fn current_speed(&self) -> f32 {
        self.speed_mm_s
    }

    /// Index of the channel that produced the current speed
    ///
    /// `None` while the initial speed is still in effect.
    pub fn selected_channel(&self) -> Option<usize> {
        self.selected
    }

    /// Snapshot of every channel's debounce state
    pub fn diagnostic_dump(&self) -> impl Iterator<Item = ChannelSnapshot> + '_ {
        self.channels
            .iter()
            .enumerate()
            .map(|(index, c)| ChannelSnapshot {
                index: index as u8,
                pin: c.pin.pin,
                counter: c.counter.count(),
                armed: c.counter.is_armed(),
                speed_mm_s: c.speed_mm_s,
            })
    }

    /// Speeds of all channels in index order (mm/s)
    pub fn speed_table(&self) -> impl Iterator<Item = f32> + '_ {
        self.channels.iter().map(|c| c.speed_mm_s)
    }

    /// Number of channels
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Debounce saturation bound
    pub fn max_count(&self) -> u16 {
        self.max_count
    }

    /// Active selection policy
    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// Number of ticks processed (wraps)
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Borrow the input source
    pub fn inputs(&self) -> &I {
        &self.inputs
    }

    /// Mutably borrow the input source
    pub fn inputs_mut(&mut self) -> &mut I {
        &mut self.inputs
    }
}
