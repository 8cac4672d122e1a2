//! Inter-task communication channels
//!
//! The selector task is the only owner of the selector state. Everything
//! other tasks see of it goes through these signals.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use heapless::Vec;

use traverse_core::config::MAX_CHANNELS;
use traverse_core::selector::ChannelSnapshot;

/// Target speed handed to the motion controller
#[derive(Debug, Clone, Copy, PartialEq, defmt::Format)]
pub struct SpeedCommand {
    /// Linear speed (mm/s)
    pub speed_mm_s: f32,
    /// Same speed as a step rate (steps/s)
    pub speed_steps_s: f32,
    /// Channel that selected it, `None` for the initial speed
    pub channel: Option<u8>,
}

/// Periodic dump of the selector's debounce counters
#[derive(Debug, Clone, defmt::Format)]
pub struct PinReport {
    /// Selector tick the snapshot was taken at
    pub tick: u32,
    /// Per-channel state
    pub channels: Vec<ChannelSnapshot, MAX_CHANNELS>,
}

/// Speed command signal (updated by the selector task on every change)
pub static SPEED_CMD: Signal<CriticalSectionRawMutex, SpeedCommand> = Signal::new();

/// Pin report signal (updated by the selector task every diagnostic interval)
pub static PIN_REPORT: Signal<CriticalSectionRawMutex, PinReport> = Signal::new();
