//! Speed selection
//!
//! Debounced selection of one speed out of a bank of discrete inputs.

pub mod debounce;
pub mod speed;

pub use debounce::{CounterEdge, DebounceCounter};
pub use speed::{ChannelSnapshot, SpeedSelector};
