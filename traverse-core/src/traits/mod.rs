//! Hardware abstraction traits
//!
//! These traits define the interface between the selector logic and the
//! hardware-specific input implementations.

pub mod inputs;

pub use inputs::ChannelInputs;
