//! RP2040-specific HAL for the stage firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `traverse-hal` traits:
//!
//! - Config-driven GPIO allocation by pin number
//! - Selector input setup with the configured pull resistors

#![no_std]

pub mod inputs;
pub mod pins;

pub use inputs::{setup_inputs, InputBank, SelectorInput};
pub use pins::{PinBank, PinError};
