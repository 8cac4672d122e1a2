//! Board-agnostic core logic for the linear stage speed selector
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Configuration type definitions, validation and the text parser
//! - Unit conversion between linear (mm) and step units
//! - Speed selector (debounced multi-input selection)
//! - Input source traits the selector reads through

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod selector;
pub mod traits;
pub mod units;
