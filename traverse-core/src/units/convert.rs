//! Linear/step conversion helpers
//!
//! All conversions keep fractional step rates; step generators downstream
//! accumulate the remainder.

use core::f32::consts::PI;

/// Linear distance covered by one step
///
/// One pulley rotation moves the belt by the pulley circumference
/// (`π × diameter`), spread over `steps_per_revolution` steps.
pub fn mm_per_step(pulley_diameter_mm: f32, steps_per_revolution: u32) -> f32 {
    PI * pulley_diameter_mm / steps_per_revolution as f32
}

/// Convert a linear quantity (mm, mm/s, mm/s²) to steps (steps, steps/s, steps/s²)
pub fn linear_to_steps(value: f32, mm_per_step: f32) -> f32 {
    value / mm_per_step
}

/// Convert a step quantity back to linear units
pub fn steps_to_linear(steps: f32, mm_per_step: f32) -> f32 {
    steps * mm_per_step
}
