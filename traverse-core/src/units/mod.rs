//! Unit conversion
//!
//! Linear (mm, mm/s, mm/s²) to motor step units for the stage drive train.

pub mod convert;
pub mod profile;

pub use convert::{linear_to_steps, mm_per_step, steps_to_linear};
pub use profile::MotionProfile;
