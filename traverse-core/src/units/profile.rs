//! Motion limits precomputed in both unit systems

use crate::config::{MechanicsConfig, MotionLimitsConfig};

use super::convert::linear_to_steps;

/// Speed and acceleration bounds for the external motion controller
///
/// Computed once from the fixed mechanical constants; every accessor is a
/// plain read afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionProfile {
    mm_per_step: f32,
    max_speed_mm_s: f32,
    max_speed_steps_s: f32,
    accel_mm_s2: f32,
    accel_steps_s2: f32,
}

impl MotionProfile {
    /// Derive the profile from mechanics and limits
    pub fn new(mechanics: &MechanicsConfig, limits: &MotionLimitsConfig) -> Self {
        let mm_per_step = mechanics.mm_per_step();
        Self {
            mm_per_step,
            max_speed_mm_s: limits.max_speed_mm_s,
            max_speed_steps_s: linear_to_steps(limits.max_speed_mm_s, mm_per_step),
            accel_mm_s2: limits.acceleration_mm_s2,
            accel_steps_s2: linear_to_steps(limits.acceleration_mm_s2, mm_per_step),
        }
    }

    /// Linear distance per step (mm)
    pub fn mm_per_step(&self) -> f32 {
        self.mm_per_step
    }

    /// Maximum speed, in steps/s when `in_steps` is set, otherwise mm/s
    pub fn maximum_speed(&self, in_steps: bool) -> f32 {
        if in_steps {
            self.max_speed_steps_s
        } else {
            self.max_speed_mm_s
        }
    }

    /// Acceleration, in steps/s² when `in_steps` is set, otherwise mm/s²
    pub fn motor_acceleration(&self, in_steps: bool) -> f32 {
        if in_steps {
            self.accel_steps_s2
        } else {
            self.accel_mm_s2
        }
    }

    /// Convert a selected linear speed to a step rate (steps/s)
    pub fn speed_in_steps(&self, speed_mm_s: f32) -> f32 {
        linear_to_steps(speed_mm_s, self.mm_per_step)
    }
}
