//! Configuration loading
//!
//! Parses the `stage.toml` embedded at build time. build.rs has already
//! run the same parser over it, so the fallback only triggers if the two
//! ever disagree.

use defmt::*;

use traverse_core::config::{parse_config, StageConfig};
use traverse_core::units::MotionProfile;

/// Embedded stage configuration (compiled into firmware)
/// Edit stage.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../stage.toml");

/// Load the stage configuration
///
/// Falls back to the built-in defaults if the embedded file fails to parse.
pub fn load_config() -> StageConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using built-in default configuration");
            StageConfig::default()
        }
    }
}

/// Log a summary of the loaded configuration
pub fn log_config_summary(config: &StageConfig, profile: &MotionProfile) {
    let mech = &config.mechanics;
    info!(
        "Drive: {} mm pulley, {} steps/rev ({}x{}), {} mm/step",
        mech.pulley_diameter_mm,
        mech.steps_per_revolution(),
        mech.full_steps_per_rotation,
        mech.microsteps,
        profile.mm_per_step()
    );
    info!(
        "Limits: max {} mm/s ({} steps/s), accel {} mm/s^2 ({} steps/s^2)",
        profile.maximum_speed(false),
        profile.maximum_speed(true),
        profile.motor_acceleration(false),
        profile.motor_acceleration(true)
    );

    let selector = &config.selector;
    info!(
        "Selector: {} channels, {:?}, debounce {} ticks x {} us ({} us)",
        selector.channel_count(),
        selector.policy,
        selector.max_count,
        selector.tick_interval_us,
        selector.debounce_time_us()
    );
    info!("Available speeds:");
    for (i, channel) in selector.channels.iter().enumerate() {
        info!(
            "  {}: gpio{} -> {} mm/s",
            i, channel.pin.pin, channel.speed_mm_s
        );
    }
    info!("Initial speed: {} mm/s", config.initial_speed_mm_s());
}
