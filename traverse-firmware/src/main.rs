//! Traverse - linear stage speed selector firmware
//!
//! Main firmware binary for RP2040-based stage controllers. Reads a bank of
//! selector switches, debounces them into one target speed and hands that
//! speed, converted to a step rate, to the motion controller.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use {defmt_rtt as _, panic_probe as _};

use traverse_core::selector::SpeedSelector;
use traverse_core::units::MotionProfile;
use traverse_hal::InputPin;
use traverse_hal_rp2040::{setup_inputs, PinBank};

mod channels;
mod config;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Traverse firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load_config();
    let profile = MotionProfile::new(&config.mechanics, &config.limits);
    config::log_config_summary(&config, &profile);

    // Selector switches: inputs with pull-ups, in channel order
    let mut bank = PinBank::new(p);
    let inputs = match setup_inputs(&mut bank, config.selector.channels.iter().map(|c| &c.pin)) {
        Ok(inputs) => inputs,
        Err(e) => defmt::panic!("Failed to set up selector inputs: {:?}", e),
    };
    info!("{} selector inputs configured", inputs.len());

    // A switch closed at boot is reported; it only selects once debounced
    for (input, channel) in inputs.iter().zip(config.selector.channels.iter()) {
        if input.level() != channel.pin.pull().idle_level() {
            warn!("gpio{} is not at its idle level at boot", input.pin());
        }
    }

    let selector = match SpeedSelector::from_stage(&config, inputs) {
        Ok(selector) => selector,
        Err(e) => defmt::panic!("Invalid selector configuration: {:?}", e),
    };

    spawner.spawn(tasks::report_task()).unwrap();
    spawner
        .spawn(tasks::selector_task(
            selector,
            profile,
            config.selector.tick_interval_us,
        ))
        .unwrap();

    info!("All tasks spawned");
}
