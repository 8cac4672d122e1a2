//! Speed selector task
//!
//! The run-loop around the selector: polls every input once per tick at the
//! configured cadence and publishes the resolved speed whenever it changes.

use defmt::*;
use embassy_time::{Duration, Ticker};

use traverse_core::selector::SpeedSelector;
use traverse_core::units::MotionProfile;
use traverse_hal_rp2040::InputBank;

use crate::channels::{PinReport, SpeedCommand, PIN_REPORT, SPEED_CMD};

/// Interval between pin state reports in milliseconds
pub const DIAG_INTERVAL_MS: u32 = 2000;

/// Selector task - sole owner of the selector state
#[embassy_executor::task]
pub async fn selector_task(
    mut selector: SpeedSelector<InputBank>,
    profile: MotionProfile,
    tick_interval_us: u32,
) {
    info!(
        "Selector task started ({} channels, tick {} us)",
        selector.channel_count(),
        tick_interval_us
    );

    let mut ticker = Ticker::every(Duration::from_micros(tick_interval_us as u64));
    let report_every = (DIAG_INTERVAL_MS * 1000 / tick_interval_us).max(1);

    // Let the motion controller start at the initial speed
    publish_speed(&selector, &profile);
    let mut last_channel = selector.selected_channel();

    loop {
        ticker.next().await;

        selector.update();

        if selector.selected_channel() != last_channel {
            last_channel = selector.selected_channel();
            publish_speed(&selector, &profile);
        }

        if selector.ticks() % report_every == 0 {
            PIN_REPORT.signal(PinReport {
                tick: selector.ticks(),
                channels: selector.diagnostic_dump().collect(),
            });
        }
    }
}

fn publish_speed(selector: &SpeedSelector<InputBank>, profile: &MotionProfile) {
    let speed_mm_s = selector.current_speed();
    SPEED_CMD.signal(SpeedCommand {
        speed_mm_s,
        speed_steps_s: profile.speed_in_steps(speed_mm_s),
        channel: selector.selected_channel().map(|c| c as u8),
    });
}
