//! Report task
//!
//! Logs speed changes and the periodic pin state dump published by the
//! selector task.

use defmt::*;
use embassy_futures::select::{select, Either};

use crate::channels::{PIN_REPORT, SPEED_CMD};

/// Report task
#[embassy_executor::task]
pub async fn report_task() {
    info!("Report task started");

    loop {
        match select(SPEED_CMD.wait(), PIN_REPORT.wait()).await {
            Either::First(cmd) => match cmd.channel {
                Some(channel) => info!(
                    "Speed selected: {} mm/s ({} steps/s) by channel {}",
                    cmd.speed_mm_s, cmd.speed_steps_s, channel
                ),
                None => info!(
                    "Initial speed: {} mm/s ({} steps/s)",
                    cmd.speed_mm_s, cmd.speed_steps_s
                ),
            },
            Either::Second(report) => {
                debug!("Pin states at tick {}:", report.tick);
                for snap in report.channels.iter() {
                    debug!(
                        "  {}: {} (gpio{}, armed {})",
                        snap.index, snap.counter, snap.pin, snap.armed
                    );
                }
            }
        }
    }
}
