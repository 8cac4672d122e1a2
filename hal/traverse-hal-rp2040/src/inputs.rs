//! Selector inputs
//!
//! Configures each selector channel's GPIO as an input with the pull
//! resistor named in its [`PinConfig`], in channel order.

use embassy_rp::gpio::{Input, Pull};
use heapless::Vec;

use traverse_core::config::{PinConfig, MAX_CHANNELS};
use traverse_hal::InputPin;

use crate::pins::{PinBank, PinError};

/// Bank of selector inputs in channel order
pub type InputBank = Vec<SelectorInput<'static>, MAX_CHANNELS>;

/// One configured selector input
pub struct SelectorInput<'d> {
    input: Input<'d>,
    pin: u8,
}

impl SelectorInput<'_> {
    /// GPIO number of this input
    pub fn pin(&self) -> u8 {
        self.pin
    }
}

impl InputPin for SelectorInput<'_> {
    fn is_high(&self) -> bool {
        self.input.is_high()
    }
}

fn to_rp_pull(pull: traverse_hal::Pull) -> Pull {
    match pull {
        traverse_hal::Pull::Up => Pull::Up,
        traverse_hal::Pull::Down => Pull::Down,
        traverse_hal::Pull::None => Pull::None,
    }
}

/// Configure the selector inputs
///
/// Takes each pin from the bank and sets it up as an input. Pull-ups are
/// enabled where configured so an open switch reads as not asserted.
pub fn setup_inputs<'a>(
    bank: &mut PinBank,
    pins: impl IntoIterator<Item = &'a PinConfig>,
) -> Result<InputBank, PinError> {
    let mut inputs = Vec::new();

    for config in pins {
        let pin = bank.take(config.pin)?;
        let input = Input::new(pin, to_rp_pull(config.pull()));
        inputs
            .push(SelectorInput {
                input,
                pin: config.pin,
            })
            .map_err(|_| PinError::TooManyInputs)?;
    }

    Ok(inputs)
}
