//! Property tests for the speed selector and unit conversion

use proptest::prelude::*;

use traverse_core::config::{SelectionPolicy, SelectorConfig, StageConfig};
use traverse_core::selector::SpeedSelector;
use traverse_core::units::{linear_to_steps, steps_to_linear};
use traverse_hal::InputPin;

const CHANNELS: usize = 6;
const INITIAL_SPEED: f32 = 1500.0;

#[derive(Default, Clone, Copy)]
struct Switch {
    pressed: bool,
}

impl InputPin for Switch {
    fn is_high(&self) -> bool {
        !self.pressed
    }
}

fn selector(max_count: u16, policy: SelectionPolicy) -> SpeedSelector<[Switch; CHANNELS]> {
    let config = SelectorConfig {
        max_count,
        policy,
        ..SelectorConfig::default()
    };
    SpeedSelector::new(&config, INITIAL_SPEED, [Switch::default(); CHANNELS]).unwrap()
}

fn apply(selector: &mut SpeedSelector<[Switch; CHANNELS]>, mask: u8) {
    for (i, switch) in selector.inputs_mut().iter_mut().enumerate() {
        switch.pressed = mask & (1 << i) != 0;
    }
}

fn counters(selector: &SpeedSelector<[Switch; CHANNELS]>) -> Vec<u16> {
    selector.diagnostic_dump().map(|s| s.counter).collect()
}

proptest! {
    #[test]
    fn counters_stay_clamped(
        max_count in 1u16..50,
        masks in prop::collection::vec(0u8..64, 0..400),
    ) {
        let mut sel = selector(max_count, SelectionPolicy::SelectOnSaturate);
        for mask in masks {
            apply(&mut sel, mask);
            sel.update();
            for counter in counters(&sel) {
                prop_assert!(counter <= max_count);
            }
        }
    }

    #[test]
    fn each_update_moves_counters_by_one(
        max_count in 1u16..20,
        masks in prop::collection::vec(0u8..64, 1..200),
    ) {
        let mut sel = selector(max_count, SelectionPolicy::SelectOnSaturate);
        for mask in masks {
            let before = counters(&sel);
            apply(&mut sel, mask);
            sel.update();
            let after = counters(&sel);

            for i in 0..CHANNELS {
                let pressed = mask & (1 << i) != 0;
                let expected = if pressed {
                    (before[i] + 1).min(max_count)
                } else {
                    before[i].saturating_sub(1)
                };
                prop_assert_eq!(after[i], expected);
            }
        }
    }

    #[test]
    fn short_presses_never_select(
        channel in 0usize..CHANNELS,
        max_count in 2u16..200,
        held_fraction in 0.0f64..1.0,
    ) {
        let held = ((max_count - 1) as f64 * held_fraction) as u16;
        let mut sel = selector(max_count, SelectionPolicy::SelectOnSaturate);
        apply(&mut sel, 1 << channel);
        for _ in 0..held {
            prop_assert_eq!(sel.update(), INITIAL_SPEED);
        }
        prop_assert_eq!(sel.selected_channel(), None);
    }

    #[test]
    fn short_presses_never_release(
        channel in 0usize..CHANNELS,
        max_count in 2u16..200,
        held_fraction in 0.0f64..1.0,
        idle_ticks in 0u16..400,
    ) {
        let held = 1 + ((max_count - 2) as f64 * held_fraction) as u16;
        let mut sel = selector(max_count, SelectionPolicy::SelectOnRelease);
        apply(&mut sel, 1 << channel);
        for _ in 0..held {
            prop_assert_eq!(sel.update(), INITIAL_SPEED);
        }
        apply(&mut sel, 0);
        for _ in 0..idle_ticks {
            prop_assert_eq!(sel.update(), INITIAL_SPEED);
        }
        prop_assert_eq!(sel.selected_channel(), None);
    }

    #[test]
    fn release_selects_after_full_decay(
        channel in 0usize..CHANNELS,
        max_count in 1u16..200,
        extra_held in 0u16..50,
    ) {
        let mut sel = selector(max_count, SelectionPolicy::SelectOnRelease);
        let table: Vec<f32> = sel.speed_table().collect();

        apply(&mut sel, 1 << channel);
        for _ in 0..max_count + extra_held {
            prop_assert_eq!(sel.update(), INITIAL_SPEED);
        }
        apply(&mut sel, 0);
        for _ in 1..max_count {
            prop_assert_eq!(sel.update(), INITIAL_SPEED);
        }
        prop_assert_eq!(sel.update(), table[channel]);
        prop_assert_eq!(sel.selected_channel(), Some(channel));
    }

    #[test]
    fn saturation_selects_on_exact_tick(
        channel in 0usize..CHANNELS,
        max_count in 1u16..300,
    ) {
        let table: Vec<f32> = selector(1, SelectionPolicy::SelectOnSaturate)
            .speed_table()
            .collect();

        let mut sel = selector(max_count, SelectionPolicy::SelectOnSaturate);
        apply(&mut sel, 1 << channel);
        for _ in 1..max_count {
            prop_assert_eq!(sel.update(), INITIAL_SPEED);
        }
        prop_assert_eq!(sel.update(), table[channel]);
        prop_assert_eq!(sel.selected_channel(), Some(channel));
    }

    #[test]
    fn speed_persists_without_new_trigger(
        channel in 0usize..CHANNELS,
        decay_ticks in 0usize..100,
    ) {
        let mut sel = selector(10, SelectionPolicy::SelectOnSaturate);
        apply(&mut sel, 1 << channel);
        for _ in 0..10 {
            sel.update();
        }
        let chosen = sel.current_speed();

        apply(&mut sel, 0);
        for _ in 0..decay_ticks {
            prop_assert_eq!(sel.update(), chosen);
        }
    }

    #[test]
    fn resolved_speed_is_initial_or_table_entry(
        masks in prop::collection::vec(0u8..64, 0..300),
        release in any::<bool>(),
    ) {
        let policy = if release {
            SelectionPolicy::SelectOnRelease
        } else {
            SelectionPolicy::SelectOnSaturate
        };
        let mut sel = selector(3, policy);
        let table: Vec<f32> = sel.speed_table().collect();

        for mask in masks {
            apply(&mut sel, mask);
            let speed = sel.update();
            prop_assert!(speed == INITIAL_SPEED || table.contains(&speed));
        }
    }

    #[test]
    fn conversion_round_trips(x in 0.001f32..10_000.0) {
        let config = StageConfig::default();
        let k = config.mechanics.mm_per_step();
        let steps = linear_to_steps(x, k);
        let back = linear_to_steps(steps_to_linear(steps, k), k);
        prop_assert!((back - steps).abs() <= steps.abs() * 1e-5);
    }
}
