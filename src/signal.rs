// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Everything the LED can say.
//!
//! The board has exactly one status LED and no other way to report anything,
//! so the self-test's two outcomes are both expressed as LED behavior that
//! lasts until reset:
//!
//! - a fault blinks a three-group code (see `FlashPattern`) forever;
//! - a pass "breathes" the LED by ramping a software PWM duty cycle up and
//!   back down, forever.
//!
//! The LED is switched by its direction bit, never its output bit. See
//! `Bsp::LED`.

use crate::bsp::Bsp;
use crate::hw::Hardware;

/// One blink code: `long` slow flashes, `short` fast flashes, then `extra`
/// slow flashes, with pauses in between so the groups can be counted.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FlashPattern {
    pub long: u8,
    pub short: u8,
    pub extra: u8,
}

impl FlashPattern {
    pub const fn new(long: u8, short: u8, extra: u8) -> Self {
        Self { long, short, extra }
    }
}

const SLOW_MS: u16 = 500;
const FAST_MS: u16 = 200;
const GROUP_GAP_MS: u16 = 1500;
const REPEAT_GAP_MS: u16 = 4000;

pub fn led_on<B: Bsp, H: Hardware>(hw: &mut H) {
    hw.write(B::LED.port.dirset(), B::LED.mask());
}

pub fn led_off<B: Bsp, H: Hardware>(hw: &mut H) {
    hw.write(B::LED.port.dirclr(), B::LED.mask());
}

fn flash<B: Bsp, H: Hardware>(hw: &mut H, count: u8, ms: u16) {
    for _ in 0..count {
        led_on::<B, H>(hw);
        hw.delay_ms(ms);
        led_off::<B, H>(hw);
        hw.delay_ms(ms);
    }
}

/// Blinks `pattern` once, including the trailing gap before it would repeat.
pub fn flash_cycle<B: Bsp, H: Hardware>(hw: &mut H, pattern: FlashPattern) {
    flash::<B, H>(hw, pattern.long, SLOW_MS);
    hw.delay_ms(GROUP_GAP_MS);
    flash::<B, H>(hw, pattern.short, FAST_MS);
    hw.delay_ms(GROUP_GAP_MS);
    flash::<B, H>(hw, pattern.extra, SLOW_MS);
    hw.delay_ms(REPEAT_GAP_MS);
}

/// Blinks `pattern` until the board is reset.
pub fn indicate<B: Bsp, H: Hardware>(hw: &mut H, pattern: FlashPattern) -> ! {
    loop {
        flash_cycle::<B, H>(hw, pattern);
    }
}

/// Heartbeat ramp length. The counter runs 0..=RAMP and then wraps to 0.
pub const RAMP: u8 = 32;

/// Length of one PWM period, in microseconds (and in duty steps).
pub const PWM_PERIOD_US: u8 = RAMP / 2;

/// PWM periods emitted per ramp step.
const PERIODS_PER_STEP: u16 = 500;

/// On-time, in microseconds, for ramp step `counter`. Rises from 0 to
/// `PWM_PERIOD_US` over the first half of the ramp and falls back over the
/// second.
pub fn duty(counter: u8) -> u8 {
    if counter > PWM_PERIOD_US {
        RAMP.saturating_sub(counter)
    } else {
        counter
    }
}

/// Returns the ramp step after `counter`.
pub fn next_step(counter: u8) -> u8 {
    if counter >= RAMP {
        0
    } else {
        counter + 1
    }
}

/// Emits one ramp step's worth of PWM periods at duty `duty(counter)`.
pub fn pulse_frame<B: Bsp, H: Hardware>(hw: &mut H, counter: u8) {
    let on = duty(counter);
    for _ in 0..PERIODS_PER_STEP {
        led_on::<B, H>(hw);
        for _ in 0..on {
            hw.delay_us(1);
        }
        led_off::<B, H>(hw);
        for _ in 0..PWM_PERIOD_US - on {
            hw.delay_us(1);
        }
    }
}

/// Breathes the LED until the board is reset.
pub fn heartbeat<B: Bsp, H: Hardware>(hw: &mut H) -> ! {
    let mut counter = 0;
    loop {
        pulse_frame::<B, H>(hw, counter);
        counter = next_step(counter);
    }
}
