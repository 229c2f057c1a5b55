// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power-on self-test for the PHY bridge boards.
//!
//! Before the real firmware goes on a board, this program checks that the
//! PHY data lines are wired correctly: nothing idles high, and each line,
//! driven on its own, shows up on its own on both the observation port and
//! the PHY input bus. The verdict is shown on the board's one LED:
//!
//! - a blink code (see `signal::FlashPattern` and `selftest::Fault`) if
//!   anything is wrong;
//! - a slow "breathing" pulse if everything passed.
//!
//! Either way, the board stays in that state until it is reset.

#![cfg_attr(not(test), no_std)]
#![cfg_attr(target_arch = "avr", feature(asm_experimental_arch))]

pub mod bsp;
pub mod hw;
pub mod init;
pub mod phy;
pub mod regs;
pub mod selftest;
pub mod signal;

#[cfg(target_arch = "avr")]
pub mod xmega;

#[cfg(test)]
mod sim;

use bsp::Bsp;
use hw::Hardware;
use selftest::Fault;

/// Time allowed after pin setup for the bus termination supply to come up.
/// Without this, good boards have been seen to fail the idle check.
pub const SETTLE_MS: u16 = 100;

/// Where the board ends up. Both states are permanent.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Terminal {
    /// A wiring fault was found.
    Fault(Fault),
    /// Every check passed.
    Alive,
}

impl Terminal {
    /// Enters this state. Only a reset gets the board back out.
    pub fn enter<B: Bsp, H: Hardware>(self, hw: &mut H) -> ! {
        match self {
            Terminal::Fault(fault) => signal::indicate::<B, H>(hw, fault.pattern()),
            Terminal::Alive => signal::heartbeat::<B, H>(hw),
        }
    }
}

/// Brings the board up and runs the self-test, returning the state the board
/// should enter.
pub fn power_on_self_test<B: Bsp, H: Hardware>(hw: &mut H) -> Terminal {
    init::bring_up::<B, H>(hw);
    init::configure_pins::<B, H>(hw);

    hw.delay_ms(SETTLE_MS);

    match selftest::check::<B, H>(hw) {
        Ok(()) => Terminal::Alive,
        Err(fault) => Terminal::Fault(fault),
    }
}
