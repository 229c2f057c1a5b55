// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The PHY wiring self-test.
//!
//! The test runs in two phases against the eight PHY data lines:
//!
//! 1. With nothing driven, every line on the observation port must read low.
//!    A line that reads high is stuck or cross-wired to something that is.
//! 2. Each line in turn is driven high on its own, with the other seven left
//!    as floating inputs, and read back twice: once on the observation port
//!    and once across the PHY input bus. Both reads must show exactly the
//!    driven line. Anything else is a short (or an open, if the driven line
//!    itself is missing).
//!
//! Lines are numbered 1 through 8 to match what the LED blinks out; line `n`
//! is bit `n - 1`.

use crate::bsp::Bsp;
use crate::hw::Hardware;
use crate::phy;
use crate::signal::FlashPattern;

/// Residual code reported when a mismatching read has no bit set other than
/// (possibly) the driven one, i.e. the driven line itself failed to show up.
pub const NO_RESIDUAL: u8 = 9;

/// A wiring fault. Every variant is fatal.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Fault {
    /// `line` read high before anything was driven.
    IdleHigh { line: u8 },
    /// Driving `line` produced the wrong value on the observation port.
    /// `residual` is the lowest other line that read high, or `NO_RESIDUAL`.
    OutputShort { line: u8, residual: u8 },
    /// The observation port was fine, but the PHY input bus disagreed.
    InputShort { line: u8, residual: u8 },
}

impl Fault {
    /// The blink code for this fault. The long-flash count names the phase
    /// (1 idle, 2 observation port, 3 input bus), the short count the line,
    /// and the trailing count the conflicting line.
    pub fn pattern(self) -> FlashPattern {
        match self {
            Fault::IdleHigh { line } => FlashPattern::new(1, line, 0),
            Fault::OutputShort { line, residual } => {
                FlashPattern::new(2, line, residual)
            }
            Fault::InputShort { line, residual } => {
                FlashPattern::new(3, line, residual)
            }
        }
    }
}

/// Returns the 1-based number of the lowest line set in `value`, or
/// `NO_RESIDUAL` if no line is set.
pub fn lowest_set_line(value: u8) -> u8 {
    if value == 0 {
        NO_RESIDUAL
    } else {
        value.trailing_zeros() as u8 + 1
    }
}

/// Runs both phases, stopping at the first fault.
///
/// On return the observation port is left with every line released to an
/// input, whatever the outcome.
pub fn check<B: Bsp, H: Hardware>(hw: &mut H) -> Result<(), Fault> {
    check_idle::<B, H>(hw)?;
    check_lines::<B, H>(hw)
}

/// Verifies that no observation line is high before anything drives it.
pub fn check_idle<B: Bsp, H: Hardware>(hw: &mut H) -> Result<(), Fault> {
    let idle = hw.read(B::PHY_DATA_OUT.input());
    if idle != 0 {
        return Err(Fault::IdleHigh { line: lowest_set_line(idle) });
    }
    Ok(())
}

/// Drives each observation line alone and checks it on both buses.
pub fn check_lines<B: Bsp, H: Hardware>(hw: &mut H) -> Result<(), Fault> {
    let port = B::PHY_DATA_OUT;

    // Release everything, then preload OUT so that setting a DIR bit is all it
    // takes to drive that line high.
    hw.write(port.dir(), 0x00);
    hw.write(port.out(), 0xFF);

    for line in 1..=8u8 {
        let mask = 1 << (line - 1);

        hw.write(port.dir(), mask);
        hw.delay_us(1);

        let read = hw.read(port.input());
        if read != mask {
            hw.write(port.dir(), 0x00);
            return Err(Fault::OutputShort {
                line,
                residual: lowest_set_line(read & !mask),
            });
        }

        let read = phy::read::<B, H>(hw);
        if read != mask {
            hw.write(port.dir(), 0x00);
            return Err(Fault::InputShort {
                line,
                residual: lowest_set_line(read & !mask),
            });
        }

        hw.write(port.dir(), 0x00);
    }

    Ok(())
}
