// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! PHY input bus access.

use static_assertions::const_assert_eq;

use crate::bsp::Bsp;
use crate::hw::Hardware;

/// Byte to bit-reversed byte, for boards whose input bus is wired backwards.
///
/// The AVR has no bit-reverse instruction, so a lookup is the only way to do
/// this in constant time.
pub static REVERSE: [u8; 256] = REVERSE_TABLE;

const REVERSE_TABLE: [u8; 256] = build_reverse();

const fn build_reverse() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        let mut v = i as u8;
        let mut r = 0u8;
        let mut bit = 0;
        while bit < 8 {
            r = (r << 1) | (v & 1);
            v >>= 1;
            bit += 1;
        }
        table[i] = r;
        i += 1;
    }
    table
}

const_assert_eq!(REVERSE_TABLE[0x01], 0x80);
const_assert_eq!(REVERSE_TABLE[0x0F], 0xF0);
const_assert_eq!(REVERSE_TABLE[0x35], 0xAC);
const_assert_eq!(REVERSE_TABLE[0xFF], 0xFF);

/// Reads the PHY input bus and returns its logical value.
///
/// On boards with a latch in front of the bus, the clock is raised, the latch
/// output enabled, the clock dropped, the port sampled, and the latch disabled
/// again. Lines a board doesn't have are skipped; the order of the rest is
/// fixed. The sample is then bit-reversed if the board needs it.
#[inline(always)]
pub fn read<B: Bsp, H: Hardware>(hw: &mut H) -> u8 {
    let raw = match B::PHY_CLOCKED {
        Some(latch) => {
            if let Some(clk) = latch.clock {
                hw.write(clk.port.outset(), clk.mask());
            }
            if let Some(oe) = latch.output_enable {
                hw.write(oe.port.outclr(), oe.mask());
            }
            if let Some(clk) = latch.clock {
                hw.write(clk.port.outclr(), clk.mask());
            }
            let raw = hw.read(B::PHY_DATA_IN.input());
            if let Some(oe) = latch.output_enable {
                hw.write(oe.port.outset(), oe.mask());
            }
            raw
        }
        None => hw.read(B::PHY_DATA_IN.input()),
    };

    if B::PHY_REVERSED {
        REVERSE[usize::from(raw)]
    } else {
        raw
    }
}
