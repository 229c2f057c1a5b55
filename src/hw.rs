// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The boundary between the self-test and the silicon.
//!
//! Everything the self-test does to the outside world goes through
//! `Hardware`: byte-wide register reads and writes, the protected write that
//! turns off the debug port, and busy-wait delays. The device implementation
//! lives in `crate::xmega`; the tests drive the same code against
//! `crate::sim`.

pub trait Hardware {
    /// Reads the 8-bit register at data-space address `addr`.
    fn read(&mut self, addr: u16) -> u8;

    /// Writes `value` to the 8-bit register at data-space address `addr`.
    fn write(&mut self, addr: u16, value: u8);

    /// Disables JTAG access. This is a CCP-protected write: the unlock key
    /// must reach `CCP` immediately before the value reaches `MCU.MCUCR`, in
    /// that order, with nothing able to interrupt in between.
    fn disable_debug(&mut self);

    /// Busy-waits at least `us` microseconds.
    fn delay_us(&mut self, us: u16);

    /// Busy-waits at least `ms` milliseconds.
    fn delay_ms(&mut self, ms: u16) {
        for _ in 0..ms {
            self.delay_us(1000);
        }
    }

    /// Read-modify-write of the register at `addr`.
    fn modify(&mut self, addr: u16, f: impl FnOnce(u8) -> u8) {
        let v = self.read(addr);
        self.write(addr, f(v));
    }
}

/// Number of passes of a `cycles_per_pass` busy loop needed to wait at least
/// `us` microseconds with a `cpu_hz` core clock.
///
/// Rounds up, so a delay is never short. At 2 MHz with a four-cycle loop
/// that is one pass per two microseconds.
pub const fn loop_passes(us: u16, cpu_hz: u32, cycles_per_pass: u32) -> u32 {
    let cycles = us as u64 * cpu_hz as u64;
    let per_pass = 1_000_000 * cycles_per_pass as u64;
    cycles.div_ceil(per_pass) as u32
}
