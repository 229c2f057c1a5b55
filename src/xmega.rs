// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `Hardware` on the real chip.

use core::arch::asm;
use core::marker::PhantomData;
use core::ptr::{read_volatile, write_volatile};

use crate::bsp::Bsp;
use crate::hw::{loop_passes, Hardware};
use crate::regs::{CCP, CCP_IOREG, MCU_JTAGD, MCU_MCUCR};

/// Cycles per pass of the delay loop in `spin`: `SBIW` (2) + taken `BRNE` (2).
const CYCLES_PER_SPIN: u32 = 4;

/// Direct register access on an ATxmega, with delays calibrated for board
/// `B`'s core clock.
pub struct Xmega<B> {
    _board: PhantomData<B>,
}

impl<B: Bsp> Xmega<B> {
    /// # Safety
    ///
    /// The returned value accesses every register of the chip without any
    /// further checks. Only one may exist, and nothing else may touch the
    /// registers while it does. Creating it first thing in `main`, before
    /// interrupts are ever enabled, satisfies both.
    pub unsafe fn steal() -> Self {
        Xmega { _board: PhantomData }
    }
}

/// Spins for `n` passes of a four-cycle loop.
#[inline(always)]
fn spin(n: u16) {
    if n == 0 {
        // SBIW on zero would wrap and spin 65536 times.
        return;
    }
    // Safety: touches only the scratch register pair it is given.
    unsafe {
        asm!(
            "1: sbiw {n}, 1",
            "brne 1b",
            n = inout(reg_iw) n => _,
            options(nomem, nostack),
        );
    }
}

impl<B: Bsp> Hardware for Xmega<B> {
    #[inline(always)]
    fn read(&mut self, addr: u16) -> u8 {
        // Safety: `addr` comes from `regs`, and `steal` gave us exclusive use
        // of the register file.
        unsafe { read_volatile(usize::from(addr) as *const u8) }
    }

    #[inline(always)]
    fn write(&mut self, addr: u16, value: u8) {
        // Safety: as for `read`.
        unsafe { write_volatile(usize::from(addr) as *mut u8, value) }
    }

    fn disable_debug(&mut self) {
        // The key write to CCP opens a four-cycle window for the protected
        // register. Both values are loaded into registers before the block so
        // that the OUT and STS are back to back.
        //
        // Safety: only CCP and MCU.MCUCR are written; no interrupt can land
        // between the two because none are enabled yet, and CCP would hold
        // them off anyway.
        unsafe {
            asm!(
                "out {ccp}, {key}",
                "sts {mcucr}, {jtagd}",
                ccp = const CCP,
                mcucr = const MCU_MCUCR,
                key = in(reg) CCP_IOREG,
                jtagd = in(reg) MCU_JTAGD,
                options(nostack),
            );
        }
    }

    fn delay_us(&mut self, us: u16) {
        let mut remaining = loop_passes(us, B::CPU_HZ, CYCLES_PER_SPIN);
        while remaining > 0 {
            let chunk = remaining.min(u32::from(u16::MAX));
            spin(chunk as u16);
            remaining -= chunk;
        }
    }
}
