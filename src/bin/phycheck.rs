// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The self-test program.
//!
//! This is the entry point and the runtime glue (panic handling, the choice
//! of board); the lib crate does the actual work. It only does anything on
//! an AVR XMEGA. Built for the host, it's a stub so that the workspace still
//! builds and tests there.

#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]

#[cfg(target_arch = "avr")]
mod device {
    use core::sync::atomic::{compiler_fence, Ordering};

    use phycheck::bsp::Bsp;
    use phycheck::hw::Hardware;
    use phycheck::xmega::Xmega;

    // Select the appropriate BSP type as `Board`
    cfg_if::cfg_if! {
        if #[cfg(feature = "target-board-scuznet")] {
            use phycheck::bsp::scuznet::Board;
        } else if #[cfg(feature = "target-board-scuznet-lite")] {
            use phycheck::bsp::scuznet_lite::Board;
        }
    }

    /// Reset lands here, by way of the C runtime's startup code, with
    /// interrupts disabled.
    #[no_mangle]
    pub extern "C" fn main() -> ! {
        // Safety: this is the only place an `Xmega` is created, and it's the
        // first thing the program does.
        let mut hw = unsafe { Xmega::<Board>::steal() };

        phycheck::power_on_self_test::<Board, _>(&mut hw).enter::<Board, _>(&mut hw)
    }

    #[panic_handler]
    fn panic_handler(_: &core::panic::PanicInfo) -> ! {
        // Nothing in the self-test should be able to panic. If it does anyway,
        // turn the LED on solid: distinct from both the blink codes and the
        // heartbeat.
        //
        // Safety: we're not racing anyone; there's only one thread and no
        // interrupts, and whatever panicked will never run again.
        let mut hw = unsafe { Xmega::<Board>::steal() };
        hw.write(Board::LED.port.dirset(), Board::LED.mask());

        loop {
            compiler_fence(Ordering::SeqCst);
        }
    }
}

#[cfg(not(target_arch = "avr"))]
fn main() {
    eprintln!("phycheck runs on the board itself; build it for an AVR XMEGA target");
    std::process::exit(1);
}
