// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Types and hooks for implementing Board Support Packages (BSPs).
//!
//! The self-test itself is the same on every board; what changes is where
//! the lines are and which quirks the PHY wiring has. Those properties are
//! described as associated constants on the `Bsp` trait below, so that every
//! optional step compiles away on boards that don't need it.
//!
//! To implement a BSP:
//!
//! 1. Create a module within `phycheck::bsp` named after your board.
//! 2. Define a type in the module called `Board`. This type will never be
//!    instantiated, so it can be arbitrary; an empty enum is easy.
//! 3. Implement `phycheck::bsp::Bsp` for your `Board` type.
//! 4. Add a `target-board-*` feature to `Cargo.toml`.
//! 5. Add a branch to the `cfg_if` in `src/bin/phycheck.rs` to detect your
//!    board and select the right `Board` type.

// These modules are not conditionally included. Every BSP is always compiled,
// which keeps all of them building even though only one is selected.
pub mod scuznet;
pub mod scuznet_lite;

use crate::regs::{Pin, Port, Usart};

/// Lines used by the clocked-read protocol. Each is optional; a board that
/// has none of them should use `PHY_CLOCKED = None` instead.
#[derive(Copy, Clone, Debug)]
pub struct ClockedRead {
    /// Acknowledge enable. Held low (output) for the whole test.
    pub ack_enable: Option<Pin>,
    /// Data clock. Idles low, pulsed high around each sample.
    pub clock: Option<Pin>,
    /// Output enable of the input buffer, active low.
    pub output_enable: Option<Pin>,
}

/// Ethernet controller attached to a USART in master SPI mode.
///
/// The line fields are bit numbers on `port`; on the XMEGA the USART pins are
/// fixed by which USART is used.
#[derive(Copy, Clone, Debug)]
pub struct Ethernet {
    pub port: Port,
    pub xck: u8,
    pub rx: u8,
    pub tx: u8,
    pub cs: u8,
    pub rst: u8,
    /// Interrupt line from the controller, active low.
    pub int: Pin,
    pub usart: Usart,
    /// `BAUDCTRLA` value; the SPI clock is `CPU_HZ / (2 * (baudctrl + 1))`.
    pub baudctrl: u8,
}

/// Mass storage card attached to a USART in master SPI mode.
#[derive(Copy, Clone, Debug)]
pub struct Storage {
    pub port: Port,
    pub xck: u8,
    pub rx: u8,
    pub tx: u8,
    pub cs: u8,
}

/// Requirements placed upon a BSP type.
pub trait Bsp {
    /// Core clock, used to calibrate busy-wait delays. The XMEGA comes out of
    /// reset on its 2 MHz internal oscillator and the self-test never changes
    /// that.
    const CPU_HZ: u32 = 2_000_000;

    /// `PORTCFG.VPCTRLA` and `PORTCFG.VPCTRLB` values.
    const VPORT_MAP: [u8; 2];

    /// Status indicator. The LED sinks into this line: it lights when the pin
    /// is an output (driving its cleared `OUT` bit low) and goes dark when the
    /// pin is released to an input.
    const LED: Pin;

    /// Observation port: the PHY output lines, read back through their own
    /// input buffers.
    const PHY_DATA_OUT: Port;

    /// PHY input data bus.
    const PHY_DATA_IN: Port;

    /// Set if the input bus sits behind a latch that must be clocked and
    /// enabled around each read.
    const PHY_CLOCKED: Option<ClockedRead> = None;

    /// Set if the input bus is wired in reverse bit order.
    const PHY_REVERSED: bool = false;

    /// Set if the input bus is wired through inverters, so the port should
    /// invert it back.
    const PHY_INVERTED: bool = false;

    const ETHERNET: Option<Ethernet> = None;

    const STORAGE: Option<Storage> = None;
}
