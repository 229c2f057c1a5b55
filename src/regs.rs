// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ATxmega A-series register map.
//!
//! Only the handful of registers the self-test touches are described here.
//! Every address is a data-space address; on the XMEGA the I/O memory starts
//! at 0x0000, so the same numbers work for `LDS`/`STS` and (below 0x40) for
//! `IN`/`OUT`.
//!
//! Addresses and bit positions come from the XMEGA A manual (Atmel doc8077)
//! and the device headers.

use static_assertions::const_assert_eq;

/// Configuration Change Protection register.
pub const CCP: u16 = 0x0034;

/// Signature that unlocks protected I/O registers for the next four cycles.
pub const CCP_IOREG: u8 = 0xD8;

/// MCU control register. Protected by `CCP`.
pub const MCU_MCUCR: u16 = 0x0096;

/// JTAG disable bit in `MCU_MCUCR`.
pub const MCU_JTAGD: u8 = 1 << 0;

/// Virtual port 0/1 mapping.
pub const PORTCFG_VPCTRLA: u16 = 0x00B2;

/// Virtual port 2/3 mapping.
pub const PORTCFG_VPCTRLB: u16 = 0x00B3;

/// Output/pull configuration field of `PINnCTRL`.
pub const PORT_OPC_MASK: u8 = 0b111 << 3;

/// Totem-pole output with pull-up on input.
pub const PORT_OPC_PULLUP: u8 = 0b011 << 3;

/// Invert I/O bit of `PINnCTRL`.
pub const PORT_INVEN: u8 = 1 << 6;

/// Master SPI communication mode for `USART.CTRLC`.
pub const USART_CMODE_MSPI: u8 = 0b11 << 6;

/// Receiver enable bit of `USART.CTRLB`.
pub const USART_RXEN: u8 = 1 << 4;

/// Transmitter enable bit of `USART.CTRLB`.
pub const USART_TXEN: u8 = 1 << 3;

/// First PORT module; the rest follow at 0x20 byte strides.
const PORT_BASE: u16 = 0x0600;
const PORT_STRIDE: u16 = 0x20;

/// A PORT module, named by its base address.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Port(u16);

impl Port {
    pub const A: Port = Port::nth(0);
    pub const B: Port = Port::nth(1);
    pub const C: Port = Port::nth(2);
    pub const D: Port = Port::nth(3);
    pub const E: Port = Port::nth(4);
    pub const F: Port = Port::nth(5);
    pub const J: Port = Port::nth(8);
    pub const K: Port = Port::nth(9);
    pub const Q: Port = Port::nth(14);
    pub const R: Port = Port::nth(15);

    const fn nth(index: u16) -> Port {
        Port(PORT_BASE + index * PORT_STRIDE)
    }

    /// Returns the port's number as used by the `PORTCFG` virtual port map
    /// (PORTA = 0 ... PORTR = 15).
    pub const fn index(self) -> u8 {
        ((self.0 - PORT_BASE) / PORT_STRIDE) as u8
    }

    /// Returns the port that owns `addr`, if `addr` falls in PORT space.
    pub const fn containing(addr: u16) -> Option<Port> {
        if addr >= PORT_BASE && addr < PORT_BASE + 16 * PORT_STRIDE {
            Some(Port(addr - (addr - PORT_BASE) % PORT_STRIDE))
        } else {
            None
        }
    }

    pub const fn base(self) -> u16 { self.0 }
    pub const fn dir(self) -> u16 { self.0 }
    pub const fn dirset(self) -> u16 { self.0 + 0x01 }
    pub const fn dirclr(self) -> u16 { self.0 + 0x02 }
    pub const fn out(self) -> u16 { self.0 + 0x04 }
    pub const fn outset(self) -> u16 { self.0 + 0x05 }
    pub const fn outclr(self) -> u16 { self.0 + 0x06 }
    pub const fn input(self) -> u16 { self.0 + 0x08 }

    /// `PINnCTRL` for pin `n` (0..=7).
    pub const fn pinctrl(self, n: u8) -> u16 {
        self.0 + 0x10 + n as u16
    }
}

/// Packs two ports into one `VPCTRLA`/`VPCTRLB` value: the low nibble maps the
/// even virtual port, the high nibble the odd one.
pub const fn vport_map(even: Port, odd: Port) -> u8 {
    even.index() | odd.index() << 4
}

/// A single line on a port.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Pin {
    pub port: Port,
    pub bit: u8,
}

impl Pin {
    pub const fn new(port: Port, bit: u8) -> Pin {
        Pin { port, bit }
    }

    pub const fn mask(self) -> u8 {
        1 << self.bit
    }

    pub const fn pinctrl(self) -> u16 {
        self.port.pinctrl(self.bit)
    }
}

/// A USART module, named by its base address.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Usart(u16);

impl Usart {
    pub const C0: Usart = Usart(0x08A0);
    pub const C1: Usart = Usart(0x08B0);

    pub const fn ctrlb(self) -> u16 { self.0 + 0x04 }
    pub const fn ctrlc(self) -> u16 { self.0 + 0x05 }
    pub const fn baudctrla(self) -> u16 { self.0 + 0x06 }
    pub const fn baudctrlb(self) -> u16 { self.0 + 0x07 }
}

// Spot checks against the device header.
const_assert_eq!(Port::C.base(), 0x0640);
const_assert_eq!(Port::R.base(), 0x07E0);
const_assert_eq!(Port::R.index(), 15);
const_assert_eq!(Port::F.pinctrl(7), 0x06B7);
const_assert_eq!(PORT_OPC_PULLUP, 0x18);
