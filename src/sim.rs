// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A simulated board for host tests.
//!
//! `Sim` stands in for the XMEGA: it keeps a byte of state per data-space
//! address, applies the PORT set/clear strobes the way the silicon does, and
//! models the eight PHY lines as a wired network between the observation
//! port and the input bus. Faults are injected by sticking lines high,
//! shorting groups together, or rewriting what either side sees.
//!
//! Every access is recorded, in order, in `trace`.

use crate::bsp::{Bsp, ClockedRead, Ethernet, Storage};
use crate::hw::Hardware;
use crate::regs::{
    vport_map, Pin, Port, Usart, CCP, CCP_IOREG, MCU_JTAGD, MCU_MCUCR,
    PORT_INVEN,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Event {
    Read(u16),
    Write(u16, u8),
    DisableDebug,
    DelayUs(u16),
    DelayMs(u16),
}

pub struct Sim {
    mem: Vec<u8>,
    pub trace: Vec<Event>,
    pub elapsed_us: u64,
    /// Writes performed under configuration change protection, in order.
    pub protected: Vec<(u16, u8)>,

    observed: Port,
    input: Port,
    latch_enable: Option<Pin>,
    reversed: bool,
    inverted: bool,

    forced: Option<u8>,
    /// Lines that read high no matter what drives them.
    pub stuck_high: u8,
    /// Groups of lines shorted together; if any line in a group is high, all
    /// of them are.
    pub shorts: Vec<u8>,
    /// Rewrites line levels as seen by the observation port.
    pub observe_fault: fn(u8) -> u8,
    /// Rewrites line levels as seen by the input bus, before its wiring.
    pub input_fault: fn(u8) -> u8,
}

impl Sim {
    /// Builds a simulated board wired the way `B` describes.
    pub fn new<B: Bsp>() -> Self {
        Sim {
            mem: vec![0; 0x1000],
            trace: Vec::new(),
            elapsed_us: 0,
            protected: Vec::new(),
            observed: B::PHY_DATA_OUT,
            input: B::PHY_DATA_IN,
            latch_enable: B::PHY_CLOCKED.and_then(|latch| latch.output_enable),
            reversed: B::PHY_REVERSED,
            inverted: B::PHY_INVERTED,
            forced: None,
            stuck_high: 0,
            shorts: Vec::new(),
            observe_fault: |lines| lines,
            input_fault: |lines| lines,
        }
    }

    /// Pins the PHY lines at `levels`, ignoring what the observation port
    /// drives.
    pub fn force_observed(&mut self, levels: u8) {
        self.forced = Some(levels);
    }

    /// Reads state without recording an access.
    pub fn peek(&self, addr: u16) -> u8 {
        self.mem[usize::from(addr)]
    }

    /// Sets state without recording an access.
    pub fn poke(&mut self, addr: u16, value: u8) {
        self.mem[usize::from(addr)] = value;
    }

    fn lines(&self) -> u8 {
        if let Some(levels) = self.forced {
            return levels;
        }
        let port = self.observed;
        let mut levels = self.peek(port.dir()) & self.peek(port.out());
        levels |= self.stuck_high;
        for &group in &self.shorts {
            if levels & group != 0 {
                levels |= group;
            }
        }
        levels
    }

    fn input_pins(&self) -> u8 {
        let latched_off = self
            .latch_enable
            .is_some_and(|oe| self.peek(oe.port.out()) & oe.mask() != 0);
        let pins = if latched_off {
            // Nothing drives the bus; the pull-ups win.
            0xFF
        } else {
            let mut bus = (self.input_fault)(self.lines());
            if self.reversed {
                bus = bus.reverse_bits();
            }
            if self.inverted {
                bus = !bus;
            }
            bus
        };

        let mut inven = 0;
        for n in 0..8 {
            if self.peek(self.input.pinctrl(n)) & PORT_INVEN != 0 {
                inven |= 1 << n;
            }
        }
        pins ^ inven
    }

    /// Replays `trace` and returns how long `led` spent lit or dark, as
    /// `(lit, microseconds)` runs. Adjacent runs with the same state are
    /// merged and empty runs dropped.
    pub fn led_timeline(&self, led: Pin) -> Vec<(bool, u64)> {
        let mut lit = false;
        let mut runs: Vec<(bool, u64)> = Vec::new();
        for e in &self.trace {
            let us = match *e {
                Event::Write(a, v) if a == led.port.dirset() => {
                    lit |= v & led.mask() != 0;
                    continue;
                }
                Event::Write(a, v) if a == led.port.dirclr() => {
                    lit &= v & led.mask() == 0;
                    continue;
                }
                Event::Write(a, v) if a == led.port.dir() => {
                    lit = v & led.mask() != 0;
                    continue;
                }
                Event::DelayUs(us) => u64::from(us),
                Event::DelayMs(ms) => u64::from(ms) * 1000,
                _ => continue,
            };
            match runs.last_mut() {
                Some((state, total)) if *state == lit => *total += us,
                _ => runs.push((lit, us)),
            }
        }
        runs
    }
}

impl Hardware for Sim {
    fn read(&mut self, addr: u16) -> u8 {
        self.trace.push(Event::Read(addr));
        if addr == self.observed.input() {
            (self.observe_fault)(self.lines())
        } else if addr == self.input.input() {
            self.input_pins()
        } else {
            self.peek(addr)
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.trace.push(Event::Write(addr, value));
        let Some(port) = Port::containing(addr) else {
            self.poke(addr, value);
            return;
        };
        let (reg, v) = match addr - port.base() {
            0x01 => (port.dir(), self.peek(port.dir()) | value),
            0x02 => (port.dir(), self.peek(port.dir()) & !value),
            0x03 => (port.dir(), self.peek(port.dir()) ^ value),
            0x05 => (port.out(), self.peek(port.out()) | value),
            0x06 => (port.out(), self.peek(port.out()) & !value),
            0x07 => (port.out(), self.peek(port.out()) ^ value),
            _ => (addr, value),
        };
        self.poke(reg, v);
    }

    fn disable_debug(&mut self) {
        self.trace.push(Event::DisableDebug);
        self.protected.push((CCP, CCP_IOREG));
        self.protected.push((MCU_MCUCR, MCU_JTAGD));
        let mcucr = self.peek(MCU_MCUCR);
        self.poke(MCU_MCUCR, mcucr | MCU_JTAGD);
    }

    fn delay_us(&mut self, us: u16) {
        self.trace.push(Event::DelayUs(us));
        self.elapsed_us += u64::from(us);
    }

    fn delay_ms(&mut self, ms: u16) {
        self.trace.push(Event::DelayMs(ms));
        self.elapsed_us += u64::from(ms) * 1000;
    }
}

// Test boards. The PHY buses sit on PORTJ and PORTK, which no real BSP uses,
// so a stray access to a real board's PHY lines stands out in a trace.

const LED: Pin = Pin::new(Port::Q, 3);

const LATCH: ClockedRead = ClockedRead {
    ack_enable: Some(Pin::new(Port::R, 0)),
    clock: Some(Pin::new(Port::E, 0)),
    output_enable: Some(Pin::new(Port::E, 1)),
};

/// No latch, no reversal, no inversion, no peripherals.
pub enum Bare {}

impl Bsp for Bare {
    const VPORT_MAP: [u8; 2] = [vport_map(Port::J, Port::K), vport_map(Port::Q, Port::R)];
    const LED: Pin = LED;
    const PHY_DATA_OUT: Port = Port::J;
    const PHY_DATA_IN: Port = Port::K;
}

/// Latched, bit-reversed input bus.
pub enum Latched {}

impl Bsp for Latched {
    const VPORT_MAP: [u8; 2] = [vport_map(Port::J, Port::K), vport_map(Port::E, Port::R)];
    const LED: Pin = LED;
    const PHY_DATA_OUT: Port = Port::J;
    const PHY_DATA_IN: Port = Port::K;
    const PHY_CLOCKED: Option<ClockedRead> = Some(LATCH);
    const PHY_REVERSED: bool = true;
}

/// Input bus through inverting receivers.
pub enum Inverted {}

impl Bsp for Inverted {
    const VPORT_MAP: [u8; 2] = [vport_map(Port::J, Port::K), vport_map(Port::Q, Port::R)];
    const LED: Pin = LED;
    const PHY_DATA_OUT: Port = Port::J;
    const PHY_DATA_IN: Port = Port::K;
    const PHY_INVERTED: bool = true;
}

/// Latched and reversed, with both peripherals.
pub enum Full {}

impl Bsp for Full {
    const VPORT_MAP: [u8; 2] = [vport_map(Port::J, Port::K), vport_map(Port::C, Port::D)];
    const LED: Pin = LED;
    const PHY_DATA_OUT: Port = Port::J;
    const PHY_DATA_IN: Port = Port::K;
    const PHY_CLOCKED: Option<ClockedRead> = Some(LATCH);
    const PHY_REVERSED: bool = true;
    const ETHERNET: Option<Ethernet> = Some(Ethernet {
        port: Port::C,
        xck: 1,
        rx: 2,
        tx: 3,
        cs: 4,
        rst: 0,
        int: Pin::new(Port::D, 2),
        usart: Usart::C0,
        baudctrl: 1,
    });
    const STORAGE: Option<Storage> = Some(Storage {
        port: Port::D,
        xck: 5,
        rx: 6,
        tx: 7,
        cs: 4,
    });
}
