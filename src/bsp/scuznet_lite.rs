// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! BSP for the Ethernet-only bridge.
//!
//! The input bus goes straight to the port through inverting receivers, so
//! there's no latch to clock, but every input pin needs INVEN.

use crate::bsp::{Bsp, Ethernet};
use crate::regs::{vport_map, Pin, Port, Usart};

pub enum Board {}

impl Bsp for Board {
    const VPORT_MAP: [u8; 2] = [
        vport_map(Port::A, Port::B),
        vport_map(Port::C, Port::D),
    ];

    // Red LED on PORTD6.
    const LED: Pin = Pin::new(Port::D, 6);

    const PHY_DATA_OUT: Port = Port::A;
    const PHY_DATA_IN: Port = Port::B;

    const PHY_INVERTED: bool = true;

    const ETHERNET: Option<Ethernet> = Some(Ethernet {
        port: Port::C,
        xck: 5,
        rx: 6,
        tx: 7,
        cs: 4,
        rst: 3,
        int: Pin::new(Port::C, 2),
        usart: Usart::C1,
        baudctrl: 0,
    });
}
