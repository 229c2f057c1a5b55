// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::bsp::{Bsp, ClockedRead, Ethernet, Storage};
use crate::regs::{vport_map, Pin, Port, Usart};

// Full bridge board: Ethernet and storage both populated.
//
// PORTA     PHY data out (observation port)
// PORTF     PHY data in, through a clocked '574-style latch, bits reversed
// PORTE0    PHY data clock
// PORTE1    PHY latch output enable, active low
// PORTR0    PHY acknowledge enable
// PORTR1    status LED (sinks)
// PORTC     Ethernet controller on USARTC0 (XCK 1, RX 2, TX 3), CS 4, RST 0
// PORTD2    Ethernet interrupt, active low
// PORTD     storage card on USARTD1 (XCK 5, RX 6, TX 7), CS 4

pub enum Board {}

impl Bsp for Board {
    const VPORT_MAP: [u8; 2] = [
        vport_map(Port::A, Port::F),
        vport_map(Port::E, Port::R),
    ];

    const LED: Pin = Pin::new(Port::R, 1);

    const PHY_DATA_OUT: Port = Port::A;
    const PHY_DATA_IN: Port = Port::F;

    const PHY_CLOCKED: Option<ClockedRead> = Some(ClockedRead {
        ack_enable: Some(Pin::new(Port::R, 0)),
        clock: Some(Pin::new(Port::E, 0)),
        output_enable: Some(Pin::new(Port::E, 1)),
    });
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
        baudctrl: 0,
    });

    const STORAGE: Option<Storage> = Some(Storage {
        port: Port::D,
        xck: 5,
        rx: 6,
        tx: 7,
        cs: 4,
    });
}
