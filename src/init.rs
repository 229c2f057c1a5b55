// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Board bring-up and pin configuration.
//!
//! Every line the self-test (or a peripheral sitting on the PHY's lines)
//! cares about is configured here, once, before any test runs. Peripherals a
//! board doesn't have are skipped entirely.

use crate::bsp::Bsp;
use crate::hw::Hardware;
use crate::regs::{
    PORTCFG_VPCTRLA, PORTCFG_VPCTRLB, PORT_INVEN, PORT_OPC_PULLUP,
    USART_CMODE_MSPI, USART_RXEN, USART_TXEN,
};

/// Bare minimum chip setup. The debug port is shut off first, while the
/// processor is still in its reset state with interrupts disabled.
pub fn bring_up<B: Bsp, H: Hardware>(hw: &mut H) {
    hw.disable_debug();
    hw.write(PORTCFG_VPCTRLA, B::VPORT_MAP[0]);
    hw.write(PORTCFG_VPCTRLB, B::VPORT_MAP[1]);

    // Only OUT is touched; the LED stays dark until its DIR bit is set.
    let led = B::LED;
    hw.modify(led.port.out(), |v| v & !led.mask());
}

/// Configures the PHY input side, then whichever peripherals the board has.
pub fn configure_pins<B: Bsp, H: Hardware>(hw: &mut H) {
    configure_phy::<B, H>(hw);
    configure_ethernet::<B, H>(hw);
    configure_storage::<B, H>(hw);
}

pub fn configure_phy<B: Bsp, H: Hardware>(hw: &mut H) {
    if let Some(latch) = B::PHY_CLOCKED {
        if let Some(acken) = latch.ack_enable {
            hw.modify(acken.port.out(), |v| v & !acken.mask());
            hw.modify(acken.port.dir(), |v| v | acken.mask());
        }
        if let Some(clk) = latch.clock {
            hw.modify(clk.port.out(), |v| v & !clk.mask());
            hw.modify(clk.port.dir(), |v| v | clk.mask());
        }
        if let Some(oe) = latch.output_enable {
            // Deassert before enabling the driver so the latch never drives
            // the bus during setup.
            hw.modify(oe.port.out(), |v| v | oe.mask());
            hw.modify(oe.port.dir(), |v| v | oe.mask());
        }
    }

    let port = B::PHY_DATA_IN;
    for n in 0..8 {
        hw.modify(port.pinctrl(n), |v| v | PORT_OPC_PULLUP);
    }
    if B::PHY_INVERTED {
        for n in 0..8 {
            hw.modify(port.pinctrl(n), |v| v | PORT_INVEN);
        }
    }
}

/// Resets the Ethernet controller and sets its USART up as an SPI master.
pub fn configure_ethernet<B: Bsp, H: Hardware>(hw: &mut H) {
    let Some(eth) = B::ETHERNET else {
        return;
    };
    let port = eth.port;
    let rst = 1 << eth.rst;

    hw.write(port.outclr(), 1 << eth.xck);
    hw.write(port.outset(), 1 << eth.tx | 1 << eth.cs | rst);
    hw.write(port.dirset(), 1 << eth.xck | 1 << eth.tx | 1 << eth.cs | rst);
    hw.modify(port.pinctrl(eth.rx), |v| v | PORT_OPC_PULLUP);
    hw.modify(eth.int.pinctrl(), |v| v | PORT_INVEN);

    // The controller wants its supply stable before reset and at least 50us
    // of reset pulse.
    hw.delay_ms(1);
    hw.write(port.outclr(), rst);
    hw.delay_us(50);
    hw.write(port.outset(), rst);
    hw.delay_ms(1);

    let usart = eth.usart;
    hw.write(usart.baudctrla(), eth.baudctrl);
    hw.write(usart.baudctrlb(), 0);
    hw.write(usart.ctrlc(), USART_CMODE_MSPI);
    hw.write(usart.ctrlb(), USART_RXEN | USART_TXEN);
}

/// Parks the storage card's SPI lines: clock low, data and select high.
pub fn configure_storage<B: Bsp, H: Hardware>(hw: &mut H) {
    let Some(mem) = B::STORAGE else {
        return;
    };
    let port = mem.port;

    hw.write(port.outclr(), 1 << mem.xck);
    hw.write(port.outset(), 1 << mem.tx | 1 << mem.cs);
    hw.write(port.dirset(), 1 << mem.xck | 1 << mem.tx | 1 << mem.cs);
    hw.modify(port.pinctrl(mem.rx), |v| v | PORT_OPC_PULLUP);
}
