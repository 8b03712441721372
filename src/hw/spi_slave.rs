// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! SPI4 in slave mode using direct PAC register access.
//!
//! The HAL only drives SPI as a master, so this configures the peripheral by hand:
//! mode 0, 8-bit frames, MSB first, hardware NSS on PE11. The controller owns the clock; every
//! exchange shifts one byte in and the byte staged in the TX FIFO out.
//!
//! Exactly one byte is kept queued: one is preloaded at init and one is staged per received byte,
//! so whatever is staged after exchange N goes out on exchange N+1.

use stm32f7xx_hal::pac;

use crate::protocol::messages::ACK;
use crate::protocol::BusPort;

pub struct SpiSlave {
    spi: pac::SPI4,
    listening: bool,
}

impl SpiSlave {
    /// Enable and configure SPI4 as a mode-0 slave with the ack preloaded.
    pub fn spi4(spi4: pac::SPI4) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.spi4en().set_bit());

        let mut slave = Self {
            spi: spi4,
            listening: false,
        };
        slave.configure();
        slave.write_dr(ACK);
        slave
    }

    /// Raise an interrupt for every received byte.
    pub fn listen(&mut self) {
        self.listening = true;
        self.spi.cr2.modify(|_, w| w.rxneie().set_bit());
    }

    /// Byte received on the last exchange, if one is waiting.
    ///
    /// An overrun drops the pending byte and clears the flag.
    pub fn read(&mut self) -> Option<u8> {
        let sr = self.spi.sr.read();

        if sr.ovr().bit_is_set() {
            // OVR clears on a DR read followed by an SR read
            let _ = self.read_dr();
            let _ = self.spi.sr.read();
            return None;
        }

        if sr.rxne().bit_is_set() {
            Some(self.read_dr())
        } else {
            None
        }
    }

    fn configure(&mut self) {
        let spi = &self.spi;

        // Disable to configure
        spi.cr1.modify(|_, w| w.spe().clear_bit());

        // Slave, CPOL=0, CPHA=0, MSB first, NSS from the pin
        spi.cr1.write(|w| {
            w.mstr().clear_bit();
            w.cpol().clear_bit();
            w.cpha().clear_bit();
            w.lsbfirst().clear_bit();
            w.ssm().clear_bit();
            w
        });

        // 8-bit data size, RXNE as soon as one byte is in the RX FIFO
        let listening = self.listening;
        spi.cr2.write(|w| {
            unsafe { w.ds().bits(0b0111) };
            w.frxth().set_bit();
            w.rxneie().bit(listening);
            w
        });

        spi.cr1.modify(|_, w| w.spe().set_bit());
    }

    /// Chip-select (PE11) released by the controller.
    #[inline]
    fn deselected(&self) -> bool {
        let gpioe = unsafe { &*pac::GPIOE::ptr() };
        gpioe.idr.read().idr11().bit_is_set()
    }

    /// Drop everything queued in both FIFOs and come back up empty.
    ///
    /// Clearing SPE keeps the TX FIFO contents, so this pulses the RCC reset instead. Nothing is
    /// preloaded; the caller stages the next byte.
    fn flush(&mut self) {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2rstr.modify(|_, w| w.spi4rst().set_bit());
        rcc.apb2rstr.modify(|_, w| w.spi4rst().clear_bit());
        self.configure();
    }

    #[inline]
    fn read_dr(&mut self) -> u8 {
        // 8-bit access; a 16-bit read would pop two frames
        unsafe { core::ptr::read_volatile(&self.spi.dr as *const _ as *const u8) }
    }

    #[inline]
    fn write_dr(&mut self, byte: u8) {
        // 8-bit access; a 16-bit write would queue two frames
        unsafe { core::ptr::write_volatile(&self.spi.dr as *const _ as *mut u8, byte) }
    }
}

impl BusPort for SpiSlave {
    #[inline]
    fn stage(&mut self, byte: u8) {
        while self.spi.sr.read().txe().bit_is_clear() {}
        self.write_dr(byte);
    }

    fn wait_exchange(&mut self) -> Option<u8> {
        loop {
            if let Some(byte) = self.read() {
                return Some(byte);
            }
            if self.deselected() {
                self.flush();
                return None;
            }
        }
    }
}
