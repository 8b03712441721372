// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Debug console on a USART.
//!
//! The node logs its configuration at startup and one [`CycleReport`] line per poll iteration.
//! Nothing here is called from the bus interrupt; a blocking write there would stall the reply.
//!
//! To access the terminal on the host machine, connect to the debug USB port and use
//! ```text
//! $ screen /dev/tty.usbmodem* 115200
//! ```

use core::fmt::{self, Write};
use nb::block;

use stm32f7xx_hal::{
    prelude::*,
    serial::{Instance, Pins, Serial, Tx},
};

use crate::config::NodeConfig;
use crate::control::CycleReport;

pub struct Usart<U: Instance> {
    tx: Tx<U>,
}

impl<U: Instance> Usart<U> {
    /// Take the TX half of an initialized serial port. RX is unused.
    pub fn new<PINS: Pins<U>>(serial: Serial<U, PINS>) -> Self {
        let (tx, _rx) = serial.split();
        Self { tx }
    }

    /// Write string and CRLF terminator.
    pub fn println(&mut self, s: &str) {
        self.put(s);
        self.put("\r\n");
    }

    /// Print the banner and the active tunables and wait for them to drain.
    pub fn startup(&mut self, cfg: &NodeConfig) {
        self.println("argus-node starting");
        let _ = writeln!(
            self,
            "  battery raw {}..{}\r\n  duty fwd={} rev={} turn={}\r\n  poll {} ms, echo timeout {} us\r",
            cfg.battery.raw_empty,
            cfg.battery.raw_full,
            cfg.drive.forward_duty,
            cfg.drive.reverse_duty,
            cfg.drive.turn_duty,
            cfg.poll_interval_ms,
            cfg.echo_timeout_us,
        );
        self.flush();
    }

    /// One line per poll iteration.
    pub fn report(&mut self, report: &CycleReport) {
        let _ = writeln!(self, "{}\r", report);
    }

    /// Block until the hardware TX FIFO/drain is flushed.
    pub fn flush(&mut self) {
        let _ = block!(self.tx.flush());
    }

    fn put(&mut self, s: &str) {
        for &b in s.as_bytes() {
            let _ = block!(self.tx.write(b));
        }
    }
}

impl<U: Instance> fmt::Write for Usart<U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.put(s);
        Ok(())
    }
}
