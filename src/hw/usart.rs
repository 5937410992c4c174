// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USART abstraction layer.
//!
//! - `Usart` is the transmit-only debug console. It implements `core::fmt::Write`, so
//!   `writeln!` works on it.
//! - `SerialRx` is the receive side of the radar link, polled one byte at a time.
//!
//! Note: When using `writeln!`, be sure to include `\r` (CR) in the format string to ensure correct
//! line endings on the terminal.
//!
//! To access the terminal on the host machine, connect to the ST-LINK USB port and use
//! ```text
//! $ screen /dev/tty.usbmodem* 115200
//! ```
//!
//! To close the debug terminal, press `Ctrl+A` then `Ctrl+\` then `y`.

use core::fmt;
use embedded_hal::serial::{Read, Write};
use nb::block;

use stm32f7xx_hal::serial::{Instance, Pins, Rx, Serial, Tx};

use crate::error::BusError;
use crate::hw::ByteSource;

pub struct Usart<U: Instance> {
    tx: Tx<U>,
}

impl<U: Instance> Usart<U> {
    pub fn new<PINS: Pins<U>>(serial: Serial<U, PINS>) -> Self {
        let (tx, _rx) = serial.split();
        Self { tx }
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }

    pub fn write_str(&mut self, s: &str) {
        for &b in s.as_bytes() {
            self.write_byte(b);
        }
    }

    /// Write string and CRLF terminator.
    #[inline]
    pub fn println(&mut self, s: &str) {
        self.write_str(s);
        self.write_str("\r\n");
    }

    /// Block until the hardware TX FIFO/drain is flushed.
    #[inline]
    pub fn flush(&mut self) {
        let _ = block!(self.tx.flush());
    }
}

// Implement `core::fmt::Write` so we can use `write!` / `writeln!` on `Usart`.
impl<U: Instance> fmt::Write for Usart<U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        Usart::write_str(self, s);
        Ok(())
    }
}

/// Receive half of a serial port with one byte of lookahead.
///
/// The HAL can only tell whether a byte is waiting by trying to read it, so a successful probe is
/// parked here until [`ByteSource::read_byte`] takes it.
pub struct SerialRx<U: Instance> {
    rx: Rx<U>,
    pending: Option<Result<u8, BusError>>,
}

impl<U: Instance> SerialRx<U> {
    pub fn new<PINS: Pins<U>>(serial: Serial<U, PINS>) -> Self {
        let (_tx, rx) = serial.split();
        Self { rx, pending: None }
    }
}

impl<U: Instance> ByteSource for SerialRx<U> {
    fn is_byte_available(&mut self) -> bool {
        if self.pending.is_some() {
            return true;
        }
        match self.rx.read() {
            Ok(b) => {
                self.pending = Some(Ok(b));
                true
            }
            Err(nb::Error::WouldBlock) => false,
            // Overrun, framing, noise: surface it on the next read.
            Err(nb::Error::Other(_)) => {
                self.pending = Some(Err(BusError::Serial));
                true
            }
        }
    }

    fn read_byte(&mut self) -> Result<u8, BusError> {
        match self.pending.take() {
            Some(r) => r,
            None => block!(self.rx.read()).map_err(|_| BusError::Serial),
        }
    }
}
