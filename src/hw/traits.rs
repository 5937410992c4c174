// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Peripheral boundaries used by the portable core.
//!
//! The board implementations live next to this file and are only built with the `board` feature;
//! tests drive the same code through [`crate::hw::mock`].

use crate::error::{BusError, TransportError};

/// Register-oriented sensor bus (I2C).
///
/// Both calls block until the transaction completes or the peripheral driver times out.
pub trait SensorBus {
    /// Write `bytes` starting at register `reg` of the device at `addr`.
    fn write_register(&mut self, addr: u8, reg: u8, bytes: &[u8]) -> Result<(), BusError>;

    /// Fill `buf` with consecutive registers starting at `reg`.
    fn read_registers(&mut self, addr: u8, reg: u8, buf: &mut [u8]) -> Result<(), BusError>;
}

impl<T: SensorBus + ?Sized> SensorBus for &mut T {
    fn write_register(&mut self, addr: u8, reg: u8, bytes: &[u8]) -> Result<(), BusError> {
        (**self).write_register(addr, reg, bytes)
    }

    fn read_registers(&mut self, addr: u8, reg: u8, buf: &mut [u8]) -> Result<(), BusError> {
        (**self).read_registers(addr, reg, buf)
    }
}

/// Receive side of a serial link, polled one byte at a time.
pub trait ByteSource {
    /// True if [`ByteSource::read_byte`] will return without waiting.
    fn is_byte_available(&mut self) -> bool;

    /// Take the next byte. Only call after [`ByteSource::is_byte_available`] returned true.
    fn read_byte(&mut self) -> Result<u8, BusError>;
}

/// One relative-pointer (boot mouse) report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerReport {
    pub buttons: u8,
    pub dx: i8,
    pub dy: i8,
    pub wheel: i8,
    pub pan: i8,
}

impl PointerReport {
    /// Motion-only report: no buttons, no wheel.
    pub const fn motion(dx: i8, dy: i8) -> Self {
        Self {
            buttons: 0,
            dx,
            dy,
            wheel: 0,
            pan: 0,
        }
    }
}

/// Host-side HID channel.
pub trait HostTransport {
    /// Run the device stack's background work. Must be called at bounded intervals or the host
    /// drops the device.
    fn service(&mut self);

    /// True when the interrupt endpoint can take another report.
    fn is_ready(&mut self) -> bool;

    fn submit_pointer_report(&mut self, report: PointerReport) -> Result<(), TransportError>;
}

/// Blocking millisecond delay.
pub trait Delay {
    fn delay_ms(&mut self, ms: u32);
}
