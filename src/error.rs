// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Error types shared by the sensor, serial, and USB boundaries.
//!
//! HAL-specific errors are mapped into these at the `hw` edge so that the portable core never
//! depends on a particular MCU family.

use core::fmt;

/// A failed transaction on the sensor bus or the radar serial link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    /// The addressed device did not acknowledge.
    Nack,
    /// Any other I2C failure (bus error, arbitration loss, timeout).
    I2c,
    /// Serial receive error (overrun, framing, noise, parity).
    Serial,
    /// A device answered but its identity register did not match.
    UnexpectedDevice { expected: u8, found: u8 },
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusError::Nack => f.write_str("device did not acknowledge"),
            BusError::I2c => f.write_str("i2c transaction failed"),
            BusError::Serial => f.write_str("serial receive error"),
            BusError::UnexpectedDevice { expected, found } => {
                write!(f, "unexpected device id {found:#04x} (expected {expected:#04x})")
            }
        }
    }
}

/// Failure to hand a report to the host transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// The endpoint buffer is still full; the report was dropped.
    Busy,
    /// The USB stack rejected the report.
    Usb,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Busy => f.write_str("hid endpoint busy"),
            TransportError::Usb => f.write_str("usb error"),
        }
    }
}

/// Failure of the startup bias calibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationError {
    /// The configured sample count was zero.
    EmptyRun,
    /// A sensor read failed part way through the run.
    Bus(BusError),
}

impl From<BusError> for CalibrationError {
    fn from(e: BusError) -> Self {
        CalibrationError::Bus(e)
    }
}

impl fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalibrationError::EmptyRun => f.write_str("calibration sample count is zero"),
            CalibrationError::Bus(e) => write!(f, "calibration aborted: {e}"),
        }
    }
}
